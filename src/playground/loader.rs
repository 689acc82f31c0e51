//! Static example loader.
//!
//! Example files are grammar snippets with at most one `// INPUT:` marker
//! line carrying the stdin text for the run. The marker's text holds
//! literal `\n` pairs where the input needs real newlines, since the marker
//! itself must stay on one line.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::playground::fetch::fetch_text;

/// Restorable editor state: the grammar, its stdin, and the entry production.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleRecord {
    pub grammar: String,
    pub input: String,
    pub production: String,
}

/// Entry production used by every static example.
pub const EXAMPLE_PRODUCTION: &str = "production";

static INPUT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"// INPUT:(.*)\n").unwrap());

/// Split raw example text into grammar and input.
///
/// The first marker line is removed from the grammar; its captured text,
/// with `\n` pairs expanded, becomes the input. No marker means empty input.
pub fn load_example(text: &str) -> ExampleRecord {
    let grammar = INPUT_REGEX.replace(text, "").trim().to_string();
    let input = INPUT_REGEX
        .captures(text)
        .map(|caps| caps[1].replace("\\n", "\n"))
        .unwrap_or_default();
    ExampleRecord {
        grammar,
        input,
        production: EXAMPLE_PRODUCTION.to_string(),
    }
}

/// Fetch an example resource and split it.
///
/// An unreachable resource degrades to empty text, so the record comes back
/// with an empty grammar rather than an error.
pub async fn load_example_url(client: &Client, url: &str) -> ExampleRecord {
    let text = fetch_text(client, url).await;
    load_example(&text)
}
