//! Fail-soft retrieval of static text resources.
//!
//! Template fragments are plain-text files served next to the documentation
//! page. A missing or unreachable fragment must never abort an assembly, so
//! every failure — transport error, non-success status, undecodable body —
//! degrades to an empty string. Fragment fetches are independent reads with
//! no shared state, so the per-target loads run concurrently.

use reqwest::Client;

use crate::playground::assemble::{FragmentSet, Target};
use crate::playground::config::TemplateLocations;

/// Fetch a text resource, returning empty text on any failure.
pub async fn fetch_text(client: &Client, url: &str) -> String {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            response.text().await.unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// Load the fragment set for one assembly target.
///
/// The godbolt variant has no header fragment; its slot stays empty.
pub async fn load_fragments(
    client: &Client,
    locations: &TemplateLocations,
    target: Target,
) -> FragmentSet {
    match target {
        Target::Playground => {
            let (header, prefix, main) = tokio::join!(
                fetch_text(client, &locations.playground_header),
                fetch_text(client, &locations.playground_prefix),
                fetch_text(client, &locations.playground_main),
            );
            FragmentSet {
                header,
                prefix,
                main,
            }
        }
        Target::Godbolt => {
            let (prefix, main) = tokio::join!(
                fetch_text(client, &locations.godbolt_prefix),
                fetch_text(client, &locations.godbolt_main),
            );
            FragmentSet {
                header: String::new(),
                prefix,
                main,
            }
        }
    }
}
