//! Session state codec for the service's link-sharing representation.
//!
//! Encoding builds the exact clientstate shape the service stores: one
//! session, no compiler panes, one executor pinned to the configured
//! compiler and library. The serialized JSON is base64-encoded downstream,
//! and that encoding cannot carry raw non-ASCII text, so every code point
//! above Basic Latin is pre-escaped as `\uXXXX` before anything else
//! happens to the string.
//!
//! Decoding assumes the stored source was produced by this crate's own
//! assembler: the macro line names the production and a fixed pair of
//! delimiter comments brackets the grammar region. A source missing either
//! pattern is a hard error, not an empty record.

use std::fmt;
use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::playground::assemble::PRODUCTION_MACRO;
use crate::playground::config::{LibraryRef, ServiceConfig};
use crate::playground::loader::ExampleRecord;

/// Delimiter comments bracketing the grammar region in the fixed templates.
pub const GRAMMAR_OPEN: &str = "//=== grammar ===//";
pub const GRAMMAR_CLOSE: &str = "//=== main function ===//";

/// Stored editor session, in the service's own field naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub compilers: Vec<serde_json::Value>,
    #[serde(default)]
    pub executors: Vec<Executor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    pub compiler: ExecutorCompiler,
    #[serde(default)]
    pub stdin: String,
    #[serde(default)]
    pub stdin_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorCompiler {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub libs: Vec<LibraryRef>,
    #[serde(default)]
    pub options: String,
}

/// Why a stored source could not be decoded back into editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload was not a clientstate document.
    Malformed(String),
    /// The state holds no session.
    MissingSession,
    /// The first session holds no executor.
    MissingExecutor,
    /// The source has no production macro line.
    MissingProduction,
    /// The source has no grammar delimiter pair.
    MissingGrammar,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed(msg) => write!(f, "Malformed session state: {}", msg),
            DecodeError::MissingSession => write!(f, "Session state holds no session"),
            DecodeError::MissingExecutor => write!(f, "Session holds no executor"),
            DecodeError::MissingProduction => {
                write!(f, "Stored source has no {} macro line", PRODUCTION_MACRO)
            }
            DecodeError::MissingGrammar => {
                write!(f, "Stored source has no grammar delimiters")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Escape every code point above Basic Latin as a `\uXXXX` sequence.
///
/// Escaping is per UTF-16 code unit, so code points beyond the BMP become
/// surrogate pairs — byte-identical to what the service's own frontend
/// produces before base64-encoding. The input is JSON text, so non-ASCII
/// characters only occur inside string literals and escaping them is
/// meaning-preserving.
pub fn escape_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if (c as u32) < 0x80 {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units).iter() {
                write!(out, "\\u{:04x}", unit).expect("writing to a String cannot fail");
            }
        }
    }
    out
}

/// Build the clientstate for one editor session.
pub fn client_state(cfg: &ServiceConfig, source: &str, input: &str) -> ClientState {
    ClientState {
        sessions: vec![Session {
            id: 1,
            language: cfg.language.clone(),
            source: source.to_string(),
            compilers: Vec::new(),
            executors: vec![Executor {
                compiler: ExecutorCompiler {
                    id: cfg.compiler_id.clone(),
                    libs: vec![cfg.library.clone()],
                    options: cfg.executor_options.clone(),
                },
                stdin: input.to_string(),
                stdin_visible: true,
            }],
        }],
    }
}

fn encoded_state(cfg: &ServiceConfig, source: &str, input: &str) -> String {
    let state = client_state(cfg, source, input);
    escape_json(&serde_json::to_string(&state).expect("client state serializes"))
}

// The characters `encodeURIComponent` leaves unescaped.
const COMPONENT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Self-contained share URL embedding the whole state.
///
/// Used directly and as the fallback when the shortener is unreachable.
pub fn local_url(cfg: &ServiceConfig, source: &str, input: &str) -> String {
    let encoded = BASE64.encode(encoded_state(cfg, source, input));
    format!(
        "{}/clientstate/{}",
        cfg.share_base,
        utf8_percent_encode(&encoded, COMPONENT_ESCAPE)
    )
}

#[derive(Debug, Deserialize)]
struct ShortenerResponse {
    url: String,
}

/// Ask the service to shorten the state into a short link.
///
/// Any transport or protocol failure falls back to [`local_url`]; sharing
/// never fails outright.
pub async fn permalink(client: &Client, cfg: &ServiceConfig, source: &str, input: &str) -> String {
    let body = encoded_state(cfg, source, input);
    let response = client
        .post(format!("{}/shortener", cfg.api_base))
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .body(body)
        .send()
        .await;
    match response {
        Ok(response) if response.status().is_success() => {
            match response.json::<ShortenerResponse>().await {
                Ok(shortened) => shortened.url,
                Err(_) => local_url(cfg, source, input),
            }
        }
        _ => local_url(cfg, source, input),
    }
}

static PRODUCTION_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"#define {} ([a-zA-Z_0-9]+)", PRODUCTION_MACRO)).unwrap()
});

static GRAMMAR_REGION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s){}(.*){}",
        regex::escape(GRAMMAR_OPEN),
        regex::escape(GRAMMAR_CLOSE)
    ))
    .unwrap()
});

/// Recover editor state from a stored clientstate.
///
/// The source must carry the encoder's macro line and grammar delimiters;
/// their absence is an error rather than an empty record, since an empty
/// record cannot say which pattern failed.
pub fn example_from_state(state: &ClientState) -> Result<ExampleRecord, DecodeError> {
    let session = state.sessions.first().ok_or(DecodeError::MissingSession)?;
    let executor = session
        .executors
        .first()
        .ok_or(DecodeError::MissingExecutor)?;

    let production = PRODUCTION_LINE_REGEX
        .captures(&session.source)
        .map(|caps| caps[1].to_string())
        .ok_or(DecodeError::MissingProduction)?;

    let grammar = GRAMMAR_REGION_REGEX
        .captures(&session.source)
        .map(|caps| caps[1].trim().to_string())
        .ok_or(DecodeError::MissingGrammar)?;

    Ok(ExampleRecord {
        grammar,
        input: executor.stdin.clone(),
        production,
    })
}

/// Fetch a short link's stored state and decode it.
///
/// An unreachable service degrades to an all-empty record; a reachable
/// service returning state this encoder could not have produced is a
/// [`DecodeError`].
pub async fn load_short_link(
    client: &Client,
    cfg: &ServiceConfig,
    id: &str,
) -> Result<ExampleRecord, DecodeError> {
    let url = format!("{}/shortlinkinfo/{}", cfg.api_base, id);
    let response = match client.get(url).send().await {
        Ok(response) if response.status().is_success() => response,
        _ => return Ok(ExampleRecord::default()),
    };
    let state = response
        .json::<ClientState>()
        .await
        .map_err(|err| DecodeError::Malformed(err.to_string()))?;
    example_from_state(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_json_passes_through_unchanged() {
        let json = r#"{"source":"struct p {};"}"#;
        assert_eq!(escape_json(json), json);
    }

    #[test]
    fn non_ascii_becomes_u_escapes() {
        assert_eq!(escape_json("a\u{00e9}b"), "a\\u00e9b");
        assert_eq!(escape_json("\u{20ac}"), "\\u20ac");
    }

    #[test]
    fn astral_code_points_become_surrogate_pairs() {
        assert_eq!(escape_json("\u{1f600}"), "\\ud83d\\ude00");
    }

    #[test]
    fn client_state_matches_the_sharing_contract() {
        let cfg = ServiceConfig::default();
        let state = client_state(&cfg, "int main() {}", "abc");
        let value = serde_json::to_value(&state).expect("state serializes");
        assert_eq!(value["sessions"][0]["id"], 1);
        assert_eq!(value["sessions"][0]["language"], "c++");
        assert_eq!(value["sessions"][0]["source"], "int main() {}");
        assert_eq!(
            value["sessions"][0]["compilers"].as_array().map(Vec::len),
            Some(0)
        );
        let executor = &value["sessions"][0]["executors"][0];
        assert_eq!(executor["compiler"]["id"], "clang_trunk");
        assert_eq!(executor["compiler"]["libs"][0]["id"], "peg");
        assert_eq!(executor["compiler"]["options"], "-std=c++20");
        assert_eq!(executor["stdin"], "abc");
        assert_eq!(executor["stdinVisible"], true);
    }

    #[test]
    fn local_url_is_percent_encoded_base64() {
        let cfg = ServiceConfig::default();
        let url = local_url(&cfg, "x", "y");
        let payload = url
            .strip_prefix("https://godbolt.org/clientstate/")
            .expect("fixed url prefix");
        // Base64 padding is percent-encoded, never raw.
        assert!(!payload.contains('='));
        assert!(!payload.contains('+'));
        assert!(!payload.contains('/'));
    }

    #[test]
    fn missing_macro_line_is_a_hard_error() {
        let cfg = ServiceConfig::default();
        let mut state = client_state(&cfg, "no markers here", "");
        state.sessions[0].source = "int main() {}".to_string();
        assert_eq!(
            example_from_state(&state),
            Err(DecodeError::MissingProduction)
        );
    }

    #[test]
    fn missing_delimiters_is_a_hard_error() {
        let cfg = ServiceConfig::default();
        let source = format!("#define {} p\nint main() {{}}", PRODUCTION_MACRO);
        let state = client_state(&cfg, &source, "");
        assert_eq!(example_from_state(&state), Err(DecodeError::MissingGrammar));
    }

    #[test]
    fn empty_state_reports_the_missing_session() {
        let state = ClientState {
            sessions: Vec::new(),
        };
        assert_eq!(example_from_state(&state), Err(DecodeError::MissingSession));
    }

    #[test]
    fn session_without_executor_reports_the_missing_executor() {
        let cfg = ServiceConfig::default();
        let mut state = client_state(&cfg, "int main() {}", "");
        state.sessions[0].executors.clear();
        assert_eq!(
            example_from_state(&state),
            Err(DecodeError::MissingExecutor)
        );
    }

    fn unreachable_config() -> ServiceConfig {
        let mut cfg = ServiceConfig::default();
        // Reserved TLD, guaranteed not to resolve.
        cfg.api_base = "http://api.invalid/api".to_string();
        cfg
    }

    #[tokio::test]
    async fn unreachable_shortener_falls_back_to_the_local_url() {
        let cfg = unreachable_config();
        let client = Client::new();
        let url = permalink(&client, &cfg, "struct p {};", "in").await;
        assert_eq!(url, local_url(&cfg, "struct p {};", "in"));
    }

    #[tokio::test]
    async fn unreachable_shortlinkinfo_degrades_to_an_empty_record() {
        let cfg = unreachable_config();
        let client = Client::new();
        let record = load_short_link(&client, &cfg, "abc123").await;
        assert_eq!(record, Ok(ExampleRecord::default()));
    }
}
