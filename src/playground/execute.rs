//! Remote execution client for the Compiler Explorer compile endpoint.
//!
//! One call performs one round trip: the assembled source, stdin text, and
//! run mode are shaped into the service's request body, and the structured
//! response is resolved exactly once at this boundary into a tagged
//! [`ExecutionReply`] (build failure / trapped execution / normal run)
//! before collapsing into the caller-facing [`Outcome`]. No retries, no
//! timeouts beyond the transport's own.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::playground::config::{LibraryRef, ServiceConfig};
use crate::playground::share::escape_json;

/// Request body for `POST {base}/compiler/{id}/compile`.
///
/// Field names and nesting are the service's contract; the filter set asks
/// for execution output only, never raw compilation artifacts.
#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    source: &'a str,
    options: RequestOptions<'a>,
    lang: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestOptions<'a> {
    user_arguments: &'a str,
    execute_parameters: ExecuteParameters<'a>,
    compiler_options: CompilerOptions,
    filters: Filters,
    tools: Vec<serde_json::Value>,
    libraries: [&'a LibraryRef; 1],
}

#[derive(Debug, Serialize)]
struct ExecuteParameters<'a> {
    args: [&'a str; 1],
    stdin: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    executor_request: bool,
}

#[derive(Debug, Serialize)]
struct Filters {
    execute: bool,
}

/// One text segment of the service's stdout/stderr streams.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSegment {
    #[serde(default)]
    pub text: String,
}

/// Diagnostics of a build that never reached execution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildResult {
    #[serde(default)]
    pub stderr: Vec<TextSegment>,
}

/// Raw response body of the compile endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    #[serde(default)]
    pub did_execute: bool,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub stdout: Vec<TextSegment>,
    #[serde(default)]
    pub stderr: Vec<TextSegment>,
    #[serde(default)]
    pub build_result: Option<BuildResult>,
}

/// The three shapes a compile response resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionReply {
    /// The program did not reach execution.
    BuildFailed { message: String },
    /// Execution started but exited with the driver's internal-failure code.
    Trapped { message: String },
    /// Execution completed; `code` may be any status, including nonzero.
    Ran {
        stdout: String,
        stderr: String,
        code: i64,
    },
}

/// Caller-facing result of one run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        stdout: String,
        stderr: String,
        code: i64,
    },
    Failure {
        message: String,
    },
}

// Every failure that never produced a structured response — send error,
// non-success status, undecodable body — shares one message prefix. The
// status form carries `<code> - <reason>` as its detail; the others carry
// the transport's own description.
fn service_error(detail: impl std::fmt::Display) -> Outcome {
    Outcome::Failure {
        message: format!("Compiler Explorer error: {}", detail),
    }
}

fn join_text(segments: &[TextSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

impl CompileResponse {
    /// Resolve the response into its tagged shape.
    ///
    /// `trap_exit_code` is the driver program's internal-failure sentinel;
    /// any other exit status counts as a completed run.
    pub fn resolve(&self, trap_exit_code: i64) -> ExecutionReply {
        if !self.did_execute {
            let message = self
                .build_result
                .as_ref()
                .map(|build| join_text(&build.stderr))
                .unwrap_or_default();
            return ExecutionReply::BuildFailed { message };
        }
        if self.code == trap_exit_code {
            ExecutionReply::Trapped {
                message: join_text(&self.stderr),
            }
        } else {
            ExecutionReply::Ran {
                stdout: join_text(&self.stdout),
                stderr: join_text(&self.stderr),
                code: self.code,
            }
        }
    }
}

impl From<ExecutionReply> for Outcome {
    fn from(reply: ExecutionReply) -> Outcome {
        match reply {
            ExecutionReply::BuildFailed { message } | ExecutionReply::Trapped { message } => {
                Outcome::Failure { message }
            }
            ExecutionReply::Ran {
                stdout,
                stderr,
                code,
            } => Outcome::Success {
                stdout,
                stderr,
                code,
            },
        }
    }
}

/// Submit `source` for remote compilation and execution.
///
/// `mode` is forwarded verbatim as the sole argument of the executed
/// program; `input` becomes its stdin. All failure classes come back as an
/// [`Outcome::Failure`] value, never as an error.
pub async fn compile_and_run(
    client: &Client,
    cfg: &ServiceConfig,
    source: &str,
    input: &str,
    mode: &str,
) -> Outcome {
    let request = CompileRequest {
        source,
        options: RequestOptions {
            user_arguments: &cfg.user_arguments,
            execute_parameters: ExecuteParameters {
                args: [mode],
                stdin: input,
            },
            compiler_options: CompilerOptions {
                executor_request: true,
            },
            filters: Filters { execute: true },
            tools: Vec::new(),
            libraries: [&cfg.library],
        },
        lang: &cfg.language,
    };
    let body =
        escape_json(&serde_json::to_string(&request).expect("compile request serializes"));

    let url = format!("{}/compiler/{}/compile", cfg.api_base, cfg.compiler_id);
    let response = match client
        .post(&url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .body(body)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => return service_error(err),
    };

    let status = response.status();
    if !status.is_success() {
        return service_error(format!(
            "{} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown")
        ));
    }

    match response.json::<CompileResponse>().await {
        Ok(result) => result.resolve(cfg.trap_exit_code).into(),
        Err(err) => service_error(err),
    }
}
