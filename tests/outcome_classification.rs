//! Classification table for compile-endpoint responses
//!
//! Each case feeds a raw response body through the one boundary resolution
//! and checks the caller-facing outcome.

use peg_playground::playground::execute::{CompileResponse, Outcome};
use rstest::rstest;

const TRAP: i64 = 3;

fn classify(body: &str) -> Outcome {
    let response: CompileResponse = serde_json::from_str(body).expect("response body parses");
    response.resolve(TRAP).into()
}

#[rstest]
#[case::trapped(
    r#"{"didExecute":true,"code":3,"stderr":[{"text":"boom"}]}"#,
    Outcome::Failure { message: "boom".to_string() }
)]
#[case::clean_run(
    r#"{"didExecute":true,"code":0,"stdout":[{"text":"hi"}],"stderr":[]}"#,
    Outcome::Success { stdout: "hi".to_string(), stderr: "".to_string(), code: 0 }
)]
#[case::nonzero_exit_is_success(
    r#"{"didExecute":true,"code":1,"stdout":[],"stderr":[{"text":"parse error"}]}"#,
    Outcome::Success { stdout: "".to_string(), stderr: "parse error".to_string(), code: 1 }
)]
#[case::build_failure(
    r#"{"didExecute":false,"buildResult":{"stderr":[{"text":"err1"},{"text":"err2"}]}}"#,
    Outcome::Failure { message: "err1\nerr2".to_string() }
)]
#[case::build_failure_without_diagnostics(
    r#"{"didExecute":false}"#,
    Outcome::Failure { message: "".to_string() }
)]
#[case::multi_segment_streams(
    r#"{"didExecute":true,"code":0,"stdout":[{"text":"a"},{"text":"b"}],"stderr":[{"text":"w"}]}"#,
    Outcome::Success { stdout: "a\nb".to_string(), stderr: "w".to_string(), code: 0 }
)]
fn responses_classify_as_expected(#[case] body: &str, #[case] expected: Outcome) {
    assert_eq!(classify(body), expected);
}

#[test]
fn trapped_stderr_segments_are_newline_joined() {
    let outcome = classify(
        r#"{"didExecute":true,"code":3,"stderr":[{"text":"assertion"},{"text":"failed"}]}"#,
    );
    assert_eq!(
        outcome,
        Outcome::Failure {
            message: "assertion\nfailed".to_string()
        }
    );
}
