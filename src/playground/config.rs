//! Fixed wiring for the remote execution service.
//!
//! Everything the protocol pins — endpoints, compiler, library build,
//! compile flags — lives here as data so the rest of the crate stays free
//! of magic strings. `Default` targets the public Compiler Explorer
//! instance and the trunk build of the peg library.

use serde::{Deserialize, Serialize};

/// A helper library the remote service links into the build.
///
/// `id` and `version` are the service's own identifiers; the pair is part
/// of the external contract and travels verbatim in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRef {
    pub id: String,
    pub version: String,
}

/// Remote service configuration consumed by the execution client and the
/// session codec.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base path of the compile/shortener/shortlinkinfo endpoints.
    pub api_base: String,
    /// Host prefix for the self-contained clientstate URL fallback.
    pub share_base: String,
    /// Compiler the service should use.
    pub compiler_id: String,
    /// Library build to link.
    pub library: LibraryRef,
    /// Compile flags for execution runs.
    pub user_arguments: String,
    /// Compile flags recorded in shared sessions.
    pub executor_options: String,
    /// Language tag expected by the service.
    pub language: String,
    /// Exit status the driver program uses to signal an internal failure.
    ///
    /// This is a convention of the executed driver, not of the service or of
    /// this client; point it elsewhere when targeting a different driver.
    pub trap_exit_code: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            api_base: "https://godbolt.org/api".to_string(),
            share_base: "https://godbolt.org".to_string(),
            compiler_id: "clang_trunk".to_string(),
            library: LibraryRef {
                id: "peg".to_string(),
                version: "trunk".to_string(),
            },
            user_arguments: "-fno-color-diagnostics -std=c++20".to_string(),
            executor_options: "-std=c++20".to_string(),
            language: "c++".to_string(),
            trap_exit_code: 3,
        }
    }
}

/// Locations of the static template fragments the assembler stitches
/// around the user's grammar.
///
/// These are plain-text resources served next to the documentation page;
/// a missing fragment degrades to empty text rather than failing assembly.
#[derive(Debug, Clone)]
pub struct TemplateLocations {
    pub playground_header: String,
    pub playground_prefix: String,
    pub playground_main: String,
    pub godbolt_prefix: String,
    pub godbolt_main: String,
}

impl Default for TemplateLocations {
    fn default() -> Self {
        TemplateLocations {
            playground_header: "/assets/cpp/playground_headers.single.hpp".to_string(),
            playground_prefix: "/assets/cpp/playground_prefix.cpp".to_string(),
            playground_main: "/assets/cpp/playground_main.cpp".to_string(),
            godbolt_prefix: "/assets/cpp/godbolt_prefix.cpp".to_string(),
            godbolt_main: "/assets/cpp/godbolt_main.cpp".to_string(),
        }
    }
}
