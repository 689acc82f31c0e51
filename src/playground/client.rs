//! Facade tying configuration and one HTTP client to the playground flows.

use reqwest::Client;

use crate::playground::assemble::{assemble, FragmentSet, Target};
use crate::playground::config::{ServiceConfig, TemplateLocations};
use crate::playground::execute::{compile_and_run, Outcome};
use crate::playground::fetch::load_fragments;
use crate::playground::loader::{load_example_url, ExampleRecord};
use crate::playground::scan::list_productions;
use crate::playground::share::{self, DecodeError};

/// One playground instance: a reusable HTTP client plus the fixed service
/// and template wiring. Each method is one user action; calls share no
/// mutable state and never retry.
#[derive(Debug, Clone)]
pub struct PlaygroundClient {
    http: Client,
    config: ServiceConfig,
    templates: TemplateLocations,
}

impl PlaygroundClient {
    /// Client with the default service wiring.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default(), TemplateLocations::default())
    }

    /// Client with explicit wiring, for other instances or drivers.
    pub fn with_config(config: ServiceConfig, templates: TemplateLocations) -> Self {
        PlaygroundClient {
            http: Client::new(),
            config,
            templates,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Candidate entry productions declared in `grammar`, in source order.
    pub fn productions(&self, grammar: &str) -> Vec<String> {
        list_productions(grammar)
    }

    /// Fetch the target's template fragments and assemble a full program.
    pub async fn preprocess_source(
        &self,
        target: Target,
        grammar: &str,
        production: &str,
    ) -> String {
        let fragments: FragmentSet = load_fragments(&self.http, &self.templates, target).await;
        assemble(target, &fragments, grammar, production)
    }

    /// Run assembled source remotely; `mode` becomes the program's sole
    /// argument and `input` its stdin.
    pub async fn compile_and_run(&self, source: &str, input: &str, mode: &str) -> Outcome {
        compile_and_run(&self.http, &self.config, source, input, mode).await
    }

    /// Short share link for the session, falling back to the
    /// self-contained URL when the shortener is unreachable.
    pub async fn permalink(&self, source: &str, input: &str) -> String {
        share::permalink(&self.http, &self.config, source, input).await
    }

    /// Self-contained share URL embedding the whole session.
    pub fn local_url(&self, source: &str, input: &str) -> String {
        share::local_url(&self.config, source, input)
    }

    /// Restore editor state from a previously shared short link.
    pub async fn load_short_link(&self, id: &str) -> Result<ExampleRecord, DecodeError> {
        share::load_short_link(&self.http, &self.config, id).await
    }

    /// Restore editor state from a static example resource.
    pub async fn load_example(&self, url: &str) -> ExampleRecord {
        load_example_url(&self.http, url).await
    }
}

impl Default for PlaygroundClient {
    fn default() -> Self {
        Self::new()
    }
}
