//! Main module for the playground helper
//!
//! This module provides:
//! - Production scanning over grammar text (`scan`)
//! - Two-variant program assembly from template fragments (`assemble`)
//! - The Compiler Explorer compile/execute protocol (`execute`)
//! - The shareable session-link codec (`share`)
//! - Static example loading (`loader`)
//! - A facade tying these to one HTTP client and configuration (`client`)

pub mod assemble;
pub mod client;
pub mod config;
pub mod execute;
pub mod fetch;
pub mod loader;
pub mod scan;
pub mod share;

// Re-export the facade and the value types callers handle directly
pub use assemble::{assemble as assemble_source, FragmentSet, Target};
pub use client::PlaygroundClient;
pub use config::{LibraryRef, ServiceConfig, TemplateLocations};
pub use execute::{ExecutionReply, Outcome};
pub use loader::ExampleRecord;
pub use share::{ClientState, DecodeError};
