//! # peg-playground
//!
//! Remote build-and-run helper for the peg grammar playground.
//!
//! The playground lets a documentation page edit a grammar snippet, assemble
//! it into a complete C++ program, and execute it on Compiler Explorer. This
//! crate is the non-UI half of that page: text assembly, the compile API
//! protocol, and the shareable-link codec. Nothing here compiles or parses a
//! grammar itself; the remote service is a fixed black box.

pub mod playground;

pub use playground::assemble::{assemble, macro_line, FragmentSet, Target};
pub use playground::client::PlaygroundClient;
pub use playground::config::{LibraryRef, ServiceConfig, TemplateLocations};
pub use playground::execute::Outcome;
pub use playground::loader::ExampleRecord;
pub use playground::scan::list_productions;
