//! Source assembler: stitches template fragments around the user's grammar.
//!
//! Two program variants exist and differ only in segment placement:
//! - `Target::Playground` runs in the in-page sandbox and needs the
//!   single-header fragment up front.
//! - `Target::Godbolt` is submitted to Compiler Explorer; its prefix
//!   fragment ends mid-construct and the grammar text must be appended
//!   without a separating newline.
//!
//! The asymmetry is a coupling with the fragment files themselves, so both
//! variants live behind one explicit enum instead of two code paths.

/// Macro name binding the chosen production in the fixed driver text.
pub const PRODUCTION_MACRO: &str = "PLAYGROUND_PRODUCTION";

/// Which sandbox the assembled program targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Interactive in-page sandbox.
    Playground,
    /// External Compiler Explorer service.
    Godbolt,
}

/// Template fragments for one assembly.
///
/// `header` is only used by the playground variant; each field degrades to
/// an empty string when its resource could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentSet {
    pub header: String,
    pub prefix: String,
    pub main: String,
}

/// The macro line binding `production` as the entry point.
pub fn macro_line(production: &str) -> String {
    format!("#define {} {}", PRODUCTION_MACRO, production)
}

/// Assemble a complete program from fragments, grammar text, and the chosen
/// production name.
///
/// The output is deterministic in its inputs. Exactly one macro line is
/// emitted, ahead of every fixed fragment that uses it.
pub fn assemble(target: Target, fragments: &FragmentSet, grammar: &str, production: &str) -> String {
    let macros = macro_line(production);
    match target {
        Target::Playground => format!(
            "{}\n{}\n{}\n{}\n{}",
            fragments.header, macros, fragments.prefix, grammar, fragments.main
        ),
        // The godbolt prefix is textually adjacent to the grammar: no
        // newline between them.
        Target::Godbolt => format!(
            "{}\n{}{}\n{}",
            macros, fragments.prefix, grammar, fragments.main
        ),
    }
}
