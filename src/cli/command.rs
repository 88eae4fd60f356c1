use std::path::PathBuf;

/// One invocation of the command-line tool, independent of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render a template file and print the decoded document.
    Render {
        template: PathBuf,
        /// `NAME=VALUE` bindings; later entries and these override `vars_json`.
        vars: Vec<String>,
        vars_json: Option<PathBuf>,
        /// Force extended JSON regardless of configuration.
        extended: bool,
    },
    /// Print the placeholder names a template references.
    Placeholders { template: PathBuf },
    /// Validate an identifier and print its canonical hex form.
    Oid {
        hex: String,
        /// Substitute a generated identifier instead of failing.
        fallback: bool,
    },
}
