//! Error types for the jex pipeline

use thiserror::Error;

/// jex error types
#[derive(Debug, Error)]
pub enum JexError {
    /// Standard input is not valid JSON.
    #[error("Malformed JSON input: {0}")]
    MalformedInput(#[source] serde_json::Error),
    /// Input is valid JSON but its top-level value is not an array or object.
    #[error("Unsupported top-level JSON shape: {found} (expected array or object)")]
    UnsupportedTopLevel {
        /// Name of the rejected value kind.
        found: &'static str,
    },
    /// A template failed to parse at startup.
    #[error("Failed to compile template '{name}': {source}")]
    TemplateCompile {
        /// Template name (`arg0`, `arg1`, ..., or `map`).
        name: String,
        #[source]
        source: minijinja::Error,
    },
    /// A template failed to render against a record.
    #[error("Failed to render template '{name}': {source}")]
    TemplateRender {
        /// Template name (`arg0`, `arg1`, ..., or `map`).
        name: String,
        #[source]
        source: minijinja::Error,
    },
    /// No argv templates were given; position 0 must name a program.
    #[error("No command given: at least one argv template is required")]
    EmptyArgv,
    /// The child process could not be launched.
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that could not be started.
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The child process terminated unsuccessfully.
    #[error("Command '{program}' {}", exit_reason(.status))]
    CommandFailed {
        /// Program that was executed.
        program: String,
        /// Exit code, absent when the process was killed by a signal.
        status: Option<i32>,
    },
    /// I/O operation failed while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serializing the final document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn exit_reason(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JexError>;
