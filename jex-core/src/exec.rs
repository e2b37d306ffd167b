//! Command construction and subprocess execution

use crate::error::{JexError, Result};
use crate::template::TemplateSet;
use serde_json::Value;
use std::process::{Command, Stdio};

/// Render the compiled argv templates against one record, producing the
/// concrete command line. Position 0 is the program to execute.
///
/// Pure rendering: no process is touched. Any template failure aborts the
/// whole record — there is no partial argv.
pub fn build_argv(templates: &TemplateSet, record: &Value) -> Result<Vec<String>> {
    templates.render_argv(record)
}

/// Execute a concrete argv and capture its standard output.
///
/// The child's stderr is inherited so its diagnostics reach the operator
/// live; stdin is closed. Blocks until the child exits — there is no
/// timeout, so a hung child hangs the run.
pub fn run_command(argv: &[String]) -> Result<String> {
    let Some((program, args)) = argv.split_first() else {
        return Err(JexError::EmptyArgv);
    };

    tracing::debug!(program = %program, args = args.len(), "spawning command");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| JexError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(JexError::CommandFailed {
            program: program.clone(),
            status: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
