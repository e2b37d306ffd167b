//! Per-record pipeline orchestration

use crate::decode::decode_loose;
use crate::error::{JexError, Result};
use crate::exec;
use crate::input::InputDocument;
use crate::template::TemplateSet;
use serde_json::Value;

/// Pipeline configuration, populated once at startup and threaded
/// explicitly into the orchestrator; never read from ambient state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Argv template sources; position 0 renders to the program name.
    pub argv: Vec<String>,
    /// Map template source merging `In` and `Out` into the final value.
    pub map: String,
}

/// The compiled per-record pipeline.
#[derive(Debug)]
pub struct Pipeline {
    templates: TemplateSet,
}

impl Pipeline {
    /// Compile every template up front, so no subprocess runs against a
    /// half-built configuration.
    pub fn compile(config: &PipelineConfig) -> Result<Self> {
        if config.argv.is_empty() {
            return Err(JexError::EmptyArgv);
        }
        let templates = TemplateSet::compile(&config.argv, &config.map)?;
        Ok(Self { templates })
    }

    /// Run the full stage chain for one record: build the argv, execute it,
    /// decode the captured output, then render and decode the map template.
    ///
    /// The two decode steps share the raw-text fallback; the two render
    /// steps are fatal on failure.
    pub fn run_record(&self, record: &Value) -> Result<Value> {
        let argv = exec::build_argv(&self.templates, record)?;
        let stdout = exec::run_command(&argv)?;
        let out = decode_loose(&stdout);
        let mapped = self.templates.render_map(record, &out)?;
        Ok(decode_loose(&mapped))
    }

    /// Execute the pipeline over a full input document.
    ///
    /// A record set is processed strictly in input order, one subprocess at
    /// a time, so the output array's order matches the input's. The first
    /// failure aborts the whole run; no partial result is produced.
    pub fn execute(&self, document: &InputDocument) -> Result<Value> {
        self.execute_with_progress(document, |_, _| {})
    }

    /// Like [`Pipeline::execute`], reporting `(records_done, records_total)`
    /// to `progress` after each record completes.
    pub fn execute_with_progress<F>(&self, document: &InputDocument, mut progress: F) -> Result<Value>
    where
        F: FnMut(usize, usize),
    {
        match document {
            InputDocument::RecordSet(records) => {
                let total = records.len();
                let mut results = Vec::with_capacity(total);
                for (index, record) in records.iter().enumerate() {
                    tracing::debug!(record = index, total, "running record");
                    results.push(self.run_record(record)?);
                    progress(index + 1, total);
                }
                Ok(Value::Array(results))
            }
            InputDocument::SingleRecord(record) => {
                let result = self.run_record(record)?;
                progress(1, 1);
                Ok(result)
            }
        }
    }
}
