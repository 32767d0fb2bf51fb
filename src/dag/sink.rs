// src/dag/sink.rs

use std::io::Write;

use tracing::info;

use crate::dag::workflow::Workflow;
use crate::errors::Result;

/// Anything that takes a finished workflow off our hands (an execution
/// engine, a launchpad, a file).
pub trait WorkflowSink {
    fn submit(&mut self, workflow: &Workflow) -> Result<()>;
}

/// Writes the workflow as a TOML [`WorkflowDocument`](crate::dag::WorkflowDocument).
pub struct TomlSink<W: Write> {
    writer: W,
}

impl<W: Write> TomlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> WorkflowSink for TomlSink<W> {
    fn submit(&mut self, workflow: &Workflow) -> Result<()> {
        let doc = workflow.to_document();
        let text = toml::to_string_pretty(&doc)?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        info!(
            workflow = %workflow.name(),
            tasks = workflow.len(),
            bytes = text.len(),
            "workflow document written"
        );
        Ok(())
    }
}
