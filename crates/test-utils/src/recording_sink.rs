use std::sync::{Arc, Mutex};

use quenchflow::dag::{Workflow, WorkflowDocument, WorkflowSink};
use quenchflow::errors::Result;

/// A sink that records the document of every submitted workflow instead of
/// handing it to an execution engine.
#[derive(Clone, Default)]
pub struct RecordingSink {
    submitted: Arc<Mutex<Vec<WorkflowDocument>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<WorkflowDocument> {
        self.submitted.lock().unwrap().clone()
    }
}

impl WorkflowSink for RecordingSink {
    fn submit(&mut self, workflow: &Workflow) -> Result<()> {
        let doc = workflow.to_document();
        self.submitted.lock().unwrap().push(doc);
        Ok(())
    }
}
