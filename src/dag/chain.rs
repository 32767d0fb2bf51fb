// src/dag/chain.rs

use std::sync::Arc;

use crate::dag::task::Task;

/// Ordered tasks built for one input structure.
///
/// Every task after the first has the task before it as its only parent.
#[derive(Debug, Clone, Default)]
pub struct TaskChain {
    tasks: Vec<Arc<Task>>,
}

impl TaskChain {
    pub fn new(tasks: Vec<Arc<Task>>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.tasks.iter()
    }

    pub fn first(&self) -> Option<&Arc<Task>> {
        self.tasks.first()
    }

    pub fn last(&self) -> Option<&Arc<Task>> {
        self.tasks.last()
    }

    pub fn get(&self, idx: usize) -> Option<&Arc<Task>> {
        self.tasks.get(idx)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    pub fn into_tasks(self) -> Vec<Arc<Task>> {
        self.tasks
    }
}

impl<'a> IntoIterator for &'a TaskChain {
    type Item = &'a Arc<Task>;
    type IntoIter = std::slice::Iter<'a, Arc<Task>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
