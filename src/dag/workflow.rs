// src/dag/workflow.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use crate::dag::chain::TaskChain;
use crate::dag::document::{TaskDocument, WorkflowDocument};
use crate::dag::task::Task;
use crate::errors::{QuenchflowError, Result};

/// Position of a task inside a [`Workflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Union of all task chains of one build call.
///
/// Tasks are numbered in chain order. A petgraph index mirrors the parent
/// references (edge direction: parent -> child) for graph queries. Parents
/// that are not part of the workflow itself (external parents handed to a
/// single-chain build) are kept on the task but have no edge here.
#[derive(Debug, Clone)]
pub struct Workflow {
    name: String,
    chains: Vec<TaskChain>,
    tasks: Vec<Arc<Task>>,
    chain_of: Vec<usize>,
    graph: DiGraph<TaskId, ()>,
}

impl Workflow {
    pub fn new(name: impl Into<String>, chains: Vec<TaskChain>) -> Self {
        let name = name.into();

        let mut tasks = Vec::new();
        let mut chain_of = Vec::new();
        for (chain_idx, chain) in chains.iter().enumerate() {
            for task in chain {
                tasks.push(Arc::clone(task));
                chain_of.push(chain_idx);
            }
        }

        let index: HashMap<*const Task, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (Arc::as_ptr(t), i))
            .collect();

        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        for i in 0..tasks.len() {
            graph.add_node(TaskId(i));
        }

        for (i, task) in tasks.iter().enumerate() {
            for parent in task.parents() {
                match index.get(&Arc::as_ptr(parent)) {
                    Some(&p) => {
                        graph.add_edge(NodeIndex::new(p), NodeIndex::new(i), ());
                    }
                    None => debug!(
                        task = %task.name(),
                        parent = %parent.name(),
                        "parent is outside this workflow; no edge recorded"
                    ),
                }
            }
        }

        debug!(
            workflow = %name,
            chains = chains.len(),
            tasks = tasks.len(),
            edges = graph.edge_count(),
            "workflow assembled"
        );

        Self {
            name,
            chains,
            tasks,
            chain_of,
            graph,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn chains(&self) -> &[TaskChain] {
        &self.chains
    }

    /// All tasks, chain by chain.
    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Arc<Task>> {
        self.tasks.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        (0..self.tasks.len()).map(TaskId)
    }

    /// Identity lookup: the id of this exact task node, if it is part of the workflow.
    pub fn id_of(&self, task: &Task) -> Option<TaskId> {
        self.tasks
            .iter()
            .position(|t| t.same_node(task))
            .map(TaskId)
    }

    pub fn find(&self, name: &str) -> Option<&Arc<Task>> {
        self.tasks.iter().find(|t| t.name() == name)
    }

    pub fn chain_index_of(&self, id: TaskId) -> Option<usize> {
        self.chain_of.get(id.0).copied()
    }

    /// Direct parents inside this workflow, in ascending id order.
    pub fn parents_of(&self, id: TaskId) -> Vec<TaskId> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Direct children, in ascending id order.
    pub fn dependents_of(&self, id: TaskId) -> Vec<TaskId> {
        self.neighbours(id, Direction::Outgoing)
    }

    /// Tasks with no parent inside this workflow.
    pub fn roots(&self) -> Vec<TaskId> {
        self.externals(Direction::Incoming)
    }

    /// Tasks nothing in this workflow depends on.
    pub fn leaves(&self) -> Vec<TaskId> {
        self.externals(Direction::Outgoing)
    }

    /// A parent-before-child ordering of all tasks.
    pub fn topological_order(&self) -> Result<Vec<TaskId>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().map(|n| self.graph[n]).collect()),
            Err(cycle) => {
                let id = self.graph[cycle.node_id()];
                let name = self.tasks[id.0].name().to_string();
                warn!(workflow = %self.name, task = %name, "cycle in workflow graph");
                Err(QuenchflowError::DagCycle(format!(
                    "cycle detected in workflow '{}' involving task '{}'",
                    self.name, name
                )))
            }
        }
    }

    /// Serialisable view handed to the execution side.
    pub fn to_document(&self) -> WorkflowDocument {
        let task = self
            .ids()
            .map(|id| {
                let t = &self.tasks[id.0];
                TaskDocument {
                    id: id.0,
                    name: t.name().to_string(),
                    kind: t.kind(),
                    chain: self.chain_of[id.0],
                    parents: self.parents_of(id).into_iter().map(TaskId::index).collect(),
                    external_parents: self.external_parent_names(t),
                    structure_source: t.structure_source(),
                    pass_structure: t.passes_structure(),
                    formula: t.structure().reduced_formula(),
                    fingerprint: t.fingerprint().to_string(),
                    config: t.args().as_table().clone(),
                }
            })
            .collect();

        WorkflowDocument {
            name: self.name.clone(),
            task,
        }
    }

    fn external_parent_names(&self, task: &Task) -> Vec<String> {
        task.parents()
            .iter()
            .filter(|p| self.id_of(p).is_none())
            .map(|p| p.name().to_string())
            .collect()
    }

    fn neighbours(&self, id: TaskId, dir: Direction) -> Vec<TaskId> {
        if id.0 >= self.tasks.len() {
            return Vec::new();
        }
        let mut out: Vec<TaskId> = self
            .graph
            .neighbors_directed(NodeIndex::new(id.0), dir)
            .map(|n| self.graph[n])
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn externals(&self, dir: Direction) -> Vec<TaskId> {
        let mut out: Vec<TaskId> = self.graph.externals(dir).map(|n| self.graph[n]).collect();
        out.sort();
        out
    }
}
