// src/queue/graph.rs

//! Graph view of the explicit dependencies between registered tasks.
//!
//! The queue itself never needs this to resolve; it is used for diagnostics
//! (cycle reporting when a queue cannot converge) and dry-run ordering.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::queue::record::TaskRecord;

/// Directed graph with an edge `dep -> task` for every explicit dependency.
#[derive(Debug, Default)]
pub struct DepGraph {
    graph: DiGraph<String, ()>,
    /// Node indices in registration order.
    order: Vec<NodeIndex>,
    node_map: HashMap<String, NodeIndex>,
    /// Explicit dependencies per task, first-seen order, repeats dropped.
    deps: HashMap<String, Vec<String>>,
}

impl DepGraph {
    pub fn from_records(records: &[TaskRecord<'_>]) -> Self {
        let mut dg = Self::default();

        for record in records {
            if dg.node_map.contains_key(record.name()) {
                continue;
            }
            let idx = dg.graph.add_node(record.name().to_string());
            dg.node_map.insert(record.name().to_string(), idx);
            dg.order.push(idx);
        }

        for record in records {
            let Some(&to) = dg.node_map.get(record.name()) else {
                continue;
            };
            let listed = dg.deps.entry(record.name().to_string()).or_default();
            for dep in record.deps() {
                if !listed.contains(dep) {
                    listed.push(dep.clone());
                }
            }
            for dep in record.deps() {
                // Unknown labels are reported by validation, not here.
                if let Some(&from) = dg.node_map.get(dep.as_str()) {
                    dg.graph.update_edge(from, to, ());
                }
            }
        }

        dg
    }

    /// Explicit dependencies of `task`, as registered.
    pub fn dependencies_of(&self, task: &str) -> Vec<&str> {
        self.deps
            .get(task)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Groups of tasks whose explicit dependencies form a cycle.
    ///
    /// Each group lists its labels in registration order; groups are ordered
    /// by their first member.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let position: HashMap<NodeIndex, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, idx)| (*idx, i))
            .collect();

        let mut groups: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .collect();

        for scc in groups.iter_mut() {
            scc.sort_by_key(|idx| position[idx]);
        }
        groups.sort_by_key(|scc| position[&scc[0]]);

        groups
            .into_iter()
            .map(|scc| scc.into_iter().map(|i| self.graph[i].clone()).collect())
            .collect()
    }

    /// A topological order of the tasks over their explicit dependencies.
    ///
    /// On a cycle, returns the label of a task involved in it.
    pub fn order(&self) -> std::result::Result<Vec<String>, String> {
        toposort(&self.graph, None)
            .map(|nodes| nodes.into_iter().map(|i| self.graph[i].clone()).collect())
            .map_err(|cycle| self.graph[cycle.node_id()].clone())
    }
}
