//! Co-run cycle detection.
//!
//! Co-run rules are modelled as an undirected incidence graph: one node per
//! distinct task, one node per `coRun` rule, and an edge between a rule and
//! every distinct task it lists. Task IDs are trimmed, as in the shape
//! check, so `" A"` and `"A"` are the same node. The tasks of one rule are
//! mutually reachable through the rule node, so a rule on its own never
//! forms a cycle. A cycle appears only when co-run groups chain back onto
//! themselves through different rules, e.g. `[A,B] [B,C] [C,A]`, or when two
//! rules list the same pair.

use std::collections::HashMap;

use alchemist_model::{Entity, Rule, ValidationError};
use tracing::debug;

use crate::util::distinct;

/// Field name used for rule-set level errors.
pub const CO_RUN_FIELD: &str = "coRun";

/// Checks the full rule list; at most one error, for the first cycle found.
pub fn validate_rules(rules: &[Rule]) -> Vec<ValidationError> {
    match find_co_run_cycle(rules) {
        Some(task) => {
            debug!(task = %task, rule_count = rules.len(), "co-run cycle detected");
            vec![ValidationError::table_error(
                Entity::Rules,
                CO_RUN_FIELD,
                format!("Circular co-run group involving {task}"),
            )]
        }
        None => Vec::new(),
    }
}

/// Returns the task the search started from when a co-run cycle exists.
///
/// Roots are tried in the order tasks first appear across the rules.
pub fn find_co_run_cycle(rules: &[Rule]) -> Option<String> {
    let graph = CoRunGraph::build(rules);
    let mut visited = vec![false; graph.adjacency.len()];
    let mut on_path = vec![false; graph.adjacency.len()];

    for &root in &graph.task_nodes {
        if visited[root] {
            continue;
        }
        if graph.has_cycle_from(root, &mut visited, &mut on_path) {
            return graph.task_name(root).map(str::to_string);
        }
    }
    None
}

enum Node<'a> {
    Task(&'a str),
    Group,
}

struct CoRunGraph<'a> {
    nodes: Vec<Node<'a>>,
    adjacency: Vec<Vec<usize>>,
    /// Task node indices in first-seen order.
    task_nodes: Vec<usize>,
}

/// One DFS stack frame: the node, the node it was reached from, and the next
/// neighbour to visit.
struct Frame {
    node: usize,
    parent: Option<usize>,
    next: usize,
}

impl<'a> CoRunGraph<'a> {
    fn build(rules: &'a [Rule]) -> Self {
        let mut graph = CoRunGraph {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            task_nodes: Vec::new(),
        };
        let mut task_index: HashMap<&'a str, usize> = HashMap::new();

        for rule in rules {
            let tasks = match rule {
                Rule::CoRun(config) => &config.tasks,
                Rule::SlotRestriction(_) | Rule::LoadLimit(_) | Rule::PhaseWindow(_) => continue,
            };
            let group = graph.add_node(Node::Group);
            for task in distinct(tasks.iter().map(|task| task.trim())) {
                let node = match task_index.get(task) {
                    Some(&node) => node,
                    None => {
                        let node = graph.add_node(Node::Task(task));
                        graph.task_nodes.push(node);
                        task_index.insert(task, node);
                        node
                    }
                };
                graph.adjacency[group].push(node);
                graph.adjacency[node].push(group);
            }
        }
        graph
    }

    fn add_node(&mut self, node: Node<'a>) -> usize {
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        self.nodes.len() - 1
    }

    fn task_name(&self, node: usize) -> Option<&'a str> {
        match self.nodes.get(node) {
            Some(Node::Task(name)) => Some(*name),
            _ => None,
        }
    }

    /// Iterative DFS. The edge back to the parent is skipped; any other edge
    /// reaching a node still on the current path closes a cycle.
    fn has_cycle_from(&self, root: usize, visited: &mut [bool], on_path: &mut [bool]) -> bool {
        let mut stack = vec![Frame {
            node: root,
            parent: None,
            next: 0,
        }];
        visited[root] = true;
        on_path[root] = true;

        while let Some(frame) = stack.last_mut() {
            let Some(&neighbour) = self.adjacency[frame.node].get(frame.next) else {
                on_path[frame.node] = false;
                stack.pop();
                continue;
            };
            frame.next += 1;

            if Some(neighbour) == frame.parent {
                continue;
            }
            if on_path[neighbour] {
                return true;
            }
            if visited[neighbour] {
                continue;
            }

            let parent = frame.node;
            visited[neighbour] = true;
            on_path[neighbour] = true;
            stack.push(Frame {
                node: neighbour,
                parent: Some(parent),
                next: 0,
            });
        }
        false
    }
}
