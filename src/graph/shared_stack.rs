//! Hoist the call-stack prefix shared by all of a node's outgoing edges.
//!
//! Example: a node scheduling two events from
//! `main;dispatch;send` and `main;dispatch;recv` gets the shared stack
//! `main;dispatch`, leaving `send` and `recv` on the edges.
//!
//! The graph itself is left untouched. Since the same number of leading
//! frames is removed from every edge of a node, the result only records that
//! count per node; shared and residual stacks are slices of the edge stacks.

use super::builder::{Edge, Node, SchedulingGraph};
use log::debug;

/// Per-node extraction result, indexed by arena slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStacks {
    prefix_lens: Vec<usize>,
}

impl SharedStacks {
    /// Number of frames hoisted from every edge of the node at `slot`
    pub fn prefix_len(&self, slot: usize) -> usize {
        self.prefix_lens.get(slot).copied().unwrap_or(0)
    }

    /// Shared stack of `node` (stored at `slot`)
    pub fn shared_stack<'g>(&self, slot: usize, node: &'g Node) -> &'g [String] {
        match node.edges.first() {
            Some(edge) => &edge.stack[..self.prefix_len(slot)],
            None => &[],
        }
    }

    /// Private stack of `edge`, an outgoing edge of the node at `slot`
    pub fn residual_stack<'g>(&self, slot: usize, edge: &'g Edge) -> &'g [String] {
        &edge.stack[self.prefix_len(slot)..]
    }
}

/// Extract shared stacks for every node of the graph
///
/// **Public** - main entry point for extraction
pub fn extract_shared_stacks(graph: &SchedulingGraph) -> SharedStacks {
    let prefix_lens: Vec<usize> = graph.nodes().iter().map(extract_node).collect();

    debug!(
        "Hoisted {} shared frames across {} nodes",
        prefix_lens.iter().sum::<usize>(),
        prefix_lens.iter().filter(|&&len| len > 0).count()
    );

    SharedStacks { prefix_lens }
}

/// Number of leading frames shared by all outgoing edges of `node`
pub fn extract_node(node: &Node) -> usize {
    let stacks: Vec<&[String]> = node.edges.iter().map(|e| e.stack.as_slice()).collect();
    common_prefix_len(&stacks[..])
}

/// Length of the longest common leading run of frames across `stacks`
///
/// Frames are compared for exact equality. Extraction stops at the first
/// position where any stack is exhausted or any frame differs; no stacks
/// means nothing is shared.
pub fn common_prefix_len<S: AsRef<str>>(stacks: &[&[S]]) -> usize {
    let Some((first, rest)) = stacks.split_first() else {
        return 0;
    };

    let mut depth = 0;
    loop {
        let Some(frame) = first.get(depth) else {
            return depth;
        };

        let all_match = rest.iter().all(|stack| {
            stack
                .get(depth)
                .is_some_and(|other| other.as_ref() == frame.as_ref())
        });
        if !all_match {
            return depth;
        }

        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgePolicy;
    use crate::parser::schema::Event;

    fn event(from: u64, to: u64, stack: &[&str]) -> Event {
        Event {
            timestamp_ns: 0,
            current_id: from,
            scheduled_id: to,
            scheduled_timestamp_ns: 0,
            stack: stack.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_common_prefix_len() {
        let a = ["main", "dispatch", "send"];
        let b = ["main", "dispatch", "recv"];
        assert_eq!(common_prefix_len(&[&a[..], &b[..]]), 2);
    }

    #[test]
    fn test_identical_stacks_fully_shared() {
        let a = ["main", "dispatch"];
        assert_eq!(common_prefix_len(&[&a[..], &a[..]]), 2);
    }

    #[test]
    fn test_single_stack_fully_shared() {
        let a = ["main", "dispatch"];
        assert_eq!(common_prefix_len(&[&a[..]]), 2);
    }

    #[test]
    fn test_empty_stack_blocks_extraction() {
        let a = ["main", "dispatch"];
        let b = ["main", "dispatch"];
        let empty: [&str; 0] = [];
        assert_eq!(common_prefix_len(&[&a[..], &b[..], &empty[..]]), 0);
    }

    #[test]
    fn test_no_stacks() {
        let stacks: [&[&str]; 0] = [];
        assert_eq!(common_prefix_len(&stacks), 0);
    }

    #[test]
    fn test_trailing_characters_matter() {
        let a = ["main", "dispatch "];
        let b = ["main", "dispatch"];
        assert_eq!(common_prefix_len(&[&a[..], &b[..]]), 1);
    }

    #[test]
    fn test_shorter_stack_bounds_prefix() {
        let a = ["main"];
        let b = ["main", "dispatch"];
        assert_eq!(common_prefix_len(&[&a[..], &b[..]]), 1);
    }

    #[test]
    fn test_graph_extraction_slices() {
        let graph = SchedulingGraph::from_events(
            &[
                event(7, 9, &["dispatch", "send"]),
                event(7, 10, &["dispatch", "recv", "inner"]),
            ],
            EdgePolicy::LastWins,
        );
        let stacks = extract_shared_stacks(&graph);

        let slot = graph.slot_of(7).unwrap();
        let node = &graph.nodes()[slot];
        assert_eq!(stacks.shared_stack(slot, node), ["dispatch"]);
        assert_eq!(stacks.residual_stack(slot, &node.edges[0]), ["send"]);
        assert_eq!(stacks.residual_stack(slot, &node.edges[1]), ["recv", "inner"]);

        // leaf nodes share nothing
        let leaf = graph.slot_of(9).unwrap();
        assert_eq!(stacks.prefix_len(leaf), 0);
        assert!(stacks.shared_stack(leaf, &graph.nodes()[leaf]).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let a = ["main", "dispatch", "send"];
        let b = ["main", "dispatch", "recv"];
        let k = common_prefix_len(&[&a[..], &b[..]]);
        assert_eq!(common_prefix_len(&[&a[k..], &b[k..]]), 0);
    }
}
