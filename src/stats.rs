//! Structural statistics for tries.
//!
//! Useful for checking how values are spread over the levels of a trie, how wide
//! the levels fan out and how many nodes exist only to route to deeper values.

use crate::node::Node;
use crate::segment::Segment;
use crate::visit::{Flow, Visitor};

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

/// Per-depth counters. Depth 0 is the node the statistics were taken from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LevelStats {
    pub depth: usize,
    pub nodes: usize,
    pub values: usize,
    /// Children of nodes at this depth, i.e. nodes at the next depth.
    pub children: usize,
    pub max_fanout: usize,
    /// Average number of children per node at this depth.
    pub density: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TreeStats {
    pub levels: Vec<LevelStats>,
    pub num_nodes: usize,
    pub num_values: usize,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    /// Values per node, between 0 and 1.
    pub density: f64,
    pub max_height: usize,
}

struct Collector {
    stats: TreeStats,
    depth: usize,
}

impl Collector {
    fn level(&mut self) -> &mut LevelStats {
        let levels = &mut self.stats.levels;
        while levels.len() <= self.depth {
            let depth = levels.len();
            levels.push(LevelStats {
                depth,
                ..Default::default()
            });
        }
        &mut levels[self.depth]
    }
}

impl<D> Visitor<D> for Collector {
    fn pre(&mut self, node: &dyn Node<Data = D>, _edge: Option<&dyn Segment>) -> Flow {
        let has_value = node.data().is_some();
        let children = node.num_children();

        let level = self.level();
        level.nodes += 1;
        level.values += usize::from(has_value);
        level.children += children;
        level.max_fanout = level.max_fanout.max(children);

        let stats = &mut self.stats;
        stats.num_nodes += 1;
        stats.num_values += usize::from(has_value);
        if children == 0 {
            stats.num_leaves += 1;
        } else {
            stats.num_inner_nodes += 1;
        }
        stats.max_height = stats.max_height.max(self.depth);

        self.depth += 1;
        Flow::Continue
    }

    fn post(&mut self, _node: &dyn Node<Data = D>, _edge: Option<&dyn Segment>) {
        self.depth -= 1;
    }
}

impl<N: Node> TreeStatsTrait for N {
    fn get_tree_stats(&self) -> TreeStats {
        let mut collector = Collector {
            stats: TreeStats::default(),
            depth: 0,
        };
        self.visit(&mut collector);

        let mut stats = collector.stats;
        for level in stats.levels.iter_mut() {
            level.density = level.children as f64 / level.nodes as f64;
        }
        stats.density = stats.num_values as f64 / stats.num_nodes as f64;
        stats
    }
}
