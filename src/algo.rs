//! Whole-trie algorithms built on the traversal operations.

use std::collections::BTreeMap;

use num_traits::{CheckedAdd, CheckedSub};

use crate::node::Node;
use crate::path::Path;
use crate::visit::Flow;

/// Compacts a trie without changing what [`Node::nearest`] answers for any path
/// that held a value.
///
/// Bottom-up, every node without a value takes the most common value among its
/// immediate children (the smallest one on a tie). Children holding that value drop
/// it, and those of them left with no values below are pruned. Other children are
/// kept as they are, even valueless ones.
pub fn reduce<N>(tree: &mut N)
where
    N: Node,
    N::Data: Ord + Clone,
{
    tree.traverse_post_mut(|node, _| {
        if node.data().is_some() {
            return;
        }

        let mut counts: BTreeMap<N::Data, usize> = BTreeMap::new();
        node.traverse_level(&mut |child, _| {
            if let Some(data) = child.data() {
                *counts.entry(data.clone()).or_default() += 1;
            }
            Flow::Continue
        });

        let mut top: Option<(N::Data, usize)> = None;
        for (data, count) in counts {
            if top.as_ref().map_or(true, |(_, best)| count > *best) {
                top = Some((data, count));
            }
        }
        let Some((top, _)) = top else {
            return;
        };

        node.retain_children(&mut |_, child| {
            if child.data() != Some(&top) {
                return true;
            }
            child.take();
            !child.is_empty()
        });
        node.put(top);
    });
}

/// Adds `amount` to every value on the way from `tree` down along `path`.
///
/// All or nothing: if any addition would overflow, nothing is changed and `None`
/// is returned. Otherwise returns how many values were adjusted.
pub fn charge<N, P>(tree: &mut N, path: P, amount: N::Data) -> Option<usize>
where
    N: Node,
    N::Data: CheckedAdd,
    P: Path<N>,
{
    adjust(tree, path, |value| value.checked_add(&amount))
}

/// Subtracts `amount` from every value along `path`, the inverse of [`charge`].
pub fn discharge<N, P>(tree: &mut N, path: P, amount: N::Data) -> Option<usize>
where
    N: Node,
    N::Data: CheckedSub,
    P: Path<N>,
{
    adjust(tree, path, |value| value.checked_sub(&amount))
}

fn adjust<N, P>(tree: &mut N, path: P, step: impl Fn(&N::Data) -> Option<N::Data>) -> Option<usize>
where
    N: Node,
    P: Path<N>,
{
    let mut feasible = true;
    tree.climb_pre(path, |node| {
        if let Some(value) = node.data() {
            feasible = step(value).is_some();
        }
        Flow::from(feasible)
    });
    if !feasible {
        return None;
    }

    let mut adjusted = 0;
    tree.climb_pre_mut(path, |node| {
        if let Some(value) = node.data_mut() {
            if let Some(next) = step(value) {
                *value = next;
                adjusted += 1;
            }
        }
        Flow::Continue
    });
    Some(adjusted)
}
