use std::cmp::Ordering;

use crate::{JosekiTree, TreeNode};

#[derive(Debug, Clone, PartialEq)]
pub struct PruneOptions {
    /// Children played in fewer than this fraction of their parent's games are removed.
    pub min_fraction: f64,
    /// Children played fewer times than this are removed.
    pub min_absolute: u64,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            min_fraction: 0.01,
            min_absolute: 10,
        }
    }
}

impl PruneOptions {
    fn keeps(&self, count: u64, parent_count: u64) -> bool {
        count >= self.min_absolute && count as f64 >= parent_count as f64 * self.min_fraction
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub removed: usize,
    pub kept: usize,
}

impl JosekiTree {
    /// Removes rarely played continuations and orders the remaining children by how often they
    /// were played, most frequent first. Equal counts are ordered by move.
    ///
    /// The first moves are measured against the total count of all first moves.
    pub fn prune(&mut self, options: &PruneOptions) -> PruneSummary {
        let parent_count = self.total_count();
        let mut summary = PruneSummary::default();

        prune_children(self.children_mut(), parent_count, options, &mut summary);

        summary
    }
}

fn prune_children(
    children: &mut Vec<TreeNode>,
    parent_count: u64,
    options: &PruneOptions,
    summary: &mut PruneSummary,
) {
    let (mut survivors, removed): (Vec<_>, Vec<_>) = std::mem::take(children)
        .into_iter()
        .partition(|c| options.keeps(c.stats().count, parent_count));

    summary.removed += removed.iter().map(TreeNode::subtree_size).sum::<usize>();
    summary.kept += survivors.len();

    for child in survivors.iter_mut() {
        let count = child.stats().count;
        prune_children(child.children_mut(), count, options, summary);
    }

    survivors.sort_by(rank);
    *children = survivors;
}

fn rank(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.stats()
        .count
        .cmp(&a.stats().count)
        .then_with(|| a.mv().cmp(&b.mv()))
}
