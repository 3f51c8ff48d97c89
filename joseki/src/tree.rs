use go::Move;

use crate::{Joseki, NodeStats};

/// A prefix tree of josekis. The root carries no move; every path from the root spells a
/// sequence that occurred in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JosekiTree {
    children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    mv: Move,
    stats: NodeStats,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(mv: Move, stats: NodeStats) -> Self {
        Self {
            mv,
            stats,
            children: Vec::new(),
        }
    }

    pub fn mv(&self) -> Move {
        self.mv
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn child(&self, mv: &Move) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.mv == *mv)
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.children
    }

    pub fn push_child(&mut self, child: TreeNode) -> &mut TreeNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// The number of nodes in this subtree, this node included.
    pub fn subtree_size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            size += 1;
            stack.extend(node.children.iter());
        }
        size
    }
}

impl JosekiTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.children
    }

    pub fn push_child(&mut self, child: TreeNode) -> &mut TreeNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows the moves from the root.
    pub fn get(&self, moves: &[Move]) -> Option<&TreeNode> {
        let (first, rest) = moves.split_first()?;
        let mut node = self.children.iter().find(|c| c.mv == *first)?;
        for mv in rest {
            node = node.child(mv)?;
        }
        Some(node)
    }

    /// Adds a normalized joseki, creating nodes for unseen moves and counting the game at every
    /// node along its path. New children are appended after their existing siblings.
    pub fn merge(&mut self, joseki: &Joseki) {
        let mut children = &mut self.children;

        for mv in &joseki.moves {
            let index = match children.iter().position(|c| c.mv == *mv) {
                Some(index) => {
                    children[index].stats.record(joseki.winner);
                    index
                }
                None => {
                    children.push(TreeNode::new(*mv, NodeStats::new(joseki.winner)));
                    children.len() - 1
                }
            };

            children = &mut children[index].children;
        }
    }

    /// Sum of the counts of the first moves, the number of sequences merged into the tree
    /// that were not empty.
    pub fn total_count(&self) -> u64 {
        self.children.iter().map(|c| c.stats.count).sum()
    }

    /// The number of nodes below the root.
    pub fn num_nodes(&self) -> usize {
        self.children.iter().map(TreeNode::subtree_size).sum()
    }

    /// The number of distinct variations. A tree without moves counts as one empty variation.
    pub fn count_leaves(&self) -> usize {
        if self.children.is_empty() {
            return 1;
        }

        let mut leaves = 0;
        let mut stack = self.children.iter().collect::<Vec<_>>();
        while let Some(node) = stack.pop() {
            if node.children.is_empty() {
                leaves += 1;
            } else {
                stack.extend(node.children.iter());
            }
        }
        leaves
    }

    /// The length of the longest variation.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = self.children.iter().map(|c| (c, 1)).collect::<Vec<_>>();
        while let Some((node, node_depth)) = stack.pop() {
            depth = depth.max(node_depth);
            stack.extend(node.children.iter().map(|c| (c, node_depth + 1)));
        }
        depth
    }
}
