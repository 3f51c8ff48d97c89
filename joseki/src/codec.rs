use anyhow::{anyhow, Result};
use go::BOARD_SIZE;
use log::warn;

use crate::{JosekiTree, NodeStats, TreeNode};

/// The property holding the JSON encoded `NodeStats` of a node.
pub const STATS_PROPERTY: &str = "C";

impl JosekiTree {
    /// Encodes the tree as an SGF game tree with the statistics of every node in its comment.
    pub fn to_sgf(&self) -> sgf::Node {
        let mut root = sgf::Node::new();
        root.set("FF", "4");
        root.set("GM", "1");
        root.set("SZ", BOARD_SIZE.to_string());

        for child in self.children() {
            root.push_child(encode_node(child));
        }

        root
    }

    /// Decodes a tree written by `to_sgf`.
    ///
    /// Statistics that are missing or cannot be read decode as all zero, so that pruning removes
    /// the node instead of failing the whole tree.
    pub fn from_sgf(root: &sgf::Node) -> Result<Self> {
        let mut tree = JosekiTree::new();

        for child in root.children() {
            tree.push_child(decode_node(child)?);
        }

        Ok(tree)
    }
}

fn encode_node(node: &TreeNode) -> sgf::Node {
    let mut sgf_node = sgf::Node::new();
    sgf_node.set_move(node.mv(), BOARD_SIZE);
    sgf_node.set(STATS_PROPERTY, encode_stats(node.stats()));

    for child in node.children() {
        sgf_node.push_child(encode_node(child));
    }

    sgf_node
}

fn decode_node(sgf_node: &sgf::Node) -> Result<TreeNode> {
    let mv = sgf_node
        .get_move(BOARD_SIZE)?
        .ok_or_else(|| anyhow!("Joseki tree node without a move"))?;

    let stats = match sgf_node.get(STATS_PROPERTY).map(decode_stats) {
        Some(Ok(stats)) => stats,
        Some(Err(err)) => {
            warn!("Unreadable statistics for {}, treating as zero: {}", mv, err);
            NodeStats::default()
        }
        None => {
            warn!("Missing statistics for {}, treating as zero", mv);
            NodeStats::default()
        }
    };

    let mut node = TreeNode::new(mv, stats);
    for child in sgf_node.children() {
        node.push_child(decode_node(child)?);
    }

    Ok(node)
}

pub fn encode_stats(stats: &NodeStats) -> String {
    // Serializing a struct of integers cannot fail.
    serde_json::to_string(stats).unwrap_or_default()
}

pub fn decode_stats(text: &str) -> Result<NodeStats> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use go::Color::{Black, White};
    use go::Move;

    use super::*;
    use crate::{Joseki, PruneOptions};

    fn sample_tree() -> JosekiTree {
        let mut tree = JosekiTree::new();
        tree.merge(&Joseki::new(
            vec![Move::new(Black, (15, 15)), Move::new(White, (13, 16))],
            Some(Black),
        ));
        tree.merge(&Joseki::new(
            vec![Move::new(Black, (15, 15)), Move::pass(White), Move::new(Black, (16, 13))],
            Some(White),
        ));
        tree.merge(&Joseki::new(vec![Move::new(Black, (15, 16))], None));
        tree
    }

    #[test]
    fn test_encode() {
        let text = sgf::serialise(&sample_tree().to_sgf());

        assert_eq!(
            text,
            concat!(
                "(;FF[4]GM[1]SZ[19]\n",
                "(;B[pd]C[{\"count\":2,\"b_win\":1,\"w_win\":1}]\n",
                "(;W[qf]C[{\"count\":1,\"b_win\":1,\"w_win\":0}])\n",
                "(;W[]C[{\"count\":1,\"b_win\":0,\"w_win\":1}];B[nc]C[{\"count\":1,\"b_win\":0,\"w_win\":1}]))\n",
                "(;B[qd]C[{\"count\":1,\"b_win\":0,\"w_win\":0}]))\n",
            )
        );
    }

    #[test]
    fn test_round_trip_through_text() {
        let tree = sample_tree();
        let text = sgf::serialise(&tree.to_sgf());

        let decoded = JosekiTree::from_sgf(&sgf::parse_first(&text).unwrap()).unwrap();

        assert_eq!(decoded, tree);
    }

    #[test]
    fn test_reads_spaced_json() {
        let root = sgf::parse_first(
            r#"(;FF[4]GM[1]SZ[19];B[pd]C[{"count": 12, "b_win": 7, "w_win": 5}])"#,
        )
        .unwrap();

        let tree = JosekiTree::from_sgf(&root).unwrap();

        assert_eq!(
            tree.children()[0].stats(),
            &NodeStats {
                count: 12,
                b_win: 7,
                w_win: 5
            }
        );
    }

    #[test]
    fn test_bad_statistics_decode_as_zero_and_are_pruned() {
        let root = sgf::parse_first(concat!(
            "(;FF[4]GM[1]SZ[19]",
            "(;B[pd]C[{\"count\":50,\"b_win\":25,\"w_win\":25}])",
            "(;B[qd]C[not json])",
            "(;B[dd]))",
        ))
        .unwrap();

        let mut tree = JosekiTree::from_sgf(&root).unwrap();
        assert_eq!(tree.children()[1].stats(), &NodeStats::default());
        assert_eq!(tree.children()[2].stats(), &NodeStats::default());

        tree.prune(&PruneOptions::default());

        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].mv(), Move::new(Black, (15, 15)));
    }

    #[test]
    fn test_node_without_move_is_an_error() {
        let root = sgf::parse_first("(;FF[4](;C[comment]))").unwrap();

        assert!(JosekiTree::from_sgf(&root).is_err());
    }
}
