use anyhow::{anyhow, Result};
use go::{Color, Move};

use crate::{decode_point, encode_point};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub ident: String,
    pub values: Vec<String>,
}

/// A node of a game tree. The first child continues the main line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    properties: Vec<Property>,
    children: Vec<Node>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn has(&self, ident: &str) -> bool {
        self.properties.iter().any(|p| p.ident == ident)
    }

    /// The first value of the property.
    pub fn get(&self, ident: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.ident == ident)
            .and_then(|p| p.values.first())
            .map(String::as_str)
    }

    /// Replaces any existing values of the property.
    pub fn set(&mut self, ident: &str, value: impl Into<String>) {
        let values = vec![value.into()];

        match self.properties.iter_mut().find(|p| p.ident == ident) {
            Some(property) => property.values = values,
            None => self.properties.push(Property {
                ident: ident.to_string(),
                values,
            }),
        }
    }

    pub fn unset(&mut self, ident: &str) {
        self.properties.retain(|p| p.ident != ident);
    }

    pub(crate) fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn push_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// The nodes below this one that follow the first child at each step.
    pub fn main_sequence(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.children.first(), |node| node.children.first())
    }

    /// The move played in this node, if any.
    pub fn get_move(&self, size: u8) -> Result<Option<Move>> {
        let (color, value) = match (self.get("B"), self.get("W")) {
            (Some(value), None) => (Color::Black, value),
            (None, Some(value)) => (Color::White, value),
            (None, None) => return Ok(None),
            (Some(_), Some(_)) => return Err(anyhow!("Node has both a black and a white move")),
        };

        Ok(Some(Move {
            color,
            point: decode_point(value, size)?,
        }))
    }

    pub fn set_move(&mut self, mv: Move, size: u8) {
        let (ident, other) = match mv.color {
            Color::Black => ("B", "W"),
            Color::White => ("W", "B"),
        };

        self.unset(other);
        self.set(ident, encode_point(mv.point, size));
    }
}

// Long main lines are chains thousands of nodes deep, so children are dropped without recursion.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use go::Point;

    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let mut node = Node::new();
        node.set("C", "first");
        node.set("C", "second");

        assert_eq!(node.get("C"), Some("second"));
        assert_eq!(node.properties().len(), 1);
    }

    #[test]
    fn test_set_move_replaces_other_color() {
        let mut node = Node::new();
        node.set_move(Move::new(Color::Black, (15, 15)), 19);
        node.set_move(Move::pass(Color::White), 19);

        assert!(!node.has("B"));
        assert_eq!(node.get("W"), Some(""));
        assert_eq!(node.get_move(19).unwrap(), Some(Move::pass(Color::White)));
    }

    #[test]
    fn test_get_move() {
        let mut node = Node::new();
        node.set("W", "pd");

        assert_eq!(
            node.get_move(19).unwrap(),
            Some(Move {
                color: Color::White,
                point: Some(Point::new(15, 15))
            })
        );
    }

    #[test]
    fn test_node_without_move() {
        let mut node = Node::new();
        node.set("C", "comment");

        assert_eq!(node.get_move(19).unwrap(), None);
    }

    #[test]
    fn test_node_with_both_colors_is_an_error() {
        let mut node = Node::new();
        node.set("B", "pd");
        node.set("W", "dd");

        assert!(node.get_move(19).is_err());
    }

    #[test]
    fn test_main_sequence_follows_first_child() {
        let mut root = Node::new();
        let first = root.push_child(Node::new());
        first.set("B", "pd");
        first.push_child(Node::new()).set("W", "dd");
        root.push_child(Node::new()).set("B", "dp");

        let moves = root
            .main_sequence()
            .map(|n| n.get("B").or(n.get("W")).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(moves, vec!["pd", "dd"]);
    }
}
