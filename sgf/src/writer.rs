use std::fmt::Write;

use crate::Node;

/// Writes the node and everything below it as one game tree.
pub fn serialise(root: &Node) -> String {
    let mut out = String::new();
    write_game_tree(root, &mut out);
    out.push('\n');
    out
}

fn write_game_tree(node: &Node, out: &mut String) {
    out.push('(');

    let mut node = node;
    loop {
        write_node(node, out);

        match node.children() {
            [only_child] => node = only_child,
            children => {
                for child in children {
                    out.push('\n');
                    write_game_tree(child, out);
                }
                break;
            }
        }
    }

    out.push(')');
}

fn write_node(node: &Node, out: &mut String) {
    out.push(';');

    for property in node.properties() {
        out.push_str(&property.ident);
        for value in &property.values {
            let _ = write!(out, "[{}]", escape(value));
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == ']' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_first;

    #[test]
    fn test_serialise_chain_without_parentheses() {
        let root = parse_first("(;SZ[19];B[pd];W[dd])").unwrap();

        assert_eq!(serialise(&root), "(;SZ[19];B[pd];W[dd])\n");
    }

    #[test]
    fn test_serialise_variations() {
        let text = "(;SZ[19]\n(;B[pd];W[dd])\n(;B[dp]))\n";
        let root = parse_first(text).unwrap();

        assert_eq!(serialise(&root), text);
    }

    #[test]
    fn test_serialise_escapes_values() {
        let mut root = Node::new();
        root.set("C", r"a]b\c");

        let text = serialise(&root);

        assert_eq!(text, "(;C[a\\]b\\\\c])\n");
        assert_eq!(parse_first(&text).unwrap(), root);
    }
}
