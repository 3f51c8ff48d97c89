use anyhow::{anyhow, Result};

use crate::{Node, Property};

/// Parses every game tree of an SGF collection.
pub fn parse(text: &str) -> Result<Vec<Node>> {
    let mut parser = Parser::new(text);
    let mut trees = Vec::new();

    // Anything before the first game tree is ignored.
    parser.skip_until('(');

    while parser.peek() == Some('(') {
        trees.push(parser.parse_game_tree()?);
        parser.skip_whitespace();
    }

    if trees.is_empty() {
        return Err(anyhow!("No game tree found"));
    }

    Ok(trees)
}

/// Parses the first game tree of an SGF collection.
pub fn parse_first(text: &str) -> Result<Node> {
    parse(text)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No game tree found"))
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.next() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(anyhow!(
                "Expected {:?} but found {:?} at offset {}",
                expected,
                c,
                self.pos - 1
            )),
            None => Err(anyhow!("Expected {:?} but reached end of input", expected)),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_until(&mut self, c: char) {
        while self.peek().is_some_and(|p| p != c) {
            self.pos += 1;
        }
    }

    /// Parses one game tree. Nested variations are kept on an explicit stack of open trees, so
    /// nesting depth is bounded by memory only.
    fn parse_game_tree(&mut self) -> Result<Node> {
        self.expect('(')?;
        let mut open = vec![(self.parse_sequence()?, Vec::new())];

        loop {
            self.skip_whitespace();

            if self.peek() == Some('(') {
                self.pos += 1;
                open.push((self.parse_sequence()?, Vec::new()));
                continue;
            }

            self.expect(')')?;

            let (sequence, variations) = open
                .pop()
                .ok_or_else(|| anyhow!("Unbalanced game tree at offset {}", self.pos))?;
            let node = self.fold_sequence(sequence, variations)?;

            match open.last_mut() {
                Some((_, parent_variations)) => parent_variations.push(node),
                None => return Ok(node),
            }
        }
    }

    fn parse_sequence(&mut self) -> Result<Vec<Node>> {
        self.skip_whitespace();

        let mut sequence = Vec::new();
        while self.peek() == Some(';') {
            sequence.push(self.parse_node()?);
        }

        Ok(sequence)
    }

    /// Turns a sequence into a chain of single child nodes, the variations hang off its last node.
    fn fold_sequence(&self, mut sequence: Vec<Node>, variations: Vec<Node>) -> Result<Node> {
        let mut node = sequence
            .pop()
            .ok_or_else(|| anyhow!("Game tree without nodes at offset {}", self.pos))?;
        *node.children_mut() = variations;

        while let Some(mut parent) = sequence.pop() {
            parent.children_mut().push(node);
            node = parent;
        }

        Ok(node)
    }

    fn parse_node(&mut self) -> Result<Node> {
        self.expect(';')?;
        self.skip_whitespace();

        let mut node = Node::new();
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            node.push_property(self.parse_property()?);
            self.skip_whitespace();
        }

        Ok(node)
    }

    fn parse_property(&mut self) -> Result<Property> {
        let mut ident = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            // Lowercase letters of long FF[3] identifiers are not part of the identifier.
            if c.is_ascii_uppercase() {
                ident.push(c);
            }
            self.pos += 1;
        }

        if ident.is_empty() {
            return Err(anyhow!("Property without identifier at offset {}", self.pos));
        }

        self.skip_whitespace();

        let mut values = Vec::new();
        while self.peek() == Some('[') {
            values.push(self.parse_value()?);
            self.skip_whitespace();
        }

        if values.is_empty() {
            return Err(anyhow!("Property {} has no value", ident));
        }

        Ok(Property { ident, values })
    }

    fn parse_value(&mut self) -> Result<String> {
        self.expect('[')?;

        let mut value = String::new();
        loop {
            match self.next() {
                Some(']') => return Ok(value),
                Some('\\') => match self.next() {
                    // An escaped line break is a soft line break and is removed.
                    Some('\n') => {
                        if self.peek() == Some('\r') {
                            self.pos += 1;
                        }
                    }
                    Some('\r') => {
                        if self.peek() == Some('\n') {
                            self.pos += 1;
                        }
                    }
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }

        Err(anyhow!("Unterminated property value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_main_line_as_chain() {
        let root = parse_first("(;FF[4]SZ[19];B[pd];W[dd];B[pq])").unwrap();

        assert_eq!(root.get("SZ"), Some("19"));
        let moves = root
            .main_sequence()
            .map(|n| n.properties()[0].values[0].clone())
            .collect::<Vec<_>>();
        assert_eq!(moves, vec!["pd", "dd", "pq"]);
        assert!(root.main_sequence().all(|n| n.children().len() <= 1));
    }

    #[test]
    fn test_parse_variations() {
        let root = parse_first("(;SZ[19](;B[pd];W[dd])(;B[dp]))").unwrap();

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].get("B"), Some("pd"));
        assert_eq!(root.children()[0].children()[0].get("W"), Some("dd"));
        assert_eq!(root.children()[1].get("B"), Some("dp"));
    }

    #[test]
    fn test_parse_escapes() {
        let root = parse_first(r"(;C[a \] b \\ c])").unwrap();

        assert_eq!(root.get("C"), Some(r"a ] b \ c"));
    }

    #[test]
    fn test_soft_line_break_is_removed() {
        let root = parse_first("(;C[ab\\\ncd])").unwrap();

        assert_eq!(root.get("C"), Some("abcd"));
    }

    #[test]
    fn test_parse_multiple_values_and_whitespace() {
        let root = parse_first("(\n ; AB [dd]\n [pp] C[x] )").unwrap();

        let property = &root.properties()[0];
        assert_eq!(property.ident, "AB");
        assert_eq!(property.values, vec!["dd", "pp"]);
        assert_eq!(root.get("C"), Some("x"));
    }

    #[test]
    fn test_long_identifiers_keep_uppercase_letters() {
        let root = parse_first("(;AddBlack[dd])").unwrap();

        assert!(root.has("AB"));
    }

    #[test]
    fn test_parse_collection() {
        let trees = parse("garbage (;B[aa]) (;W[bb])").unwrap();

        assert_eq!(trees.len(), 2);
    }

    #[test]
    fn test_errors() {
        assert!(parse("").is_err());
        assert!(parse("(;B[aa]").is_err());
        assert!(parse("(;B[aa)").is_err());
        assert!(parse("()").is_err());
        assert!(parse("(;B)").is_err());
    }

    #[test]
    fn test_long_main_line() {
        let text = format!("(;SZ[19]{})", ";B[aa];W[bb]".repeat(5000));
        let root = parse_first(&text).unwrap();

        assert_eq!(root.main_sequence().count(), 10000);
    }

    #[test]
    fn test_deeply_nested_variations() {
        let depth = 200_000;
        let text = format!("{}{}", "(;".repeat(depth), ")".repeat(depth));

        // A small stack shows the nesting is not parsed recursively.
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || {
                let root = parse_first(&text).unwrap();
                root.main_sequence().count()
            })
            .unwrap();

        assert_eq!(handle.join().unwrap(), depth - 1);
    }

    #[test]
    fn test_unbalanced_nesting_is_an_error() {
        let text = format!("{}{}", "(;".repeat(1000), ")".repeat(999));

        assert!(parse(&text).is_err());
    }
}
