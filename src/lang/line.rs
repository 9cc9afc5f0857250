use super::{lex, LineNumber};

/// ## One parsed instruction line
///
/// The number is the 1-based position in the source text.

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: LineNumber,
    tokens: Vec<String>,
}

impl Line {
    pub fn new(number: LineNumber, s: &str) -> Line {
        Line {
            number,
            tokens: lex(s),
        }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The opcode token. Empty lines never reach a block.
    pub fn command(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn argument(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
