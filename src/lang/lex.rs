use super::COMMENT;
use std::iter::Peekable;
use std::str::CharIndices;

/// Split one source line into tokens.
///
/// A `"quoted run"` becomes one token with the quotes removed.
/// Anything else is a maximal run of non-whitespace characters.
/// An unquoted `$` token ends the line.
pub fn lex(s: &str) -> Vec<String> {
    Lexer::new(s).collect()
}

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    done: bool,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            src,
            chars: src.char_indices().peekable(),
            done: false,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }

    fn string(&mut self, start: usize) -> Option<String> {
        let open = start + '"'.len_utf8();
        let close = open + self.src[open..].find('"')?;
        while let Some((idx, _)) = self.chars.next() {
            if idx == close {
                break;
            }
        }
        Some(self.src[open..close].to_string())
    }

    fn word(&mut self, start: usize) -> String {
        let mut end = self.src.len();
        while let Some((idx, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                end = *idx;
                break;
            }
            self.chars.next();
        }
        self.src[start..end].to_string()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.skip_whitespace();
        let (start, ch) = *self.chars.peek()?;
        if ch == '"' {
            if let Some(s) = self.string(start) {
                return Some(s);
            }
        }
        let word = self.word(start);
        if word == COMMENT {
            self.done = true;
            return None;
        }
        Some(word)
    }
}
