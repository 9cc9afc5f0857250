use super::{Line, END_BLOCK, START_BLOCK};
use std::collections::HashMap;

pub type Blocks = HashMap<String, Vec<Line>>;

/// Group source lines into named blocks.
///
/// Lines outside of any block are dropped, as are lines with
/// no tokens left after comment removal.
pub fn parse(source: &str) -> Blocks {
    let mut blocks = Blocks::new();
    let mut current: Option<String> = None;

    for (index, text) in source.lines().enumerate() {
        let number = index + 1;
        if text.starts_with(START_BLOCK) {
            let name = text.splitn(2, ' ').nth(1).unwrap_or_default().trim();
            if name.is_empty() {
                current = None;
                continue;
            }
            blocks.insert(name.to_string(), vec![]);
            current = Some(name.to_string());
        } else if text.starts_with(END_BLOCK) {
            current = None;
        } else if let Some(name) = &current {
            let line = Line::new(number, text);
            if line.is_empty() {
                continue;
            }
            if let Some(block) = blocks.get_mut(name) {
                block.push(line);
            }
        }
    }
    blocks
}
