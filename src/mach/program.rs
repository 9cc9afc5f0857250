use crate::lang::{parse, Blocks, Line};
use std::collections::HashMap;
use std::rc::Rc;

/// ## Parsed program
///
/// Blocks are immutable once parsed and shared with running frames.

#[derive(Debug, Clone, Default)]
pub struct Program {
    blocks: HashMap<String, Rc<[Line]>>,
}

impl Program {
    pub fn new(blocks: Blocks) -> Program {
        Program {
            blocks: blocks
                .into_iter()
                .map(|(name, lines)| (name, Rc::<[Line]>::from(lines)))
                .collect(),
        }
    }

    pub fn parse(source: &str) -> Program {
        Program::new(parse(source))
    }

    pub fn block(&self, name: &str) -> Option<Rc<[Line]>> {
        self.blocks.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
