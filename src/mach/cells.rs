use super::{Cell, CellType, Update};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Cell memory
///
/// Owned by one runtime. Cells live until the program ends.

#[derive(Debug, Default)]
pub struct Cells {
    cells: HashMap<String, Cell>,
}

impl Cells {
    pub fn new() -> Cells {
        Cells::default()
    }

    pub fn clear(&mut self) {
        self.cells.clear()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Create a defaulted cell, replacing any cell of the same name.
    pub fn create(&mut self, name: &str, tag: &str) -> Result<&mut Cell> {
        if !is_valid_name(name) {
            return Err(error!(InvalidCellName; name));
        }
        let cell_type = match CellType::from_tag(tag) {
            Some(t) => t,
            None => return Err(error!(InvalidCellType; tag)),
        };
        self.cells.insert(name.to_string(), Cell::new(cell_type));
        self.get_mut(name)
    }

    pub fn get(&self, name: &str) -> Result<&Cell> {
        self.cells
            .get(name)
            .ok_or_else(|| error!(CellNotFound; name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Cell> {
        self.cells
            .get_mut(name)
            .ok_or_else(|| error!(CellNotFound; name))
    }

    pub fn assign(&mut self, name: &str, text: &str, mode: Update) -> Result<()> {
        self.get_mut(name)?.assign(text, mode)
    }
}

/// Cell names are negative integers from -1 with no leading zero.
pub fn is_valid_name(name: &str) -> bool {
    let digits = match name.strip_prefix('-') {
        Some(d) => d,
        None => return false,
    };
    let mut chars = digits.chars();
    match chars.next() {
        Some('1'..='9') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}
