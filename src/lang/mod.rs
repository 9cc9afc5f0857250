/*!
# Rust Language Module

This Rust module splits C42 source lines into tokens
and groups them into named blocks.

*/

pub type LineNumber = usize;

/// Opens a block: `#1 name`.
pub const START_BLOCK: &str = "#1";
/// Closes the current block.
pub const END_BLOCK: &str = "#0";
/// Reserved name of the block a program starts in.
pub const ENTRY_BLOCK: &str = "main";
/// Everything from this standalone token to the end of the line is ignored.
pub const COMMENT: &str = "$";

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::Line;
pub use parse::parse;
pub use parse::Blocks;

#[cfg(test)]
mod tests;
