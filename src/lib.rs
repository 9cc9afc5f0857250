//! # C42
//!
//! A small interpreter for programs built from typed cells,
//! two digit opcodes and named blocks.
//!
//! A program is a text file of blocks. Execution begins at `main`.
//! ```text
//! #1 main
//! 41 -1 0      $ create integer cell -1
//! 04 -1 6
//! 02 -1        $ prints 6
//! #0
//! ```
//!
//! Run a file with `c42 code.cft`. Errors are reported as
//! `[line] CFTE<code> : <message>` and stop the program.

pub mod lang;
pub mod mach;
