/*!
## Rust Machine Module

This Rust module holds the cell memory, the opcode table
and the block scheduler that executes parsed C42 programs.

*/

mod cell;
mod cells;
mod frame;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod val;

pub use cell::Cell;
pub use cell::CellType;
pub use cell::Update;
pub use cells::is_valid_name;
pub use cells::Cells;
pub use frame::Frame;
pub use frame::FrameState;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;

#[cfg(test)]
mod tests;
