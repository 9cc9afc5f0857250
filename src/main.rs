//! # C42
//!
//! Command line runner for C42 programs.
//!

mod term;

fn main() {
    std::process::exit(term::main());
}
