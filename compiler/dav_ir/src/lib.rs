//! Block tree for DAV programs.
//!
//! The parser produces a [`Program`]; the interpreter walks it. Headers keep
//! their raw expression text: conditions, counts and sources are evaluated by
//! the interpreter each time they are reached, never at parse time.

mod block;

pub use block::{Block, Program};
