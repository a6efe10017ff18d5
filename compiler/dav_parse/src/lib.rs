//! Block parser for DAV.
//!
//! Turns indentation-structured sentence lines into a [`Program`]. A line
//! whose leading phrase names a construct (function, if, loop) opens a block;
//! every following line indented deeper than that header belongs to its body.
//! Anything unrecognized becomes a [`Block::Statement`] for the interpreter to
//! classify at run time, so parsing never fails.
//!
//! [`render`] prints a program back to source with the vocabulary's canonical
//! phrasing; parsing that output yields the same tree.

mod header;
mod lines;
mod params;
mod parser;
pub mod phrase;
mod printer;

pub use lines::{source_lines, SourceLine};
pub use parser::BlockParser;
pub use printer::render;

pub use dav_ir::{Block, Program};
use dav_vocab::Vocabulary;

/// Parse a whole source text.
pub fn parse(source: &str, vocab: &Vocabulary) -> Program {
    BlockParser::new(vocab).parse(source)
}
