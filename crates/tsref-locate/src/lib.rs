//! Positional parsing for the tsconfig dialect
//!
//! `tsconfig.json` files are JSON plus `//` and `/* */` comments and
//! trailing commas. This crate parses that dialect just deeply enough to
//! retain byte offsets per node, so that the two generated regions
//! (`compilerOptions.paths` and top-level `references`) can be located and
//! rewritten without disturbing any other byte of the file.

pub mod document;
pub mod error;
pub mod parser;

pub use document::{Document, SpanPair};
pub use error::{Error, Result};
pub use parser::{Node, Property, Span, Value, parse_text};
