//! MINI configuration parser implementation.
//!
//! MINI is a small INI-style format: optional global `key = value` pairs
//! followed by named `[section]` blocks. Lines starting with `;` or `#` are
//! comments. Keys are case-insensitive; values are plain strings with one
//! layer of surrounding quotes removed.
//!
//! # Parsing Pipeline
//!
//! The parser streams its input through three phases:
//!
//! 1. **Scanner**: Pulls trimmed lines from a reader, dropping blank and
//!    comment lines.
//!
//! 2. **Line Lexer**: Classifies each line as a section header or an
//!    assignment.
//!
//! 3. **Document Parser**: Applies each directive to the document, tracking
//!    the current section.
//!
//! A parsed [`Document`] can then populate typed records through
//! [`FromDocument`] and [`FromSection`].

mod bind;
mod document;
mod error;
mod lexer;
mod parser;
mod scanner;

use std::io::{BufReader, Read};
use std::str::FromStr;

pub use bind::{BindError, FromDocument, FromSection, Place};
pub use document::{Document, Section};
pub use error::{ParseError, Result};

/// Parse a MINI document from a reader.
///
/// # Example
///
/// ```
/// use libmini::parse;
///
/// let doc = parse("[server]\nport = 8080\n".as_bytes()).unwrap();
/// assert_eq!(doc.section("server").unwrap().get("port"), Some("8080"));
/// ```
pub fn parse<R: Read>(reader: R) -> Result<Document> {
    parse_with_filename(reader, None)
}

/// Parse a MINI document from a reader with a filename for error messages.
pub fn parse_with_filename<R: Read>(reader: R, filename: Option<&str>) -> Result<Document> {
    let ctx = error::ParseContext::new(filename);
    parser::Parser::new(BufReader::new(reader), &ctx).run()
}

/// Parse a MINI document from a string.
pub fn parse_str(input: &str) -> Result<Document> {
    parse(input.as_bytes())
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}
