//! Phase 2: Line Lexer
//!
//! The lexer classifies a single scan line by its first character:
//! - `[` opens a section header, which must end with `]`
//! - anything else is a `key = value` assignment
//!
//! Keys are lowercased and trimmed. Values are trimmed and lose one layer of
//! surrounding quotes (`"` or `'`, not required to match).

use crate::error::{ParseContext, ParseError, Result};
use crate::scanner::ScanLine;

/// What a single line asks the parser to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Switch to the named section, creating it if needed.
    Section(String),
    /// Store a value under a key in the current section.
    Assign { key: String, value: String },
}

/// Classify one scan line.
pub fn lex_line(sl: &ScanLine, ctx: &ParseContext) -> Result<Directive> {
    if sl.line.starts_with('[') {
        match section_name(&sl.line) {
            Some(name) => Ok(Directive::Section(name.to_string())),
            None => Err(ParseError::UnterminatedSection(String::new()).with_location(
                ctx,
                sl.line_num,
                sl.col + sl.line.chars().count(),
            )),
        }
    } else {
        match split_assignment(&sl.line) {
            Some((key, value)) => Ok(Directive::Assign { key, value }),
            None => Err(
                ParseError::MissingEquals(String::new()).with_location(ctx, sl.line_num, sl.col)
            ),
        }
    }
}

/// Everything between the leading `[` and the final `]`, taken literally.
fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Split at the first `=`. A line starting with `=` has no key and is rejected.
fn split_assignment(line: &str) -> Option<(String, String)> {
    let index = line.find('=').filter(|&i| i > 0)?;
    let key = line[..index].to_lowercase().trim().to_string();
    let value = unquote(line[index + 1..].trim()).to_string();
    Some((key, value))
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn unquote(value: &str) -> &str {
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    value.strip_suffix(is_quote).unwrap_or(value)
}
