//! Error types for MINI parsing.

use std::io;

use thiserror::Error;

/// Result type for MINI parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => String::new(),
        }
    }
}

/// Error type for MINI parsing.
///
/// The trailing `String` of every variant is a location suffix, empty unless
/// the parse was given a filename.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("Failed to read input{1}")]
    Read(#[source] io::Error, String),

    /// Section header without a closing bracket.
    #[error("Section names must be surrounded by [ and ], as in [section]{0}")]
    UnterminatedSection(String),

    /// Assignment without an equals sign, or with nothing before it.
    #[error("Configuration format requires an equals between the key and value{0}")]
    MissingEquals(String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::Read(source, _) => ParseError::Read(source, suffix),
            ParseError::UnterminatedSection(_) => ParseError::UnterminatedSection(suffix),
            ParseError::MissingEquals(_) => ParseError::MissingEquals(suffix),
        }
    }

    /// Returns `true` for syntax errors in the input, `false` for read failures.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, ParseError::Read(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages_without_filename() {
        let ctx = ParseContext::new(None);
        let err = ParseError::MissingEquals(String::new()).with_location(&ctx, 3, 0);
        assert_eq!(
            err.to_string(),
            "Configuration format requires an equals between the key and value"
        );
    }

    #[test]
    fn test_messages_with_filename() {
        let ctx = ParseContext::new(Some("app.ini"));
        let err = ParseError::UnterminatedSection(String::new()).with_location(&ctx, 0, 2);
        assert_eq!(
            err.to_string(),
            "Section names must be surrounded by [ and ], as in [section] at 1:3 of <app.ini>"
        );
    }

    #[test]
    fn test_read_error_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let err = ParseError::Read(io_err, String::new());
        assert!(!err.is_format_error());
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_format_errors() {
        assert!(ParseError::MissingEquals(String::new()).is_format_error());
        assert!(ParseError::UnterminatedSection(String::new()).is_format_error());
    }
}
