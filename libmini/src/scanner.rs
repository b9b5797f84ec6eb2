//! Phase 1: Scanner
//!
//! The scanner pulls candidate content lines from a reader. It performs:
//! - Whitespace trimming
//! - Blank line filtering
//! - Comment filtering (`;` and `#` lines)
//!
//! It is a lazy iterator: `None` is the end of input, `Some(Err(_))` is a read
//! failure, after which the scanner is exhausted.

use std::io::{self, BufRead};

use crate::error::{ParseContext, ParseError, Result};

/// A single line that survived scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    /// Content with surrounding whitespace removed.
    pub line: String,
    /// Zero-based line number for error reporting.
    pub line_num: usize,
    /// Zero-based column of the first content character.
    pub col: usize,
}

/// Line scanner over any buffered reader.
pub struct Scanner<'a, R> {
    reader: R,
    ctx: &'a ParseContext,
    buf: String,
    line_num: usize,
    done: bool,
}

impl<'a, R: BufRead> Scanner<'a, R> {
    pub fn new(reader: R, ctx: &'a ParseContext) -> Self {
        Self {
            reader,
            ctx,
            buf: String::new(),
            line_num: 0,
            done: false,
        }
    }
}

/// Whether a trimmed line carries no content.
fn is_noise(line: &str) -> bool {
    line.is_empty() || line.starts_with(';') || line.starts_with('#')
}

impl<R: BufRead> Iterator for Scanner<'_, R> {
    type Item = Result<ScanLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    let line_num = self.line_num;
                    self.line_num += 1;

                    let content = self.buf.trim();
                    if is_noise(content) {
                        continue;
                    }
                    let leading = self.buf.len() - self.buf.trim_start().len();
                    let col = self.buf[..leading].chars().count();
                    return Some(Ok(ScanLine {
                        line: content.to_string(),
                        line_num,
                        col,
                    }));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    let err = ParseError::Read(e, String::new());
                    return Some(Err(err.with_location(self.ctx, self.line_num, 0)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    fn scan_all(input: &str) -> Vec<ScanLine> {
        let ctx = ParseContext::new(None);
        Scanner::new(input.as_bytes(), &ctx)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn first_line(input: &str) -> String {
        scan_all(input).remove(0).line
    }

    /// Reader that yields some bytes and then fails.
    struct Flaky {
        head: &'static [u8],
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.head.is_empty() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            let n = self.head.len().min(buf.len());
            buf[..n].copy_from_slice(&self.head[..n]);
            self.head = &self.head[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(first_line("foo"), "foo");
        assert_eq!(first_line("\nfoo"), "foo");
        assert_eq!(first_line("\tfoo"), "foo");
        assert_eq!(first_line(" foo"), "foo");
        assert_eq!(first_line("foo  \t"), "foo");
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let lines = scan_all("; note\n\n   \n# another\n  ;indented\nkey=value\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line, "key=value");
        assert_eq!(lines[0].line_num, 5);
    }

    #[test]
    fn test_tracks_line_and_column() {
        let lines = scan_all("a=1\n\n    [b]\n");
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].line_num, lines[0].col), (0, 0));
        assert_eq!((lines[1].line_num, lines[1].col), (2, 4));
    }

    #[test]
    fn test_crlf_line_endings() {
        let lines = scan_all("[a]\r\nx = 1\r\n");
        let text: Vec<&str> = lines.iter().map(|l| l.line.as_str()).collect();
        assert_eq!(text, vec!["[a]", "x = 1"]);
    }

    #[test]
    fn test_empty_input_is_end_of_input() {
        assert!(scan_all("").is_empty());
        assert!(scan_all("\n\n# only comments\n").is_empty());
    }

    #[test]
    fn test_read_failure_is_distinct_from_end() {
        let ctx = ParseContext::new(Some("flaky.ini"));
        let reader = BufReader::new(Flaky { head: b"a=1\n" });
        let mut scanner = Scanner::new(reader, &ctx);

        assert_eq!(scanner.next().unwrap().unwrap().line, "a=1");
        let err = scanner.next().unwrap().unwrap_err();
        assert!(matches!(err, ParseError::Read(..)));
        assert_eq!(err.to_string(), "Failed to read input at 2:1 of <flaky.ini>");
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_read_failure() {
        let ctx = ParseContext::new(None);
        let bytes: &[u8] = b"a=1\nb=\xff\xfe\n";
        let results: Vec<_> = Scanner::new(bytes, &ctx).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ParseError::Read(..))));
    }
}
