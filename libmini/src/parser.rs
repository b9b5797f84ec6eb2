//! Phase 3: Document Parser
//!
//! The parser drives the scanner, lexes each line and applies the resulting
//! directive to the document under construction. It is a two-state machine:
//! `Idle` routes assignments to globals, `InSection` routes them to the named
//! section. Once a section is open there is no way back to `Idle`.
//!
//! The first error (read failure or malformed line) ends the parse.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::document::Document;
use crate::error::{ParseContext, Result};
use crate::lexer::{lex_line, Directive};
use crate::scanner::Scanner;

/// Where the next assignment goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// No header seen yet.
    Idle,
    /// Key into `Document::sections`.
    InSection(String),
}

/// Single-use parser over one reader.
pub struct Parser<'a, R> {
    scanner: Scanner<'a, R>,
    ctx: &'a ParseContext,
    document: Document,
    state: State,
}

impl<'a, R: BufRead> Parser<'a, R> {
    pub fn new(reader: R, ctx: &'a ParseContext) -> Self {
        Self {
            scanner: Scanner::new(reader, ctx),
            ctx,
            document: Document::new(),
            state: State::Idle,
        }
    }

    /// Consume the whole input and return the finished document.
    pub fn run(mut self) -> Result<Document> {
        let mut directives = 0usize;
        while let Some(line) = self.scanner.next() {
            let line = line?;
            let directive = lex_line(&line, self.ctx)?;
            trace!(line = line.line_num + 1, ?directive, "directive");
            self.apply(directive);
            directives += 1;
        }

        debug!(
            directives,
            globals = self.document.globals().len(),
            sections = self.document.sections().len(),
            "parsed document"
        );
        Ok(self.document)
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Section(name) => {
                let reopened = self.document.open_section(&name);
                debug!(section = %name, reopened, "entering section");
                self.state = State::InSection(name);
            }
            Directive::Assign { key, value } => {
                let target = match &self.state {
                    State::Idle => None,
                    State::InSection(name) => Some(name.as_str()),
                };
                self.document.target_mut(target).insert(key, value);
            }
        }
    }
}
