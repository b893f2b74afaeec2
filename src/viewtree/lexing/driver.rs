//! Host loop
//!
//!     [Lexer] steps through a source one token at a time, asking the scanner first and falling
//!     back to the logos content lexer. [tokenize] runs it to the end and collects the output.

use super::common::{Checkpoint, Diagnostic, LexerOutput, Step};
use crate::viewtree::scanning::{Scanner, ScannerConfig, SourceCursor, MAX_SNAPSHOT_LEVELS};
use crate::viewtree::token::{ContentToken, Token, ValidTokens};

pub struct Lexer<'a> {
    scanner: Scanner,
    cursor: SourceCursor<'a>,
    valid: ValidTokens,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: ScannerConfig) -> Self {
        let valid = ValidTokens::for_config(&config);
        Lexer {
            scanner: Scanner::new(config),
            cursor: SourceCursor::new(source),
            valid,
            done: false,
        }
    }

    /// Continue lexing `source` from a checkpoint taken on a source with the same text before
    /// the checkpoint offset.
    pub fn resume(source: &'a str, config: ScannerConfig, checkpoint: &Checkpoint) -> Self {
        let valid = ValidTokens::for_config(&config);
        Lexer {
            scanner: Scanner::from_snapshot(config, checkpoint.snapshot.as_bytes()),
            cursor: SourceCursor::at(source, checkpoint.offset),
            valid,
            done: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.cursor.source()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// A checkpoint at the current position, or `None` if the scanner state is too tall to
    /// be stored in a snapshot without truncation.
    pub fn checkpoint(&self, token_index: usize) -> Option<Checkpoint> {
        if self.scanner.state().stack.len() > MAX_SNAPSHOT_LEVELS {
            return None;
        }
        Some(Checkpoint {
            offset: self.cursor.position(),
            token_index,
            snapshot: self.scanner.snapshot(),
        })
    }

    pub fn step(&mut self) -> Step {
        if self.done {
            return Step::Done;
        }
        loop {
            self.cursor.begin_token();
            let start = self.cursor.position();

            match self.scanner.try_scan(&mut self.cursor, self.valid) {
                Ok(Some(kind)) => {
                    let range = self.cursor.finish_token();
                    return Step::Token(Token::Scanned(kind), range);
                }
                Err(error) => {
                    return Step::Refused(Diagnostic {
                        offset: start,
                        error,
                    });
                }
                // Insignificant input was consumed: ask again from the new position
                Ok(None) if self.cursor.position() != start => continue,
                Ok(None) => {}
            }

            return match ContentToken::lex_one(self.cursor.rest()) {
                Some((token, len)) => {
                    let range = start..start + len;
                    self.cursor.reset_to(range.end);
                    Step::Token(Token::Content(token), range)
                }
                None => {
                    self.done = true;
                    Step::Done
                }
            };
        }
    }
}

/// Run `lexer` to the end, appending to `output`.
///
/// A checkpoint is recorded after every line break that consumed a terminator. `stop_at` sees
/// each one right after it is recorded; returning true ends the run there.
pub(crate) fn drive<F>(lexer: &mut Lexer<'_>, output: &mut LexerOutput, mut stop_at: F)
where
    F: FnMut(&Checkpoint) -> bool,
{
    loop {
        match lexer.step() {
            Step::Token(token, range) => {
                let resumable = token.is_line_break() && !range.is_empty();
                output.tokens.push((token, range));
                if !resumable {
                    continue;
                }
                if let Some(checkpoint) = lexer.checkpoint(output.tokens.len()) {
                    let stop = stop_at(&checkpoint);
                    output.checkpoints.push(checkpoint);
                    if stop {
                        return;
                    }
                }
            }
            Step::Refused(diagnostic) => output.diagnostics.push(diagnostic),
            Step::Done => return,
        }
    }
}

/// Tokenize a whole source.
pub fn tokenize(source: &str, config: &ScannerConfig) -> LexerOutput {
    let mut lexer = Lexer::new(source, config.clone());
    let mut output = LexerOutput::default();
    output.checkpoints.extend(lexer.checkpoint(0));
    drive(&mut lexer, &mut output, |_| false);
    output
}
