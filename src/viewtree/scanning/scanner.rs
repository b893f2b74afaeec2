//! The indentation scanner state machine
//!
//!     Each call to [Scanner::try_scan] decides at most one token from the lookahead character,
//!     the line-start flag, the top of the indent stack and the mask of acceptable kinds. The
//!     decision order is fixed:
//!
//!         1. End of input: the synthetic line break (once), then one indent close per open
//!            level.
//!         2. A line terminator: LF, or CR LF when enabled.
//!         3. A comment, when the comment extension is enabled.
//!         4. At the start of a line: measure the tabs and compare against the stack.
//!
//!     Every step is guarded by the mask. A kind the grammar cannot take is never produced;
//!     the call returns `None` instead and the host moves on through its own rules.

use super::common::ScanError;
use super::config::{FinalLineBreak, ScannerConfig};
use super::cursor::Cursor;
use super::indent_stack::IndentStack;
use super::snapshot::{self, Snapshot};
use crate::viewtree::token::{TokenKind, ValidTokens};

/// Everything the scanner remembers between calls. This is exactly what a snapshot stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    pub stack: IndentStack,
    /// The cursor is at the first character of a line whose indentation is not consumed yet.
    pub at_line_start: bool,
    /// The synthetic line break at end of input has been produced.
    pub emitted_final_line_break: bool,
}

impl ScannerState {
    pub fn initial(capacity: usize) -> Self {
        ScannerState {
            stack: IndentStack::with_capacity(capacity),
            at_line_start: true,
            emitted_final_line_break: false,
        }
    }
}

/// Outcome of measuring the indentation at the start of a line.
enum Measure {
    /// Only whitespace before the terminator or a comment, or a tab-free tail at end of input.
    Blank,
    Line(u32),
}

#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScannerConfig,
    state: ScannerState,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        let state = ScannerState::initial(config.max_depth);
        Scanner { config, state }
    }

    /// A fresh scanner resuming from a snapshot taken by a scanner with the same config.
    pub fn from_snapshot(config: ScannerConfig, bytes: &[u8]) -> Self {
        let mut scanner = Scanner::new(config);
        scanner.restore(bytes);
        scanner
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        snapshot::serialize(&self.state)
    }

    /// Replace the state with a decoded snapshot. Malformed bytes give the initial state.
    pub fn restore(&mut self, bytes: &[u8]) {
        self.state = snapshot::deserialize(bytes, self.config.max_depth);
    }

    pub fn reset(&mut self) {
        self.state = ScannerState::initial(self.config.max_depth);
    }

    /// Protocol-level scan: the produced kind, or `None` when no token is produced.
    ///
    /// A full indent stack is a refusal like any other "no token" outcome here; use
    /// [try_scan](Self::try_scan) to tell the two apart.
    pub fn scan<C: Cursor>(&mut self, cursor: &mut C, valid: ValidTokens) -> Option<TokenKind> {
        self.try_scan(cursor, valid).ok().flatten()
    }

    pub fn try_scan<C: Cursor>(
        &mut self,
        cursor: &mut C,
        valid: ValidTokens,
    ) -> Result<Option<TokenKind>, ScanError> {
        let lookahead = match cursor.lookahead() {
            Some(c) => c,
            None => return Ok(self.scan_end_of_input(cursor, valid)),
        };

        if valid.contains(TokenKind::LineBreak) {
            match lookahead {
                '\n' => {
                    cursor.advance(false);
                    return Ok(Some(self.line_break(cursor)));
                }
                '\r' if self.config.crlf => {
                    cursor.advance(false);
                    if cursor.lookahead() == Some('\n') {
                        cursor.advance(false);
                        return Ok(Some(self.line_break(cursor)));
                    }
                    // A lone CR is insignificant
                    return Ok(None);
                }
                _ => {}
            }
        }

        if self.config.is_comment_start(lookahead) && valid.contains(TokenKind::Comment) {
            self.scan_comment(cursor);
            return Ok(Some(TokenKind::Comment));
        }

        if self.state.at_line_start && valid.accepts_indentation() {
            return self.scan_indentation(cursor, valid);
        }

        Ok(None)
    }

    fn line_break<C: Cursor>(&mut self, cursor: &mut C) -> TokenKind {
        cursor.mark_end();
        self.state.at_line_start = true;
        TokenKind::LineBreak
    }

    fn scan_end_of_input<C: Cursor>(
        &mut self,
        cursor: &mut C,
        valid: ValidTokens,
    ) -> Option<TokenKind> {
        if !self.state.emitted_final_line_break
            && valid.contains(TokenKind::LineBreak)
            && self.needs_final_line_break()
        {
            self.state.emitted_final_line_break = true;
            return Some(self.line_break(cursor));
        }
        if !self.state.stack.is_base() && valid.contains(TokenKind::IndentClose) {
            self.state.stack.pop();
            cursor.mark_end();
            return Some(TokenKind::IndentClose);
        }
        None
    }

    fn needs_final_line_break(&self) -> bool {
        match self.config.final_line_break {
            FinalLineBreak::Always => true,
            FinalLineBreak::WhenMissing => !self.state.at_line_start,
        }
    }

    fn scan_comment<C: Cursor>(&mut self, cursor: &mut C) {
        while let Some(c) = cursor.lookahead() {
            if c == '\n' || (c == '\r' && self.config.crlf) {
                break;
            }
            cursor.advance(false);
        }
        cursor.mark_end();
        self.state.at_line_start = false;
    }

    fn measure<C: Cursor>(&self, cursor: &mut C) -> Measure {
        let mut col: u32 = 0;
        while let Some(c) = cursor.lookahead() {
            if c == '\t' {
                col = col.saturating_add(1);
            } else if !self.config.is_skipped_indent_char(c) {
                break;
            }
            cursor.advance(true);
        }
        match cursor.lookahead() {
            // Tabs running into end of input still form an indented line
            None if col > 0 => Measure::Line(col),
            None | Some('\n') => Measure::Blank,
            Some(c) if self.config.is_comment_start(c) => Measure::Blank,
            Some(_) => Measure::Line(col),
        }
    }

    fn scan_indentation<C: Cursor>(
        &mut self,
        cursor: &mut C,
        valid: ValidTokens,
    ) -> Result<Option<TokenKind>, ScanError> {
        // Commit point: the start of the line. Tokens that don't move it are zero-width and
        // leave the indentation to be measured again.
        cursor.mark_end();

        let col = match self.measure(cursor) {
            Measure::Blank => {
                if cursor.is_eof() {
                    // A tab-free tail without a terminator is an unterminated line
                    self.state.at_line_start = false;
                }
                return Ok(None);
            }
            Measure::Line(col) => col,
        };

        self.state.at_line_start = false;
        let top = self.state.stack.top();

        if col > top {
            if !valid.contains(TokenKind::IndentOpen) {
                return Ok(None);
            }
            self.state.stack.push(col)?;
            cursor.mark_end();
            return Ok(Some(TokenKind::IndentOpen));
        }

        if col < top {
            if !valid.contains(TokenKind::IndentClose) {
                return Ok(None);
            }
            self.state.stack.pop();
            if self.state.stack.top() > col {
                // More levels to close on this line
                self.state.at_line_start = true;
            } else {
                cursor.mark_end();
            }
            return Ok(Some(TokenKind::IndentClose));
        }

        if self.config.same_level && valid.contains(TokenKind::SameLevel) {
            cursor.mark_end();
            return Ok(Some(TokenKind::SameLevel));
        }
        Ok(None)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new(ScannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewtree::scanning::SourceCursor;

    /// Drive the scanner the way a runtime would when only structural tokens matter: content
    /// characters are stepped over one by one.
    fn structure(source: &str, config: ScannerConfig) -> Vec<TokenKind> {
        let valid = ValidTokens::for_config(&config);
        let mut scanner = Scanner::new(config);
        let mut cursor = SourceCursor::new(source);
        let mut out = Vec::new();
        loop {
            let start = cursor.position();
            cursor.begin_token();
            match scanner.scan(&mut cursor, valid) {
                Some(kind) => {
                    cursor.finish_token();
                    out.push(kind);
                }
                // The scanner consumed insignificant input; ask again
                None if cursor.position() != start => {}
                None if cursor.is_eof() => break,
                None => cursor.advance(false),
            }
        }
        out
    }

    fn scan(source: &str) -> Vec<TokenKind> {
        structure(source, ScannerConfig::default())
    }

    use TokenKind::{IndentClose as IC, IndentOpen as IO, LineBreak as LB, SameLevel as SL};

    #[test]
    fn test_single_line_without_terminator() {
        assert_eq!(scan("a"), vec![LB]);
    }

    #[test]
    fn test_nested_file_flushes_at_end() {
        assert_eq!(
            scan("a\n\tb\n\n\t\tc\n"),
            vec![LB, IO, LB, LB, IO, LB, LB, IC, IC]
        );
    }

    #[test]
    fn test_multi_level_drop_closes_one_level_per_call() {
        assert_eq!(scan("a\n\tb\n\t\tc\nb"), vec![LB, IO, LB, IO, LB, IC, IC, LB]);
    }

    #[test]
    fn test_blank_line_produces_only_line_break() {
        assert_eq!(scan("a\n\n\tb"), vec![LB, LB, IO, LB, IC]);
    }

    #[test]
    fn test_blank_line_with_tabs_does_not_close() {
        assert_eq!(
            scan("a\n\tb\n\t\t\n\tc\n"),
            vec![LB, IO, LB, LB, LB, LB, IC]
        );
    }

    #[test]
    fn test_spaces_do_not_count() {
        assert_eq!(scan("a\n  \t b\n\tc\n"), vec![LB, IO, LB, LB, LB, IC]);
    }

    #[test]
    fn test_spaces_end_measurement_when_not_ignored() {
        let config = ScannerConfig {
            ignore_spaces: false,
            ..ScannerConfig::default()
        };
        // " \tb" measures zero tabs: the space is content
        assert_eq!(structure("a\n \tb\n", config), vec![LB, LB, LB]);
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        assert_eq!(scan("a\r\n\tb\r\n"), vec![LB, IO, LB, LB, IC]);
    }

    #[test]
    fn test_lone_cr_is_not_a_terminator() {
        assert_eq!(scan("a\rb\n"), vec![LB, LB]);
    }

    #[test]
    fn test_same_level_variant() {
        let config = ScannerConfig {
            same_level: true,
            ..ScannerConfig::default()
        };
        assert_eq!(
            structure("a\n\tb\n\tc\nd\n", config),
            vec![SL, LB, IO, LB, SL, LB, IC, LB, LB]
        );
    }

    #[test]
    fn test_final_line_break_when_missing() {
        let config = ScannerConfig {
            final_line_break: FinalLineBreak::WhenMissing,
            ..ScannerConfig::default()
        };
        assert_eq!(structure("a\n\tb\n", config.clone()), vec![LB, IO, LB, IC]);
        assert_eq!(structure("a\n\tb", config.clone()), vec![LB, IO, LB, IC]);
        // Spaces at end of input count as an unterminated line
        assert_eq!(structure("a\n  ", config.clone()), vec![LB, LB]);
        // Tabs at end of input are measured like any other line
        assert_eq!(structure("a\n\t", config.clone()), vec![LB, IO, LB, IC]);
        assert_eq!(structure("a\n\t\tb\n\t", config), vec![LB, IO, LB, IC, LB]);
    }

    #[test]
    fn test_tab_tail_at_end_of_input() {
        assert_eq!(scan("a\n\t"), vec![LB, IO, LB, IC]);
        assert_eq!(scan("a\n\t\tb\n\t"), vec![LB, IO, LB, IC, LB]);

        let mut scanner = Scanner::default();
        let mut cursor = SourceCursor::at("a\n\t", 2);
        cursor.begin_token();
        assert_eq!(scanner.scan(&mut cursor, ValidTokens::all()), Some(IO));
        assert_eq!(scanner.state().stack.levels(), &[0, 1]);
        assert!(!scanner.state().at_line_start);
    }

    #[test]
    fn test_end_of_input_polls_are_idempotent() {
        let mut scanner = Scanner::default();
        let mut cursor = SourceCursor::new("");
        let valid = ValidTokens::all();
        assert_eq!(scanner.scan(&mut cursor, valid), Some(LB));
        assert_eq!(scanner.scan(&mut cursor, valid), None);
        assert_eq!(scanner.scan(&mut cursor, valid), None);
    }

    #[test]
    fn test_mask_is_respected() {
        let mut scanner = Scanner::default();
        let mut cursor = SourceCursor::new("\n");
        let valid = ValidTokens::all().without(LB);
        // At line start with a terminator: blank line, nothing to produce
        assert_eq!(scanner.scan(&mut cursor, valid), None);
        assert!(scanner.state().at_line_start);

        let mut cursor = SourceCursor::new("\tb");
        let valid = ValidTokens::empty().with(LB).with(IC);
        assert_eq!(scanner.scan(&mut cursor, valid), None);
        // Tabs were consumed and the line is now in its body
        assert_eq!(cursor.position(), 1);
        assert!(!scanner.state().at_line_start);
        assert!(scanner.state().stack.is_base());
    }

    #[test]
    fn test_end_of_input_flush_waits_for_mask() {
        let mut scanner = Scanner::default();
        scanner.state.stack.push(1).unwrap();
        scanner.state.stack.push(2).unwrap();
        let mut cursor = SourceCursor::new("");

        let closes_only = ValidTokens::empty().with(IC);
        assert_eq!(scanner.scan(&mut cursor, closes_only), Some(IC));
        assert_eq!(scanner.scan(&mut cursor, ValidTokens::all()), Some(LB));
        assert_eq!(scanner.scan(&mut cursor, ValidTokens::all()), Some(IC));
        assert_eq!(scanner.scan(&mut cursor, ValidTokens::all()), None);
        assert!(scanner.state().stack.is_base());
    }

    #[test]
    fn test_dedent_between_levels_is_permissive() {
        // Stack [0, 2] and a line at depth 1: close down to 0 and stay there
        assert_eq!(scan("a\n\t\tb\n\tc\n"), vec![LB, IO, LB, IC, LB, LB]);
    }

    #[test]
    fn test_capacity_refusal() {
        let config = ScannerConfig {
            max_depth: 2,
            ..ScannerConfig::default()
        };
        let valid = ValidTokens::for_config(&config);
        let mut scanner = Scanner::new(config);

        let mut cursor = SourceCursor::new("\tb");
        assert_eq!(scanner.try_scan(&mut cursor, valid), Ok(Some(IO)));

        scanner.state.at_line_start = true;
        let mut cursor = SourceCursor::new("\t\tc");
        assert_eq!(
            scanner.try_scan(&mut cursor, valid),
            Err(ScanError::CapacityExceeded {
                depth: 2,
                capacity: 2
            })
        );
        assert_eq!(scanner.state().stack.levels(), &[0, 1]);
        assert!(!scanner.state().at_line_start);

        scanner.state.at_line_start = true;
        let mut cursor = SourceCursor::new("\t\tc");
        assert_eq!(scanner.scan(&mut cursor, valid), None);
        assert_eq!(scanner.state().stack.levels(), &[0, 1]);
    }

    #[test]
    fn test_comment_extension() {
        let config = ScannerConfig {
            comment_prefix: Some('#'),
            ..ScannerConfig::default()
        };
        // Comment lines never open or close levels, wherever they are indented
        assert_eq!(
            structure("a\n\tb\n# top\n\t\t# deep\n\tc # trailing\n", config),
            vec![
                LB,
                IO,
                LB,
                TokenKind::Comment,
                LB,
                TokenKind::Comment,
                LB,
                TokenKind::Comment,
                LB,
                LB,
                IC
            ]
        );
    }

    #[test]
    fn test_snapshot_resume_mid_dedent_chain() {
        let source = "a\n\tb\n\t\tc\nd\n";
        let valid = ValidTokens::all();
        let mut scanner = Scanner::default();
        let mut cursor = SourceCursor::new(source);
        let mut produced = Vec::new();
        // Run until the first close of the chain
        while produced.last() != Some(&IC) {
            cursor.begin_token();
            let start = cursor.position();
            match scanner.scan(&mut cursor, valid) {
                Some(kind) => {
                    cursor.finish_token();
                    produced.push(kind);
                }
                None if cursor.position() == start => cursor.advance(false),
                None => {}
            }
        }
        let offset = cursor.position();
        let bytes = scanner.snapshot();

        let mut resumed = Scanner::from_snapshot(ScannerConfig::default(), bytes.as_bytes());
        assert_eq!(resumed.state(), scanner.state());
        let mut cursor = SourceCursor::at(source, offset);
        cursor.begin_token();
        assert_eq!(resumed.scan(&mut cursor, valid), Some(IC));
        assert!(resumed.state().stack.is_base());
    }
}
