//! Scanner variants
//!
//!     Grammars for view.tree disagree on a handful of edge-case policies: whether a same-level
//!     token exists, whether spaces may precede tabs, whether CR LF is a terminator, whether the
//!     scanner owns comments, and whether a file that already ends in a line feed still gets a
//!     synthetic one. One state machine covers all of them, parameterized by this struct.

use super::indent_stack::IndentStack;
use serde::{Deserialize, Serialize};

/// When the synthetic line break at end of input is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinalLineBreak {
    /// Once at end of input, even if the input already ends with a terminator.
    #[default]
    Always,
    /// Only if the last line has no terminator of its own.
    WhenMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Produce `SameLevel` for lines at the depth of the open level.
    pub same_level: bool,
    /// Skip spaces while measuring indentation. When false, a space ends the measurement.
    pub ignore_spaces: bool,
    /// Accept CR LF as a terminator and skip stray CRs while measuring.
    pub crlf: bool,
    /// Character that starts a comment running to the end of the line.
    pub comment_prefix: Option<char>,
    /// Indent stack capacity, base level included.
    pub max_depth: usize,
    pub final_line_break: FinalLineBreak,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            same_level: false,
            ignore_spaces: true,
            crlf: true,
            comment_prefix: None,
            max_depth: IndentStack::DEFAULT_CAPACITY,
            final_line_break: FinalLineBreak::Always,
        }
    }
}

impl ScannerConfig {
    /// Whether `c` ends the indentation of a line without being content.
    pub(crate) fn is_skipped_indent_char(&self, c: char) -> bool {
        match c {
            ' ' => self.ignore_spaces,
            '\r' => self.crlf,
            _ => false,
        }
    }

    pub(crate) fn is_comment_start(&self, c: char) -> bool {
        self.comment_prefix == Some(c)
    }
}
