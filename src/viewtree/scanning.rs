//! Scanner
//!
//!     This module holds the indentation scanner: the piece a grammar runtime calls before
//!     every token to find out whether a structural token (line break, indent open, indent
//!     close, same level) sits at the cursor.
//!
//! Indentation Handling
//!
//!     The depth of a line is the number of tab characters before its first significant
//!     character. Spaces never count, there is no tab stop arithmetic. The scanner keeps a stack
//!     of open depths (bottom always 0, strictly increasing) and compares each measured line
//!     against the top:
//!         - deeper: push and produce IndentOpen
//!         - shallower: pop and produce IndentClose, one per call, until top <= depth
//!         - equal: produce SameLevel if the grammar variant has it, otherwise nothing
//!
//!     Lines with nothing but whitespace are blank and never change the stack.
//!
//! Commit Point
//!
//!     The scanner never peeks further than one character. Anything it measures it has to
//!     advance over, so it marks the end of the token explicitly: a line break commits through
//!     the terminator, an indent open commits through the tabs, and all but the last indent
//!     close of a multi-level drop commit nothing, leaving the tabs in place so the next call
//!     measures them again. That keeps the state small enough to snapshot as just the stack and
//!     two flags.
//!
//! End of Input
//!
//!     At end of input the scanner produces a synthetic line break at most once (see
//!     [FinalLineBreak] for when) and then one indent close per open level, one per call,
//!     until the stack is back at its base. Further calls produce nothing.
//!
//! Incremental Use
//!
//!     A scanner can be rebuilt from a [snapshot] taken at any token boundary. The snapshot is
//!     private to this crate version; it is not a wire format.

pub mod common;
pub mod config;
pub mod cursor;
pub mod indent_stack;
pub mod scanner;
pub mod snapshot;

pub use common::ScanError;
pub use config::{FinalLineBreak, ScannerConfig};
pub use cursor::{Cursor, SourceCursor};
pub use indent_stack::IndentStack;
pub use scanner::{Scanner, ScannerState};
pub use snapshot::{deserialize, serialize, Snapshot, MAX_SNAPSHOT_BYTES, MAX_SNAPSHOT_LEVELS};
