//! Common scanner module
//!
//! Errors shared by the indent stack and the scanner.

use std::fmt;

/// Errors that can occur while scanning
///
/// The grammar never sees these directly: the protocol-level [scan](super::Scanner::scan)
/// turns them into "no token produced", which the grammar reports as a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The indent stack is full; `depth` is the tab count that did not fit.
    CapacityExceeded { depth: u32, capacity: usize },
    /// A push that would break the strictly increasing order of the stack.
    NonIncreasingIndent { depth: u32, top: u32 },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::CapacityExceeded { depth, capacity } => write!(
                f,
                "Nesting too deep: depth {} needs more than {} indent levels",
                depth, capacity
            ),
            ScanError::NonIncreasingIndent { depth, top } => write!(
                f,
                "Indent depth {} is not deeper than the open level {}",
                depth, top
            ),
        }
    }
}

impl std::error::Error for ScanError {}
