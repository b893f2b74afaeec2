//! Lexer
//!
//!     This module plays the part of the grammar runtime around the scanner: it calls the
//!     scanner before every token, and when the scanner has nothing to say it lexes one line-body
//!     token with logos (see [ContentToken](crate::viewtree::token::ContentToken)). The result is
//!     the full token stream of a file, with byte ranges into the source.
//!
//! The Host Loop
//!
//!     Each step:
//!         1. Open a token at the current position and call the scanner with every kind the
//!            configured variant can produce.
//!         2. A produced kind becomes a token spanning up to the scanner's commit point.
//!         3. No token, but the scanner consumed whitespace: call it again from there.
//!         4. No token and no progress: lex one content token, or stop at end of input.
//!
//!     A capacity refusal is reported as a [Diagnostic] and the loop carries on with the line
//!     body, the same way a grammar runtime would report a syntax error and recover.
//!
//! Checkpoints and Incremental Lexing
//!
//!     After every line break that consumed a real terminator the loop records a [Checkpoint]:
//!     the offset, the number of tokens so far, and a scanner snapshot. Lexing can resume from
//!     any checkpoint with a fresh scanner, which is what [IncrementalLexer] builds on to re-lex
//!     only the region around an edit.

pub mod common;
pub mod driver;
pub mod incremental;

pub use common::{Checkpoint, Diagnostic, LexError, LexerOutput, Step};
pub use driver::{tokenize, Lexer};
pub use incremental::{EditOutcome, IncrementalLexer};
