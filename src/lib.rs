//! # viewtree-scanner
//!
//! The indentation-sensitive lexical front end for the view.tree format.
//!
//! File Layout
//!
//!     src/viewtree
//!       ├── token      Token kinds, the acceptability mask and line-body tokens
//!       ├── scanning   The indentation scanner: cursor, indent stack, state machine, snapshots
//!       ├── lexing     A reference host loop driving the scanner over a whole file,
//!       │              plus incremental re-lexing from checkpoints
//!       └── testing    Factories shared by unit and integration tests
//!
//!     The scanner is the part a grammar runtime embeds. Everything under `lexing` plays the
//!     role of that runtime so the scanner can be exercised end to end.

pub mod viewtree;
