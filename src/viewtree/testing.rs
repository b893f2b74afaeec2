//! Testing utilities
//!
//!     Helpers shared by the unit tests and the integration tests under `tests/`.
//!
//!     - [factories]: build spanned token vectors from `(token, start, end)` triples.
//!     - [sample_path] / [load_sample]: the curated view.tree documents under `docs/samples/`.
//!       Tests that exercise whole documents should read them from there instead of writing
//!       tab-indented text inline, where a stray space is easy to miss.
//!     - [lex_structure]: the scanner-produced kinds of a source, content tokens dropped.

pub mod factories;

use crate::viewtree::lexing::tokenize;
use crate::viewtree::scanning::ScannerConfig;
use crate::viewtree::token::TokenKind;
use std::path::PathBuf;

/// Path of a sample document, relative to `docs/samples/` at the crate root.
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("docs")
        .join("samples")
        .join(name)
}

/// Read a sample document, panicking with the path when it is missing.
pub fn load_sample(name: &str) -> String {
    let path = sample_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read sample {}: {}", path.display(), e))
}

pub fn lex_structure(source: &str, config: &ScannerConfig) -> Vec<TokenKind> {
    tokenize(source, config).structure()
}
