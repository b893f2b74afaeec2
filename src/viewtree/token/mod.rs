//! Core token types shared across the scanner, the host driver and tooling.

pub mod content;
pub mod core;
pub mod formatting;

pub use content::ContentToken;
pub use self::core::{Token, TokenKind, ValidTokens};
pub use formatting::{format_simple, format_structure};
