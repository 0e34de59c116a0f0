//! notelens text preprocessing layer.
//!
//! Everything downstream (local embeddings, keyword extraction, highlighting,
//! local summaries) sees text through these helpers, so they have to agree
//! on what a token and a sentence are.
//!
//! ## What we do
//!
//! - Tokenization on whitespace plus ASCII and CJK punctuation, lowercased
//! - Sentence splitting on `。！？.!?；;`, terminators kept
//! - Codepoint-safe truncation (never cuts a character in half)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. No failure modes either:
//! blank input just yields empty output.
//!
//! ```rust
//! use canonical::{split_sentences, tokenize, truncate_chars};
//!
//! assert_eq!(tokenize("Graph Theory, 图论"), vec!["graph", "theory", "图论"]);
//! assert_eq!(split_sentences("One. Two"), vec!["One.", "Two"]);
//! assert_eq!(truncate_chars("数据结构", 2), "数据");
//! ```

mod sentence;
mod token;
mod truncate;

pub use crate::sentence::{is_terminator, split_sentences};
pub use crate::token::{is_separator, tokenize};
pub use crate::truncate::{ellipsize, truncate_chars};
