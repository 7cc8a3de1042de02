//! Context-window budgeting for chat transcripts.
//!
//! Keeps an unbounded chat history within a token budget before the provider
//! payload is built: leading system messages are preserved, recent history is
//! kept newest-first, everything older is dropped.

pub mod tokens;
pub mod truncate;

pub use tokens::{estimate_tokens, CHARS_PER_TOKEN};
pub use truncate::truncate_messages;
