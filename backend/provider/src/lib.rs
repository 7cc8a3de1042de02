//! Provider-facing half of the relay pipeline.
//!
//! Builds the fixed provider payload (system blocks plus strictly alternating
//! role-coalesced messages), classifies the provider's streamed event frames
//! into a closed enum, and exposes the injected [`ModelProvider`] seam with a
//! reqwest-backed Claude client behind it.

pub mod client;
pub mod events;
pub mod payload;

pub use client::{ClaudeClient, FrameStream, ModelProvider, ProviderError, DEFAULT_API_URL};
pub use events::{classify_frame_line, StreamEvent};
pub use payload::{build_payload, ContentBlock, ProviderMessage, ProviderPayload, ProviderRole};
