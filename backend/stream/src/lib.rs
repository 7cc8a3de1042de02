//! Stream transcoding: consumes the provider's chunked frame stream and
//! re-emits it as normalized SSE text deltas over a bounded channel.
//!
//! The same buffering discipline appears twice in the pipeline — NDJSON lines
//! here, `\n\n`-terminated SSE records on the UI side of the port bridge —
//! so both are built on the one [`RecordAccumulator`].

pub mod accum;
pub mod sse;
pub mod transcoder;

pub use accum::{RecordAccumulator, Utf8Accumulator};
pub use sse::encode_delta;
pub use transcoder::{transcode, DELTA_BUFFER_SIZE};
