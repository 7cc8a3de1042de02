//! Port bridge: the long-lived duplex channel between the UI process and the
//! backend-calling process. One bridge turn posts one chat request, forwards
//! the response body chunk by chunk, and ends with exactly one terminal
//! signal.

pub mod assembler;
pub mod port;

pub use assembler::SseAssembler;
pub use port::PortBridge;
