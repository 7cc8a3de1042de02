//! HTTP relay endpoint: validates one chat turn, bounds its history, invokes
//! the provider, and streams normalized SSE deltas back to the caller.

pub mod relay;
pub mod server;

pub use server::{build_router, GatewayState};
