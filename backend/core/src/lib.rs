pub mod error;
pub mod port;
pub mod types;

pub use error::RelayError;
pub use port::PortMessage;
pub use types::{ChatMessage, ChatRequest, PageContext, Role, TruncationResult};
