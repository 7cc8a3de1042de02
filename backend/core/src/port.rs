use serde::{Deserialize, Serialize};

/// Messages flowing from the port bridge back to the UI side.
///
/// One chat turn produces zero or more `Chunk`s followed by exactly one
/// terminal (`Done` or `Error`, never both). Nothing follows a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortMessage {
    /// A fragment of the SSE-framed response body, possibly mid-record.
    Chunk(String),
    /// The stream ended cleanly.
    Done,
    /// The turn failed, either before any output or mid-stream.
    Error(String),
}

impl PortMessage {
    /// Whether this message closes the channel for the turn.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PortMessage::Done | PortMessage::Error(_))
    }
}
