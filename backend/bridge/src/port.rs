use futures::StreamExt;
use pagetalk_core::{ChatRequest, PortMessage};
use pagetalk_stream::Utf8Accumulator;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Buffer between the bridge task and the UI-side consumer.
const PORT_BUFFER_SIZE: usize = 64;

/// Connects the UI side to the relay endpoint for single-use chat turns.
///
/// Each [`open`](PortBridge::open) call is one turn: the request is posted,
/// the response body is forwarded as [`PortMessage::Chunk`]s, and the channel
/// closes right after one terminal `Done` or `Error` — never both, and never
/// a chunk after either.
pub struct PortBridge {
    endpoint: String,
    client: reqwest::Client,
}

impl PortBridge {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Start one chat turn. The returned receiver yields the turn's inbound
    /// messages; dropping it cancels the turn.
    pub fn open(&self, request: ChatRequest) -> mpsc::Receiver<PortMessage> {
        let (tx, rx) = mpsc::channel(PORT_BUFFER_SIZE);
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            run_turn(client, endpoint, request, tx).await;
        });
        rx
    }
}

async fn run_turn(
    client: reqwest::Client,
    endpoint: String,
    request: ChatRequest,
    tx: mpsc::Sender<PortMessage>,
) {
    let response = match client.post(&endpoint).json(&request).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "relay fetch failed");
            let _ = tx.send(PortMessage::Error(e.to_string())).await;
            return;
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        // Prefer the relay's own error field; fall back to the status line.
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string()),
            Err(_) => format!("Backend responded with status {status}"),
        };
        warn!(%status, %message, "relay returned an error response");
        let _ = tx.send(PortMessage::Error(message)).await;
        return;
    }

    let mut utf8 = Utf8Accumulator::new();
    let mut body = response.bytes_stream();
    while let Some(fragment) = body.next().await {
        match fragment {
            Ok(bytes) => {
                let text = utf8.push(&bytes);
                if text.is_empty() {
                    continue;
                }
                if tx.send(PortMessage::Chunk(text)).await.is_err() {
                    debug!("UI side disconnected, abandoning turn");
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(PortMessage::Error(e.to_string())).await;
                return;
            }
        }
    }
    let _ = tx.send(PortMessage::Done).await;
}
