use pagetalk_stream::RecordAccumulator;
use serde_json::Value;
use tracing::warn;

/// UI-side reassembly of the SSE-framed chunks arriving over the port.
///
/// Chunks can split an SSE record anywhere, so records are buffered until
/// their `\n\n` terminator arrives — the same accumulator discipline the
/// transcoder applies to provider frames, one layer up.
pub struct SseAssembler {
    records: RecordAccumulator,
}

impl SseAssembler {
    pub fn new() -> Self {
        Self {
            records: RecordAccumulator::new("\n\n"),
        }
    }

    /// Feed one inbound chunk; returns the content deltas it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        let mut deltas = Vec::new();
        for record in self.records.push(chunk) {
            let record = record.trim();
            if record.is_empty() || record == "data: [DONE]" {
                continue;
            }
            let Some(data) = record.strip_prefix("data: ") else {
                warn!(record, "SSE record without data prefix");
                continue;
            };
            match serde_json::from_str::<Value>(data.trim()) {
                Ok(value) => {
                    if let Some(content) = value.get("content").and_then(Value::as_str) {
                        if !content.is_empty() {
                            deltas.push(content.to_string());
                        }
                    }
                }
                Err(e) => warn!(error = %e, data, "failed to parse SSE data record"),
            }
        }
        deltas
    }
}

impl Default for SseAssembler {
    fn default() -> Self {
        Self::new()
    }
}
