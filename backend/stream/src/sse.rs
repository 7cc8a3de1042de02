use bytes::Bytes;

/// Encode one normalized text delta as an SSE data record:
/// `data: {"content":"<text>"}\n\n`.
pub fn encode_delta(text: &str) -> Bytes {
    let json = serde_json::json!({ "content": text }).to_string();
    Bytes::from(format!("data: {json}\n\n"))
}
