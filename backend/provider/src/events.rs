use serde::Deserialize;
use tracing::warn;

/// One logical provider event, decoded from a single NDJSON frame line.
///
/// Closed set: dispatch over stream frames is exhaustive and compiler-checked
/// instead of switching on a loose `type` string at every call site.
/// Transport-level faults are not represented here; they arrive as the error
/// side of the frame stream itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental fragment of model-generated text. May be empty; the
    /// transcoder decides that empty deltas are not worth emitting.
    TextDelta(String),
    /// Logical end of the model turn. The transport may still carry frames
    /// after this.
    StreamStop,
    /// A model-level error delivered as a normal-looking frame.
    EmbeddedError(String),
    /// A known frame type with nothing to emit.
    Ignored,
    /// Anything unrecognized, carrying the offending type (or a parse note)
    /// for diagnostics.
    Unknown(String),
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    delta: Option<RawDelta>,
    #[serde(default)]
    error: Option<RawError>,
}

#[derive(Deserialize)]
struct RawDelta {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct RawError {
    #[serde(default)]
    message: Option<String>,
}

/// Classify one newline-delimited JSON object from the provider stream.
///
/// Unparseable lines are reported as [`StreamEvent::Unknown`] rather than an
/// error: a single garbled frame must not take down the whole stream.
pub fn classify_frame_line(line: &str) -> StreamEvent {
    let frame: RawFrame = match serde_json::from_str(line) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, "unparseable provider frame");
            return StreamEvent::Unknown("unparseable frame".to_string());
        }
    };

    match frame.kind.as_str() {
        "content_block_delta" => match frame.delta {
            Some(delta) if delta.kind == "text_delta" => StreamEvent::TextDelta(delta.text),
            _ => StreamEvent::Unknown(frame.kind),
        },
        "message_stop" => StreamEvent::StreamStop,
        "error" => {
            let message = frame
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown".to_string());
            StreamEvent::EmbeddedError(message)
        }
        "message_start" | "content_block_start" | "content_block_stop" => StreamEvent::Ignored,
        _ => StreamEvent::Unknown(frame.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_delta() {
        let event = classify_frame_line(
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#,
        );
        assert_eq!(event, StreamEvent::TextDelta("Hi".into()));
    }

    #[test]
    fn test_empty_text_delta_still_classifies() {
        let event = classify_frame_line(
            r#"{"type":"content_block_delta","delta":{"type":"text_delta","text":""}}"#,
        );
        assert_eq!(event, StreamEvent::TextDelta(String::new()));
    }

    #[test]
    fn test_non_text_delta_is_unknown() {
        let event = classify_frame_line(
            r#"{"type":"content_block_delta","delta":{"type":"input_json_delta","partial_json":"{"}}"#,
        );
        assert_eq!(event, StreamEvent::Unknown("content_block_delta".into()));
    }

    #[test]
    fn test_message_stop() {
        assert_eq!(
            classify_frame_line(r#"{"type":"message_stop"}"#),
            StreamEvent::StreamStop
        );
    }

    #[test]
    fn test_embedded_error_with_message() {
        let event = classify_frame_line(
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        );
        assert_eq!(event, StreamEvent::EmbeddedError("Overloaded".into()));
    }

    #[test]
    fn test_embedded_error_without_message() {
        let event = classify_frame_line(r#"{"type":"error"}"#);
        assert_eq!(event, StreamEvent::EmbeddedError("Unknown".into()));
    }

    #[test]
    fn test_bookkeeping_frames_are_ignored() {
        for frame in [
            r#"{"type":"message_start","message":{}}"#,
            r#"{"type":"content_block_start","index":0}"#,
            r#"{"type":"content_block_stop","index":0}"#,
        ] {
            assert_eq!(classify_frame_line(frame), StreamEvent::Ignored);
        }
    }

    #[test]
    fn test_unrecognized_type_is_unknown() {
        assert_eq!(
            classify_frame_line(r#"{"type":"ping"}"#),
            StreamEvent::Unknown("ping".into())
        );
    }

    #[test]
    fn test_invalid_json_is_unknown() {
        assert!(matches!(
            classify_frame_line("not json at all"),
            StreamEvent::Unknown(_)
        ));
    }
}
