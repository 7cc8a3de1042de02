use bytes::Bytes;
use futures::StreamExt;
use pagetalk_core::RelayError;
use pagetalk_provider::{classify_frame_line, FrameStream, StreamEvent};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::accum::{RecordAccumulator, Utf8Accumulator};
use crate::sse::encode_delta;

/// Bounded buffer between the transcoder task and the response writer.
pub const DELTA_BUFFER_SIZE: usize = 256;

enum LineOutcome {
    Continue,
    /// Terminal: an error was flagged or the sink is gone. The source must
    /// not be read any further.
    Halt,
}

/// Drive one provider frame stream to completion, writing SSE-encoded
/// normalized deltas into `tx`.
///
/// Runs as the producer half of a bounded channel whose consumer is the HTTP
/// response body. Terminal behavior:
/// - natural source end closes the channel (dropping `tx`), no stop frame
///   required;
/// - an embedded `error` frame or a transport fault sends exactly one
///   `Err` and stops reading the source — once an error is flagged, no
///   further delta is ever emitted no matter what the source still holds;
/// - a dropped receiver aborts the provider read instead of leaking it.
pub async fn transcode(
    mut frames: FrameStream,
    provider_name: &str,
    tx: mpsc::Sender<Result<Bytes, RelayError>>,
) {
    let mut utf8 = Utf8Accumulator::new();
    let mut lines = RecordAccumulator::new("\n");
    let mut saw_stop = false;

    while let Some(frame) = frames.next().await {
        let bytes = match frame {
            Ok(bytes) => bytes,
            Err(e) => {
                let message = format!("{provider_name} SDK error: {e}");
                error!(%message, "transport fault in provider stream");
                let _ = tx.send(Err(RelayError::Stream(message))).await;
                return;
            }
        };

        let text = utf8.push(&bytes);
        for line in lines.push(&text) {
            match dispatch_line(&line, provider_name, &mut saw_stop, &tx).await {
                LineOutcome::Continue => {}
                LineOutcome::Halt => return,
            }
        }
    }

    // The provider may not terminate its final frame with a newline.
    if let Some(tail) = lines.take_remainder() {
        if let LineOutcome::Halt = dispatch_line(&tail, provider_name, &mut saw_stop, &tx).await {
            return;
        }
    }
    debug!(message_stop_seen = saw_stop, "provider stream closed");
}

async fn dispatch_line(
    line: &str,
    provider_name: &str,
    saw_stop: &mut bool,
    tx: &mpsc::Sender<Result<Bytes, RelayError>>,
) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Continue;
    }
    match classify_frame_line(line) {
        StreamEvent::TextDelta(delta) => {
            if delta.is_empty() {
                return LineOutcome::Continue;
            }
            if tx.send(Ok(encode_delta(&delta))).await.is_err() {
                debug!("delta sink closed, aborting provider read");
                return LineOutcome::Halt;
            }
            LineOutcome::Continue
        }
        StreamEvent::StreamStop => {
            *saw_stop = true;
            LineOutcome::Continue
        }
        StreamEvent::EmbeddedError(message) => {
            let message = format!("{provider_name} error: {message}");
            error!(%message, "error frame in provider stream");
            let _ = tx.send(Err(RelayError::Stream(message))).await;
            LineOutcome::Halt
        }
        StreamEvent::Ignored => LineOutcome::Continue,
        StreamEvent::Unknown(kind) => {
            warn!(%kind, "unhandled provider frame type");
            LineOutcome::Continue
        }
    }
}
