use pagetalk_core::{ChatMessage, Role, TruncationResult};
use tracing::{info, warn};

use crate::tokens::estimate_tokens;

/// Bound a transcript to `limit` estimated tokens.
///
/// Up to the first two leading `system` messages are essential and always
/// kept ahead of history; a third leading system message is ordinary history.
/// History is retained newest-first with a strict early stop: once a message
/// does not fit, nothing older is considered, so the kept history is always a
/// contiguous suffix of the input in chronological order.
///
/// If the essential messages alone exceed the limit they are returned on
/// their own. That is a best-effort floor, not a guarantee the result fits.
pub fn truncate_messages(messages: &[ChatMessage], limit: usize) -> TruncationResult {
    let initial_tokens = estimate_tokens(messages);
    if initial_tokens <= limit {
        return TruncationResult {
            messages: messages.to_vec(),
            was_truncated: false,
        };
    }

    let essential_len = messages
        .iter()
        .take(2)
        .take_while(|m| m.role == Role::System)
        .count();
    let (essential, history) = messages.split_at(essential_len);
    let essential_tokens = estimate_tokens(essential);

    if essential_tokens > limit {
        warn!(
            essential_tokens,
            limit, "essential system messages alone exceed the token limit"
        );
        return TruncationResult {
            messages: essential.to_vec(),
            was_truncated: true,
        };
    }

    let remaining_budget = limit - essential_tokens;
    let mut kept: Vec<ChatMessage> = Vec::new();
    let mut history_tokens = 0;
    for message in history.iter().rev() {
        let message_tokens = estimate_tokens(std::slice::from_ref(message));
        if history_tokens + message_tokens > remaining_budget {
            break;
        }
        kept.push(message.clone());
        history_tokens += message_tokens;
    }
    kept.reverse();

    let mut result = essential.to_vec();
    result.extend(kept);
    info!(
        input_tokens = initial_tokens,
        output_tokens = estimate_tokens(&result),
        limit,
        message_count = result.len(),
        "chat history truncated"
    );
    TruncationResult {
        messages: result,
        was_truncated: true,
    }
}
