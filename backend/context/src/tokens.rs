use pagetalk_core::ChatMessage;

/// Rough characters-per-token ratio used for budgeting.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of a list of messages.
///
/// This is a budget heuristic, not a tokenizer: total content length divided
/// by [`CHARS_PER_TOKEN`], rounded up. It is a deterministic pure function of
/// content length and knows nothing about real token boundaries.
pub fn estimate_tokens(messages: &[ChatMessage]) -> usize {
    let total_chars: usize = messages.iter().map(|m| m.content.len()).sum();
    total_chars.div_ceil(CHARS_PER_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagetalk_core::Role;

    fn msg(content: &str) -> ChatMessage {
        ChatMessage::new(Role::User, content)
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(estimate_tokens(&[]), 0);
        assert_eq!(estimate_tokens(&[msg("")]), 0);
    }

    #[test]
    fn test_exact_multiple_of_ratio() {
        assert_eq!(estimate_tokens(&[msg("abcd")]), 1);
        assert_eq!(estimate_tokens(&[msg("abcdefgh")]), 2);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_tokens(&[msg("a")]), 1);
        assert_eq!(estimate_tokens(&[msg("abcde")]), 2);
    }

    #[test]
    fn test_sums_across_messages_before_dividing() {
        // 2 + 2 chars = 4 chars = 1 token, not 2.
        assert_eq!(estimate_tokens(&[msg("ab"), msg("cd")]), 1);
    }

    #[test]
    fn test_deterministic_for_same_lengths() {
        let a = estimate_tokens(&[msg("hello world")]);
        let b = estimate_tokens(&[msg("HELLO WORLD")]);
        assert_eq!(a, b);
    }
}
