/// Splits streamed text into delimiter-terminated records, carrying the
/// incomplete trailing fragment across pushes.
///
/// A transport frame can hold several records, part of one, or a record split
/// across two frames; `push` only ever returns complete records.
#[derive(Debug)]
pub struct RecordAccumulator {
    buffer: String,
    delimiter: &'static str,
}

impl RecordAccumulator {
    pub fn new(delimiter: &'static str) -> Self {
        Self {
            buffer: String::new(),
            delimiter,
        }
    }

    /// Append `chunk` and return every record completed by it, without the
    /// delimiter. The unterminated remainder stays buffered for the next push.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);
        let mut records = Vec::new();
        while let Some(idx) = self.buffer.find(self.delimiter) {
            let record = self.buffer[..idx].to_string();
            self.buffer.drain(..idx + self.delimiter.len());
            records.push(record);
        }
        records
    }

    /// Drain whatever is left once the source is exhausted. `None` when the
    /// last record ended cleanly on a delimiter.
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Stateful incremental UTF-8 decoder.
///
/// A multi-byte code point split across two transport frames must decode to
/// the original character, not replacement garbage, so the incomplete trailing
/// sequence is held back until the rest of it arrives.
#[derive(Debug, Default)]
pub struct Utf8Accumulator {
    pending: Vec<u8>,
}

impl Utf8Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode everything decodable so far and return it.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                let out = text.to_string();
                self.pending.clear();
                out
            }
            Err(e) => {
                let valid = e.valid_up_to();
                if e.error_len().is_some() {
                    // Genuinely invalid bytes mid-buffer: decode lossily so
                    // one bad frame cannot stall the stream.
                    let out = String::from_utf8_lossy(&self.pending).into_owned();
                    self.pending.clear();
                    out
                } else {
                    // Incomplete trailing sequence: emit the valid prefix,
                    // keep the tail for the next frame.
                    let out = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
                    self.pending.drain(..valid);
                    out
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_record() {
        let mut acc = RecordAccumulator::new("\n");
        assert_eq!(acc.push("hello\n"), vec!["hello"]);
        assert!(acc.take_remainder().is_none());
    }

    #[test]
    fn test_multiple_records_in_one_chunk() {
        let mut acc = RecordAccumulator::new("\n");
        assert_eq!(acc.push("a\nb\nc\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_record_split_across_chunks() {
        let mut acc = RecordAccumulator::new("\n");
        assert!(acc.push("hel").is_empty());
        assert_eq!(acc.push("lo\nwor"), vec!["hello"]);
        assert_eq!(acc.push("ld\n"), vec!["world"]);
    }

    #[test]
    fn test_remainder_holds_unterminated_tail() {
        let mut acc = RecordAccumulator::new("\n");
        assert!(acc.push("dangling").is_empty());
        assert_eq!(acc.take_remainder().as_deref(), Some("dangling"));
        assert!(acc.take_remainder().is_none());
    }

    #[test]
    fn test_multichar_delimiter() {
        let mut acc = RecordAccumulator::new("\n\n");
        assert_eq!(acc.push("data: 1\n\ndata: 2\n"), vec!["data: 1"]);
        assert_eq!(acc.push("\n"), vec!["data: 2"]);
    }

    #[test]
    fn test_empty_records_between_delimiters() {
        let mut acc = RecordAccumulator::new("\n");
        assert_eq!(acc.push("a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_utf8_passthrough() {
        let mut acc = Utf8Accumulator::new();
        assert_eq!(acc.push("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn test_utf8_split_code_point() {
        // U+00E9 is 0xC3 0xA9; split it across two frames.
        let mut acc = Utf8Accumulator::new();
        assert_eq!(acc.push(&[b'h', 0xC3]), "h");
        assert_eq!(acc.push(&[0xA9, b'!']), "é!");
    }

    #[test]
    fn test_utf8_split_four_byte_emoji() {
        let bytes = "🦀".as_bytes();
        let mut acc = Utf8Accumulator::new();
        assert_eq!(acc.push(&bytes[..2]), "");
        assert_eq!(acc.push(&bytes[2..]), "🦀");
    }

    #[test]
    fn test_utf8_invalid_bytes_decode_lossily() {
        let mut acc = Utf8Accumulator::new();
        let out = acc.push(&[b'a', 0xFF, b'b']);
        assert_eq!(out, "a\u{FFFD}b");
    }
}
