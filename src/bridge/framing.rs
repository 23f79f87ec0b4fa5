//! Receive-side line buffering.
//!
//! The scanner sends newline-delimited text with no length prefix, so a
//! single read can carry a fragment of a record, exactly one record, or
//! several records plus a trailing fragment. `ReceiveBuffer` owns the
//! accumulated bytes and hands back complete lines as they become available.

/// Growable byte buffer holding zero or more complete newline-terminated
/// segments followed by at most one incomplete trailing fragment.
#[derive(Debug, Default)]
pub struct ReceiveBuffer {
    bytes: Vec<u8>,
}

impl ReceiveBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a freshly read chunk to the buffer.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Removes every complete line from the buffer, in arrival order,
    /// leaving any incomplete trailing fragment in place.
    ///
    /// Each line is decoded best-effort: invalid UTF-8 sequences become
    /// replacement characters instead of failing the session. Only the
    /// `\n` delimiter is stripped here; whitespace trimming happens later,
    /// when a record is validated.
    pub fn drain_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();

        while let Some(pos) = self.bytes.iter().position(|&byte| byte == b'\n') {
            let remainder = self.bytes.split_off(pos + 1);
            self.bytes.pop(); // the delimiter itself
            let line = std::mem::replace(&mut self.bytes, remainder);
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }

        lines
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(buffer: &mut ReceiveBuffer, chunk: &[u8]) -> Vec<String> {
        buffer.extend(chunk);
        buffer.drain_lines()
    }

    #[test]
    fn no_delimiter_yields_nothing_and_keeps_input() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"ABC123");
        assert!(lines.is_empty());
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn single_line_is_extracted_without_delimiter() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"ABC123\n");
        assert_eq!(lines, vec!["ABC123"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn multiple_lines_in_one_chunk_keep_arrival_order() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"ABC123\nDEF456\nGHI789\n");
        assert_eq!(lines, vec!["ABC123", "DEF456", "GHI789"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn trailing_fragment_stays_buffered_until_completed() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"ABC123\nDEF");
        assert_eq!(lines, vec!["ABC123"]);
        assert_eq!(buffer.len(), 3);

        let lines = feed(&mut buffer, b"456\n");
        assert_eq!(lines, vec!["DEF456"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_lines_are_extracted_as_empty_strings() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"\n\n");
        assert_eq!(lines, vec!["", ""]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn only_the_newline_delimiter_is_stripped() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"  ABC123 \r\n");
        assert_eq!(lines, vec!["  ABC123 \r"]);
    }

    #[test]
    fn invalid_utf8_is_decoded_best_effort() {
        let mut buffer = ReceiveBuffer::new();
        let lines = feed(&mut buffer, b"AB\xff\xfeCD\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("AB"));
        assert!(lines[0].ends_with("CD"));
    }

    #[test]
    fn split_point_never_changes_the_record_stream() {
        let input = b"ABC123\nDEF456\nGHI\n789";
        let mut whole = ReceiveBuffer::new();
        let expected = feed(&mut whole, input);
        let expected_remainder = whole.len();

        for split in 0..=input.len() {
            let mut buffer = ReceiveBuffer::new();
            let mut lines = feed(&mut buffer, &input[..split]);
            lines.extend(feed(&mut buffer, &input[split..]));
            assert_eq!(lines, expected, "split at {split} diverged");
            assert_eq!(buffer.len(), expected_remainder, "split at {split} lost bytes");
        }
    }

    #[test]
    fn multibyte_characters_survive_chunk_boundaries() {
        let input = "Grüße\n".as_bytes();
        for split in 0..=input.len() {
            let mut buffer = ReceiveBuffer::new();
            let mut lines = feed(&mut buffer, &input[..split]);
            lines.extend(feed(&mut buffer, &input[split..]));
            assert_eq!(lines, vec!["Grüße"], "split at {split} corrupted text");
        }
    }
}
