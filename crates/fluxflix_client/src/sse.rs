//! Incremental `text/event-stream` decoding. Chunks can split frames (and
//! UTF-8 sequences) anywhere, so bytes are buffered until a blank line ends
//! a frame.

#[derive(Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Next complete frame's `data` payload. Frames without data (comments,
    /// keep-alives) are skipped.
    pub fn next_data(&mut self) -> Option<String> {
        loop {
            let end = frame_end(&self.buffer)?;
            let frame: Vec<u8> = self.buffer.drain(..end).collect();
            let text = String::from_utf8_lossy(&frame);
            let data: Vec<&str> = text
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|value| value.strip_prefix(' ').unwrap_or(value))
                .collect();
            if !data.is_empty() {
                return Some(data.join("\n"));
            }
        }
    }
}

/// Index just past the first blank-line terminator, LF or CRLF.
fn frame_end(buffer: &[u8]) -> Option<usize> {
    let lf = find(buffer, b"\n\n").map(|at| at + 2);
    let crlf = find(buffer, b"\r\n\r\n").map(|at| at + 4);
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_frames_split_across_chunks() {
        let mut decoder = SseDecoder::default();
        decoder.push(b"data: {\"a\":");
        assert_eq!(decoder.next_data(), None);
        decoder.push(b"1}\n\ndata: {\"a\":2}\n");
        assert_eq!(decoder.next_data().as_deref(), Some("{\"a\":1}"));
        assert_eq!(decoder.next_data(), None);
        decoder.push(b"\n");
        assert_eq!(decoder.next_data().as_deref(), Some("{\"a\":2}"));
    }

    #[test]
    fn skips_comments_and_keeps_multiline_data() {
        let mut decoder = SseDecoder::default();
        decoder.push(b": keep-alive\n\nevent: view\ndata: first\ndata:second\n\n");
        assert_eq!(decoder.next_data().as_deref(), Some("first\nsecond"));
        assert_eq!(decoder.next_data(), None);
    }

    #[test]
    fn handles_crlf_and_split_utf8() {
        let mut decoder = SseDecoder::default();
        let frame = "data: Y tu Mono también\r\n\r\n".as_bytes();
        let (head, tail) = frame.split_at(22);
        decoder.push(head);
        assert_eq!(decoder.next_data(), None);
        decoder.push(tail);
        assert_eq!(decoder.next_data().as_deref(), Some("Y tu Mono también"));
    }
}
