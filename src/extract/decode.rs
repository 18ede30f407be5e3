//! Incremental UTF-8 decoding of the fetched byte stream.
//!
//! Chunk boundaries can split a multi-byte character; the trailing bytes of
//! an unfinished sequence are carried over to the next chunk. Invalid bytes
//! are replaced (lossy), never surfaced as errors.

pub struct StreamDecoder {
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        StreamDecoder {
            pending: Vec::new(),
        }
    }

    /// Decode the next chunk, holding back an unfinished trailing sequence.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(chunk);

        let keep = incomplete_tail_len(&buf);
        let rest = buf.split_off(buf.len() - keep);
        self.pending = rest;

        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Flush whatever is still pending at end of stream.
    pub fn finish(&mut self) -> String {
        let rest = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&rest).into_owned()
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of an unfinished multi-byte sequence at the end of `buf`, 0 if the
/// buffer ends on a character boundary (or on garbage that lossy decoding
/// should replace).
fn incomplete_tail_len(buf: &[u8]) -> usize {
    for back in 1..=buf.len().min(3) {
        let byte = buf[buf.len() - back];
        if byte & 0xC0 == 0x80 {
            // continuation byte, keep scanning for the sequence start
            continue;
        }
        let needed = match byte {
            0xF0..=0xFF => 4,
            0xE0..=0xEF => 3,
            0xC0..=0xDF => 2,
            _ => return 0,
        };
        return if needed > back { back } else { 0 };
    }
    0
}
