/// JPEG start-of-image marker.
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// JPEG end-of-image marker.
pub const EOI: [u8; 2] = [0xFF, 0xD9];

pub(crate) fn find_marker(haystack: &[u8], marker: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(marker.len())
        .position(|w| w == marker)
        .map(|pos| pos + from)
}

/// Incremental marker-scan extractor for raw MJPEG bytes.
///
/// Bytes are appended as they arrive. A frame is the inclusive range from
/// the first SOI to the first EOI after it; once taken, that range and
/// everything before it is dropped. Nothing older than the last extraction
/// point is ever held.
#[derive(Debug, Default)]
pub struct MjpegExtractor {
    buffer: Vec<u8>,
}

impl MjpegExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from bytes already received by another reader.
    pub fn with_buffer(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Append a chunk and return every frame it completes, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.buffer.extend_from_slice(chunk);
        self.drain()
    }

    /// Return every complete frame currently buffered.
    pub fn drain(&mut self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame() {
            frames.push(frame);
        }
        frames
    }

    /// Take the next complete frame, if one is buffered.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        let start = find_marker(&self.buffer, &SOI, 0)?;
        let end = find_marker(&self.buffer, &EOI, start + SOI.len())? + EOI.len();
        let frame = self.buffer[start..end].to_vec();
        self.buffer.drain(..end);
        Some(frame)
    }

    /// Number of bytes waiting for a frame to complete.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_marker_from_offset() {
        let bytes = [0xFF, 0xD9, 0x00, 0xFF, 0xD9];
        assert_eq!(find_marker(&bytes, &EOI, 0), Some(0));
        assert_eq!(find_marker(&bytes, &EOI, 1), Some(3));
        assert_eq!(find_marker(&bytes, &EOI, 4), None);
        assert_eq!(find_marker(&bytes, &EOI, 10), None);
    }

    #[test]
    fn test_soi_immediately_followed_by_eoi() {
        let mut extractor = MjpegExtractor::new();
        let frames = extractor.push(&[0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(frames, vec![vec![0xFF, 0xD8, 0xFF, 0xD9]]);
        assert_eq!(extractor.buffered(), 0);
    }
}
