use crate::StreamError;
use crate::mjpeg::find_marker;

const HEADER_END: &[u8] = b"\r\n\r\n";

// Limits past which the framing is considered lost.
const MAX_PREAMBLE: usize = 64 * 1024;
const MAX_HEADERS: usize = 8 * 1024;
const MAX_PART: usize = 8 * 1024 * 1024;

/// Extract the boundary from a `multipart/x-mixed-replace` content type.
///
/// Returns `None` for any other content type. A leading `--` inside the
/// parameter is tolerated, as some firmwares include it.
pub fn boundary_from_content_type(content_type: &str) -> Option<String> {
    let mut params = content_type.split(';');
    let mime = params.next()?.trim();
    if !mime.eq_ignore_ascii_case("multipart/x-mixed-replace") {
        return None;
    }

    params.find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("boundary") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        let value = value.strip_prefix("--").unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Demuxer for `multipart/x-mixed-replace` bodies.
///
/// Each part starts with `--boundary`, a header block and a blank line.
/// The part body is `Content-Length` bytes when the header is present, or
/// runs up to the next delimiter otherwise.
#[derive(Debug)]
pub struct MultipartDemuxer {
    delimiter: Vec<u8>,
    buffer: Vec<u8>,
    // parts completed by a push that then failed
    finished: Vec<Vec<u8>>,
}

impl MultipartDemuxer {
    pub fn new(boundary: &str) -> Self {
        Self {
            delimiter: format!("--{boundary}").into_bytes(),
            buffer: Vec::new(),
            finished: Vec::new(),
        }
    }

    /// Append a chunk and return the bodies of every part it completes.
    ///
    /// On a framing error the parts completed before it are kept; fetch them
    /// with `take_finished` before handing the buffer elsewhere.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<Vec<u8>>, StreamError> {
        self.buffer.extend_from_slice(chunk);
        while let Some(part) = self.next_part()? {
            self.finished.push(part);
        }
        Ok(std::mem::take(&mut self.finished))
    }

    /// Parts completed by a push that returned an error, in stream order.
    pub fn take_finished(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.finished)
    }

    /// Bytes received but not yet consumed as a part.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Hand the unconsumed bytes to another reader.
    pub fn take_buffer(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    fn next_part(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        let Some(delimiter_at) = find_marker(&self.buffer, &self.delimiter, 0) else {
            if self.buffer.len() > MAX_PREAMBLE {
                return Err(StreamError::Demux(format!(
                    "no boundary in first {} bytes",
                    self.buffer.len()
                )));
            }
            return Ok(None);
        };

        let headers_at = delimiter_at + self.delimiter.len();
        let Some(headers_end) = find_marker(&self.buffer, HEADER_END, headers_at) else {
            if self.buffer.len() - headers_at > MAX_HEADERS {
                return Err(StreamError::Demux("part headers too long".to_string()));
            }
            return Ok(None);
        };

        let headers = String::from_utf8_lossy(&self.buffer[headers_at..headers_end]);
        let content_length = parse_content_length(&headers)?;
        let body_at = headers_end + HEADER_END.len();

        let (body_end, consumed) = match content_length {
            Some(length) => {
                if length > MAX_PART {
                    return Err(StreamError::Demux(format!("part of {length} bytes")));
                }
                let end = body_at + length;
                if self.buffer.len() < end {
                    return Ok(None);
                }
                (end, end)
            }
            None => {
                let Some(next) = find_marker(&self.buffer, &self.delimiter, body_at) else {
                    if self.buffer.len() - body_at > MAX_PART {
                        return Err(StreamError::Demux("unterminated part".to_string()));
                    }
                    return Ok(None);
                };
                let end = if self.buffer[body_at..next].ends_with(b"\r\n") {
                    next - 2
                } else {
                    next
                };
                (end, next)
            }
        };

        let body = self.buffer[body_at..body_end].to_vec();
        self.buffer.drain(..consumed);
        Ok(Some(body))
    }
}

fn parse_content_length(headers: &str) -> Result<Option<usize>, StreamError> {
    for line in headers.split("\r\n") {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            return value
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|_| StreamError::Demux(format!("bad content-length: {}", value.trim())));
        }
    }
    Ok(None)
}
