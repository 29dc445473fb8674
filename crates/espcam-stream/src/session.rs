use crate::{FrameSource, MjpegExtractor, MultipartDemuxer, StreamConfig, StreamError};
use crate::multipart::boundary_from_content_type;
use espcam_base::Tensor;
use reqwest::header::CONTENT_TYPE;
use std::collections::VecDeque;

/// How the session splits the body into JPEGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Following the announced multipart boundary.
    Multipart,
    /// Scanning raw bytes for SOI/EOI markers.
    Markers,
}

enum Reader {
    Multipart(MultipartDemuxer),
    Markers(MjpegExtractor),
}

impl Reader {
    fn mode(&self) -> StreamMode {
        match self {
            Reader::Multipart(_) => StreamMode::Multipart,
            Reader::Markers(_) => StreamMode::Markers,
        }
    }

    fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let (mut frames, leftover) = match self {
            Reader::Markers(extractor) => return extractor.push(chunk),
            Reader::Multipart(demuxer) => match demuxer.push(chunk) {
                Ok(parts) => return parts,
                Err(err) => {
                    log::warn!("multipart demux failed ({err}), switching to marker scan");
                    (demuxer.take_finished(), demuxer.take_buffer())
                }
            },
        };

        let mut extractor = MjpegExtractor::with_buffer(leftover);
        frames.extend(extractor.drain());
        *self = Reader::Markers(extractor);
        frames
    }
}

/// One open connection to the camera's MJPEG endpoint.
///
/// The connection is released when the session is dropped. A read failure
/// ends the session; callers reopen to continue.
pub struct StreamSession {
    url: String,
    response: reqwest::Response,
    reader: Reader,
    pending: VecDeque<Vec<u8>>,
    received: u64,
    skipped: u64,
}

impl StreamSession {
    /// Connect to the stream endpoint and choose a reader from its content type.
    ///
    /// # Errors
    ///
    /// `StreamError::Http` when the camera cannot be reached, `StreamError::Status`
    /// on a non-2xx answer.
    pub async fn open(config: &StreamConfig) -> Result<Self, StreamError> {
        let url = config.stream_url();
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .read_timeout(config.timeout())
            .build()?;

        log::info!("opening stream {}", url);
        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let reader = match boundary_from_content_type(&content_type) {
            Some(boundary) => {
                log::debug!("multipart boundary: {}", boundary);
                Reader::Multipart(MultipartDemuxer::new(&boundary))
            }
            None => {
                log::info!("no multipart boundary in {:?}, scanning for JPEG markers", content_type);
                Reader::Markers(MjpegExtractor::new())
            }
        };

        Ok(Self {
            url,
            response,
            reader,
            pending: VecDeque::new(),
            received: 0,
            skipped: 0,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn mode(&self) -> StreamMode {
        self.reader.mode()
    }

    /// JPEG payloads delivered so far, including ones that failed to decode.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Payloads dropped because they did not decode.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Read until the next complete JPEG payload is available.
    pub async fn next_jpeg(&mut self) -> Result<Vec<u8>, StreamError> {
        loop {
            if let Some(jpeg) = self.pending.pop_front() {
                self.received += 1;
                return Ok(jpeg);
            }

            match self.response.chunk().await? {
                Some(chunk) => self.pending.extend(self.reader.push(&chunk)),
                None => return Err(StreamError::Closed),
            }
        }
    }

    /// Read until the next payload that decodes, skipping corrupt ones.
    pub async fn next_frame(&mut self) -> Result<Tensor<u8>, StreamError> {
        loop {
            let jpeg = self.next_jpeg().await?;
            match espcam_image::decode_frame(&jpeg) {
                Ok(frame) => return Ok(frame),
                Err(err) => {
                    self.skipped += 1;
                    log::debug!("skipping undecodable frame ({} bytes): {}", jpeg.len(), err);
                }
            }
        }
    }
}

impl FrameSource for StreamSession {
    async fn recv(&mut self) -> Result<Tensor<u8>, StreamError> {
        self.next_frame().await
    }
}
