//! HTTP access to an ESP32 camera.
//!
//! `SnapshotFetcher` pulls single JPEGs from `/capture`. `StreamSession`
//! reads the live MJPEG stream, demuxing `multipart/x-mixed-replace` parts
//! when the server announces a boundary and falling back to a marker scan
//! over the raw bytes otherwise.

pub mod config;
pub mod error;
pub mod mjpeg;
pub mod multipart;
pub mod session;
pub mod snapshot;
pub mod traits;

pub use config::StreamConfig;
pub use error::StreamError;
pub use mjpeg::MjpegExtractor;
pub use multipart::{MultipartDemuxer, boundary_from_content_type};
pub use session::{StreamMode, StreamSession};
pub use snapshot::SnapshotFetcher;
pub use traits::FrameSource;
