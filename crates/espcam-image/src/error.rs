use espcam_base::TensorError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ImageError {
    /// The bytes are not a complete JPEG.
    Decode(String),
    /// The frame is not `[H, W, 3]`; holds the offending shape.
    NotRgb(Vec<usize>),
    Encode(String),
    /// Writing an encoded frame to disk failed.
    Write { path: PathBuf, source: std::io::Error },
    Tensor(TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "not a decodable JPEG: {msg}"),
            ImageError::NotRgb(shape) => write!(f, "expected an [H, W, 3] frame, got {shape:?}"),
            ImageError::Encode(msg) => write!(f, "JPEG encoding failed: {msg}"),
            ImageError::Write { path, source } => write!(f, "cannot write {}: {source}", path.display()),
            ImageError::Tensor(err) => write!(f, "frame buffer: {err}"),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Write { source, .. } => Some(source),
            ImageError::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<TensorError> for ImageError {
    fn from(err: TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
