use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DetectError {
    ModelMissing(PathBuf),
    ModelLoad(String),
    Inference(String),
    Shape(String),
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::ModelMissing(path) => write!(f, "model not found: {}", path.display()),
            DetectError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            DetectError::Inference(msg) => write!(f, "inference error: {msg}"),
            DetectError::Shape(msg) => write!(f, "shape error: {msg}"),
        }
    }
}

impl std::error::Error for DetectError {}

impl From<ort::Error> for DetectError {
    fn from(err: ort::Error) -> Self {
        DetectError::Inference(err.to_string())
    }
}

impl From<espcam_base::TensorError> for DetectError {
    fn from(err: espcam_base::TensorError) -> Self {
        DetectError::Shape(err.to_string())
    }
}
