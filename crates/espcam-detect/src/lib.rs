//! Face detection over decoded camera frames.
//!
//! The detector is chosen once from what is installed in the model
//! directory: the SSD network through ONNX Runtime, the funnel cascade as a
//! lower-accuracy fallback, or nothing at all.

pub mod cascade;
pub mod detection;
pub mod detector;
pub mod error;
pub mod models;
pub mod ssd;

pub use cascade::CascadeFaceDetector;
pub use detection::{Detection, finalize};
pub use detector::{Detector, DetectorKind};
pub use error::DetectError;
pub use models::{ModelPaths, ModelStatus};
pub use ssd::SsdFaceDetector;
