use crate::PublishError;
use espcam_detect::Detection;
use serde::{Deserialize, Serialize};

/// Which frame a batch belongs to: the running index in stream mode, the
/// saved file name in capture mode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FrameRef {
    Index(u64),
    Name(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub confidence: f32,
}

impl From<&Detection> for FaceBox {
    fn from(d: &Detection) -> Self {
        Self {
            x1: d.x1,
            y1: d.y1,
            x2: d.x2,
            y2: d.y2,
            confidence: d.confidence,
        }
    }
}

/// One published detection batch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectionEvent {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    /// The camera address the frame came from.
    pub source: String,
    pub frame: FrameRef,
    pub faces: Vec<FaceBox>,
}

impl DetectionEvent {
    /// Stamp a batch with the current time.
    pub fn new(source: impl Into<String>, frame: FrameRef, detections: &[Detection]) -> Self {
        Self {
            timestamp: espcam_base::unix_timestamp(),
            source: source.into(),
            frame,
            faces: detections.iter().map(FaceBox::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, PublishError> {
        Ok(serde_json::to_vec(self)?)
    }
}
