use crate::{CascadeFaceDetector, Detection, ModelPaths, SsdFaceDetector, finalize};
use espcam_base::Tensor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    Dnn,
    Cascade,
    Disabled,
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorKind::Dnn => write!(f, "dnn"),
            DetectorKind::Cascade => write!(f, "cascade"),
            DetectorKind::Disabled => write!(f, "disabled"),
        }
    }
}

/// The face detector for a session, resolved once at startup.
pub enum Detector {
    Dnn(SsdFaceDetector),
    Cascade(CascadeFaceDetector),
    /// No model available; every frame yields no detections.
    Disabled,
}

impl Detector {
    /// Pick the best detector the installed models allow.
    ///
    /// Tries the SSD network, then the cascade. Load failures are logged and
    /// never fatal.
    pub fn select(paths: &ModelPaths) -> Self {
        match SsdFaceDetector::load(&paths.ssd_model()) {
            Ok(ssd) => {
                log::info!("face detector: dnn ({})", paths.ssd_model().display());
                return Detector::Dnn(ssd);
            }
            Err(err) => log::warn!("dnn detector unavailable: {}", err),
        }

        match CascadeFaceDetector::load(&paths.cascade_model()) {
            Ok(cascade) => {
                log::warn!(
                    "face detector: cascade fallback ({}), expect lower accuracy",
                    paths.cascade_model().display()
                );
                Detector::Cascade(cascade)
            }
            Err(err) => {
                log::warn!("cascade detector unavailable: {}", err);
                log::warn!(
                    "face detection disabled; run `espcam models` to see what to install in {}",
                    paths.dir().display()
                );
                Detector::Disabled
            }
        }
    }

    pub fn kind(&self) -> DetectorKind {
        match self {
            Detector::Dnn(_) => DetectorKind::Dnn,
            Detector::Cascade(_) => DetectorKind::Cascade,
            Detector::Disabled => DetectorKind::Disabled,
        }
    }

    /// Detect faces in an RGB frame.
    ///
    /// Every result has `confidence >= threshold` and lies inside the frame.
    /// A frame the model fails on yields no detections.
    pub fn detect(&mut self, frame: &Tensor<u8>, threshold: f32) -> Vec<Detection> {
        let Some((height, width, _)) = frame.hwc() else {
            log::warn!("not an image frame: {:?}", frame.shape);
            return Vec::new();
        };

        let raw = match self {
            Detector::Dnn(ssd) => ssd.detect(frame),
            Detector::Cascade(cascade) => cascade.detect(frame),
            Detector::Disabled => return Vec::new(),
        };

        match raw {
            Ok(candidates) => finalize(candidates, threshold, width, height),
            Err(err) => {
                log::warn!("{} detector failed on frame: {}", self.kind(), err);
                Vec::new()
            }
        }
    }
}
