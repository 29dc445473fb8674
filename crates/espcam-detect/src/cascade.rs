use crate::{DetectError, Detection};
use espcam_base::Tensor;
use std::path::Path;

/// Score reported for every cascade hit. The cascade's own score is not a
/// probability, so boxes carry a fixed mid confidence.
pub const CASCADE_CONFIDENCE: f32 = 0.5;

/// Smallest face edge searched for, in pixels.
pub const MIN_FACE_SIZE: u32 = 30;

const SCORE_THRESHOLD: f64 = 2.0;
const PYRAMID_SCALE: f32 = 0.8;
const WINDOW_STEP: u32 = 4;

/// Funnel-structured cascade face detector on grayscale frames.
pub struct CascadeFaceDetector {
    detector: Box<dyn rustface::Detector>,
}

impl CascadeFaceDetector {
    /// Load a SeetaFace model file.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        if !path.is_file() {
            return Err(DetectError::ModelMissing(path.to_path_buf()));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| DetectError::ModelLoad(format!("non-UTF-8 path: {}", path.display())))?;

        let mut detector = rustface::create_detector(path_str)
            .map_err(|e| DetectError::ModelLoad(format!("failed to load {path_str}: {e}")))?;
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE);
        detector.set_slide_window_step(WINDOW_STEP, WINDOW_STEP);

        Ok(Self { detector })
    }

    /// Detect faces; every hit is reported at `CASCADE_CONFIDENCE`.
    pub fn detect(&mut self, frame: &Tensor<u8>) -> Result<Vec<Detection>, DetectError> {
        let (height, width) = match frame.hwc() {
            Some((h, w, 3)) => (h, w),
            _ => {
                return Err(DetectError::Shape(format!(
                    "expected [H, W, 3] frame, got {:?}",
                    frame.shape
                )));
            }
        };

        let gray = to_gray(&frame.data);
        let image = rustface::ImageData::new(&gray, width as u32, height as u32);

        Ok(self
            .detector
            .detect(&image)
            .into_iter()
            .map(|face| {
                let bbox = face.bbox();
                Detection::new(
                    bbox.x(),
                    bbox.y(),
                    bbox.x() + bbox.width() as i32,
                    bbox.y() + bbox.height() as i32,
                    CASCADE_CONFIDENCE,
                )
            })
            .collect())
    }
}

/// BT.601 luma from packed RGB.
fn to_gray(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .map(|px| {
            let luma = 299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32;
            (luma / 1000) as u8
        })
        .collect()
}
