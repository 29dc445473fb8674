/// A face box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    /// Score in `[0, 1]`.
    pub confidence: f32,
}

impl Detection {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, confidence: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Clamp the box into `[0, width) x [0, height)`.
    ///
    /// Returns `None` for an empty frame or a box with no area left after
    /// clamping, such as one lying wholly outside the frame.
    pub fn clipped(self, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = (width - 1).min(i32::MAX as usize) as i32;
        let max_y = (height - 1).min(i32::MAX as usize) as i32;
        let clipped = Self {
            x1: self.x1.clamp(0, max_x),
            y1: self.y1.clamp(0, max_y),
            x2: self.x2.clamp(0, max_x),
            y2: self.y2.clamp(0, max_y),
            confidence: self.confidence,
        };
        (clipped.x1 < clipped.x2 && clipped.y1 < clipped.y2).then_some(clipped)
    }
}

/// Apply the threshold and frame bounds every detector result goes through.
///
/// Keeps detections with `confidence >= threshold`, clips them to the frame
/// and drops boxes that collapse. Order is preserved.
pub fn finalize(
    detections: impl IntoIterator<Item = Detection>,
    threshold: f32,
    width: usize,
    height: usize,
) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| d.confidence.is_finite() && d.confidence >= threshold)
        .filter_map(|d| d.clipped(width, height))
        .collect()
}
