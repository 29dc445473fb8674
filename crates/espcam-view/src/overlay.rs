use crate::draw::draw_rect;
use crate::font::{GLYPH_HEIGHT, draw_text};
use espcam_base::Tensor;
use espcam_detect::Detection;
use std::time::Instant;

pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const BOX_THICKNESS: i32 = 2;
pub const LABEL_SCALE: i32 = 1;

pub const FPS_COLOR: [u8; 3] = [255, 0, 0];
pub const FPS_SCALE: i32 = 2;
/// Baseline-left corner of the FPS readout.
pub const FPS_ORIGIN: (i32, i32) = (10, 20);

/// Frames between FPS recomputations.
pub const FPS_WINDOW: u32 = 10;

/// Confidence label, e.g. `87.3%`.
pub fn label_for(detection: &Detection) -> String {
    format!("{:.1}%", detection.confidence * 100.0)
}

/// Baseline y of a box label: above the box when there is room for it,
/// otherwise just inside the top edge.
pub fn label_baseline(detection: &Detection) -> i32 {
    if detection.y1 - 10 > 10 {
        detection.y1 - 10
    } else {
        detection.y1 + 10
    }
}

/// Draw each detection's box and confidence label onto an RGB frame.
pub fn annotate(frame: &mut Tensor<u8>, detections: &[Detection]) {
    let Some((height, width, 3)) = frame.hwc() else {
        log::warn!("cannot annotate frame of shape {:?}", frame.shape);
        return;
    };

    for det in detections {
        draw_rect(
            &mut frame.data,
            width,
            height,
            det.x1,
            det.y1,
            det.x2,
            det.y2,
            BOX_THICKNESS,
            BOX_COLOR,
        );
        let top = label_baseline(det) - GLYPH_HEIGHT * LABEL_SCALE;
        draw_text(
            &mut frame.data,
            width,
            height,
            det.x1,
            top,
            &label_for(det),
            LABEL_SCALE,
            BOX_COLOR,
        );
    }
}

/// Draw `FPS: N.N` in the top-left corner.
pub fn draw_fps(frame: &mut Tensor<u8>, fps: f32) {
    let Some((height, width, 3)) = frame.hwc() else {
        return;
    };
    let (x, baseline) = FPS_ORIGIN;
    draw_text(
        &mut frame.data,
        width,
        height,
        x,
        baseline - GLYPH_HEIGHT * FPS_SCALE,
        &format!("FPS: {:.1}", fps),
        FPS_SCALE,
        FPS_COLOR,
    );
}

/// Frame counter that measures throughput over fixed windows of frames.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window: u32,
    frames: u64,
    window_start: Instant,
    current: Option<f32>,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(FPS_WINDOW)
    }
}

impl FpsMeter {
    pub fn new(window: u32) -> Self {
        Self::starting_at(window, Instant::now())
    }

    pub fn starting_at(window: u32, start: Instant) -> Self {
        Self {
            window: window.max(1),
            frames: 0,
            window_start: start,
            current: None,
        }
    }

    /// Count a frame. Returns the new rate when this frame closes a window.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        if self.frames % self.window as u64 != 0 {
            return None;
        }
        let elapsed = now.duration_since(self.window_start).as_secs_f32();
        let fps = self.window as f32 / elapsed.max(1e-6);
        self.window_start = now;
        self.current = Some(fps);
        Some(fps)
    }

    /// Frames counted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rate of the last completed window.
    pub fn current(&self) -> Option<f32> {
        self.current
    }
}
