use espcam_base::{Shutdown, Tensor, unix_seconds};
use espcam_detect::{Detection, Detector};
use espcam_image::{DEFAULT_JPEG_QUALITY, ImageError, save_jpeg};
use espcam_publish::{DetectionEvent, FrameRef, Publisher};
use espcam_stream::{FrameSource, StreamError};
use espcam_view::{FpsMeter, Viewer, ViewerInput, annotate, draw_fps};
use std::path::{Path, PathBuf};

/// Why a frame loop stopped.
#[derive(Debug)]
pub enum LoopExit {
    /// The user or a signal asked to stop.
    Quit,
    /// The source failed; it has to be reopened to continue.
    Source(StreamError),
}

/// Per-frame work shared by capture and stream mode: detect, annotate,
/// publish, display.
pub struct Pipeline {
    source: String,
    detector: Detector,
    confidence: f32,
    publisher: Publisher,
    viewer: Viewer,
    outdir: PathBuf,
    fps: FpsMeter,
}

impl Pipeline {
    pub fn new(
        source: impl Into<String>,
        detector: Detector,
        confidence: f32,
        publisher: Publisher,
        viewer: Viewer,
        outdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            detector,
            confidence,
            publisher,
            viewer,
            outdir: outdir.into(),
            fps: FpsMeter::default(),
        }
    }

    /// Frames processed in stream mode so far.
    pub fn frames(&self) -> u64 {
        self.fps.frames()
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Annotate a live frame and build the event to publish for it.
    ///
    /// Counts the frame, draws boxes and the FPS readout. Only frames with
    /// at least one face yield an event, keyed by the running frame index.
    pub fn render_frame(
        &mut self,
        frame: &mut Tensor<u8>,
        detections: &[Detection],
    ) -> Option<DetectionEvent> {
        annotate(frame, detections);

        if let Some(fps) = self.fps.tick() {
            log::debug!("{:.1} fps, {} faces in last frame", fps, detections.len());
        }
        if let Some(fps) = self.fps.current() {
            draw_fps(frame, fps);
        }

        (!detections.is_empty()).then(|| {
            DetectionEvent::new(
                self.source.clone(),
                FrameRef::Index(self.fps.frames()),
                detections,
            )
        })
    }

    /// Everything after detection for a live frame: render, publish,
    /// display, and save when asked.
    pub async fn present_frame(
        &mut self,
        mut frame: Tensor<u8>,
        detections: &[Detection],
    ) -> ViewerInput {
        if let Some(event) = self.render_frame(&mut frame, detections) {
            self.publisher.publish(&event).await;
        }

        let input = self.viewer.show(&frame);
        if input == ViewerInput::Save {
            match self.save(&frame, "frame") {
                Ok(path) => log::info!("saved {}", path.display()),
                Err(err) => log::warn!("could not save frame: {}", err),
            }
        }
        input
    }

    /// Process one live frame and report the user's input.
    pub async fn process_frame(&mut self, frame: Tensor<u8>) -> ViewerInput {
        let detections = self.detector.detect(&frame, self.confidence);
        self.present_frame(frame, &detections).await
    }

    /// Run frames from `source` through the pipeline until the user quits,
    /// shutdown is requested or the source fails.
    pub async fn drive<S: FrameSource>(&mut self, source: &mut S, shutdown: &Shutdown) -> LoopExit {
        loop {
            if shutdown.is_requested() {
                return LoopExit::Quit;
            }
            let frame = match source.recv().await {
                Ok(frame) => frame,
                Err(err) => return LoopExit::Source(err),
            };
            if self.process_frame(frame).await == ViewerInput::Quit {
                return LoopExit::Quit;
            }
        }
    }

    /// Process a single snapshot: annotate it, save it, show it until a key
    /// is pressed, then publish one event naming the saved file.
    pub async fn process_snapshot(
        &mut self,
        frame: Tensor<u8>,
        shutdown: &Shutdown,
    ) -> Result<PathBuf, ImageError> {
        let detections = self.detector.detect(&frame, self.confidence);
        self.present_snapshot(frame, &detections, shutdown).await
    }

    /// Everything after detection for a snapshot. The event is published
    /// even when no face was found.
    pub async fn present_snapshot(
        &mut self,
        mut frame: Tensor<u8>,
        detections: &[Detection],
        shutdown: &Shutdown,
    ) -> Result<PathBuf, ImageError> {
        annotate(&mut frame, detections);
        let path = self.save(&frame, "capture")?;
        log::info!("{} faces, saved {}", detections.len(), path.display());

        self.viewer.hold(&frame, shutdown);

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let event = DetectionEvent::new(self.source.clone(), FrameRef::Name(name), detections);
        self.publisher.publish(&event).await;

        Ok(path)
    }

    fn save(&self, frame: &Tensor<u8>, prefix: &str) -> Result<PathBuf, ImageError> {
        let path = self.outdir.join(format!("{prefix}_{}.jpg", unix_seconds()));
        save_jpeg(frame, &path, DEFAULT_JPEG_QUALITY)?;
        Ok(path)
    }

    /// Release the broker connection.
    pub async fn close(self) {
        self.publisher.close().await;
    }
}
