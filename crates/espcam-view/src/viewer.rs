use crate::draw::rgb_to_argb;
use espcam_base::{Shutdown, Tensor};
use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};

const TARGET_FPS: usize = 30;

/// What the user asked for since the last frame was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerInput {
    Idle,
    /// `q`, `Esc` or the window was closed.
    Quit,
    /// `s`: save the current frame.
    Save,
    /// Any other key.
    Other,
}

/// Display surface for annotated frames.
///
/// A window that cannot be created or updated turns the viewer headless
/// instead of failing the session.
pub enum Viewer {
    Window(WindowState),
    Headless,
}

pub struct WindowState {
    title: String,
    window: Option<Window>,
    pixels: Vec<u32>,
}

impl WindowState {
    fn show(&mut self, frame: &Tensor<u8>) -> Result<ViewerInput, minifb::Error> {
        let Some((height, width, 3)) = frame.hwc() else {
            log::warn!("cannot display frame of shape {:?}", frame.shape);
            return Ok(ViewerInput::Idle);
        };

        if self.window.is_none() {
            let mut window = Window::new(
                &self.title,
                width,
                height,
                WindowOptions {
                    resize: true,
                    scale_mode: ScaleMode::AspectRatioStretch,
                    ..WindowOptions::default()
                },
            )?;
            window.set_target_fps(TARGET_FPS);
            self.window = Some(window);
        }
        let Some(window) = self.window.as_mut() else {
            return Ok(ViewerInput::Idle);
        };

        rgb_to_argb(&frame.data, &mut self.pixels);
        window.update_with_buffer(&self.pixels, width, height)?;

        if !window.is_open() {
            return Ok(ViewerInput::Quit);
        }
        Ok(input_from_keys(&window.get_keys_pressed(KeyRepeat::No)))
    }
}

/// Map pressed keys to a viewer action. Quit wins over save.
pub fn input_from_keys(keys: &[Key]) -> ViewerInput {
    if keys.iter().any(|k| matches!(k, Key::Q | Key::Escape)) {
        ViewerInput::Quit
    } else if keys.contains(&Key::S) {
        ViewerInput::Save
    } else if keys.is_empty() {
        ViewerInput::Idle
    } else {
        ViewerInput::Other
    }
}

impl Viewer {
    /// A windowed viewer, or a headless one when `headless` is set. The
    /// window itself opens with the first frame, sized to it.
    pub fn new(title: &str, headless: bool) -> Self {
        if headless {
            return Viewer::Headless;
        }
        Viewer::Window(WindowState {
            title: title.to_string(),
            window: None,
            pixels: Vec::new(),
        })
    }

    pub fn is_headless(&self) -> bool {
        matches!(self, Viewer::Headless)
    }

    /// Present a frame and collect input. Headless viewers always report
    /// `Idle`.
    pub fn show(&mut self, frame: &Tensor<u8>) -> ViewerInput {
        let result = match self {
            Viewer::Window(state) => state.show(frame),
            Viewer::Headless => return ViewerInput::Idle,
        };
        match result {
            Ok(input) => input,
            Err(err) => {
                log::warn!("display unavailable ({}), continuing headless", err);
                *self = Viewer::Headless;
                ViewerInput::Idle
            }
        }
    }

    /// Keep showing `frame` until a key is pressed, the window closes or
    /// shutdown is requested. Returns at once when headless.
    pub fn hold(&mut self, frame: &Tensor<u8>, shutdown: &Shutdown) -> ViewerInput {
        while !shutdown.is_requested() {
            match self.show(frame) {
                ViewerInput::Idle if !self.is_headless() => continue,
                input => return input,
            }
        }
        ViewerInput::Quit
    }
}
