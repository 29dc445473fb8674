//! Frame annotation and on-screen display.
//!
//! Drawing works in place on HWC RGB buffers. The viewer converts to the
//! packed `0x00RRGGBB` layout minifb expects.

pub mod draw;
pub mod font;
pub mod overlay;
pub mod viewer;

pub use overlay::{FpsMeter, annotate, draw_fps, label_for};
pub use viewer::{Viewer, ViewerInput};
