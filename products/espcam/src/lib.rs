//! The `espcam` client: snapshot and live-stream face detection against an
//! ESP32 camera web server.

pub mod app;
pub mod capture;
pub mod cli;
pub mod live;
pub mod models;
pub mod pipeline;

pub use cli::{Cli, Command, Mode, ModelsArgs, RunArgs};
pub use pipeline::{LoopExit, Pipeline};
