pub mod clock;
pub mod logging;
pub mod shutdown;
pub mod tensor;

pub use clock::{unix_seconds, unix_timestamp};
pub use logging::{FileLogger, LogTarget, StdoutLogger, init_logger};
pub use shutdown::Shutdown;
pub use tensor::{Tensor, TensorError};

// Re-export log crate so downstream crates can use espcam_base::log::*
pub use log;
