use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared flag for cooperative session shutdown.
///
/// The signal handler and the window both hold a clone. Processing loops
/// check `is_requested()` at iteration boundaries and never interrupt an
/// in-flight read.
#[derive(Clone, Debug, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder to stop at its next iteration boundary.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}
