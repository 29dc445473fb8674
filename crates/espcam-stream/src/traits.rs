use crate::StreamError;
use espcam_base::Tensor;

/// Async source of decoded camera frames.
///
/// Implementations return frames as `Tensor<u8>` in HWC layout
/// `[height, width, 3]`.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Receive the next decodable frame.
    ///
    /// An error means the source is finished; it must be reopened to continue.
    async fn recv(&mut self) -> Result<Tensor<u8>, StreamError>;
}
