use crate::pipeline::{LoopExit, Pipeline};
use espcam_base::Shutdown;
use espcam_stream::{StreamConfig, StreamSession};

/// Stream mode: keep a session open and process frames until the user
/// quits or shutdown is requested. Failed opens and reads are retried
/// after the configured delay.
pub async fn run_live(config: &StreamConfig, pipeline: &mut Pipeline, shutdown: &Shutdown) {
    while !shutdown.is_requested() {
        let mut session = match StreamSession::open(config).await {
            Ok(session) => session,
            Err(err) => {
                log::warn!(
                    "cannot open {}: {}, retrying in {:?}",
                    config.stream_url(),
                    err,
                    config.retry_delay()
                );
                tokio::time::sleep(config.retry_delay()).await;
                continue;
            }
        };
        log::info!("streaming from {} ({:?})", session.url(), session.mode());

        match pipeline.drive(&mut session, shutdown).await {
            LoopExit::Quit => break,
            LoopExit::Source(err) => {
                log::warn!(
                    "stream read failed after {} frames ({} skipped): {}, reconnecting in {:?}",
                    session.received(),
                    session.skipped(),
                    err,
                    config.retry_delay()
                );
                drop(session);
                tokio::time::sleep(config.retry_delay()).await;
            }
        }
    }
    log::info!("stream stopped after {} frames", pipeline.frames());
}
