use crate::pipeline::Pipeline;
use anyhow::Context;
use espcam_base::Shutdown;
use espcam_stream::{SnapshotFetcher, StreamConfig};
use std::path::{Path, PathBuf};

/// Download one `/capture` JPEG to `out`, byte for byte.
pub async fn run_raw(config: &StreamConfig, out: &Path) -> anyhow::Result<()> {
    let fetcher = SnapshotFetcher::new(config)?;
    log::info!("downloading {} to {}", fetcher.url(), out.display());
    fetcher
        .fetch_to_file(out)
        .await
        .with_context(|| format!("downloading {}", fetcher.url()))?;
    Ok(())
}

/// Fetch one snapshot and run it through the pipeline. Returns the path of
/// the saved annotated image.
pub async fn run_capture(
    config: &StreamConfig,
    pipeline: &mut Pipeline,
    shutdown: &Shutdown,
) -> anyhow::Result<PathBuf> {
    let fetcher = SnapshotFetcher::new(config)?;
    let jpeg = fetcher
        .fetch()
        .await
        .with_context(|| format!("fetching snapshot from {}", fetcher.url()))?;
    let frame = espcam_image::decode_frame(&jpeg).context("decoding snapshot")?;

    let outdir = pipeline.outdir().to_path_buf();
    let path = pipeline
        .process_snapshot(frame, shutdown)
        .await
        .with_context(|| format!("saving snapshot to {}", outdir.display()))?;
    Ok(path)
}
