use crate::capture::{run_capture, run_raw};
use crate::cli::{Mode, RunArgs};
use crate::live::run_live;
use crate::pipeline::Pipeline;
use anyhow::Context;
use espcam_base::Shutdown;
use espcam_detect::Detector;
use espcam_publish::Publisher;
use espcam_view::Viewer;

/// Run one camera session as selected by the command line.
pub async fn run(args: &RunArgs, shutdown: &Shutdown) -> anyhow::Result<()> {
    let ip = args.ip.as_deref().context("--ip is required")?;
    let config = args.stream_config(ip);
    let mode = args.mode();

    if let Mode::Raw { then_stream } = mode {
        let result = run_raw(&config, &args.out).await;
        if !then_stream {
            return result;
        }
        if let Err(err) = result {
            log::error!("{:#}", err);
        }
    }

    let detector = if args.no_detect {
        log::info!("face detection off");
        Detector::Disabled
    } else {
        Detector::select(&args.model_paths())
    };
    let publisher = Publisher::connect(args.publisher_config().as_ref()).await;

    let title = match mode {
        Mode::Capture => format!("ESP32-CAM {ip} capture - any key to close"),
        _ => format!("ESP32-CAM {ip} - q to quit, s to save"),
    };
    let viewer = Viewer::new(&title, args.headless);
    let mut pipeline = Pipeline::new(
        ip,
        detector,
        args.confidence,
        publisher,
        viewer,
        args.outdir.clone(),
    );

    let result = match mode {
        Mode::Capture => run_capture(&config, &mut pipeline, shutdown)
            .await
            .map(|_| ()),
        _ => {
            run_live(&config, &mut pipeline, shutdown).await;
            Ok(())
        }
    };

    pipeline.close().await;
    result
}
