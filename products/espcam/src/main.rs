use clap::Parser;
use espcam::{Cli, Command};
use espcam_base::{LogTarget, Shutdown, init_logger};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let target = match &cli.log_dir {
        Some(dir) => LogTarget::Directory(dir.clone()),
        None => LogTarget::Stdout,
    };
    if let Err(err) = init_logger(&target, cli.verbose) {
        eprintln!("cannot initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    if let Some(Command::Models(args)) = &cli.command {
        print!("{}", espcam::models::render_report(&args.model_paths()));
        return ExitCode::SUCCESS;
    }

    let shutdown = Shutdown::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("interrupt received, stopping");
            signal.request();
        }
    });

    match espcam::app::run(&cli.run, &shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
