use clap::{Args, Parser, Subcommand};
use espcam_detect::ModelPaths;
use espcam_publish::PublisherConfig;
use espcam_stream::StreamConfig;
use std::path::PathBuf;

/// Face detection client for ESP32 camera web servers.
#[derive(Parser, Debug)]
#[command(name = "espcam", version, about)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Write logs to dated files in this directory instead of stdout.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the detector model files and which detector they select.
    Models(ModelsArgs),
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Directory holding the detector models.
    #[arg(long, env = "ESPCAM_MODEL_DIR", default_value = "models")]
    pub model_dir: PathBuf,
}

impl ModelsArgs {
    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths::new(&self.model_dir)
    }
}

/// What a run does with the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Save the `/capture` body untouched, then optionally go live.
    Raw { then_stream: bool },
    /// Detect on one snapshot and save it annotated.
    Capture,
    /// Detect on the live MJPEG stream.
    Stream,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Camera address, e.g. 192.168.4.1.
    #[arg(long, required = true)]
    pub ip: Option<String>,

    /// Stream endpoint path.
    #[arg(long, default_value = "/stream")]
    pub endpoint: String,

    /// Use one /capture snapshot instead of the stream.
    #[arg(long)]
    pub capture: bool,

    /// Download the /capture JPEG unmodified to --out.
    #[arg(long)]
    pub raw: bool,

    /// With --raw, continue to the live view afterwards.
    #[arg(long)]
    pub stream: bool,

    /// Output file for --raw.
    #[arg(long, default_value = "captura.jpg")]
    pub out: PathBuf,

    /// Directory for annotated snapshots and saved frames.
    #[arg(long, default_value = "captures")]
    pub outdir: PathBuf,

    /// Minimum detection confidence, 0 to 1.
    #[arg(long, default_value_t = 0.5, value_parser = parse_confidence)]
    pub confidence: f32,

    /// Directory holding the detector models.
    #[arg(long, env = "ESPCAM_MODEL_DIR", default_value = "models")]
    pub model_dir: PathBuf,

    /// Skip face detection entirely.
    #[arg(long)]
    pub no_detect: bool,

    /// Run without a window; stop with Ctrl-C.
    #[arg(long)]
    pub headless: bool,

    /// MQTT broker host; publishing is off without it.
    #[arg(long)]
    pub mqtt_host: Option<String>,

    #[arg(long, default_value_t = 1883)]
    pub mqtt_port: u16,

    #[arg(long, default_value = "camera/detections")]
    pub mqtt_topic: String,

    #[arg(long)]
    pub mqtt_user: Option<String>,

    #[arg(long)]
    pub mqtt_pass: Option<String>,

    /// MQTT delivery level, 0 to 2.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub mqtt_qos: u8,
}

fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0..=1"))
    }
}

impl RunArgs {
    pub fn mode(&self) -> Mode {
        if self.raw {
            Mode::Raw {
                then_stream: self.stream,
            }
        } else if self.capture {
            Mode::Capture
        } else {
            Mode::Stream
        }
    }

    pub fn stream_config(&self, ip: &str) -> StreamConfig {
        StreamConfig::new(ip).with_stream_path(self.endpoint.clone())
    }

    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths::new(&self.model_dir)
    }

    /// Broker settings, when a broker host was given.
    pub fn publisher_config(&self) -> Option<PublisherConfig> {
        let host = self.mqtt_host.as_ref()?;
        let mut config = PublisherConfig::new(host.clone())
            .with_port(self.mqtt_port)
            .with_topic(self.mqtt_topic.clone())
            .with_qos(self.mqtt_qos);
        if let Some(user) = &self.mqtt_user {
            config = config.with_credentials(user.clone(), self.mqtt_pass.clone().unwrap_or_default());
        }
        Some(config)
    }
}
