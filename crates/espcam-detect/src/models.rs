use crate::DetectorKind;
use std::path::{Path, PathBuf};

/// File name of the res10 300x300 SSD face model exported to ONNX.
pub const SSD_MODEL_FILE: &str = "face_ssd.onnx";

/// File name of the SeetaFace frontal funnel cascade.
pub const CASCADE_MODEL_FILE: &str = "seeta_fd_frontal_v1.0.bin";

/// Environment variable overriding the default model directory.
pub const MODEL_DIR_ENV: &str = "ESPCAM_MODEL_DIR";

const DEFAULT_MODEL_DIR: &str = "models";

/// Locations of the detector model files.
///
/// Models are provisioned by hand; nothing here downloads.
#[derive(Clone, Debug)]
pub struct ModelPaths {
    dir: PathBuf,
    ssd_file: String,
    cascade_file: String,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_DIR)
    }
}

/// Whether one expected model file is installed.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelStatus {
    pub kind: DetectorKind,
    pub path: PathBuf,
    pub present: bool,
}

impl ModelPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ssd_file: SSD_MODEL_FILE.to_string(),
            cascade_file: CASCADE_MODEL_FILE.to_string(),
        }
    }

    /// `$ESPCAM_MODEL_DIR`, or `models` relative to the working directory.
    pub fn from_env() -> Self {
        match std::env::var_os(MODEL_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn with_ssd_file(mut self, file: impl Into<String>) -> Self {
        self.ssd_file = file.into();
        self
    }

    pub fn with_cascade_file(mut self, file: impl Into<String>) -> Self {
        self.cascade_file = file.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ssd_model(&self) -> PathBuf {
        self.dir.join(&self.ssd_file)
    }

    pub fn cascade_model(&self) -> PathBuf {
        self.dir.join(&self.cascade_file)
    }

    /// Status of every expected file, in selection order.
    pub fn report(&self) -> Vec<ModelStatus> {
        [
            (DetectorKind::Dnn, self.ssd_model()),
            (DetectorKind::Cascade, self.cascade_model()),
        ]
        .into_iter()
        .map(|(kind, path)| ModelStatus {
            kind,
            present: path.is_file(),
            path,
        })
        .collect()
    }

    /// The detector the installed files would select, assuming they load.
    pub fn expected_kind(&self) -> DetectorKind {
        self.report()
            .into_iter()
            .find(|status| status.present)
            .map(|status| status.kind)
            .unwrap_or(DetectorKind::Disabled)
    }
}
