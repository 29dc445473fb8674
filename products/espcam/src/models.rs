use espcam_detect::ModelPaths;
use std::fmt::Write;

/// Human-readable listing of the expected model files.
pub fn render_report(paths: &ModelPaths) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "model directory: {}", paths.dir().display());
    for status in paths.report() {
        let state = if status.present { "present" } else { "missing" };
        let _ = writeln!(out, "  {:<8} {:<8} {}", status.kind.to_string(), state, status.path.display());
    }
    let _ = writeln!(out, "selected detector: {}", paths.expected_kind());
    out
}
