use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::clock::unix_seconds;

/// Crates whose records pass at every enabled level. Everything else
/// (http, mqtt and runtime internals) is limited to Info and above.
const OWN_TARGET_PREFIX: &str = "espcam";

/// Where the process logger writes.
#[derive(Clone, Debug, PartialEq)]
pub enum LogTarget {
    Stdout,
    /// A directory of date-named files, `<dir>/YYYY-MM-DD.log`.
    Directory(PathBuf),
}

/// Writes each record as one line on stdout.
pub struct StdoutLogger;

/// Appends records to `<dir>/<date>.log`, switching files at UTC midnight.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

fn open_day_file(dir: &Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{date}.log")))
}

impl FileLogger {
    /// Create the directory if needed and open today's file.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let current_date = format_today();
        let file = open_day_file(&dir, &current_date)?;

        Ok(FileLogger {
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

fn accepts(metadata: &Metadata) -> bool {
    metadata.level() <= Level::Info || metadata.target().starts_with(OWN_TARGET_PREFIX)
}

fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        accepts(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_record(record));
        }
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        accepts(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let today = format_today();
        if today != state.current_date {
            // keep writing to yesterday's file if today's cannot be opened
            match open_day_file(&state.dir, &today) {
                Ok(file) => {
                    state.file = file;
                    state.current_date = today;
                }
                Err(err) => eprintln!("espcam: cannot open log file for {today}: {err}"),
            }
        }

        let line = format_record(record);
        if let Err(err) = writeln!(state.file, "{line}") {
            eprintln!("espcam: log write failed ({err}): {line}");
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp() -> String {
    let secs = unix_seconds();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Current UTC date as `YYYY-MM-DD`, the log file stem.
pub fn format_today() -> String {
    let (year, month, day) = civil_from_days((unix_seconds() / 86400) as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Convert days since Unix epoch to civil date (year, month, day)
/// Uses Howard Hinnant's algorithm (public domain)
/// http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Initialize the global logger.
///
/// `verbose` forces Debug. Otherwise debug builds log at Debug and release
/// builds at Info.
///
/// This can only be called once per process. Subsequent calls are silently ignored.
/// Returns an error if the log directory cannot be created.
pub fn init_logger(target: &LogTarget, verbose: bool) -> std::io::Result<()> {
    static STDOUT: StdoutLogger = StdoutLogger;

    let max_level = if verbose || cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let installed = match target {
        LogTarget::Stdout => log::set_logger(&STDOUT).is_ok(),
        // set_logger needs a &'static; the one leaked FileLogger lives for the process
        LogTarget::Directory(dir) => {
            let logger = FileLogger::new(dir.clone())?;
            log::set_logger(Box::leak(Box::new(logger))).is_ok()
        }
    };

    if installed {
        log::set_max_level(max_level);
    }

    Ok(())
}
