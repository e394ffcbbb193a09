use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

static LOGGER: FileLogger = FileLogger;

/// Appends `[timestamp] LEVEL message` lines to the file opened by [`init`].
/// The terminal belongs to the UI, so nothing is ever written to stdout/stderr.
struct FileLogger;

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut guard) = LOG_FILE.lock()
            && let Some(file) = guard.as_mut()
        {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(
                file,
                "[{}] {:<5} {}",
                timestamp,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock()
            && let Some(file) = guard.as_mut()
        {
            let _ = file.flush();
        }
    }
}

/// Opens (or creates) the log file and installs the logger. Safe to call more than once;
/// later calls only swap the target file and level.
pub fn init(path: &Path, level: LevelFilter) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }

    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
    Ok(())
}

/// Maps `-v` occurrences to a level: none = warn, one = info, more = debug.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("exam-prep.log");
        init(&path, LevelFilter::Info).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_logger_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exam-prep.log");
        init(&path, LevelFilter::Debug).unwrap();
        log::info!("Test log message");
        log::logger().flush();
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1), LevelFilter::Info);
        assert_eq!(level_from_verbosity(5), LevelFilter::Debug);
    }
}
