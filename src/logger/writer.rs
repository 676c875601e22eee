//! Log writer module
//!
//! Thread-safe log writing to files or stdout/stderr, filtered by level.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use super::format::AccessLogFormat;
use super::LogLevel;

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                let mut f = file.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

/// Thread-safe log writer
pub struct LogWriter {
    level: LogLevel,
    access_format: AccessLogFormat,
    /// Access log and info/debug messages
    access: LogTarget,
    /// Warnings and errors
    error: LogTarget,
}

impl LogWriter {
    pub fn new(
        level: LogLevel,
        access_format: AccessLogFormat,
        access_log_file: Option<&str>,
        error_log_file: Option<&str>,
    ) -> io::Result<Self> {
        Ok(Self {
            level,
            access_format,
            access: LogTarget::open(access_log_file, LogTarget::Stdout)?,
            error: LogTarget::open(error_log_file, LogTarget::Stderr)?,
        })
    }

    pub const fn enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.level as u8
    }

    pub const fn access_format(&self) -> AccessLogFormat {
        self.access_format
    }

    /// Route a leveled message to its target, dropping it below the threshold
    pub fn write(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Error | LogLevel::Warn => self.error.write_line(message),
            LogLevel::Info | LogLevel::Debug => self.access.write_line(message),
        }
    }

    /// Access lines bypass the level filter
    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// Returns error if log files cannot be opened or the writer is already set.
pub fn init(writer: LogWriter) -> io::Result<()> {
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if `init()` has run
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filtering() {
        let writer = LogWriter::new(LogLevel::Warn, AccessLogFormat::Common, None, None).unwrap();
        assert!(writer.enabled(LogLevel::Error));
        assert!(writer.enabled(LogLevel::Warn));
        assert!(!writer.enabled(LogLevel::Info));
        assert!(!writer.enabled(LogLevel::Debug));
        assert_eq!(writer.access_format(), AccessLogFormat::Common);
    }

    #[test]
    fn test_file_targets_split_by_level() {
        let dir = tempfile::tempdir().unwrap();
        let access_path = dir.path().join("logs/access.log");
        let error_path = dir.path().join("logs/error.log");

        let writer = LogWriter::new(
            LogLevel::Info,
            AccessLogFormat::Combined,
            access_path.to_str(),
            error_path.to_str(),
        )
        .unwrap();

        writer.write(LogLevel::Info, "[Registry] Signed up a for b");
        writer.write(LogLevel::Debug, "dropped");
        writer.write(LogLevel::Error, "[ERROR] boom");
        writer.write_access("127.0.0.1 - - access line");

        let access = std::fs::read_to_string(&access_path).unwrap();
        let error = std::fs::read_to_string(&error_path).unwrap();
        assert_eq!(
            access,
            "[Registry] Signed up a for b\n127.0.0.1 - - access line\n"
        );
        assert_eq!(error, "[ERROR] boom\n");
    }
}
