//! Logger module
//!
//! Provides logging utilities for the activities server including:
//! - Server lifecycle logging
//! - Access logging in combined, common or JSON format
//! - Level-filtered info, warning and error logging
//! - File-based logging support

mod format;
mod writer;

pub use format::{AccessLogEntry, AccessLogFormat};

use crate::config::Config;
use std::net::SocketAddr;
use std::str::FromStr;

/// Severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("Unknown log level: '{other}'")),
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let level = LogLevel::from_str(&config.logging.level)?;
    let access_format = AccessLogFormat::from_str(&config.logging.access_log_format)?;
    writer::init(writer::LogWriter::new(
        level,
        access_format,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )?)?;
    Ok(())
}

fn write(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        // Before init everything goes to the console
        None => match level {
            LogLevel::Error | LogLevel::Warn => eprintln!("{message}"),
            LogLevel::Info | LogLevel::Debug => println!("{message}"),
        },
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, activity_count: usize) {
    log_info("======================================");
    log_info("Mergington activities server started");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!("Log level: {}", config.logging.level));
    log_info(&format!("Activities loaded: {activity_count}"));
    log_info(&format!(
        "Static files: {} -> {}",
        config.static_files.mount_path, config.static_files.dir
    ));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info("======================================\n");
}

pub fn log_info(message: &str) {
    write(LogLevel::Info, message);
}

pub fn log_debug(message: &str) {
    write(LogLevel::Debug, &format!("[DEBUG] {message}"));
}

pub fn log_warning(message: &str) {
    write(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_error(message: &str) {
    write(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        log_info(&format!("[Headers] Count: {count}"));
    }
}

/// Write one access log line in the configured format
pub fn log_access(entry: &AccessLogEntry) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(w.access_format())),
        None => println!("{}", entry.format(AccessLogFormat::default())),
    }
}

pub fn log_shutdown_requested(signal: &str) {
    log_info(&format!("\n[Shutdown] {signal} received, stopping accept loop"));
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        log_info("[Shutdown] All connections closed");
    } else {
        log_warning(&format!(
            "[Shutdown] Deadline reached with {remaining} connection(s) still open"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
        assert!(LogLevel::Error < LogLevel::Debug);
    }
}
