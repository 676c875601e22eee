// Settings for the activities server, one struct per config table

use serde::Deserialize;

/// Every table of `config.toml`; missing keys come from built-in defaults
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub static_files: StaticFilesConfig,
    pub health: HealthConfig,
}

/// Bind address and runtime size
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Console/file logging and the per-request access log
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Appended to when set, stdout otherwise
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Warnings and errors; stderr when unset
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection limits and timeouts (seconds)
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
    /// Listen backlog passed to `listen(2)`
    pub backlog: i32,
    /// Seconds to wait for in-flight connections after a shutdown signal
    pub shutdown_timeout: u64,
}

/// Response headers and request limits
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
    /// Target of the `GET /` redirect
    pub root_redirect: String,
}

/// Front-end asset mount
#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    /// Directory the assets are read from
    pub dir: String,
    /// URL prefix the directory is served under
    pub mount_path: String,
    pub index_files: Vec<String>,
}

/// Probe endpoints answered with `{"status":"ok"}`
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    pub enabled: bool,
    pub liveness_path: String,
    pub readiness_path: String,
}
