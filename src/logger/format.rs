//! Access log format module
//!
//! Supports the Apache/Nginx `combined` and `common` formats plus one JSON
//! object per line.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::str::FromStr;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Access log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLogFormat {
    #[default]
    Combined,
    Common,
    Json,
}

impl FromStr for AccessLogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "common" => Ok(Self::Common),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown access log format: '{other}'")),
        }
    }
}

/// One served request
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    /// `1.0`, `1.1` or `2`
    pub http_version: String,
    pub status: u16,
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: AccessLogFormat) -> String {
        match format {
            AccessLogFormat::Combined => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            AccessLogFormat::Common => self.format_common(),
            AccessLogFormat::Json => serde_json::to_string(self)
                .unwrap_or_else(|e| format!(r#"{{"error":"unserializable access entry: {e}"}}"#)),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        format!(
            "{} - - [{}] \"{} {}{} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.method,
            self.path,
            query,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "10.0.0.7".to_string(),
            "POST".to_string(),
            "/activities/Chess%20Club/signup".to_string(),
        );
        entry.query = Some("email=new%40mergington.edu".to_string());
        entry.status = 200;
        entry.body_bytes = 58;
        entry.referer = Some("http://localhost:8000/static/index.html".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 420;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format(AccessLogFormat::Combined);
        assert!(log.starts_with("10.0.0.7 - - ["));
        assert!(log.contains(
            "\"POST /activities/Chess%20Club/signup?email=new%40mergington.edu HTTP/1.1\" 200 58"
        ));
        assert!(log.ends_with("\"http://localhost:8000/static/index.html\" \"Mozilla/5.0\""));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format(AccessLogFormat::Common);
        assert!(log.ends_with("HTTP/1.1\" 200 58"));
        assert!(!log.contains("Mozilla"));
    }

    #[test]
    fn test_format_common_without_query() {
        let mut entry = create_test_entry();
        entry.method = "GET".to_string();
        entry.path = "/activities".to_string();
        entry.query = None;
        assert!(entry
            .format(AccessLogFormat::Common)
            .contains("\"GET /activities HTTP/1.1\""));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format(AccessLogFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["remote_addr"], "10.0.0.7");
        assert_eq!(value["method"], "POST");
        assert_eq!(value["status"], 200);
        assert_eq!(value["body_bytes"], 58);
        assert_eq!(value["request_time_us"], 420);
        assert_eq!(value["query"], "email=new%40mergington.edu");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<AccessLogFormat>(), Ok(AccessLogFormat::Json));
        assert_eq!("common".parse::<AccessLogFormat>(), Ok(AccessLogFormat::Common));
        assert!("apache".parse::<AccessLogFormat>().is_err());
    }
}
