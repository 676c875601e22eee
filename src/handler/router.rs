//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight and size checks, route
//! matching, response decoration and access logging.

use crate::api;
use crate::config::{AppState, HttpConfig};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, IF_NONE_MATCH, REFERER,
    SERVER, USER_AGENT,
};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context for static file serving
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// No route reads the request body, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();

    let mut response = route_request(&parts, &state).await;
    decorate_response(&mut response, &state.config.http);

    if state.config.logging.access_log {
        logger::log_access(&access_entry(&parts, &response, remote_addr, started));
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    let config = &state.config;
    let method = &parts.method;
    let path = parts.uri.path();

    // 1. Preflight
    if *method == Method::OPTIONS {
        return http::build_options_response(config.http.enable_cors);
    }

    // 2. Body size
    if let Some(resp) = check_body_size(&parts.headers, config.http.max_body_size) {
        return resp;
    }

    logger::log_headers_count(parts.headers.len(), config.logging.show_headers);

    let is_read = matches!(*method, Method::GET | Method::HEAD);

    // 3. Health probes
    if config.health.enabled
        && (path == config.health.liveness_path || path == config.health.readiness_path)
    {
        return if is_read {
            api::health_response()
        } else {
            api::method_not_allowed("GET, HEAD")
        };
    }

    // 4. Root redirect to the front-end
    if path == "/" {
        return if is_read {
            http::build_redirect_response(&config.http.root_redirect)
        } else {
            api::method_not_allowed("GET, HEAD")
        };
    }

    // 5. Activities API
    if api::is_api_path(path) {
        return api::handle_api(method, path, parts.uri.query(), state).await;
    }

    // 6. Front-end assets
    if static_files::is_mounted(path, &config.static_files.mount_path) {
        if !is_read {
            return api::method_not_allowed("GET, HEAD");
        }
        let ctx = RequestContext {
            path,
            is_head: *method == Method::HEAD,
            if_none_match: parts
                .headers
                .get(IF_NONE_MATCH)
                .and_then(|v| v.to_str().ok()),
        };
        return static_files::serve_static(&ctx, &config.static_files).await;
    }

    api::not_found()
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get(CONTENT_LENGTH)?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

/// Add `Server` and, when enabled, CORS headers
fn decorate_response(response: &mut Response<Full<Bytes>>, http_config: &HttpConfig) {
    let headers = response.headers_mut();
    match HeaderValue::from_str(&http_config.server_name) {
        Ok(value) => {
            headers.insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!(
            "Invalid server_name '{}': {e}",
            http_config.server_name
        )),
    }
    if http_config.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

fn access_entry(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    remote_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v: &HeaderValue| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = version_label(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
