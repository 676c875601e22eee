// API response utility functions module

use crate::logger;
use crate::registry::RegistryError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::{ErrorDetail, ValidationIssue};

const JSON: &str = "application/json";

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header(CONTENT_TYPE, JSON)
                .body(Full::new(Bytes::from_static(
                    br#"{"detail":"Internal Server Error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// `{"detail": message}` with the given status
pub fn detail_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &ErrorDetail { detail: message })
}

/// Registry lookups that fail surface as 404 with the error's message
pub fn registry_error(err: &RegistryError) -> Response<Full<Bytes>> {
    match err {
        RegistryError::ActivityNotFound { activity } => {
            logger::log_debug(&format!("[API] Unknown activity '{activity}'"));
        }
        RegistryError::ParticipantNotFound { activity, email } => {
            logger::log_debug(&format!("[API] {email} is not enrolled in '{activity}'"));
        }
    }
    detail_response(StatusCode::NOT_FOUND, &err.to_string())
}

/// Liveness/readiness probe body
pub fn health_response() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({"status": "ok"}))
}

/// 404 for paths no route claims
pub fn not_found() -> Response<Full<Bytes>> {
    detail_response(StatusCode::NOT_FOUND, "Not Found")
}

/// 405 listing the methods the matched path accepts
pub fn method_not_allowed(allow: &'static str) -> Response<Full<Bytes>> {
    let mut resp = detail_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    resp.headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static(allow));
    resp
}

/// 400 for path segments that do not decode to UTF-8
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    detail_response(StatusCode::BAD_REQUEST, message)
}

/// 422 for a missing required query parameter
pub fn missing_query(name: &'static str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        &ErrorDetail {
            detail: [ValidationIssue::missing_query(name)],
        },
    )
}
