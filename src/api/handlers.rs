// Activities API handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{json_response, registry_error};
use super::types::MessageResponse;
use crate::config::AppState;

/// `GET /activities`: every activity keyed by name, in seed order
pub async fn list_activities(state: &AppState) -> Response<Full<Bytes>> {
    let activities = state.store.snapshot().await;
    json_response(StatusCode::OK, &activities)
}

/// `POST /activities/{activity_name}/signup?email=...`
pub async fn signup(state: &AppState, activity: &str, email: &str) -> Response<Full<Bytes>> {
    match state.store.signup(activity, email).await {
        Ok(enrollment) => json_response(StatusCode::OK, &MessageResponse::signed_up(&enrollment)),
        Err(e) => registry_error(&e),
    }
}

/// `DELETE /activities/{activity_name}/participants/{email}`
pub async fn unregister(state: &AppState, activity: &str, email: &str) -> Response<Full<Bytes>> {
    match state.store.unregister(activity, email).await {
        Ok(enrollment) => json_response(
            StatusCode::OK,
            &MessageResponse::unregistered(&enrollment),
        ),
        Err(e) => registry_error(&e),
    }
}
