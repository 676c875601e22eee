// API module entry
// JSON endpoints for listing activities and managing enrollment

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use percent_encoding::percent_decode_str;

use crate::config::AppState;

pub use response::{health_response, method_not_allowed, not_found};

const ACTIVITIES_PREFIX: &str = "/activities";

/// Parsed API route with decoded path parameters
#[derive(Debug, PartialEq, Eq)]
enum ApiRoute {
    List,
    Signup { activity: String },
    Unregister { activity: String, email: String },
}

impl ApiRoute {
    fn allowed_method(&self) -> (Method, &'static str) {
        match self {
            Self::List => (Method::GET, "GET"),
            Self::Signup { .. } => (Method::POST, "POST"),
            Self::Unregister { .. } => (Method::DELETE, "DELETE"),
        }
    }
}

/// Whether `path` belongs to the activities API
pub fn is_api_path(path: &str) -> bool {
    path == ACTIVITIES_PREFIX
        || path
            .strip_prefix(ACTIVITIES_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// API route handler
///
/// Dispatches to handler functions based on request path and method
pub async fn handle_api(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let route = match parse_route(path) {
        Ok(Some(route)) => route,
        Ok(None) => return response::not_found(),
        Err(message) => return response::bad_request(&message),
    };

    let (expected, allow) = route.allowed_method();
    if *method != expected {
        return response::method_not_allowed(allow);
    }

    match route {
        ApiRoute::List => handlers::list_activities(state).await,
        ApiRoute::Signup { activity } => match query_param(query, "email") {
            Some(email) => handlers::signup(state, &activity, &email).await,
            None => response::missing_query("email"),
        },
        ApiRoute::Unregister { activity, email } => {
            handlers::unregister(state, &activity, &email).await
        }
    }
}

/// Split the raw path into segments, then percent-decode each one.
///
/// Returns `Ok(None)` when no API route matches.
fn parse_route(path: &str) -> Result<Option<ApiRoute>, String> {
    let Some(rest) = path.strip_prefix('/') else {
        return Ok(None);
    };
    let segments: Vec<&str> = rest.split('/').collect();

    let route = match segments.as_slice() {
        ["activities"] => ApiRoute::List,
        ["activities", name, "signup"] if !name.is_empty() => ApiRoute::Signup {
            activity: decode_segment(name)?,
        },
        ["activities", name, "participants", email] if !name.is_empty() && !email.is_empty() => {
            ApiRoute::Unregister {
                activity: decode_segment(name)?,
                email: decode_segment(email)?,
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(route))
}

fn decode_segment(segment: &str) -> Result<String, String> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| format!("Invalid path segment '{segment}': {e}"))
}

/// Form-decoded query parameter; the last occurrence wins
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == name)
        .last()
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_api_path() {
        assert!(is_api_path("/activities"));
        assert!(is_api_path("/activities/Chess%20Club/signup"));
        assert!(!is_api_path("/activitiesx"));
        assert!(!is_api_path("/static/index.html"));
    }

    #[test]
    fn test_parse_list_and_signup() {
        assert_eq!(parse_route("/activities"), Ok(Some(ApiRoute::List)));
        assert_eq!(
            parse_route("/activities/Chess%20Club/signup"),
            Ok(Some(ApiRoute::Signup {
                activity: "Chess Club".to_string()
            }))
        );
    }

    #[test]
    fn test_parse_unregister_decodes_each_segment() {
        assert_eq!(
            parse_route("/activities/Art%2FDesign/participants/grace%40mergington.edu"),
            Ok(Some(ApiRoute::Unregister {
                activity: "Art/Design".to_string(),
                email: "grace@mergington.edu".to_string(),
            }))
        );
        // '+' is literal in paths
        assert_eq!(
            parse_route("/activities/A+B/participants/x"),
            Ok(Some(ApiRoute::Unregister {
                activity: "A+B".to_string(),
                email: "x".to_string(),
            }))
        );
    }

    #[test]
    fn test_parse_unmatched() {
        assert_eq!(parse_route("/activities/"), Ok(None));
        assert_eq!(parse_route("/activities//signup"), Ok(None));
        assert_eq!(parse_route("/activities/Chess%20Club"), Ok(None));
        assert_eq!(parse_route("/activities/Chess%20Club/participants"), Ok(None));
        assert_eq!(parse_route("/activities/a/signup/extra"), Ok(None));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        assert!(parse_route("/activities/%FF/signup").is_err());
    }

    #[test]
    fn test_query_param() {
        assert_eq!(
            query_param(Some("email=new%40mergington.edu"), "email"),
            Some("new@mergington.edu".to_string())
        );
        assert_eq!(
            query_param(Some("x=1&email=a+b%40c"), "email"),
            Some("a b@c".to_string())
        );
        assert_eq!(
            query_param(Some("email=first&email=second"), "email"),
            Some("second".to_string())
        );
        assert_eq!(query_param(Some("email="), "email"), Some(String::new()));
        assert_eq!(query_param(Some("mail=x"), "email"), None);
        assert_eq!(query_param(None, "email"), None);
    }
}
