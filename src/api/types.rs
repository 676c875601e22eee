// API body types
// JSON shapes returned by the activities API

use serde::Serialize;

use crate::registry::Enrollment;

/// `{"message": "..."}` confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn signed_up(enrollment: &Enrollment) -> Self {
        Self {
            message: format!(
                "Signed up {} for {}",
                enrollment.email, enrollment.activity
            ),
        }
    }

    pub fn unregistered(enrollment: &Enrollment) -> Self {
        Self {
            message: format!(
                "Unregistered {} from {}",
                enrollment.email, enrollment.activity
            ),
        }
    }
}

/// `{"detail": ...}` error body
#[derive(Debug, Serialize)]
pub struct ErrorDetail<T: Serialize> {
    pub detail: T,
}

/// One entry of a request validation failure
#[derive(Debug, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: [&'static str; 2],
    pub msg: &'static str,
}

impl ValidationIssue {
    pub const fn missing_query(name: &'static str) -> Self {
        Self {
            kind: "missing",
            loc: ["query", name],
            msg: "Field required",
        }
    }
}
