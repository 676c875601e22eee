//! Activity registry module
//!
//! In-memory record of every extracurricular activity and who is enrolled.
//! The set of activities is fixed at startup; only participant lists change.

mod seed;
mod store;

pub use seed::default_activities;
pub use store::ActivityStore;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One extracurricular offering. The activity name is the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Advisory capacity, never enforced at signup
    pub max_participants: u32,
    /// Enrolled emails in signup order
    pub participants: Vec<String>,
}

/// Confirmation of a successful signup or unregister
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub email: String,
    pub activity: String,
}

/// Registry lookup failures. `Display` is the caller-visible message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Activity not found")]
    ActivityNotFound { activity: String },

    #[error("Participant not found in this activity")]
    ParticipantNotFound { activity: String, email: String },
}

/// Activities keyed by name, in seed order
#[derive(Debug, Clone, Default)]
pub struct ActivityRegistry {
    activities: IndexMap<String, Activity>,
}

impl ActivityRegistry {
    pub const fn new(activities: IndexMap<String, Activity>) -> Self {
        Self { activities }
    }

    /// Registry populated with the school's fixed activity list
    pub fn seeded() -> Self {
        Self::new(default_activities())
    }

    pub const fn activities(&self) -> &IndexMap<String, Activity> {
        &self.activities
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Append `email` to the activity's participants.
    ///
    /// Duplicates and capacity are not checked.
    pub fn signup(&mut self, activity_name: &str, email: &str) -> Result<Enrollment, RegistryError> {
        let activity = self.activities.get_mut(activity_name).ok_or_else(|| {
            RegistryError::ActivityNotFound {
                activity: activity_name.to_string(),
            }
        })?;

        activity.participants.push(email.to_string());

        Ok(Enrollment {
            email: email.to_string(),
            activity: activity_name.to_string(),
        })
    }

    /// Remove the first occurrence of `email` from the activity's participants
    pub fn unregister(
        &mut self,
        activity_name: &str,
        email: &str,
    ) -> Result<Enrollment, RegistryError> {
        let activity = self.activities.get_mut(activity_name).ok_or_else(|| {
            RegistryError::ActivityNotFound {
                activity: activity_name.to_string(),
            }
        })?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| RegistryError::ParticipantNotFound {
                activity: activity_name.to_string(),
                email: email.to_string(),
            })?;

        activity.participants.remove(position);

        Ok(Enrollment {
            email: email.to_string(),
            activity: activity_name.to_string(),
        })
    }
}
