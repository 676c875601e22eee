// Shared activity store
// Wraps the registry in a single async lock owned by the application state

use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{Activity, ActivityRegistry, Enrollment, RegistryError};
use crate::logger;

/// Process-wide activity store.
///
/// Signup and unregister hold the write lock across their existence checks
/// and the mutation, so concurrent requests observe each change atomically.
pub struct ActivityStore {
    registry: RwLock<ActivityRegistry>,
}

impl ActivityStore {
    pub fn new(registry: ActivityRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }

    pub fn seeded() -> Self {
        Self::new(ActivityRegistry::seeded())
    }

    /// Ordered copy of every activity
    pub async fn snapshot(&self) -> IndexMap<String, Activity> {
        self.registry.read().await.activities().clone()
    }

    pub async fn activity_count(&self) -> usize {
        self.registry.read().await.activity_count()
    }

    pub async fn signup(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Enrollment, RegistryError> {
        let enrollment = self.registry.write().await.signup(activity_name, email)?;
        logger::log_info(&format!(
            "[Registry] Signed up {} for {}",
            enrollment.email, enrollment.activity
        ));
        Ok(enrollment)
    }

    pub async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Enrollment, RegistryError> {
        let enrollment = self
            .registry
            .write()
            .await
            .unregister(activity_name, email)?;
        logger::log_info(&format!(
            "[Registry] Unregistered {} from {}",
            enrollment.email, enrollment.activity
        ));
        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_snapshot_is_detached_copy() {
        let store = ActivityStore::seeded();
        let before = store.snapshot().await;

        store
            .signup("Soccer Club", "kai@mergington.edu")
            .await
            .unwrap();

        assert_eq!(before["Soccer Club"].participants.len(), 2);
        assert_eq!(store.snapshot().await["Soccer Club"].participants.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_signups_are_all_recorded() {
        let store = Arc::new(ActivityStore::seeded());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .signup("Gym Class", &format!("s{i}@mergington.edu"))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let snapshot = store.snapshot().await;
        let gym = &snapshot["Gym Class"];
        assert_eq!(gym.participants.len(), 34);
        assert_eq!(gym.participants[0], "john@mergington.edu");
        assert_eq!(gym.participants[1], "olivia@mergington.edu");
    }

    #[tokio::test]
    async fn test_failed_unregister_leaves_store_unchanged() {
        let store = ActivityStore::seeded();
        let before = store.snapshot().await;

        let err = store
            .unregister("Debate Society", "nobody@mergington.edu")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::ParticipantNotFound {
                activity: "Debate Society".to_string(),
                email: "nobody@mergington.edu".to_string(),
            }
        );
        assert_eq!(store.snapshot().await, before);
        assert_eq!(store.activity_count().await, 9);
    }
}
