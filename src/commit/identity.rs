use crate::store::{Coordinator, DocumentStore, UserLookup};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Maps coordinators to the authentication id of their user account.
///
/// Lookups go by staff id, then email. Misses and lookup failures resolve to
/// the coordinator's own id. Every answer is cached for the life of the cache.
#[derive(Debug, Default)]
pub struct IdentityCache {
    emails: HashMap<String, String>,
    resolved: HashMap<String, String>,
}

impl IdentityCache {
    pub fn new(roster: &[Coordinator]) -> Self {
        Self {
            emails: roster
                .iter()
                .filter_map(|c| c.email.as_ref().map(|e| (c.id.clone(), e.clone())))
                .collect(),
            resolved: HashMap::new(),
        }
    }

    pub async fn resolve<S>(&mut self, store: &S, coordinator_id: &str) -> String
    where
        S: DocumentStore + ?Sized,
    {
        if let Some(uid) = self.resolved.get(coordinator_id) {
            return uid.clone();
        }

        let mut lookups = vec![UserLookup::StaffId(coordinator_id.to_string())];
        if let Some(email) = self.emails.get(coordinator_id) {
            lookups.push(UserLookup::Email(email.clone()));
        }

        let mut uid = None;
        for lookup in &lookups {
            match store.find_user(lookup).await {
                Ok(Some(user)) => {
                    uid = Some(user.uid);
                    break;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("User lookup {:?} failed: {}", lookup, e);
                    break;
                }
            }
        }

        let uid = uid.unwrap_or_else(|| {
            debug!("No user account for coordinator {}", coordinator_id);
            coordinator_id.to_string()
        });
        self.resolved.insert(coordinator_id.to_string(), uid.clone());
        uid
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Documents, MemoryStore, UserRecord};

    fn coordinator(id: &str, email: Option<&str>) -> Coordinator {
        Coordinator {
            id: id.to_string(),
            name: id.to_string(),
            rating: None,
            expertise: vec![],
            email: email.map(str::to_string),
        }
    }

    fn user(uid: &str, email: Option<&str>, staff: Option<&str>) -> UserRecord {
        UserRecord {
            uid: uid.to_string(),
            email: email.map(str::to_string),
            name: None,
            staff_id: staff.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_resolves_by_staff_id_then_email() {
        let store = MemoryStore::new(Documents {
            users: vec![
                user("auth-1", None, Some("c1")),
                user("auth-2", Some("mpho@hub.org"), None),
            ],
            ..Default::default()
        });
        let roster = vec![
            coordinator("c1", None),
            coordinator("c2", Some("mpho@hub.org")),
            coordinator("c3", Some("nobody@hub.org")),
        ];
        let mut cache = IdentityCache::new(&roster);

        assert_eq!(cache.resolve(&store, "c1").await, "auth-1");
        assert_eq!(cache.resolve(&store, "c2").await, "auth-2");
        assert_eq!(cache.resolve(&store, "c3").await, "c3");
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn test_cached_answer_survives_store_outage() {
        let store = MemoryStore::new(Documents {
            users: vec![user("auth-1", None, Some("c1"))],
            ..Default::default()
        });
        let mut cache = IdentityCache::new(&[]);
        assert_eq!(cache.resolve(&store, "c1").await, "auth-1");

        store.set_offline(true);
        assert_eq!(cache.resolve(&store, "c1").await, "auth-1");
        assert_eq!(cache.resolve(&store, "c5").await, "c5");
    }
}
