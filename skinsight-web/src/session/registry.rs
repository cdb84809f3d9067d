//! In-memory session registry
//!
//! Maps the opaque client cookie to that client's [`Session`]. Each session
//! sits behind its own async mutex: a client's requests (including a slow
//! classifier call) run one at a time while other clients proceed.
//! Nothing is persisted; a restart or an idle timeout ends every session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use super::Session;

struct Slot {
    session: Arc<Mutex<Session>>,
    last_seen: Instant,
}

/// A session checked out for one request
pub struct SessionHandle {
    pub id: Uuid,
    pub session: Arc<Mutex<Session>>,
    /// True when the client presented no usable id and must be told its new one
    pub is_new: bool,
}

/// All live client sessions
#[derive(Clone)]
pub struct SessionRegistry {
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Look up the session for `presented`, or start a new one
    ///
    /// Unknown or expired ids get a fresh session under a newly generated
    /// id; a client never chooses its own session id.
    pub async fn acquire(&self, presented: Option<Uuid>) -> SessionHandle {
        let mut slots = self.slots.lock().await;
        Self::sweep_locked(&mut slots, self.idle_timeout);

        if let Some(id) = presented {
            if let Some(slot) = slots.get_mut(&id) {
                slot.last_seen = Instant::now();
                return SessionHandle {
                    id,
                    session: slot.session.clone(),
                    is_new: false,
                };
            }
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));
        slots.insert(
            id,
            Slot {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!(session_id = %id, "Started new client session");

        SessionHandle {
            id,
            session,
            is_new: true,
        }
    }

    /// Drop sessions idle for at least the configured timeout
    ///
    /// Dropping a session releases any upload it was holding.
    pub async fn sweep(&self) -> usize {
        let mut slots = self.slots.lock().await;
        Self::sweep_locked(&mut slots, self.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }

    fn sweep_locked(slots: &mut HashMap<Uuid, Slot>, idle_timeout: Duration) -> usize {
        let before = slots.len();
        slots.retain(|_, slot| slot.last_seen.elapsed() < idle_timeout);
        let removed = before - slots.len();
        if removed > 0 {
            info!("Expired {} idle client session(s)", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{OpenPage, Page};

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_session() {
        let registry = SessionRegistry::new(Duration::from_secs(60));

        let handle = registry.acquire(Some(Uuid::new_v4())).await;
        assert!(handle.is_new);
        assert_eq!(handle.session.lock().await.current_page(), Page::Home);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_known_id_returns_same_session() {
        let registry = SessionRegistry::new(Duration::from_secs(60));

        let first = registry.acquire(None).await;
        first.session.lock().await.goto(OpenPage::SignUp);

        let second = registry.acquire(Some(first.id)).await;
        assert!(!second.is_new);
        assert_eq!(second.id, first.id);
        assert_eq!(second.session.lock().await.current_page(), Page::SignUp);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new(Duration::from_secs(60));

        let alice = registry.acquire(None).await;
        alice.session.lock().await.authenticate("Alice");

        let other = registry.acquire(None).await;
        assert_ne!(other.id, alice.id);
        assert!(!other.session.lock().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let registry = SessionRegistry::new(Duration::ZERO);

        let first = registry.acquire(None).await;
        let again = registry.acquire(Some(first.id)).await;

        assert!(again.is_new);
        assert_ne!(again.id, first.id);
        assert_eq!(registry.sweep().await, 1);
        assert!(registry.is_empty().await);
    }
}
