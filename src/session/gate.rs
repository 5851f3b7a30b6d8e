//! SessionGate trait and the in-process tracker

use super::types::{Session, SessionState, SessionStatus};
use crate::graph::NodeRef;
use tokio::sync::watch;
use tracing::{debug, info};

/// Source of session notifications
///
/// `subscribe` hands out a receiver whose current value is the present
/// state, so a consumer checks state and waits for transitions through
/// one object and cannot miss an establishment between the two.
pub trait SessionGate: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<SessionState>;

    /// The active session, if any
    fn current_session(&self) -> Option<Session> {
        self.subscribe().borrow().session().cloned()
    }

    fn status(&self) -> SessionStatus {
        SessionStatus::from(&*self.subscribe().borrow())
    }
}

/// In-process session gate
///
/// Whatever performs authentication reports outcomes here; consumers
/// observe them through `SessionGate`.
#[derive(Debug)]
pub struct SessionTracker {
    state: watch::Sender<SessionState>,
}

impl SessionTracker {
    /// Create a tracker that has not yet determined the session
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self { state }
    }

    /// Record a newly established session for `web_id`.
    ///
    /// Notifies subscribers even if the principal is unchanged.
    pub fn establish(&self, web_id: impl Into<NodeRef>) -> Session {
        let session = Session::new(web_id);
        info!(web_id = %session.web_id, session = %session.id, "session established");
        self.state.send_replace(SessionState::Active(session.clone()));
        session
    }

    /// Record that no session exists (logout, or none found at startup)
    pub fn clear(&self) {
        debug!("session cleared");
        self.state.send_replace(SessionState::Anonymous);
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate for SessionTracker {
    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

/// Wait until a session exists and return it; immediately if one already
/// does. `None` if the gate goes away first.
pub async fn wait_for_session(gate: &dyn SessionGate) -> Option<Session> {
    let mut states = gate.subscribe();
    loop {
        let current = states.borrow_and_update().session().cloned();
        if let Some(session) = current {
            return Some(session);
        }
        if states.changed().await.is_err() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::{timeout, Duration};

    const ALICE: &str = "https://alice.example/profile/card#me";

    #[test]
    fn tracker_starts_initializing() {
        let tracker = SessionTracker::new();
        assert!(tracker.status().initializing);
        assert_eq!(tracker.current_session(), None);
    }

    #[test]
    fn establish_and_clear_update_state() {
        let tracker = SessionTracker::new();
        let session = tracker.establish(ALICE);
        assert_eq!(tracker.current_session(), Some(session));
        assert!(tracker.status().logged_in);

        tracker.clear();
        assert_eq!(tracker.current_session(), None);
        let status = tracker.status();
        assert!(!status.initializing);
        assert!(!status.logged_in);
    }

    #[tokio::test]
    async fn wait_returns_existing_session_immediately() {
        let tracker = SessionTracker::new();
        let session = tracker.establish(ALICE);
        let waited = timeout(Duration::from_secs(1), wait_for_session(&tracker))
            .await
            .expect("should not wait");
        assert_eq!(waited, Some(session));
    }

    #[tokio::test]
    async fn wait_resolves_on_later_establishment() {
        let tracker = Arc::new(SessionTracker::new());
        tracker.clear();
        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { wait_for_session(tracker.as_ref()).await })
        };
        tokio::task::yield_now().await;
        let session = tracker.establish(ALICE);

        let waited = timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter finished")
            .expect("task joined");
        assert_eq!(waited, Some(session));
    }

    #[tokio::test]
    async fn re_establishment_notifies_subscribers() {
        let tracker = SessionTracker::new();
        let first = tracker.establish(ALICE);
        let mut states = tracker.subscribe();
        let _ = states.borrow_and_update();

        let second = tracker.establish(ALICE);
        timeout(Duration::from_secs(1), states.changed())
            .await
            .expect("notified")
            .expect("sender alive");
        assert_eq!(states.borrow().session(), Some(&second));
        assert_ne!(first.id, second.id);
    }
}
