//! Session model

use crate::graph::NodeRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session
///
/// Every establishment yields a new session, even for the same principal
/// (e.g. after a token refresh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique per establishment
    pub id: Uuid,
    /// The principal's WebID
    pub web_id: NodeRef,
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(web_id: impl Into<NodeRef>) -> Self {
        Self {
            id: Uuid::new_v4(),
            web_id: web_id.into(),
            established_at: Utc::now(),
        }
    }
}

/// What the gate currently knows about the session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// The gate has not yet determined whether a session exists
    #[default]
    Initializing,
    /// No session
    Anonymous,
    Active(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Active(session) => Some(session),
            _ => None,
        }
    }
}

/// Login status as a login widget shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub initializing: bool,
    pub logged_in: bool,
    pub web_id: Option<NodeRef>,
}

impl From<&SessionState> for SessionStatus {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Initializing => Self {
                initializing: true,
                logged_in: false,
                web_id: None,
            },
            SessionState::Anonymous => Self {
                initializing: false,
                logged_in: false,
                web_id: None,
            },
            SessionState::Active(session) => Self {
                initializing: false,
                logged_in: true,
                web_id: Some(session.web_id.clone()),
            },
        }
    }
}
