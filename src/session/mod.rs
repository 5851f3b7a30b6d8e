//! Session gating
//!
//! Authentication itself happens elsewhere; this module only carries its
//! outcome (a session was established, or cleared) to whoever populates.

mod gate;
mod types;

pub use gate::{wait_for_session, SessionGate, SessionTracker};
pub use types::{Session, SessionState, SessionStatus};
