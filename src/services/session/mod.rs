//! Session
//!
//! The in-memory session store and the shared handle the controllers use.

pub mod store;

pub use store::*;

use std::sync::Arc;

use tokio::sync::RwLock;

/// Session store shared between the orchestrator and its controllers.
///
/// Locks are taken per transition and never held across an `.await`.
pub type SharedSession = Arc<RwLock<SessionStore>>;

/// Create an empty shared session.
pub fn shared_session() -> SharedSession {
    Arc::new(RwLock::new(SessionStore::new()))
}
