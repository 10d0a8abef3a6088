//! SessionStore trait — the abstraction over session persistence.
//!
//! Sessions are memory-resident by default (`docsage-session`), but the
//! orchestrator only ever sees this trait, so a persistent or distributed
//! backend can be swapped in and tests can use a fake.
//!
//! Every accessor on an unknown identifier fails with a typed
//! `Error::SessionNotFound` — never a panic, never a silent default.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::{QaTurn, Session};

/// Backend trait for session state.
///
/// Implementations must scope any internal locking to the in-memory
/// read/mutation itself; callers perform remote model calls between store
/// calls and no lock may be held across them.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &str;

    /// Insert a new session, returning its identifier.
    async fn create(&self, session: Session) -> Result<String>;

    /// Clone the current state of a session.
    async fn snapshot(&self, id: &str) -> Result<Session>;

    /// Append one turn to the session's history.
    async fn append_turn(&self, id: &str, turn: QaTurn) -> Result<()>;

    /// Replace the session's challenge questions (overwrite semantics).
    async fn set_challenge_questions(&self, id: &str, questions: Vec<String>) -> Result<()>;

    /// Cache the document summary on the session.
    async fn set_summary(&self, id: &str, summary: String) -> Result<()>;

    /// Number of live sessions.
    async fn count(&self) -> usize;
}
