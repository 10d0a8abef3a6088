//! In-memory backend — sessions in a RwLock'd map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use docsage_core::error::{Error, Result};
use docsage_core::session::{QaTurn, Session};
use docsage_core::store::SessionStore;

/// Map-backed store. The lock is held only across the in-memory
/// read/mutation itself; snapshots are cloned out so callers never await a
/// remote call while holding it.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Run a mutation against one session under the write lock.
    async fn with_session<F>(&self, id: &str, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Session) + Send,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        mutate(session);
        Ok(())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn create(&self, session: Session) -> Result<String> {
        let id = session.id.clone();
        self.sessions.write().await.insert(id.clone(), session);
        debug!(session_id = %id, "session created");
        Ok(id)
    }

    async fn snapshot(&self, id: &str) -> Result<Session> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    async fn append_turn(&self, id: &str, turn: QaTurn) -> Result<()> {
        self.with_session(id, |session| session.history.push(turn)).await
    }

    async fn set_challenge_questions(&self, id: &str, questions: Vec<String>) -> Result<()> {
        self.with_session(id, |session| session.challenge_questions = questions)
            .await
    }

    async fn set_summary(&self, id: &str, summary: String) -> Result<()> {
        self.with_session(id, |session| session.summary = summary).await
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(content: &str) -> Session {
        let chunks = if content.is_empty() {
            Vec::new()
        } else {
            vec![content.to_string()]
        };
        Session::new(content.to_string(), chunks)
    }

    #[tokio::test]
    async fn create_and_snapshot() {
        let store = InMemorySessionStore::new();
        let id = store.create(test_session("document text")).await.unwrap();

        let session = store.snapshot(&id).await.unwrap();
        assert_eq!(session.id, id);
        assert_eq!(session.content, "document text");
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_session_not_found() {
        let store = InMemorySessionStore::new();
        let err = store.snapshot("nope").await.unwrap_err();
        assert!(matches!(err, Error::SessionNotFound(id) if id == "nope"));

        let err = store
            .set_summary("nope", "summary".into())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn history_preserves_call_order() {
        let store = InMemorySessionStore::new();
        let id = store.create(test_session("doc")).await.unwrap();

        for i in 0..4 {
            store
                .append_turn(
                    &id,
                    QaTurn {
                        question: format!("q{i}"),
                        answer: format!("a{i}"),
                        snippet: String::new(),
                    },
                )
                .await
                .unwrap();
        }

        let session = store.snapshot(&id).await.unwrap();
        let questions: Vec<_> = session.history.iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["q0", "q1", "q2", "q3"]);
    }

    #[tokio::test]
    async fn challenge_questions_are_overwritten_not_appended() {
        let store = InMemorySessionStore::new();
        let id = store.create(test_session("doc")).await.unwrap();

        store
            .set_challenge_questions(&id, vec!["old one".into(), "old two".into()])
            .await
            .unwrap();
        store
            .set_challenge_questions(&id, vec!["new one".into()])
            .await
            .unwrap();

        let session = store.snapshot(&id).await.unwrap();
        assert_eq!(session.challenge_questions, vec!["new one"]);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = InMemorySessionStore::new();
        let a = store.create(test_session("doc a")).await.unwrap();
        let b = store.create(test_session("doc b")).await.unwrap();

        store.set_summary(&a, "summary a".into()).await.unwrap();

        assert_eq!(store.snapshot(&a).await.unwrap().summary, "summary a");
        assert_eq!(store.snapshot(&b).await.unwrap().summary, "");
        assert_eq!(store.count().await, 2);
    }
}
