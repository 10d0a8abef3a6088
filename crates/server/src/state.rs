//! Shared application state.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use docsage_assistant::Assistant;

/// State shared by every handler.
pub struct AppState {
    pub assistant: Assistant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<AppState>;
