//! TextGenerator trait — the abstraction over the hosted generative model.
//!
//! A TextGenerator turns a fully rendered prompt into completion text in a
//! single synchronous round trip. All prompt construction happens on our
//! side; all intelligence happens on theirs.
//!
//! Implementations: Gemini REST (production), deterministic stubs (tests).

use async_trait::async_trait;

use crate::error::GatewayError;

/// Capability seam for the remote model: `generate(prompt) -> text`.
///
/// Keeping the seam this narrow lets tests substitute a scripted stub and
/// lets production add timeout/retry behind it without touching the
/// orchestration logic.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name, for logging.
    fn name(&self) -> &str;

    /// One round trip: prompt in, completion text out.
    ///
    /// Any failure (network, quota, auth, malformed response) surfaces as a
    /// `GatewayError`; nothing is retried here.
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}
