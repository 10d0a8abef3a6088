//! Session report rendering: PDF export and word-frequency images.

pub mod pdf;
pub mod wordcloud;

use thiserror::Error;

pub use pdf::render_session_pdf;
pub use wordcloud::render_wordcloud_png;

/// Rendering failures. These are server-side faults, not user input errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF render failed: {0}")]
    Pdf(String),

    #[error("image encode failed: {0}")]
    Image(String),
}
