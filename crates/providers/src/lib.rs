//! Generative-model providers for docsage.
//!
//! All providers implement the `docsage_core::TextGenerator` trait. The
//! only production provider today is Gemini's `generateContent` REST API.

pub mod gemini;

pub use gemini::GeminiProvider;
