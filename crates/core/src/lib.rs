//! Core domain types and traits for docsage.
//!
//! Everything the other crates share lives here: the error taxonomy, the
//! `Session` data model, the `TextGenerator` seam over the hosted model,
//! and the `SessionStore` seam over session state.

pub mod error;
pub mod generator;
pub mod session;
pub mod store;
pub mod text;

pub use error::{Error, ExtractionError, GatewayError, Result, ValidationError};
pub use generator::TextGenerator;
pub use session::{QaTurn, Session};
pub use store::SessionStore;
