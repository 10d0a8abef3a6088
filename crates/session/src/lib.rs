//! In-memory session store.
//!
//! The default `SessionStore` backend: a process-wide map from session id
//! to session state. Sessions live until the process exits; there is no
//! eviction and no size bound.

pub mod in_memory;

pub use in_memory::InMemorySessionStore;
