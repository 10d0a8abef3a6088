//! Document ingestion: turn an uploaded file into `(content, chunks)`.
//!
//! Files named `*.pdf` go through per-page text extraction; everything else
//! is decoded as UTF-8 plain text. The extracted content is then split into
//! fixed-size character windows.

pub mod chunker;
pub mod extract;

pub use chunker::{CHUNK_CHARS, chunk_text};
pub use extract::{ParsedDocument, parse_document};
