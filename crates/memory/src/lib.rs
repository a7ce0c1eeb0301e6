//! # Repo Brain Memory
//!
//! One JSON document of [`RepositoryFacts`](repo_brain_protocol::RepositoryFacts)
//! per index directory, plus the query side that turns stored conventions
//! into memory evidence.
//!
//! Reads never fail: a missing document means "no facts yet" and an
//! unreadable one is logged and treated the same way. Writes are atomic.

mod error;
mod store;

pub use error::{MemoryError, Result};
pub use store::{MemoryStore, SaveOutcome, DEFAULT_MEMORY_RELEVANCE};
