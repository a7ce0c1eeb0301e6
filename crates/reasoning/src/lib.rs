//! # Repo Brain Reasoning
//!
//! The last stage of a query: a [`ReasoningBackend`] reads a
//! [`ReasoningContext`](repo_brain_protocol::ReasoningContext) and produces an
//! explanation that cites the evidence it used.
//!
//! [`EvidenceDigest`] is the built-in backend. It runs locally and summarizes
//! the evidence by source without calling any model.

mod backend;
mod digest;
mod error;

pub use backend::ReasoningBackend;
pub use digest::EvidenceDigest;
pub use error::{ReasoningError, Result};
