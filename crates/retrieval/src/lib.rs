//! # Repo Brain Retrieval
//!
//! Turns a query into a bounded, ranked [`ReasoningContext`](repo_brain_protocol::ReasoningContext).
//!
//! ```text
//! query ─┬─> StructuralLookup (SymbolTable)  ─┐
//!        ├─> SemanticLookup   (VectorStore)  ─┼─> EvidenceBlender ─> ReasoningContext
//!        └─> MemoryLookup     (MemoryStore)  ─┘
//! ```
//!
//! Strategies are traits so each one can be swapped or stubbed; the blender
//! only sees [`Evidence`](repo_brain_protocol::Evidence).

mod adapters;
mod blender;
mod config;
mod error;
mod pipeline;
mod strategy;

pub use adapters::{SymbolTableLookup, VectorIndexLookup};
pub use blender::{EvidenceBlender, DEFAULT_MAX_CONTEXT_ITEMS};
pub use config::RetrievalConfig;
pub use error::{Result, RetrievalError};
pub use pipeline::EvidencePipeline;
pub use strategy::{MemoryLookup, SemanticLookup, StructuralLookup};
