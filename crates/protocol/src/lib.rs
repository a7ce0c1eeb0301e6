//! # Repo Brain Protocol
//!
//! Shared value types that flow between the retrieval strategies, the evidence
//! blender, the memory store and the reasoning backend.
//!
//! ```text
//! query ──> StructuralLookup ─┐
//!       ──> SemanticLookup  ──┼──> Vec<Evidence> ──> EvidenceBlender ──> ReasoningContext
//!       ──> MemoryLookup    ──┘
//! ```
//!
//! Nothing in this crate performs ranking or I/O policy; it only defines the
//! contracts plus a couple of small persistence helpers used by every store.

mod evidence;
mod facts;
pub mod paths;
mod persist;
mod symbol;

pub use evidence::{Evidence, EvidenceSource, ExplanationResponse, ReasoningContext};
pub use facts::{Convention, FactsUpdate, RepositoryFacts};
pub use paths::{index_dir_for_root, INDEX_DIR_NAME};
pub use persist::write_atomic;
pub use symbol::{Symbol, SymbolKind};
