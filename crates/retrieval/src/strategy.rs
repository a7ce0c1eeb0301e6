use crate::error::Result;
use async_trait::async_trait;
use repo_brain_protocol::Evidence;
use std::path::Path;

/// Authoritative symbol lookup (AST-derived)
#[async_trait]
pub trait StructuralLookup: Send + Sync {
    /// At most one structural item for `name`. Not found is `Ok(None)`.
    async fn find_symbol(&self, name: &str, root: &Path) -> Result<Option<Evidence>>;
}

/// Similarity search over indexed code
#[async_trait]
pub trait SemanticLookup: Send + Sync {
    /// Up to `k` semantic items; order is not guaranteed
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Evidence>>;

    /// Ingest one file. Re-indexing a path replaces its previous contribution.
    async fn index_code(&self, file_path: &str, content: &str) -> Result<()>;

    async fn clear_index(&self) -> Result<()>;
}

/// Conventions and other persisted project memory
#[async_trait]
pub trait MemoryLookup: Send + Sync {
    async fn memory_evidence(&self, query: &str) -> Result<Vec<Evidence>>;
}
