//! Strategy implementations backed by the on-disk index

use crate::error::Result;
use crate::strategy::{MemoryLookup, SemanticLookup, StructuralLookup};
use async_trait::async_trait;
use repo_brain_memory::MemoryStore;
use repo_brain_protocol::{Evidence, EvidenceSource};
use repo_brain_symbols::SymbolTable;
use repo_brain_vector_store::VectorStore;
use serde_json::json;
use std::path::Path;
use tokio::sync::RwLock;

/// Structural lookup over a loaded [`SymbolTable`]
pub struct SymbolTableLookup {
    table: SymbolTable,
    relevance: f32,
}

impl SymbolTableLookup {
    pub fn new(table: SymbolTable, relevance: f32) -> Self {
        Self { table, relevance }
    }
}

#[async_trait]
impl StructuralLookup for SymbolTableLookup {
    async fn find_symbol(&self, name: &str, root: &Path) -> Result<Option<Evidence>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let Some(symbol) = self.table.find(name) else {
            log::debug!("No symbol named '{name}'");
            return Ok(None);
        };

        log::debug!("Symbol '{}' resolved to {}", name, symbol.location());
        let evidence = Evidence::new(
            EvidenceSource::Structural,
            format!(
                "Symbol found: {} ({}) at {}",
                symbol.qualified_name(),
                symbol.kind,
                symbol.location()
            ),
            self.relevance,
        )
        .with_metadata(json!({
            "symbol": symbol,
            "absolutePath": root.join(&symbol.file_path),
        }));
        Ok(Some(evidence))
    }
}

/// Semantic lookup over a [`VectorStore`]
pub struct VectorIndexLookup {
    store: RwLock<VectorStore>,
}

impl VectorIndexLookup {
    pub fn new(store: VectorStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Hand the store back, e.g. to persist it after indexing
    pub fn into_inner(self) -> VectorStore {
        self.store.into_inner()
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        self.store.read().await.save(path).await?;
        Ok(())
    }
}

#[async_trait]
impl SemanticLookup for VectorIndexLookup {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Evidence>> {
        let hits = self.store.read().await.search(query, k);
        Ok(hits
            .into_iter()
            .map(|hit| {
                Evidence::new(
                    EvidenceSource::Semantic,
                    format!(
                        "Similar code in {}:{}-{}: {}",
                        hit.file_path, hit.start_line, hit.end_line, hit.snippet
                    ),
                    hit.score,
                )
                .with_metadata(json!({
                    "filePath": hit.file_path,
                    "startLine": hit.start_line,
                    "endLine": hit.end_line,
                }))
            })
            .collect())
    }

    async fn index_code(&self, file_path: &str, content: &str) -> Result<()> {
        self.store.write().await.index_code(file_path, content);
        Ok(())
    }

    async fn clear_index(&self) -> Result<()> {
        self.store.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl MemoryLookup for MemoryStore {
    async fn memory_evidence(&self, query: &str) -> Result<Vec<Evidence>> {
        Ok(self.get_memory_evidence(query))
    }
}
