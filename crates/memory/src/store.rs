use crate::error::Result;
use repo_brain_protocol::paths::memory_path;
use repo_brain_protocol::{
    write_atomic, Convention, Evidence, EvidenceSource, FactsUpdate, RepositoryFacts,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_MEMORY_RELEVANCE: f32 = 0.7;

/// What [`MemoryStore::save`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// No facts loaded or recorded yet; nothing touched on disk
    NothingToSave,
}

/// Facts document bound to one index directory
#[derive(Debug, Clone)]
pub struct MemoryStore {
    index_dir: PathBuf,
    facts: Option<RepositoryFacts>,
    relevance: f32,
}

impl MemoryStore {
    pub fn new(index_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_dir: index_dir.into(),
            facts: None,
            relevance: DEFAULT_MEMORY_RELEVANCE,
        }
    }

    /// Relevance stamped on memory evidence, clamped to `[0, 1]`
    #[must_use]
    pub fn with_relevance(mut self, relevance: f32) -> Self {
        self.relevance = if relevance.is_nan() {
            DEFAULT_MEMORY_RELEVANCE
        } else {
            relevance.clamp(0.0, 1.0)
        };
        self
    }

    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    pub fn document_path(&self) -> PathBuf {
        memory_path(&self.index_dir)
    }

    /// Ensure the index directory exists, then load whatever is stored
    pub async fn init(&mut self) {
        if let Err(err) = tokio::fs::create_dir_all(&self.index_dir).await {
            log::error!(
                "Failed to create index directory {}: {err}",
                self.index_dir.display()
            );
        }
        self.load().await;
    }

    /// Replace the in-memory facts with the stored document.
    ///
    /// Never fails; a missing or unreadable document leaves no facts.
    pub async fn load(&mut self) {
        let path = self.document_path();
        self.facts = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<RepositoryFacts>(&bytes) {
                Ok(facts) => {
                    log::debug!(
                        "Loaded facts from {} ({} conventions)",
                        path.display(),
                        facts.conventions.len()
                    );
                    Some(facts)
                }
                Err(err) => {
                    log::warn!("Discarding malformed facts document {}: {err}", path.display());
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("Failed to read facts document {}: {err}", path.display());
                None
            }
        };
    }

    /// Persist the current facts atomically
    pub async fn save(&self) -> Result<SaveOutcome> {
        match &self.facts {
            Some(facts) => {
                self.write_document(facts).await?;
                Ok(SaveOutcome::Written)
            }
            None => Ok(SaveOutcome::NothingToSave),
        }
    }

    async fn write_document(&self, facts: &RepositoryFacts) -> Result<()> {
        let path = self.document_path();
        let bytes = serde_json::to_vec_pretty(facts)?;
        if let Err(err) = write_atomic(&path, &bytes).await {
            log::error!("Failed to save facts to {}: {err}", path.display());
            return Err(err.into());
        }
        log::debug!("Saved facts to {}", path.display());
        Ok(())
    }

    /// Swap in `next` only once it is on disk
    async fn commit(&mut self, next: RepositoryFacts) -> Result<SaveOutcome> {
        self.write_document(&next).await?;
        self.facts = Some(next);
        Ok(SaveOutcome::Written)
    }

    /// Shallow-merge `update` into the facts, creating them if needed, then save.
    ///
    /// On a failed write the in-memory facts are left as they were.
    pub async fn update_facts(&mut self, update: FactsUpdate) -> Result<SaveOutcome> {
        let mut next = self.facts.clone().unwrap_or_default();
        update.apply(&mut next);
        self.commit(next).await
    }

    /// Append a convention to existing facts, then save.
    ///
    /// Without facts there is no indexed repository to attach it to, so
    /// nothing is recorded.
    pub async fn add_convention(&mut self, convention: Convention) -> Result<SaveOutcome> {
        let Some(current) = &self.facts else {
            log::warn!(
                "Ignoring convention {} - {}: no facts at {}",
                convention.kind,
                convention.description,
                self.document_path().display()
            );
            return Ok(SaveOutcome::NothingToSave);
        };
        log::info!(
            "Recording convention: {} - {}",
            convention.kind,
            convention.description
        );
        let mut next = current.clone();
        next.conventions.push(convention);
        self.commit(next).await
    }

    pub fn get_facts(&self) -> Option<&RepositoryFacts> {
        self.facts.as_ref()
    }

    /// Conventions whose type or description contains `query`
    /// (case-insensitive), in insertion order
    pub fn get_memory_evidence(&self, query: &str) -> Vec<Evidence> {
        let Some(facts) = &self.facts else {
            return Vec::new();
        };
        let needle = query.to_lowercase();

        facts
            .conventions
            .iter()
            .filter(|c| {
                c.kind.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .map(|c| {
                Evidence::new(
                    EvidenceSource::Memory,
                    format!("Convention: {} - {}", c.kind, c.description),
                    self.relevance,
                )
                .with_metadata(serde_json::json!({ "convention": c }))
            })
            .collect()
    }
}
