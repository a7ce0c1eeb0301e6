use crate::config::IndexerConfig;
use crate::error::{IndexerError, Result};
use crate::scanner::FileScanner;
use crate::stats::IndexStats;
use chrono::Utc;
use repo_brain_memory::MemoryStore;
use repo_brain_protocol::paths::{symbols_path, vectors_path};
use repo_brain_protocol::{index_dir_for_root, FactsUpdate};
use repo_brain_retrieval::{SemanticLookup, VectorIndexLookup};
use repo_brain_symbols::{Language, SymbolExtractor, SymbolTable};
use repo_brain_vector_store::VectorStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Builds the whole index of a project root: symbols, semantic windows and
/// repository facts.
pub struct ProjectIndexer {
    root: PathBuf,
    index_dir: PathBuf,
    config: IndexerConfig,
}

impl ProjectIndexer {
    /// Create new indexer for project. `root` must be an existing directory.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, IndexerConfig::default()).await
    }

    pub async fn with_config(root: impl AsRef<Path>, config: IndexerConfig) -> Result<Self> {
        let root = root.as_ref();
        let metadata = tokio::fs::metadata(root).await.map_err(|_| {
            IndexerError::InvalidPath(format!("Path does not exist: {}", root.display()))
        })?;
        if !metadata.is_dir() {
            return Err(IndexerError::InvalidPath(format!(
                "Path must be a directory: {}",
                root.display()
            )));
        }

        let root = tokio::fs::canonicalize(root).await?;
        Ok(Self {
            index_dir: index_dir_for_root(&root),
            root,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    /// Rebuild the index from scratch.
    ///
    /// Unreadable or unparsable files are recorded in the stats and skipped.
    pub async fn index(&self) -> Result<IndexStats> {
        let start = Instant::now();
        log::info!("Indexing repository at: {}", self.root.display());

        let mut memory = MemoryStore::new(&self.index_dir);
        memory.init().await;

        let files = FileScanner::new(&self.root, &self.config).scan();
        let mut stats = IndexStats::new();
        stats.files_scanned = files.len();
        stats.index_dir = self.index_dir.clone();

        let semantic = VectorIndexLookup::new(VectorStore::new(self.config.vector));
        let mut table = SymbolTable::new();
        let mut extractors: HashMap<Language, SymbolExtractor> = HashMap::new();

        for (i, file) in files.iter().enumerate() {
            let relative_path = self.relative_path(file);
            log::debug!("[{}/{}] Processing: {}", i + 1, files.len(), relative_path);

            match self
                .index_file(file, &relative_path, &mut extractors, &mut table, &semantic)
                .await
            {
                Ok(lines) => stats.add_file(Language::from_path(file).as_str(), lines),
                Err(e) => {
                    log::warn!("Failed to process {relative_path}: {e}");
                    stats.add_error(format!("{relative_path}: {e}"));
                }
            }
        }

        stats.add_symbols(table.len());
        table.save(&symbols_path(&self.index_dir)).await?;
        semantic.save(&vectors_path(&self.index_dir)).await?;
        stats.add_windows(semantic.into_inner().len());

        let language = stats.dominant_language().unwrap_or("unknown").to_string();
        memory
            .update_facts(
                FactsUpdate::default()
                    .root_path(&self.root)
                    .language(language)
                    .last_indexed(Utc::now())
                    .symbol_count(stats.symbols),
            )
            .await?;

        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        log::info!(
            "Indexing complete: {} files, {} symbols, {} windows in {} ms",
            stats.files,
            stats.symbols,
            stats.windows,
            stats.time_ms
        );
        Ok(stats)
    }

    /// Index one file, returning its line count
    async fn index_file(
        &self,
        path: &Path,
        relative_path: &str,
        extractors: &mut HashMap<Language, SymbolExtractor>,
        table: &mut SymbolTable,
        semantic: &VectorIndexLookup,
    ) -> Result<usize> {
        let content = tokio::fs::read_to_string(path).await?;

        let language = Language::from_path(path);
        let extractor = match extractors.entry(language) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(SymbolExtractor::new(language)?)
            }
        };
        let symbols = extractor.extract(&content, relative_path)?;
        log::debug!("{relative_path}: {} symbols", symbols.len());
        table.replace_file(relative_path, symbols);

        semantic.index_code(relative_path, &content).await?;
        Ok(content.lines().count())
    }

    /// Root-relative, `/`-separated
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
