use crate::embeddings::HashingEmbedder;
use crate::error::Result;
use crate::types::{SearchHit, StoredWindow, VectorIndexConfig};
use crate::windows::split_windows;
use repo_brain_protocol::write_atomic;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct PersistedStore {
    config: VectorIndexConfig,
    windows: Vec<StoredWindow>,
}

pub struct VectorStore {
    config: VectorIndexConfig,
    embedder: HashingEmbedder,
    /// Insertion order doubles as the tie-break for equal scores
    windows: Vec<StoredWindow>,
}

impl VectorStore {
    pub fn new(config: VectorIndexConfig) -> Self {
        Self {
            embedder: HashingEmbedder::new(config.dimension),
            config,
            windows: Vec::new(),
        }
    }

    pub const fn config(&self) -> &VectorIndexConfig {
        &self.config
    }

    /// Index one file, replacing anything previously indexed for `file_path`.
    /// Returns the number of windows stored for it.
    pub fn index_code(&mut self, file_path: &str, content: &str) -> usize {
        let removed = self.remove_file(file_path);

        let windows = split_windows(content, self.config.window_lines, self.config.overlap_lines);
        let count = windows.len();
        for window in windows {
            let vector = self.embedder.embed(&window.content);
            self.windows.push(StoredWindow {
                file_path: file_path.to_string(),
                start_line: window.start_line,
                end_line: window.end_line,
                content: window.content,
                vector,
            });
        }

        log::debug!("Indexed {file_path}: {count} windows (replaced {removed})");
        count
    }

    /// Drop every window of `file_path`, returning how many were removed
    pub fn remove_file(&mut self, file_path: &str) -> usize {
        let before = self.windows.len();
        self.windows.retain(|w| w.file_path != file_path);
        before - self.windows.len()
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing vector store ({} windows)", self.windows.len());
        self.windows.clear();
    }

    /// Up to `limit` windows most similar to `query`, best first.
    ///
    /// Only positive similarities are returned; equal scores keep insertion
    /// order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        if limit == 0 || query.trim().is_empty() {
            return Vec::new();
        }
        log::debug!("Searching for: '{}' (limit: {})", query, limit);

        let query_vector = self.embedder.embed(query);
        let mut scored: Vec<(usize, f32)> = self
            .windows
            .iter()
            .enumerate()
            .map(|(idx, window)| {
                let similarity = HashingEmbedder::cosine_similarity(&query_vector, &window.vector);
                (idx, similarity.clamp(0.0, 1.0))
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        let results: Vec<SearchHit> = scored
            .into_iter()
            .map(|(idx, score)| {
                let window = &self.windows[idx];
                SearchHit {
                    file_path: window.file_path.clone(),
                    start_line: window.start_line,
                    end_line: window.end_line,
                    snippet: snippet(&window.content, self.config.snippet_chars),
                    score,
                }
            })
            .collect();

        log::debug!("Found {} results", results.len());
        results
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.windows.iter().map(|w| w.file_path.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        log::debug!("Saving VectorStore to {:?}", path);
        let persisted = PersistedStore {
            config: self.config,
            windows: self.windows.clone(),
        };
        let data = serde_json::to_vec_pretty(&persisted)?;
        write_atomic(path, &data).await?;
        Ok(())
    }

    /// Load a saved store. A missing file is an empty store built with
    /// `default_config`.
    pub async fn load(path: &Path, default_config: VectorIndexConfig) -> Result<Self> {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new(default_config));
            }
            Err(err) => return Err(err.into()),
        };
        let persisted: PersistedStore = serde_json::from_slice(&data)?;
        persisted.config.validate()?;

        let embedder = HashingEmbedder::new(persisted.config.dimension);
        let mut windows = persisted.windows;
        for window in &mut windows {
            window.vector = embedder.embed(&window.content);
        }

        log::debug!("Loaded {} windows from {:?}", windows.len(), path);
        Ok(Self {
            config: persisted.config,
            embedder,
            windows,
        })
    }

    /// Like [`Self::load`], degrading to an empty store on any failure
    pub async fn load_or_empty(path: &Path, default_config: VectorIndexConfig) -> Self {
        match Self::load(path, default_config).await {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Ignoring unreadable vector store {}: {err}", path.display());
                Self::new(default_config)
            }
        }
    }
}

fn snippet(content: &str, max_chars: usize) -> String {
    let collapsed = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
