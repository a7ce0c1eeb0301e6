use crate::error::{Result, VectorStoreError};
use serde::{Deserialize, Serialize};

/// Index shape parameters. Persisted with the index so a reload embeds the
/// same way the build did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexConfig {
    /// Embedding dimension
    pub dimension: usize,

    /// Lines per window
    pub window_lines: usize,

    /// Lines shared between consecutive windows
    pub overlap_lines: usize,

    /// Max chars of the snippet reported per hit
    pub snippet_chars: usize,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            dimension: 256,
            window_lines: 40,
            overlap_lines: 10,
            snippet_chars: 160,
        }
    }
}

impl VectorIndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(VectorStoreError::InvalidConfig(
                "dimension must be positive".into(),
            ));
        }
        if self.window_lines == 0 {
            return Err(VectorStoreError::InvalidConfig(
                "window_lines must be positive".into(),
            ));
        }
        if self.overlap_lines >= self.window_lines {
            return Err(VectorStoreError::InvalidConfig(format!(
                "overlap_lines ({}) must be smaller than window_lines ({})",
                self.overlap_lines, self.window_lines
            )));
        }
        Ok(())
    }
}

/// One indexed window of a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWindow {
    pub file_path: String,

    /// 1-indexed, inclusive
    pub start_line: usize,
    pub end_line: usize,

    pub content: String,

    #[serde(skip)]
    pub vector: Vec<f32>,
}

/// A scored match returned by [`crate::VectorStore::search`]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub snippet: String,

    /// Cosine similarity clamped to `[0, 1]`
    pub score: f32,
}
