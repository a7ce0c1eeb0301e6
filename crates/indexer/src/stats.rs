use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Statistics about indexing operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Files found by the scanner
    pub files_scanned: usize,

    /// Files read and indexed
    pub files: usize,

    /// Symbol definitions extracted
    pub symbols: usize,

    /// Semantic windows stored
    pub windows: usize,

    /// Total lines of code
    pub total_lines: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Indexed files per language
    pub languages: BTreeMap<String, usize>,

    /// Per-file failures, `path: reason`
    pub errors: Vec<String>,

    pub index_dir: PathBuf,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, language: &str, lines: usize) {
        self.files += 1;
        self.total_lines += lines;
        *self.languages.entry(language.to_string()).or_insert(0) += 1;
    }

    pub fn add_symbols(&mut self, count: usize) {
        self.symbols += count;
    }

    pub fn add_windows(&mut self, count: usize) {
        self.windows += count;
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    /// Language with the most indexed files; ties go to the alphabetically first
    pub fn dominant_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(language, _)| language.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_language_prefers_count_then_name() {
        let mut stats = IndexStats::new();
        assert_eq!(stats.dominant_language(), None);

        stats.add_file("typescript", 10);
        stats.add_file("python", 5);
        assert_eq!(stats.dominant_language(), Some("python"));

        stats.add_file("typescript", 1);
        assert_eq!(stats.dominant_language(), Some("typescript"));
        assert_eq!(stats.files, 3);
        assert_eq!(stats.total_lines, 16);
    }
}
