use crate::error::Result;
use repo_brain_protocol::{write_atomic, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// All known symbol definitions of an indexed root, grouped by file.
///
/// Files are kept in path order so lookups and persistence are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    files: BTreeMap<String, Vec<Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything previously recorded for `file_path`.
    /// Returns the number of symbols dropped.
    pub fn replace_file(&mut self, file_path: &str, symbols: Vec<Symbol>) -> usize {
        let previous = if symbols.is_empty() {
            self.files.remove(file_path)
        } else {
            self.files.insert(file_path.to_string(), symbols)
        };
        previous.map_or(0, |old| old.len())
    }

    pub fn remove_file(&mut self, file_path: &str) -> usize {
        self.files.remove(file_path).map_or(0, |old| old.len())
    }

    /// Total number of symbols
    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.files.values().flatten()
    }

    pub fn symbols_in(&self, file_path: &str) -> &[Symbol] {
        self.files.get(file_path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every definition matching `query`.
    ///
    /// `Parent.member` and `Parent::member` match qualified members. A plain
    /// name matches case-sensitively first and falls back to a
    /// case-insensitive match when nothing matches exactly.
    pub fn find_all(&self, query: &str) -> Vec<&Symbol> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if let Some((parent, member)) = split_qualified(query) {
            return self
                .iter()
                .filter(|s| s.name == member && s.parent.as_deref() == Some(parent))
                .collect();
        }

        let exact: Vec<&Symbol> = self.iter().filter(|s| s.name == query).collect();
        if !exact.is_empty() {
            return exact;
        }
        self.iter()
            .filter(|s| s.name.eq_ignore_ascii_case(query))
            .collect()
    }

    /// The single best definition for `query`: highest kind priority, then
    /// the first in path/line order.
    pub fn find(&self, query: &str) -> Option<&Symbol> {
        let mut best: Option<&Symbol> = None;
        for candidate in self.find_all(query) {
            best = match best {
                Some(current) if current.kind.priority() >= candidate.kind.priority() => {
                    Some(current)
                }
                _ => Some(candidate),
            };
        }
        best
    }

    /// Load from disk. A missing file is an empty table.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Load from disk, degrading to an empty table on any failure
    pub async fn load_or_empty(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(table) => {
                log::debug!("Loaded {} symbols from {}", table.len(), path.display());
                table
            }
            Err(err) => {
                log::warn!("Ignoring unreadable symbol table {}: {err}", path.display());
                Self::new()
            }
        }
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        write_atomic(path, &bytes).await?;
        log::debug!("Saved {} symbols to {}", self.len(), path.display());
        Ok(())
    }
}

fn split_qualified(query: &str) -> Option<(&str, &str)> {
    let (parent, member) = query
        .rsplit_once("::")
        .or_else(|| query.rsplit_once('.'))?;
    let parent = parent.rsplit("::").next().unwrap_or(parent);
    let parent = parent.rsplit('.').next().unwrap_or(parent);
    (!parent.is_empty() && !member.is_empty()).then_some((parent, member))
}
