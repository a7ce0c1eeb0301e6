use crate::error::Result;
use repo_brain_protocol::paths::config_path;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for one retrieval run, optionally read from `config.toml` in the
/// index directory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetrievalConfig {
    /// Relevance of an AST symbol match
    pub structural_relevance: f32,

    /// Relevance of a matching convention
    pub memory_relevance: f32,

    /// Max hits requested from the semantic index
    pub semantic_top_k: usize,

    /// Upper bound on evidence handed to the reasoning backend
    pub max_context_items: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            structural_relevance: 1.0,
            memory_relevance: 0.7,
            semantic_top_k: 5,
            max_context_items: 10,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRetrievalConfig {
    structural_relevance: Option<f32>,
    memory_relevance: Option<f32>,
    semantic_top_k: Option<usize>,
    max_context_items: Option<usize>,
}

impl RetrievalConfig {
    /// Parse TOML, filling gaps with defaults and clamping out-of-range values
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawRetrievalConfig = toml::from_str(source)?;
        Ok(Self::from_raw(raw))
    }

    /// Read `<index_dir>/config.toml`. A missing or invalid file yields the
    /// defaults; an invalid one is reported with a warning.
    pub async fn load_or_default(index_dir: &Path) -> Self {
        let path = config_path(index_dir);
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                log::warn!("Failed to read {}: {err}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_toml_str(&source) {
            Ok(config) => {
                log::debug!("Loaded retrieval config from {}: {:?}", path.display(), config);
                config
            }
            Err(err) => {
                log::warn!("Ignoring invalid {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Builder: override the context bound
    #[must_use]
    pub fn with_max_context_items(mut self, max_items: usize) -> Self {
        self.max_context_items = max_items;
        self
    }

    fn from_raw(raw: RawRetrievalConfig) -> Self {
        let defaults = Self::default();
        Self {
            structural_relevance: clamp_relevance(
                "structural_relevance",
                raw.structural_relevance,
                defaults.structural_relevance,
            ),
            memory_relevance: clamp_relevance(
                "memory_relevance",
                raw.memory_relevance,
                defaults.memory_relevance,
            ),
            semantic_top_k: raw.semantic_top_k.unwrap_or(defaults.semantic_top_k).min(100),
            max_context_items: raw
                .max_context_items
                .unwrap_or(defaults.max_context_items)
                .min(1_000),
        }
    }
}

fn clamp_relevance(key: &str, value: Option<f32>, default: f32) -> f32 {
    let Some(value) = value else {
        return default;
    };
    if value.is_nan() {
        log::warn!("{key} is NaN; using {default}");
        return default;
    }
    if !(0.0..=1.0).contains(&value) {
        let clamped = value.clamp(0.0, 1.0);
        log::warn!("{key} must be in [0.0, 1.0] (got {value}); clamped to {clamped}");
        return clamped;
    }
    value
}
