use repo_brain_protocol::INDEX_DIR_NAME;
use repo_brain_vector_store::VectorIndexConfig;

/// Scanner and index-shape settings for one indexing run
#[derive(Debug, Clone, PartialEq)]
pub struct IndexerConfig {
    /// Lowercased extensions (without the dot) that are indexed
    pub extensions: Vec<String>,

    /// Directory names skipped anywhere under the root
    pub ignored_dirs: Vec<String>,

    /// Files larger than this are skipped
    pub max_file_size_bytes: u64,

    pub vector: VectorIndexConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            ignored_dirs: DEFAULT_IGNORED_DIRS
                .iter()
                .map(ToString::to_string)
                .chain(std::iter::once(INDEX_DIR_NAME.to_string()))
                .collect(),
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            vector: VectorIndexConfig::default(),
        }
    }
}

const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "rs", "py"];

const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    "coverage",
    "target",
];

const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB
