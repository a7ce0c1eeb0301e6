use std::path::{Path, PathBuf};

pub const INDEX_DIR_NAME: &str = ".repo-brain";

pub const MEMORY_FILE_NAME: &str = "memory.json";
pub const SYMBOLS_FILE_NAME: &str = "symbols.json";
pub const VECTORS_FILE_NAME: &str = "vectors.json";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[must_use]
pub fn index_dir_for_root(root: &Path) -> PathBuf {
    root.join(INDEX_DIR_NAME)
}

#[must_use]
pub fn memory_path(index_dir: &Path) -> PathBuf {
    index_dir.join(MEMORY_FILE_NAME)
}

#[must_use]
pub fn symbols_path(index_dir: &Path) -> PathBuf {
    index_dir.join(SYMBOLS_FILE_NAME)
}

#[must_use]
pub fn vectors_path(index_dir: &Path) -> PathBuf {
    index_dir.join(VECTORS_FILE_NAME)
}

#[must_use]
pub fn config_path(index_dir: &Path) -> PathBuf {
    index_dir.join(CONFIG_FILE_NAME)
}
