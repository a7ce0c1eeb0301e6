use crate::config::IndexerConfig;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Scanner for finding source files in a project
pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
    ignored_dirs: Arc<Vec<String>>,
    max_file_size_bytes: u64,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, config: &IndexerConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: config.extensions.iter().map(|e| e.to_lowercase()).collect(),
            ignored_dirs: Arc::new(config.ignored_dirs.iter().map(|d| d.to_lowercase()).collect()),
            max_file_size_bytes: config.max_file_size_bytes,
        }
    }

    /// Scan directory for source files (.gitignore aware), sorted by path
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let ignored = Arc::clone(&self.ignored_dirs);
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false);
        builder.filter_entry(move |entry| !is_ignored_scope(entry.path(), &root, &ignored));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.is_source_file(path) {
                        continue;
                    }

                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > self.max_file_size_bytes {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                self.max_file_size_bytes
                            );
                            continue;
                        }
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} files to index", files.len());
        files
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|candidate| candidate == &ext)
            })
    }
}

fn is_ignored_scope(path: &Path, root: &Path, ignored: &[String]) -> bool {
    if let Ok(relative) = path.strip_prefix(root) {
        for component in relative.components() {
            if let std::path::Component::Normal(name) = component {
                let lowered = name.to_string_lossy().to_lowercase();
                if ignored.iter().any(|dir| dir == &lowered) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::FileScanner;
    use crate::config::IndexerConfig;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn relative(files: &[std::path::PathBuf], root: &std::path::Path) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn finds_supported_sources_only() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/app.ts"), b"export const a = 1;").unwrap();
        fs::write(temp.path().join("src/view.tsx"), b"export function V() {}").unwrap();
        fs::write(temp.path().join("lib.rs"), b"fn main() {}").unwrap();
        fs::write(temp.path().join("tool.py"), b"def run(): pass").unwrap();
        fs::write(temp.path().join("README.md"), b"# readme").unwrap();
        fs::write(temp.path().join("data.json"), b"{}").unwrap();

        let files = FileScanner::new(temp.path(), &IndexerConfig::default()).scan();
        assert_eq!(
            relative(&files, temp.path()),
            vec!["lib.rs", "src/app.ts", "src/view.tsx", "tool.py"]
        );
    }

    #[test]
    fn skips_ignored_directories() {
        let temp = tempdir().unwrap();
        for dir in ["node_modules/pkg", "dist", "build", "coverage", "target", ".repo-brain"] {
            let path = temp.path().join(dir);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("index.js"), b"module.exports = {};").unwrap();
        }
        fs::write(temp.path().join("main.js"), b"console.log(1);").unwrap();

        let files = FileScanner::new(temp.path(), &IndexerConfig::default()).scan();
        assert_eq!(relative(&files, temp.path()), vec!["main.js"]);
    }

    #[test]
    fn respects_gitignore_and_size_limit() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("generated")).unwrap();
        fs::write(temp.path().join("generated/out.ts"), b"export {};").unwrap();
        fs::write(temp.path().join(".gitignore"), b"/generated\n").unwrap();
        fs::write(temp.path().join("big.ts"), vec![b'a'; 64]).unwrap();
        fs::write(temp.path().join("small.ts"), b"let x;").unwrap();

        let config = IndexerConfig {
            max_file_size_bytes: 32,
            ..IndexerConfig::default()
        };
        let files = FileScanner::new(temp.path(), &config).scan();
        assert_eq!(relative(&files, temp.path()), vec!["small.ts"]);
    }
}
