//! # Repo Brain Indexer
//!
//! Builds the on-disk index of a repository.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> File Scanner (.gitignore aware, ignored build/vendor dirs)
//!     │      └─> Source files (ts, tsx, js, jsx, mjs, cjs, rs, py)
//!     │
//!     ├──> SymbolExtractor (tree-sitter)
//!     │      └─> symbols.json
//!     │
//!     ├──> Semantic index (line windows, hashed embeddings)
//!     │      └─> vectors.json
//!     │
//!     └──> MemoryStore
//!            └─> memory.json (root, language, last indexed, symbol count)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use repo_brain_indexer::ProjectIndexer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let indexer = ProjectIndexer::new("/path/to/project").await?;
//!     let stats = indexer.index().await?;
//!
//!     println!("Indexed {} files, {} symbols", stats.files, stats.symbols);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod indexer;
mod scanner;
mod stats;

pub use config::IndexerConfig;
pub use error::{IndexerError, Result};
pub use indexer::ProjectIndexer;
pub use scanner::FileScanner;
pub use stats::IndexStats;
