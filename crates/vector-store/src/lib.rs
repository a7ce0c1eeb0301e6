//! # Repo Brain Vector Store
//!
//! Offline similarity search over source code, no model download required.
//!
//! ## Architecture
//!
//! ```text
//! (path, content)
//!     │
//!     ├──> Line windows (overlapping)
//!     │
//!     ├──> HashingEmbedder
//!     │      └─> identifier-aware tokens → signed feature hashing → unit vector
//!     │
//!     ├──> VectorStore (brute-force cosine, per-path replacement)
//!     │
//!     └──> Persistent storage
//!            └─> JSON (windows only; vectors are rebuilt on load)
//! ```
//!
//! ## Example
//!
//! ```
//! use repo_brain_vector_store::{VectorIndexConfig, VectorStore};
//!
//! let mut store = VectorStore::new(VectorIndexConfig::default());
//! store.index_code("src/retry.ts", "export function retryWithBackoff() {}");
//!
//! let hits = store.search("retry backoff", 5);
//! assert_eq!(hits[0].file_path, "src/retry.ts");
//! ```

mod embeddings;
mod error;
mod store;
mod types;
mod windows;

pub use embeddings::{tokenize, HashingEmbedder};
pub use error::{Result, VectorStoreError};
pub use store::VectorStore;
pub use types::{SearchHit, StoredWindow, VectorIndexConfig};
pub use windows::{split_windows, LineWindow};
