use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Symbol error: {0}")]
    SymbolError(#[from] repo_brain_symbols::SymbolError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] repo_brain_vector_store::VectorStoreError),

    #[error("Retrieval error: {0}")]
    RetrievalError(#[from] repo_brain_retrieval::RetrievalError),

    #[error("Memory error: {0}")]
    MemoryError(#[from] repo_brain_memory::MemoryError),

    #[error("Invalid project path: {0}")]
    InvalidPath(String),
}
