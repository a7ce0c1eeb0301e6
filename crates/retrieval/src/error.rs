use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Symbol error: {0}")]
    SymbolError(#[from] repo_brain_symbols::SymbolError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] repo_brain_vector_store::VectorStoreError),

    #[error("Memory error: {0}")]
    MemoryError(#[from] repo_brain_memory::MemoryError),

    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}
