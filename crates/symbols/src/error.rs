use thiserror::Error;

/// Result type for symbol operations
pub type Result<T> = std::result::Result<T, SymbolError>;

/// Errors that can occur while extracting or persisting symbols
#[derive(Error, Debug)]
pub enum SymbolError {
    /// Failed to parse the source code
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No grammar for this language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SymbolError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}
