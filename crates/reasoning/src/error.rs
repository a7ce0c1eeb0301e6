use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReasoningError>;

#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("Empty question")]
    EmptyQuestion,
}
