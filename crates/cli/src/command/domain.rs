use repo_brain_indexer::IndexStats;
use repo_brain_protocol::{Convention, Evidence, RepositoryFacts};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

pub const NO_INDEX_MESSAGE: &str = "No index found. Please run 'repo-brain index' first.";

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

/// Envelope printed in `--json` mode
#[derive(Debug, Serialize, Clone)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl CommandResponse {
    pub fn ok(data: impl Serialize) -> anyhow::Result<Self> {
        Ok(Self {
            status: CommandStatus::Ok,
            message: None,
            data: serde_json::to_value(data)?,
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: Some(message.into()),
            data: Value::Null,
        }
    }
}

/// Result of a command that needs an existing index
pub enum Outcome<T> {
    Done(T),
    NoIndex,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexOutput {
    pub root: PathBuf,
    pub stats: IndexStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainOutput {
    pub query: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub sources: Vec<Evidence>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionOutput {
    pub convention: Convention,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub index_dir: PathBuf,
    pub facts: RepositoryFacts,
    pub indexed_files: usize,
    pub semantic_windows: usize,
}
