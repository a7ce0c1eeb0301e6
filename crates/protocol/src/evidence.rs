use crate::facts::RepositoryFacts;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// Authoritative definition found by AST lookup
    Structural,
    /// Similarity match from the semantic index
    Semantic,
    /// Persisted project memory (conventions)
    Memory,
}

impl EvidenceSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Semantic => "semantic",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of evidence produced by a retrieval strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: EvidenceSource,

    /// Human-readable summary of the finding
    pub content: String,

    /// Relevance in `[0.0, 1.0]`, higher is better
    pub relevance: f32,

    /// Opaque payload for traceability (symbol record, convention, chunk range)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Evidence {
    pub fn new(source: EvidenceSource, content: impl Into<String>, relevance: f32) -> Self {
        Self {
            source,
            content: content.into(),
            relevance,
            metadata: None,
        }
    }

    /// Builder: attach metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// True when the relevance is finite and inside `[0, 1]`
    #[must_use]
    pub fn has_valid_relevance(&self) -> bool {
        self.relevance.is_finite() && (0.0..=1.0).contains(&self.relevance)
    }

    /// Relevance forced into `[0, 1]`. NaN maps to `0.0`.
    #[must_use]
    pub fn clamped_relevance(&self) -> f32 {
        if self.relevance.is_nan() {
            0.0
        } else {
            self.relevance.clamp(0.0, 1.0)
        }
    }
}

/// Bounded, ranked evidence paired with the query that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningContext {
    pub query: String,

    /// Descending relevance. Order is meaningful downstream.
    pub evidence: Vec<Evidence>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_facts: Option<RepositoryFacts>,
}

impl ReasoningContext {
    pub fn new(query: impl Into<String>, evidence: Vec<Evidence>) -> Self {
        Self {
            query: query.into(),
            evidence,
            repo_facts: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty()
    }
}

/// What a reasoning backend hands back for a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,

    /// The evidence the explanation actually cites
    pub sources: Vec<Evidence>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}
