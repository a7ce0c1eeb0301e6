use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A project convention remembered across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convention {
    /// Short category label, e.g. "naming" or "layering"
    #[serde(rename = "type")]
    pub kind: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl Convention {
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            examples: Vec::new(),
        }
    }

    /// Builder: add example
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

/// Repository-level facts, one document per index location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryFacts {
    #[serde(default)]
    pub root_path: PathBuf,

    #[serde(default)]
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_indexed: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_count: Option<usize>,

    /// Append-only
    #[serde(default)]
    pub conventions: Vec<Convention>,
}

/// Shallow partial update for [`RepositoryFacts`].
///
/// Every `Some` field replaces the stored value wholesale; `None` leaves it
/// untouched. `conventions` is only replaced when explicitly provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactsUpdate {
    pub root_path: Option<PathBuf>,
    pub language: Option<String>,
    pub last_indexed: Option<DateTime<Utc>>,
    pub symbol_count: Option<usize>,
    pub conventions: Option<Vec<Convention>>,
}

impl FactsUpdate {
    #[must_use]
    pub fn root_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = Some(root.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub const fn last_indexed(mut self, at: DateTime<Utc>) -> Self {
        self.last_indexed = Some(at);
        self
    }

    #[must_use]
    pub const fn symbol_count(mut self, count: usize) -> Self {
        self.symbol_count = Some(count);
        self
    }

    #[must_use]
    pub fn conventions(mut self, conventions: Vec<Convention>) -> Self {
        self.conventions = Some(conventions);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow-merge into `facts`
    pub fn apply(self, facts: &mut RepositoryFacts) {
        if let Some(root_path) = self.root_path {
            facts.root_path = root_path;
        }
        if let Some(language) = self.language {
            facts.language = language;
        }
        if let Some(at) = self.last_indexed {
            facts.last_indexed = Some(at);
        }
        if let Some(count) = self.symbol_count {
            facts.symbol_count = Some(count);
        }
        if let Some(conventions) = self.conventions {
            facts.conventions = conventions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_without_conventions_keeps_them() {
        let mut facts = RepositoryFacts {
            language: "rust".into(),
            conventions: vec![Convention::new("naming", "use snake_case")],
            ..Default::default()
        };

        FactsUpdate::default()
            .language("typescript")
            .symbol_count(3)
            .apply(&mut facts);

        assert_eq!(facts.language, "typescript");
        assert_eq!(facts.symbol_count, Some(3));
        assert_eq!(facts.conventions.len(), 1);
    }

    #[test]
    fn explicit_conventions_replace_wholesale() {
        let mut facts = RepositoryFacts {
            conventions: vec![Convention::new("naming", "a"), Convention::new("naming", "b")],
            ..Default::default()
        };
        FactsUpdate::default()
            .conventions(vec![Convention::new("layering", "c")])
            .apply(&mut facts);
        assert_eq!(facts.conventions, vec![Convention::new("layering", "c")]);
    }

    #[test]
    fn json_shape_matches_document_format() {
        let facts = RepositoryFacts {
            root_path: PathBuf::from("/repo"),
            language: "typescript".into(),
            last_indexed: None,
            symbol_count: Some(42),
            conventions: vec![Convention::new("naming", "use camelCase").with_example("fooBar")],
        };
        let json = serde_json::to_value(&facts).unwrap();
        assert_eq!(json["rootPath"], "/repo");
        assert_eq!(json["symbolCount"], 42);
        assert_eq!(json["conventions"][0]["type"], "naming");
        assert_eq!(json["conventions"][0]["examples"][0], "fooBar");
        assert!(json.get("lastIndexed").is_none());
    }

    #[test]
    fn missing_optional_keys_use_defaults() {
        let facts: RepositoryFacts =
            serde_json::from_str(r#"{"rootPath":"/r","language":"rust","extra":1}"#).unwrap();
        assert!(facts.conventions.is_empty());
        assert_eq!(facts.symbol_count, None);
    }
}
