use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a code symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    Variable,
    Type,
    Enum,
    Method,
    Property,
    Struct,
    Module,
}

impl SymbolKind {
    /// Preference when several definitions share a name (higher wins)
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Class | Self::Struct => 100,
            Self::Interface | Self::Enum => 90,
            Self::Function => 85,
            Self::Type => 80,
            Self::Method => 70,
            Self::Module => 60,
            Self::Property => 50,
            Self::Variable => 40,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Variable => "variable",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Method => "method",
            Self::Property => "property",
            Self::Struct => "struct",
            Self::Module => "module",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symbol definition extracted from a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,

    /// Path relative to the indexed root, `/`-separated
    pub file_path: String,

    /// 1-based
    pub line: usize,

    /// 1-based
    pub column: usize,

    /// Enclosing class/impl/module, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Symbol {
    /// `Parent.name` for members, plain name otherwise
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{parent}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// `file:line`
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.file_path, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_and_location() {
        let symbol = Symbol {
            name: "drive".into(),
            kind: SymbolKind::Method,
            file_path: "src/car.ts".into(),
            line: 12,
            column: 3,
            parent: Some("Car".into()),
        };
        assert_eq!(symbol.qualified_name(), "Car.drive");
        assert_eq!(symbol.location(), "src/car.ts:12");
        assert_eq!(symbol.kind.to_string(), "method");
    }

    #[test]
    fn type_definitions_outrank_members() {
        assert!(SymbolKind::Class.priority() > SymbolKind::Method.priority());
        assert!(SymbolKind::Function.priority() > SymbolKind::Variable.priority());
    }
}
