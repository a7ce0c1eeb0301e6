//! # Repo Brain Symbols
//!
//! Structural code knowledge: which symbols are defined where.
//!
//! ```text
//! Source file
//!     │
//!     ├──> Language detection (extension)
//!     ├──> Tree-sitter parse → AST
//!     ├──> Declaration walk (top level, exports, class/impl members)
//!     │      └─> Symbol { name, kind, file_path, line, column, parent }
//!     │
//!     └──> SymbolTable (per-file replace, name lookup, JSON persistence)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use repo_brain_symbols::{Language, SymbolExtractor, SymbolTable};
//!
//! let mut extractor = SymbolExtractor::new(Language::TypeScript).unwrap();
//! let symbols = extractor
//!     .extract("export class Foo { run() {} }", "src/foo.ts")
//!     .unwrap();
//!
//! let mut table = SymbolTable::new();
//! table.replace_file("src/foo.ts", symbols);
//! assert_eq!(table.find("Foo").map(|s| s.line), Some(1));
//! ```

mod error;
mod extractor;
mod language;
mod table;

pub use error::{Result, SymbolError};
pub use extractor::SymbolExtractor;
pub use language::Language;
pub use table::SymbolTable;

pub use repo_brain_protocol::{Symbol, SymbolKind};
