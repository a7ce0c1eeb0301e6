use crate::error::{Result, SymbolError};
use crate::language::Language;
use repo_brain_protocol::{Symbol, SymbolKind};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Tree-sitter backed symbol extractor for one language
pub struct SymbolExtractor {
    parser: Parser,
    language: Language,
}

impl SymbolExtractor {
    pub fn new(language: Language) -> Result<Self> {
        if !language.supports_ast() {
            return Err(SymbolError::unsupported_language(language.as_str()));
        }

        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| SymbolError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, language })
    }

    /// Extractor for whatever language `path` looks like
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Language::from_path(path))
    }

    /// Parse `content` and return every declaration found, in source order.
    /// `file_path` is recorded verbatim on each symbol.
    pub fn extract(&mut self, content: &str, file_path: &str) -> Result<Vec<Symbol>> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| SymbolError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            log::debug!("{file_path}: syntax errors present, extracting what parsed");
        }

        let mut walker = DeclarationWalker {
            source: content,
            file_path,
            symbols: Vec::new(),
        };
        match self.language {
            Language::Rust => walker.rust_items(root, None),
            Language::Python => walker.python_block(root, None),
            Language::JavaScript | Language::TypeScript | Language::Tsx => {
                walker.js_statements(root, None);
            }
            Language::Unknown => {}
        }

        log::debug!("Extracted {} symbols from {}", walker.symbols.len(), file_path);
        Ok(walker.symbols)
    }
}

struct DeclarationWalker<'a> {
    source: &'a str,
    file_path: &'a str,
    symbols: Vec<Symbol>,
}

impl<'a> DeclarationWalker<'a> {
    fn text(&self, node: Node<'_>) -> Option<&'a str> {
        self.source.get(node.byte_range())
    }

    fn name_of(&self, node: Node<'_>) -> Option<&'a str> {
        if let Some(name) = node.child_by_field_name("name") {
            return self.text(name);
        }

        // Grammars without a `name` field: first identifier-like child
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|child| {
            matches!(
                child.kind(),
                "identifier" | "type_identifier" | "property_identifier" | "field_identifier"
            )
        });
        found.and_then(|child| self.text(child))
    }

    fn push(&mut self, node: Node<'_>, name: &str, kind: SymbolKind, parent: Option<&str>) {
        let position = node.start_position();
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            file_path: self.file_path.to_string(),
            line: position.row + 1,
            column: position.column + 1,
            parent: parent.map(str::to_string),
        });
    }

    fn push_named(
        &mut self,
        node: Node<'_>,
        kind: SymbolKind,
        parent: Option<&str>,
    ) -> Option<&'a str> {
        let name = self.name_of(node)?;
        self.push(node, name, kind, parent);
        Some(name)
    }

    fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).collect()
    }

    // JavaScript / TypeScript

    fn js_statements(&mut self, node: Node<'_>, parent: Option<&'a str>) {
        for child in Self::named_children(node) {
            self.js_declaration(child, parent);
        }
    }

    fn js_declaration(&mut self, node: Node<'_>, parent: Option<&'a str>) {
        match node.kind() {
            "export_statement" => {
                if let Some(declaration) = node.child_by_field_name("declaration") {
                    self.js_declaration(declaration, parent);
                }
            }
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                self.push_named(node, SymbolKind::Function, parent);
            }
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(class_name) = self.push_named(node, SymbolKind::Class, parent) {
                    if let Some(body) = node.child_by_field_name("body") {
                        self.js_class_members(body, class_name);
                    }
                }
            }
            "interface_declaration" => {
                self.push_named(node, SymbolKind::Interface, parent);
            }
            "type_alias_declaration" => {
                self.push_named(node, SymbolKind::Type, parent);
            }
            "enum_declaration" => {
                self.push_named(node, SymbolKind::Enum, parent);
            }
            "lexical_declaration" | "variable_declaration" => {
                self.js_variables(node, parent);
            }
            "internal_module" | "module" => {
                if let Some(name) = self.push_named(node, SymbolKind::Module, parent) {
                    if let Some(body) = node.child_by_field_name("body") {
                        self.js_statements(body, Some(name));
                    }
                }
            }
            // `namespace Foo {}` parses as an expression statement wrapping the module
            "expression_statement" => {
                for inner in Self::named_children(node) {
                    if inner.kind() == "internal_module" {
                        self.js_declaration(inner, parent);
                    }
                }
            }
            _ => {}
        }
    }

    fn js_variables(&mut self, declaration: Node<'_>, parent: Option<&str>) {
        for declarator in Self::named_children(declaration) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            // destructuring patterns are not definitions we can name
            let Some(name_node) = declarator
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier")
            else {
                continue;
            };
            let Some(name) = self.text(name_node) else {
                continue;
            };
            let kind = match declarator.child_by_field_name("value").map(|v| v.kind()) {
                Some("arrow_function" | "function_expression" | "function" | "generator_function") => {
                    SymbolKind::Function
                }
                _ => SymbolKind::Variable,
            };
            self.push(declaration, name, kind, parent);
        }
    }

    fn js_class_members(&mut self, body: Node<'_>, class_name: &str) {
        for member in Self::named_children(body) {
            let kind = match member.kind() {
                "method_definition" | "method_signature" | "abstract_method_signature" => {
                    SymbolKind::Method
                }
                "public_field_definition" | "field_definition" => SymbolKind::Property,
                _ => continue,
            };
            self.push_named(member, kind, Some(class_name));
        }
    }

    // Rust

    fn rust_items(&mut self, node: Node<'_>, parent: Option<&'a str>) {
        for child in Self::named_children(node) {
            match child.kind() {
                "function_item" => {
                    self.push_named(child, SymbolKind::Function, parent);
                }
                "struct_item" | "union_item" => {
                    self.push_named(child, SymbolKind::Struct, parent);
                }
                "enum_item" => {
                    self.push_named(child, SymbolKind::Enum, parent);
                }
                "type_item" => {
                    self.push_named(child, SymbolKind::Type, parent);
                }
                "const_item" | "static_item" => {
                    self.push_named(child, SymbolKind::Variable, parent);
                }
                "trait_item" => {
                    if let Some(name) = self.push_named(child, SymbolKind::Interface, parent) {
                        if let Some(body) = child.child_by_field_name("body") {
                            self.rust_members(body, name);
                        }
                    }
                }
                "mod_item" => {
                    if let Some(name) = self.push_named(child, SymbolKind::Module, parent) {
                        if let Some(body) = child.child_by_field_name("body") {
                            self.rust_items(body, Some(name));
                        }
                    }
                }
                "impl_item" => {
                    let target = self.impl_target(child);
                    if let (Some(target), Some(body)) = (target, child.child_by_field_name("body"))
                    {
                        self.rust_members(body, target);
                    }
                }
                _ => {}
            }
        }
    }

    fn rust_members(&mut self, body: Node<'_>, owner: &str) {
        for member in Self::named_children(body) {
            let kind = match member.kind() {
                "function_item" | "function_signature_item" => SymbolKind::Method,
                "const_item" => SymbolKind::Property,
                "type_item" | "associated_type" => SymbolKind::Type,
                _ => continue,
            };
            self.push_named(member, kind, Some(owner));
        }
    }

    /// `impl Foo`, `impl<T> Foo<T>`, `impl Trait for path::Foo` all resolve to `Foo`
    fn impl_target(&self, impl_node: Node<'_>) -> Option<&'a str> {
        let ty = impl_node.child_by_field_name("type")?;
        match ty.kind() {
            "type_identifier" => self.text(ty),
            "generic_type" => ty
                .child_by_field_name("type")
                .and_then(|inner| match inner.kind() {
                    "scoped_type_identifier" => inner.child_by_field_name("name"),
                    _ => Some(inner),
                })
                .and_then(|inner| self.text(inner)),
            "scoped_type_identifier" => ty
                .child_by_field_name("name")
                .and_then(|name| self.text(name)),
            _ => None,
        }
    }

    // Python

    fn python_block(&mut self, node: Node<'_>, parent: Option<&'a str>) {
        for child in Self::named_children(node) {
            let definition = if child.kind() == "decorated_definition" {
                match child.child_by_field_name("definition") {
                    Some(inner) => inner,
                    None => continue,
                }
            } else {
                child
            };

            match definition.kind() {
                "function_definition" => {
                    let kind = if parent.is_some() {
                        SymbolKind::Method
                    } else {
                        SymbolKind::Function
                    };
                    self.push_named(definition, kind, parent);
                }
                "class_definition" => {
                    if let Some(name) = self.push_named(definition, SymbolKind::Class, parent) {
                        if let Some(body) = definition.child_by_field_name("body") {
                            self.python_block(body, Some(name));
                        }
                    }
                }
                "expression_statement" => self.python_assignment(definition, parent),
                _ => {}
            }
        }
    }

    fn python_assignment(&mut self, statement: Node<'_>, parent: Option<&str>) {
        for inner in Self::named_children(statement) {
            if inner.kind() != "assignment" {
                continue;
            }
            let Some(left) = inner
                .child_by_field_name("left")
                .filter(|n| n.kind() == "identifier")
            else {
                continue;
            };
            if let Some(name) = self.text(left) {
                let kind = if parent.is_some() {
                    SymbolKind::Property
                } else {
                    SymbolKind::Variable
                };
                self.push(statement, name, kind, parent);
            }
        }
    }
}
