use repo_brain_symbols::{Language, SymbolExtractor, SymbolKind, SymbolTable};

fn extract(code: &str, language: Language, path: &str) -> Vec<repo_brain_symbols::Symbol> {
    let mut extractor = SymbolExtractor::new(language).expect("grammar available");
    extractor.extract(code, path).expect("extraction failed")
}

#[test]
fn extracts_methods_inside_module_impl() {
    let code = r"
mod api {
    pub struct Car;

    impl Car {
        pub fn drive(&self) {}
        fn stop(&self) {}
    }
}
";

    let symbols = extract(code, Language::Rust, "nested.rs");
    let methods: Vec<_> = symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::Method)
        .map(|s| s.qualified_name())
        .collect();

    assert!(
        methods.contains(&"Car.drive".to_string()) && methods.contains(&"Car.stop".to_string()),
        "expected method symbols inside module impl, got: {methods:?}"
    );
    let car = symbols.iter().find(|s| s.name == "Car").expect("Car struct");
    assert_eq!(car.parent.as_deref(), Some("api"));
}

#[test]
fn typescript_namespace_members_are_scoped() {
    let code = "namespace Billing {\n  export function charge() {}\n}\n";
    let symbols = extract(code, Language::TypeScript, "billing.ts");

    let charge = symbols
        .iter()
        .find(|s| s.name == "charge")
        .unwrap_or_else(|| panic!("charge missing: {symbols:?}"));
    assert_eq!(charge.parent.as_deref(), Some("Billing"));
    assert_eq!(charge.line, 2);
}

#[test]
fn tsx_components_are_found_through_the_table() {
    let code = r#"
export const Button = (props: { label: string }) => <button>{props.label}</button>;

export function App() {
  return <Button label="hi" />;
}
"#;
    let mut table = SymbolTable::new();
    table.replace_file("src/App.tsx", extract(code, Language::Tsx, "src/App.tsx"));

    let button = table.find("Button").expect("Button component");
    assert_eq!(button.kind, SymbolKind::Function);
    assert_eq!(button.location(), "src/App.tsx:2");
    assert_eq!(table.find("App").map(|s| s.kind), Some(SymbolKind::Function));
}
