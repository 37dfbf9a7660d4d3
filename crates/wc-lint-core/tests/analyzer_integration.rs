//! Integration test: file discovery and rule execution via Analyzer.
//!
//! Builds small projects in temporary directories and checks that the
//! analyzer finds the right files and routes every component class to
//! the rules.

use std::fs;
use std::path::Path;
use tree_sitter::Node;
use wc_lint_core::{
    walk, Analyzer, Config, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor,
};

/// Reports every component class.
struct ComponentProbe;

struct ProbeVisitor<'a> {
    ctx: &'a FileContext<'a>,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ProbeVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let Some(class) = scope.current_class() else {
            return;
        };
        if class.node.id() == node.id() && class.is_component {
            self.violations.push(Violation::new(
                "P001",
                "component-probe",
                Severity::Warning,
                self.ctx.location(node),
                format!("component {}", class.name.as_deref().unwrap_or("<anonymous>")),
            ));
        }
    }
}

impl Rule for ComponentProbe {
    fn name(&self) -> &'static str {
        "component-probe"
    }

    fn code(&self) -> &'static str {
        "P001"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ProbeVisitor {
            ctx,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, content).expect("write file");
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}:{} {}", v.location.file.display(), v.location.line, v.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "src/my-button.js", "export class MyButton extends HTMLElement {}\n");
    write(
        root,
        "src/card.ts",
        "class Helper {}\n\n@customElement('x-card')\nexport class Card extends Base {}\n",
    );
    write(
        root,
        "src/list.tsx",
        "/** @customElement x-list */\nclass List extends Base {\n  render() { return <ul />; }\n}\n",
    );
    write(root, "src/readme.md", "class NotCode extends HTMLElement {}\n");
    write(
        root,
        "node_modules/lib/index.js",
        "class Vendored extends HTMLElement {}\n",
    );
    write(root, "dist/bundle.js", "class Built extends HTMLElement {}\n");
    dir
}

#[test]
fn discovers_scripts_and_skips_default_excludes() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(ComponentProbe)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.files_checked, 3);
    insta::assert_snapshot!(render(&result.violations), @r"
    src/card.ts:4 component Card
    src/list.tsx:2 component List
    src/my-button.js:1 component MyButton
    ");
}

#[test]
fn include_patterns_narrow_the_file_set() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .include("src/*.ts")
        .rule(ComponentProbe)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations[0].message, "component Card");
}

#[test]
fn gitignored_files_are_skipped() {
    let dir = project();
    write(dir.path(), ".gitignore", "src/card.ts\n");
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(ComponentProbe)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.files_checked, 2);
    assert!(result.violations.iter().all(|v| v.message != "component Card"));
}

#[test]
fn configured_base_classes_and_severity() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "el.js",
        "class A extends LitElement {}\nclass B extends Other {}\n",
    );
    let config = Config::parse(
        "[settings]\nelement_base_classes = [\"LitElement\"]\n\n[rules.component-probe]\nseverity = \"error\"\n",
    )
    .expect("config should parse");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .config(config)
        .rule(ComponentProbe)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].message, "component A");
    assert!(result.has_errors());
}

#[test]
fn single_file_root() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path().join("src/my-button.js"))
        .rule(ComponentProbe)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.files_checked, 1);
    assert_eq!(
        result.violations[0].location.file,
        Path::new("my-button.js")
    );
}
