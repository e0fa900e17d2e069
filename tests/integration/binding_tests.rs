//! Integration tests for data-binding layout parsing
//!
//! These tests run the parser against the layouts in `tests/fixtures/app` with
//! local and dependency layout type stores wired up the way `compile` does it.

use aapt_lite::binding::{
    resolve, split_type_parameters, Binding, BindingType, ClassName, ImportedTypes,
    LayoutBindingsParser, LayoutTypeScopes, LayoutTypeStore, PrimitiveKind, TypeName,
};
use aapt_lite::symbols::load_dependency_layouts;
use aapt_lite::AaptError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn app_layouts() -> Vec<PathBuf> {
    let layout_dir = fixtures_path().join("app/res/layout");
    vec![layout_dir.join("row_item.xml"), layout_dir.join("header.xml")]
}

fn fixture_parser() -> LayoutBindingsParser {
    let local = LayoutTypeStore::from_local_layouts("com.app", "databinding", &app_layouts());
    let deps = load_dependency_layouts(&[fixtures_path().join("lib/lib-class-info.json")])
        .expect("Failed to load class info");
    LayoutBindingsParser::new(LayoutTypeScopes::local_first(local, deps))
}

fn write_layout(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join("res/layout").join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn view<'a>(bindings: &'a [Binding], name: &str) -> &'a Binding {
    bindings
        .iter()
        .find(|b| b.raw_name == name)
        .unwrap_or_else(|| panic!("No binding named {name}"))
}

// ============================================================================
// Fixture layouts
// ============================================================================

#[test]
fn test_parse_fixture_layouts() {
    let parsed = fixture_parser()
        .parse("com.app", &app_layouts())
        .expect("Failed to parse layouts");

    let names: Vec<_> = parsed.iter().map(|d| d.binding_class_name.as_str()).collect();
    assert_eq!(names, vec!["RowItemBinding", "HeaderBinding"]);
}

#[test]
fn test_row_item_variables() {
    let parsed = fixture_parser().parse("com.app", &app_layouts()).unwrap();
    let row_item = &parsed[0];

    assert_eq!(
        row_item.variable_bindings,
        vec![
            Binding::new("item", TypeName::class("com.app.Item"), BindingType::Variable),
            Binding::new(
                "tags",
                TypeName::Parameterized(
                    ClassName::best_guess("java.util.List"),
                    vec![TypeName::class("String")]
                ),
                BindingType::Variable
            ),
            Binding::new(
                "selected",
                TypeName::Primitive(PrimitiveKind::Boolean),
                BindingType::Variable
            ),
        ]
    );
}

#[test]
fn test_row_item_includes_resolve_by_scope() {
    let parsed = fixture_parser().parse("com.app", &app_layouts()).unwrap();
    let views = &parsed[0].view_bindings;

    // Local module layout
    let header = view(views, "header_inc");
    assert_eq!(header.type_name, TypeName::class("com.app.databinding.HeaderBinding"));
    assert_eq!(
        header.binding_type,
        BindingType::IncludedLayout {
            layout_name: "header".to_string(),
            layout_missing: false,
        }
    );

    // Dependency layout from the class info
    let footer = view(views, "footer");
    assert_eq!(footer.type_name, TypeName::class("com.lib.databinding.LibFooterBinding"));
    assert_eq!(
        footer.binding_type,
        BindingType::IncludedLayout {
            layout_name: "lib_footer".to_string(),
            layout_missing: false,
        }
    );

    // Known nowhere: guessed in the module's binding package
    let badge = view(views, "badge");
    assert_eq!(
        badge.type_name,
        TypeName::class("com.app.databinding.MissingBadgeBinding")
    );
    assert_eq!(
        badge.binding_type,
        BindingType::IncludedLayout {
            layout_name: "missing_badge".to_string(),
            layout_missing: true,
        }
    );
}

#[test]
fn test_header_views() {
    let parsed = fixture_parser().parse("com.app", &app_layouts()).unwrap();
    let header = &parsed[1];

    assert_eq!(
        header.view_bindings,
        vec![
            Binding::new("avatar", TypeName::class("android.widget.ImageView"), BindingType::View),
            Binding::new(
                "details_stub",
                TypeName::class("androidx.databinding.ViewStubProxy"),
                BindingType::View
            ),
        ]
    );
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn test_row_item_minimal() {
    let temp_dir = TempDir::new().unwrap();
    let layout = write_layout(
        temp_dir.path(),
        "row_item.xml",
        r#"<layout xmlns:android="http://schemas.android.com/apk/res/android">
    <data>
        <variable name="item" type="com.app.Item"/>
    </data>
    <TextView android:id="@+id/title"/>
</layout>"#,
    );

    let parser = LayoutBindingsParser::new(LayoutTypeScopes::new());
    let parsed = parser.parse("com.app", &[layout]).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(
        parsed[0].variable_bindings,
        vec![Binding::new("item", TypeName::class("com.app.Item"), BindingType::Variable)]
    );
    assert_eq!(
        parsed[0].view_bindings,
        vec![Binding::new("title", TypeName::class("android.widget.TextView"), BindingType::View)]
    );
}

#[test]
fn test_include_found_in_local_store() {
    let temp_dir = TempDir::new().unwrap();
    let layout = write_layout(
        temp_dir.path(),
        "screen.xml",
        r#"<layout xmlns:android="http://schemas.android.com/apk/res/android">
    <include layout="@layout/header" android:id="@+id/header_inc"/>
</layout>"#,
    );

    let local: LayoutTypeStore = [(
        "header".to_string(),
        TypeName::class("com.app.databinding.HeaderBinding"),
    )]
    .into_iter()
    .collect();
    let parser = LayoutBindingsParser::new(LayoutTypeScopes::local_first(local, LayoutTypeStore::new()));

    let parsed = parser.parse("com.app", &[layout]).unwrap();
    let include = &parsed[0].view_bindings[0];

    assert_eq!(include.raw_name, "header_inc");
    assert_eq!(include.type_name, TypeName::class("com.app.databinding.HeaderBinding"));
    assert_eq!(
        include.binding_type,
        BindingType::IncludedLayout {
            layout_name: "header".to_string(),
            layout_missing: false,
        }
    );
}

#[test]
fn test_duplicate_binding_names_keep_first() {
    let temp_dir = TempDir::new().unwrap();
    let portrait = write_layout(
        temp_dir.path(),
        "row_item.xml",
        r#"<layout><TextView android:id="@+id/portrait"/></layout>"#,
    );
    let landscape_dir = temp_dir.path().join("res/layout-land");
    fs::create_dir_all(&landscape_dir).unwrap();
    let landscape = landscape_dir.join("row_item.xml");
    fs::write(&landscape, r#"<layout><TextView android:id="@+id/landscape"/></layout>"#).unwrap();

    let parser = LayoutBindingsParser::new(LayoutTypeScopes::new());
    let parsed = parser.parse("com.app", &[portrait.clone(), landscape]).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].source_file, portrait);
    assert_eq!(parsed[0].view_bindings[0].raw_name, "portrait");
}

#[test]
fn test_later_import_wins() {
    let temp_dir = TempDir::new().unwrap();
    let layout = write_layout(
        temp_dir.path(),
        "imports.xml",
        r#"<layout>
    <data>
        <import type="com.first.Model"/>
        <variable name="before" type="Model"/>
        <import type="com.second.Model"/>
        <variable name="after" type="Model"/>
    </data>
</layout>"#,
    );

    let parser = LayoutBindingsParser::new(LayoutTypeScopes::new());
    let parsed = parser.parse("com.app", &[layout]).unwrap();
    let variables = &parsed[0].variable_bindings;

    assert_eq!(variables[0].type_name, TypeName::class("com.first.Model"));
    assert_eq!(variables[1].type_name, TypeName::class("com.second.Model"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_variable_without_type_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let layout = write_layout(
        temp_dir.path(),
        "broken.xml",
        r#"<layout><data><variable name="item"/></data></layout>"#,
    );

    let parser = LayoutBindingsParser::new(LayoutTypeScopes::new());
    let err = parser.parse("com.app", &[layout.clone()]).unwrap_err();

    match err {
        AaptError::MissingAttribute {
            attribute,
            tag,
            package,
            file,
        } => {
            assert_eq!(attribute, "type");
            assert_eq!(tag, "variable");
            assert_eq!(package, "com.app");
            assert_eq!(file, layout);
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[test]
fn test_unreadable_layout_is_fatal() {
    let parser = LayoutBindingsParser::new(LayoutTypeScopes::new());
    let err = parser
        .parse("com.app", &[PathBuf::from("does/not/exist/layout/gone.xml")])
        .unwrap_err();

    assert!(matches!(err, AaptError::Io { .. }));
}

// ============================================================================
// Type resolution
// ============================================================================

#[test]
fn test_resolve_nested_generic_array() {
    let mut imports = ImportedTypes::new();
    imports.import("java.util.Map", None);
    imports.import("java.util.List", None);
    imports.import("java.lang.String", None);

    let resolved = resolve("Map<String, List<Foo>>[]", &imports);

    assert_eq!(
        resolved,
        TypeName::array_of(TypeName::Parameterized(
            ClassName::best_guess("java.util.Map"),
            vec![
                TypeName::class("java.lang.String"),
                TypeName::Parameterized(
                    ClassName::best_guess("java.util.List"),
                    vec![TypeName::class("Foo")]
                ),
            ]
        ))
    );
    assert_eq!(
        resolved.to_string(),
        "java.util.Map<java.lang.String, java.util.List<Foo>>[]"
    );
}

#[test]
fn test_split_respects_depth() {
    assert_eq!(
        split_type_parameters("String,List<Foo>"),
        vec!["String".to_string(), "List<Foo>".to_string()]
    );
    assert_eq!(
        split_type_parameters("Map<K, V>, Pair<A, Map<B, C>>"),
        vec!["Map<K,V>".to_string(), "Pair<A,Map<B,C>>".to_string()]
    );
}
