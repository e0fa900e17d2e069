//! Integration tests for the compile pipeline
//!
//! Runs `compile` over the fixture module and inspects the generated Java sources.

use aapt_lite::config::Config;
use aapt_lite::{compile, AaptError, CompileRequest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn request(out: &Path) -> CompileRequest {
    let app = fixtures_path().join("app/res");
    CompileRequest {
        package_name: "com.app".to_string(),
        resource_files: vec![
            app.join("layout/row_item.xml"),
            app.join("layout/header.xml"),
            app.join("values/strings.xml"),
        ],
        class_infos: vec![fixtures_path().join("lib/lib-class-info.json")],
        r_txts: vec![fixtures_path().join("lib/R.txt")],
        non_transitive_r_class: false,
        r_class_output: out.join("r"),
        stubs_output: out.join("stubs"),
        target_name: "//app:app".to_string(),
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

// ============================================================================
// R and BR
// ============================================================================

#[test]
fn test_compile_summary() {
    let temp_dir = TempDir::new().unwrap();
    let summary = compile(&request(temp_dir.path()), &Config::default()).unwrap();

    assert_eq!(summary.layouts, 2);
    assert_eq!(summary.bindings, 2);
    assert_eq!(summary.stubs, 2);
    assert!(summary.r_symbols > 0);
}

#[test]
fn test_transitive_r_class() {
    let temp_dir = TempDir::new().unwrap();
    compile(&request(temp_dir.path()), &Config::default()).unwrap();

    let r_class = read(&temp_dir.path().join("r/com/app/R.java"));

    assert!(r_class.contains("package com.app;"));
    // Local symbols
    assert!(r_class.contains("public static int app_name = 0;"));
    assert!(r_class.contains("public static int row_item = 0;"));
    assert!(r_class.contains("public static int header_inc = 0;"));
    assert!(r_class.contains("public static int[] RowView = {};"));
    assert!(r_class.contains("public static int RowView_rowColor = 0;"));
    // Dependency symbols
    assert!(r_class.contains("public static int lib_primary = 0;"));
    assert!(r_class.contains("public static int[] LibView = {};"));
}

#[test]
fn test_non_transitive_r_class() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = request(temp_dir.path());
    request.non_transitive_r_class = true;

    compile(&request, &Config::default()).unwrap();
    let r_class = read(&temp_dir.path().join("r/com/app/R.java"));

    assert!(r_class.contains("app_name"));
    assert!(!r_class.contains("lib_primary"));
}

#[test]
fn test_br_class() {
    let temp_dir = TempDir::new().unwrap();
    compile(&request(temp_dir.path()), &Config::default()).unwrap();

    let br_class = read(&temp_dir.path().join("r/com/app/BR.java"));

    assert!(br_class.contains("public static int _all = 0;"));
    assert!(br_class.contains("public static int item = 1;"));
    assert!(br_class.contains("public static int selected = 2;"));
    assert!(br_class.contains("public static int tags = 3;"));
}

// ============================================================================
// Binding stubs
// ============================================================================

#[test]
fn test_row_item_stub() {
    let temp_dir = TempDir::new().unwrap();
    compile(&request(temp_dir.path()), &Config::default()).unwrap();

    let stub = read(&temp_dir.path().join("stubs/com/app/databinding/RowItemBinding.java"));

    assert!(stub.contains("package com.app.databinding;"));
    assert!(stub.contains("public abstract class RowItemBinding extends androidx.databinding.ViewDataBinding"));
    assert!(stub.contains("public final com.app.databinding.HeaderBinding headerInc;"));
    assert!(stub.contains("public final com.lib.databinding.LibFooterBinding footer;"));
    assert!(stub.contains("public final android.widget.TextView title;"));
    // Unresolved include falls back to the base class
    assert!(stub.contains("public final androidx.databinding.ViewDataBinding badge;"));
    assert!(stub.contains("protected java.util.List<String> mTags;"));
    assert!(stub.contains("public abstract void setSelected(boolean selected);"));
    assert!(stub.contains("public com.app.Item getItem() {"));
}

#[test]
fn test_header_stub() {
    let temp_dir = TempDir::new().unwrap();
    compile(&request(temp_dir.path()), &Config::default()).unwrap();

    let stub = read(&temp_dir.path().join("stubs/com/app/databinding/HeaderBinding.java"));

    assert!(stub.contains("public final android.widget.ImageView avatar;"));
    assert!(stub.contains("public final androidx.databinding.ViewStubProxy detailsStub;"));
}

#[test]
fn test_custom_binding_config() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.binding.package_suffix = "ui.bindings".to_string();
    config.binding.base_class = "com.app.BaseBinding".to_string();

    compile(&request(temp_dir.path()), &config).unwrap();

    let stub = read(&temp_dir.path().join("stubs/com/app/ui/bindings/RowItemBinding.java"));
    assert!(stub.contains("package com.app.ui.bindings;"));
    assert!(stub.contains("extends com.app.BaseBinding"));
    assert!(stub.contains("public final com.app.ui.bindings.HeaderBinding headerInc;"));
}

// ============================================================================
// Publishing
// ============================================================================

#[test]
fn test_outputs_are_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let stale = temp_dir.path().join("stubs/com/old/OldBinding.java");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "class OldBinding {}").unwrap();

    compile(&request(temp_dir.path()), &Config::default()).unwrap();

    assert!(!stale.exists());
    assert!(temp_dir
        .path()
        .join("stubs/com/app/databinding/HeaderBinding.java")
        .exists());
}

#[test]
fn test_failed_compile_leaves_outputs_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("r/com/app/R.java");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, "previous").unwrap();

    let mut request = request(temp_dir.path());
    request.r_txts.push(temp_dir.path().join("missing/R.txt"));

    let err = compile(&request, &Config::default()).unwrap_err();

    assert!(matches!(err, AaptError::Io { .. }));
    assert_eq!(read(&existing), "previous");
}

#[test]
fn test_unpublishable_stubs_leave_r_output_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("r/com/app/R.java");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, "previous").unwrap();
    // A plain file where the stubs output's parent directory should be
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let mut request = request(temp_dir.path());
    request.stubs_output = blocker.join("stubs");

    let err = compile(&request, &Config::default()).unwrap_err();

    assert!(matches!(err, AaptError::Io { .. }));
    assert_eq!(read(&existing), "previous");
}
