use crate::binding::{LayoutTypeStore, TypeName};
use crate::error::{AaptError, IoContext, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Class-info document written by the data-binding compiler of a dependency
#[derive(Debug, Deserialize)]
struct ClassInfoDocument {
    #[serde(default)]
    mappings: BTreeMap<String, LayoutClassInfo>,
}

#[derive(Debug, Deserialize)]
struct LayoutClassInfo {
    qualified_name: String,
    #[serde(default)]
    module_package: Option<String>,
}

/// Build the dependency layout type store from class-info documents.
///
/// Each path is either a JSON document or a directory that is scanned for
/// `*.json` / `*.bin` documents. When several dependencies declare the same layout,
/// the first one listed wins.
pub fn load_dependency_layouts<P: AsRef<Path>>(paths: &[P]) -> Result<LayoutTypeStore> {
    let mut store = LayoutTypeStore::new();

    for path in paths {
        for document in class_info_documents(path.as_ref())? {
            let contents = fs::read_to_string(&document).with_path(&document)?;
            let parsed: ClassInfoDocument =
                serde_json::from_str(&contents).map_err(|source| AaptError::ClassInfo {
                    path: document.clone(),
                    source,
                })?;

            for (layout, info) in parsed.mappings {
                if store.get(&layout).is_some() {
                    debug!("Layout `{}` already provided, skipping {}", layout, document.display());
                    continue;
                }
                debug!(
                    "Dependency layout `{}` -> {} ({})",
                    layout,
                    info.qualified_name,
                    info.module_package.as_deref().unwrap_or("?")
                );
                store.insert(layout, TypeName::class(info.qualified_name));
            }
        }
    }

    Ok(store)
}

fn class_info_documents(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
            AaptError::io(path, source)
        })?;
        let is_document = entry
            .path()
            .extension()
            .map(|e| e == "json" || e == "bin")
            .unwrap_or(false);
        if entry.file_type().is_file() && is_document {
            documents.push(entry.into_path());
        }
    }
    Ok(documents)
}
