use crate::error::{IoContext, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

const EMPTY_RESOURCES: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources/>\n";

/// The output files a build system declared for a merge.
///
/// Build systems insist every declared output exists after the action ran, while the
/// set of merged files depends on the inputs. Missing files get placeholders.
#[derive(Debug, Clone)]
pub struct DeclaredOutputs {
    paths: Vec<PathBuf>,
}

impl DeclaredOutputs {
    pub fn new<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Directory the merge writes to: the common ancestor of every declared
    /// output, cut before its `res` (or `assets`) segment
    pub fn output_dir(&self) -> Option<PathBuf> {
        let common = common_path(&self.paths)?;

        let components: Vec<Component<'_>> = common.components().collect();
        let cut = components
            .iter()
            .position(|c| matches!(c, Component::Normal(name) if *name == "res" || *name == "assets"));

        match cut {
            Some(index) => Some(components[..index].iter().collect()),
            // A single declared file: merge next to it
            None if self.paths.iter().any(|p| *p == common) => {
                common.parent().map(Path::to_path_buf)
            }
            None => Some(common),
        }
    }

    /// Create placeholders for declared outputs the merge did not produce.
    ///
    /// Returns the paths that were filled in.
    pub fn fill_missing(&self) -> Result<Vec<PathBuf>> {
        let mut filled = Vec::new();
        for path in &self.paths {
            if path.exists() {
                continue;
            }

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_path(parent)?;
            }

            let is_xml = path.extension().map(|e| e == "xml").unwrap_or(false);
            let contents = if is_xml { EMPTY_RESOURCES } else { "" };
            fs::write(path, contents).with_path(path)?;

            warn!("Declared output {} was not produced, wrote a placeholder", path.display());
            filled.push(path.clone());
        }
        Ok(filled)
    }
}

/// Longest shared leading component sequence of `paths`
fn common_path(paths: &[PathBuf]) -> Option<PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut common: Vec<Component<'_>> = first.components().collect();

    for path in rest {
        let shared = common
            .iter()
            .zip(path.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }

    Some(common.iter().collect())
}
