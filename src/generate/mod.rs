//! Java source generation for `R`, `BR` and data-binding stub classes.
//!
//! Generators write into a directory tree laid out by package; [`stage`] copies a
//! finished tree next to the location the build asked for and
//! [`StagedTree::commit`] swaps it into place.

mod binding_class;
mod br_class;
mod r_class;

pub use binding_class::BindingClassGenerator;
pub use br_class::BrClassGenerator;
pub use r_class::RClassGenerator;

use crate::config::MergeConfig;
use crate::discovery::FileFinder;
use crate::error::{IoContext, Result};
use crate::merge::copy_file;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

const HEADER: &str = "/* AUTO-GENERATED FILE. DO NOT MODIFY. */\n";

/// Directory of `package` below a source root
pub fn package_dir(root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}

pub(crate) fn write_source(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, contents).with_path(path)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Replace `destination` with a copy of the generated tree at `source`.
///
/// Returns the number of files published.
pub fn publish(source: &Path, destination: &Path) -> Result<usize> {
    stage(source, destination)?.commit()
}

/// Copy the generated tree at `source` into a staging directory next to
/// `destination`, leaving `destination` itself untouched until [`StagedTree::commit`].
pub fn stage(source: &Path, destination: &Path) -> Result<StagedTree> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_path(parent)?;

    let dir = tempfile::Builder::new()
        .prefix(".aapt-lite-publish")
        .tempdir_in(parent)
        .with_path(parent)?;

    let no_ignores = MergeConfig {
        ignore_patterns: Vec::new(),
    };
    let files = FileFinder::new(&no_ignores).find_files(source)?;
    for file in &files {
        copy_file(&file.path, &dir.path().join(&file.relative))?;
    }

    Ok(StagedTree {
        dir,
        destination: destination.to_path_buf(),
        files: files.len(),
    })
}

/// A generated tree copied next to its destination, not yet in place
#[derive(Debug)]
pub struct StagedTree {
    dir: TempDir,
    destination: PathBuf,
    files: usize,
}

impl StagedTree {
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Swap the staged tree into place, returning the number of files published
    pub fn commit(self) -> Result<usize> {
        if self.destination.exists() {
            fs::remove_dir_all(&self.destination).with_path(&self.destination)?;
        }
        fs::rename(self.dir.path(), &self.destination).with_path(&self.destination)?;
        Ok(self.files)
    }
}
