use super::source_set::SourceSet;
use crate::error::{AaptError, IoContext, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Whether manifests are merged for an application or a library target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    Application,
    Library,
}

impl MergeKind {
    pub fn from_is_binary(is_binary: bool) -> Self {
        if is_binary {
            MergeKind::Application
        } else {
            MergeKind::Library
        }
    }
}

/// Content-level manifest merging.
///
/// `main` is the manifest of the last declared source set that has one;
/// `overlays` are the remaining manifests, most recently declared first.
pub trait ManifestMerger {
    fn merge(&self, kind: MergeKind, main: &Path, overlays: &[PathBuf], output: &Path) -> Result<()>;
}

/// Writes the winning manifest unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct LastDeclaredManifest;

impl ManifestMerger for LastDeclaredManifest {
    fn merge(&self, kind: MergeKind, main: &Path, overlays: &[PathBuf], output: &Path) -> Result<()> {
        if !overlays.is_empty() {
            debug!(
                "{:?} merge: {} overridden manifests, using {}",
                kind,
                overlays.len(),
                main.display()
            );
        }
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).with_path(parent)?;
        }
        fs::copy(main, output).with_path(main)?;
        Ok(())
    }
}

/// Pick the main manifest and overlays from the source sets and hand them to `merger`
pub fn merge_manifests(
    merger: &dyn ManifestMerger,
    kind: MergeKind,
    source_sets: &[SourceSet],
    output: &Path,
) -> Result<()> {
    let mut manifests: Vec<PathBuf> = source_sets
        .iter()
        .filter_map(|source_set| source_set.manifest.clone())
        .collect();
    manifests.reverse();

    if manifests.is_empty() {
        return Err(AaptError::MissingManifest);
    }
    let main = manifests.remove(0);

    merger.merge(kind, &main, &manifests, output)?;
    info!("Merged manifest written to {}", output.display());
    Ok(())
}
