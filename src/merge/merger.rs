//! Source-set resource merging.
//!
//! Every file under a source set's `res/` and `assets/` roots is identified by its
//! path relative to that root. Source sets are applied in declared order, so the
//! last set declaring a path provides its content. Winners are decided up front;
//! copying happens afterwards in parallel into a staging directory that replaces
//! the output directory only once everything, including the merged manifest, has
//! been written.

use super::manifest::{merge_manifests, LastDeclaredManifest, ManifestMerger, MergeKind};
use super::source_set::SourceSet;
use crate::config::MergeConfig;
use crate::discovery::{resolve_root, FileFinder};
use crate::error::{AaptError, IoContext, Result};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

const RES: &str = "res";
const ASSETS: &str = "assets";

/// Winning source file for every merged relative path
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// `res/...` or `assets/...` → file providing it
    pub winners: BTreeMap<PathBuf, PathBuf>,
    /// Relative paths declared by more than one source set
    pub overridden: BTreeSet<PathBuf>,
}

impl MergePlan {
    fn offer(&mut self, relative: PathBuf, source: PathBuf) {
        if let Some(previous) = self.winners.insert(relative.clone(), source) {
            trace!("{} overrides {}", relative.display(), previous.display());
            self.overridden.insert(relative);
        }
    }
}

/// Outcome of a merge
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of files written to the output directory
    pub written: usize,
    pub overridden: Vec<PathBuf>,
}

/// Merges source sets into one resource tree and one manifest
pub struct ResourceMerger<'a> {
    config: &'a MergeConfig,
    manifest_merger: Box<dyn ManifestMerger + 'a>,
}

impl<'a> ResourceMerger<'a> {
    pub fn new(config: &'a MergeConfig) -> Self {
        Self {
            config,
            manifest_merger: Box::new(LastDeclaredManifest),
        }
    }

    /// Use a different manifest merging collaborator
    pub fn with_manifest_merger(mut self, merger: impl ManifestMerger + 'a) -> Self {
        self.manifest_merger = Box::new(merger);
        self
    }

    /// Merge `source_sets` into `output_dir` and, when asked, merge their manifests.
    ///
    /// `output_dir` is removed before merging starts and only reappears once the merge
    /// has fully succeeded. A merged manifest is staged alongside the resources and
    /// published after them, so it may live inside `output_dir`.
    pub fn merge(
        &self,
        is_binary: bool,
        source_sets: &[SourceSet],
        output_dir: Option<&Path>,
        merged_manifest: Option<&Path>,
    ) -> Result<MergeReport> {
        let kind = MergeKind::from_is_binary(is_binary);
        let Some(output_dir) = output_dir else {
            if let Some(manifest) = merged_manifest {
                merge_manifests(self.manifest_merger.as_ref(), kind, source_sets, manifest)?;
            }
            return Ok(MergeReport::default());
        };

        if output_dir.exists() {
            fs::remove_dir_all(output_dir).with_path(output_dir)?;
        }

        let plan = self.plan(source_sets)?;

        // Removed on drop, so a failed copy leaves nothing behind
        let staging = tempfile::Builder::new()
            .prefix(".aapt-lite-merge")
            .tempdir_in(staging_parent(output_dir)?)
            .with_path(output_dir)?;

        plan.winners
            .par_iter()
            .try_for_each(|(relative, source)| copy_file(source, &staging.path().join(relative)))?;

        let staged_manifest = match merged_manifest {
            Some(manifest) => self.stage_manifest(kind, source_sets, manifest, output_dir, staging.path())?,
            None => None,
        };

        fs::rename(staging.path(), output_dir).with_path(output_dir)?;
        if let Some(staged) = staged_manifest {
            fs::rename(&staged.file, &staged.destination).with_path(&staged.destination)?;
        }

        info!(
            "Merged {} files from {} source sets into {}",
            plan.winners.len(),
            source_sets.len(),
            output_dir.display()
        );

        Ok(MergeReport {
            written: plan.winners.len(),
            overridden: plan.overridden.into_iter().collect(),
        })
    }

    /// Decide which file wins every relative path.
    ///
    /// A declared resource or asset directory that does not exist is an error.
    pub fn plan(&self, source_sets: &[SourceSet]) -> Result<MergePlan> {
        let finder = FileFinder::new(self.config);
        let mut plan = MergePlan::default();

        for source_set in source_sets {
            for (dirs, root_name) in [(&source_set.resource_dirs, RES), (&source_set.asset_dirs, ASSETS)] {
                for dir in dirs {
                    let root = resolve_root(dir, root_name);
                    if !root.is_dir() {
                        return Err(AaptError::io(
                            &root,
                            io::Error::new(io::ErrorKind::NotFound, "declared source directory does not exist"),
                        ));
                    }
                    for file in finder.find_files(&root)? {
                        plan.offer(Path::new(root_name).join(&file.relative), file.path);
                    }
                }
            }
        }

        debug!(
            "Merge plan: {} files, {} overridden",
            plan.winners.len(),
            plan.overridden.len()
        );
        Ok(plan)
    }

    /// Merge manifests into the resource staging directory when the manifest lives
    /// below `output_dir`, otherwise into a staging directory next to it
    fn stage_manifest(
        &self,
        kind: MergeKind,
        source_sets: &[SourceSet],
        manifest: &Path,
        output_dir: &Path,
        staging: &Path,
    ) -> Result<Option<StagedManifest>> {
        if let Ok(relative) = manifest.strip_prefix(output_dir) {
            merge_manifests(self.manifest_merger.as_ref(), kind, source_sets, &staging.join(relative))?;
            return Ok(None);
        }

        let dir = tempfile::Builder::new()
            .prefix(".aapt-lite-manifest")
            .tempdir_in(staging_parent(manifest)?)
            .with_path(manifest)?;
        let file_name = manifest.file_name().unwrap_or_else(|| OsStr::new("AndroidManifest.xml"));
        let staged = StagedManifest {
            file: dir.path().join(file_name),
            _dir: dir,
            destination: manifest.to_path_buf(),
        };
        merge_manifests(self.manifest_merger.as_ref(), kind, source_sets, &staged.file)?;
        Ok(Some(staged))
    }
}

/// Merged manifest waiting to be moved next to a freshly merged output
struct StagedManifest {
    file: PathBuf,
    _dir: tempfile::TempDir,
    destination: PathBuf,
}

/// Existing parent directory to stage `path` in
fn staging_parent(path: &Path) -> Result<&Path> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_path(parent)?;
    Ok(parent)
}

/// Copy a file, creating the destination's parent directories
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::copy(source, destination).with_path(source)?;
    Ok(())
}
