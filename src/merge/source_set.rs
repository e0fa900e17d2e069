use crate::error::{AaptError, Result};
use std::path::{Path, PathBuf};

/// Command-line spelling of a source set
pub const SOURCE_SET_FORMAT: &str = "resources:assets:manifest";

/// Resource dirs, asset dirs and manifest of one build input unit.
///
/// Order between source sets matters: later sets override earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub resource_dirs: Vec<PathBuf>,
    pub asset_dirs: Vec<PathBuf>,
    /// Only set when the declared manifest exists on disk
    pub manifest: Option<PathBuf>,
}

impl SourceSet {
    /// Decode a `resources:assets:manifest` descriptor relative to `target`
    pub fn from_descriptor(target: &Path, descriptor: &str) -> Result<Self> {
        let chunks: Vec<&str> = descriptor.split(':').collect();
        let [res, assets, manifest] = *chunks.as_slice() else {
            return Err(AaptError::InvalidSourceSet {
                descriptor: descriptor.to_string(),
            });
        };

        let to_paths = |segment: &str| -> Vec<PathBuf> {
            if segment.trim().is_empty() {
                Vec::new()
            } else {
                vec![target.join(segment)]
            }
        };

        let manifest = if manifest.trim().is_empty() {
            None
        } else {
            Some(target.join(manifest)).filter(|path| path.exists())
        };

        Ok(Self {
            resource_dirs: to_paths(res),
            asset_dirs: to_paths(assets),
            manifest,
        })
    }

    /// Decode a list of descriptors, keeping their order
    pub fn parse_all<S: AsRef<str>>(target: &Path, descriptors: &[S]) -> Result<Vec<Self>> {
        descriptors
            .iter()
            .map(|descriptor| Self::from_descriptor(target, descriptor.as_ref()))
            .collect()
    }
}
