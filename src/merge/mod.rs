mod manifest;
mod merger;
mod outputs;
mod source_set;

pub use manifest::{merge_manifests, LastDeclaredManifest, ManifestMerger, MergeKind};
pub use merger::{copy_file, MergePlan, MergeReport, ResourceMerger};
pub use outputs::DeclaredOutputs;
pub use source_set::{SourceSet, SOURCE_SET_FORMAT};
