//! Error type shared by the merger, the layout parser and the generators.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::merge::SOURCE_SET_FORMAT;

/// Errors raised while merging resources or compiling bindings.
///
/// Soft degradations (unknown short type names, `<include>` targets missing from
/// every symbol scope) are not errors and never show up here.
#[derive(Error, Debug, Diagnostic)]
pub enum AaptError {
    #[error("Invalid source set `{descriptor}`, should be {}", SOURCE_SET_FORMAT)]
    #[diagnostic(
        code(aapt_lite::source_set),
        help("each source set needs exactly three `:` separated segments, any of which may be empty")
    )]
    InvalidSourceSet { descriptor: String },

    #[error("Missing `{attribute}` on <{tag}> in {package}:{}", .file.display())]
    #[diagnostic(code(aapt_lite::layout::missing_attribute))]
    MissingAttribute {
        attribute: &'static str,
        tag: String,
        package: String,
        file: PathBuf,
    },

    #[error("Could not parse {}: {source}", .file.display())]
    #[diagnostic(code(aapt_lite::xml))]
    Xml {
        file: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Missing manifest declaration, check if at least one manifest is declared in any source set")]
    #[diagnostic(code(aapt_lite::merge::manifest))]
    MissingManifest,

    #[error("Manifest merging failed: {message}")]
    #[diagnostic(code(aapt_lite::merge::manifest))]
    ManifestMerge { message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    #[diagnostic(code(aapt_lite::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid R.txt entry at {}:{line}: `{content}`", .path.display())]
    #[diagnostic(code(aapt_lite::symbols::r_txt))]
    InvalidRTxt {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Could not read class info {}: {source}", .path.display())]
    #[diagnostic(code(aapt_lite::symbols::class_info))]
    ClassInfo {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AaptError>;

impl AaptError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AaptError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn xml(file: impl AsRef<Path>, source: quick_xml::Error) -> Self {
        AaptError::Xml {
            file: file.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Attach the offending path to an I/O result.
pub(crate) trait IoContext<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| AaptError::io(path, e))
    }
}
