use crate::config::MergeConfig;
use crate::error::{AaptError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Kind of a `res/` sub-folder, with configuration qualifiers stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderType {
    Values,
    Layout,
    Drawable,
    Mipmap,
    Menu,
    Xml,
    Raw,
    Anim,
    Animator,
    Color,
    Font,
    Navigation,
    Transition,
    Interpolator,
}

impl FolderType {
    /// Classify a folder name such as `values-night-v21` or `layout-land`
    pub fn from_dir_name(name: &str) -> Option<Self> {
        let base = name.split('-').next()?;
        match base {
            "values" => Some(FolderType::Values),
            "layout" => Some(FolderType::Layout),
            "drawable" => Some(FolderType::Drawable),
            "mipmap" => Some(FolderType::Mipmap),
            "menu" => Some(FolderType::Menu),
            "xml" => Some(FolderType::Xml),
            "raw" => Some(FolderType::Raw),
            "anim" => Some(FolderType::Anim),
            "animator" => Some(FolderType::Animator),
            "color" => Some(FolderType::Color),
            "font" => Some(FolderType::Font),
            "navigation" => Some(FolderType::Navigation),
            "transition" => Some(FolderType::Transition),
            "interpolator" => Some(FolderType::Interpolator),
            _ => None,
        }
    }

    /// Classify a resource file by the folder it sits in
    pub fn from_path(path: &Path) -> Option<Self> {
        let dir = path.parent()?.file_name()?.to_str()?;
        Self::from_dir_name(dir)
    }

    /// Name of the `R` nested class file resources of this folder land in
    pub fn resource_type(&self) -> &'static str {
        match self {
            FolderType::Values => "values",
            FolderType::Layout => "layout",
            FolderType::Drawable => "drawable",
            FolderType::Mipmap => "mipmap",
            FolderType::Menu => "menu",
            FolderType::Xml => "xml",
            FolderType::Raw => "raw",
            FolderType::Anim => "anim",
            FolderType::Animator => "animator",
            FolderType::Color => "color",
            FolderType::Font => "font",
            FolderType::Navigation => "navigation",
            FolderType::Transition => "transition",
            FolderType::Interpolator => "interpolator",
        }
    }

    /// Folders whose XML files may declare `@+id/` symbols
    pub fn may_declare_ids(&self) -> bool {
        matches!(
            self,
            FolderType::Layout | FolderType::Menu | FolderType::Xml | FolderType::Navigation
                | FolderType::Drawable | FolderType::Transition
        )
    }
}

/// A file found under a resource or asset root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Path on disk
    pub path: PathBuf,

    /// Path relative to the root it was found under
    pub relative: PathBuf,
}

/// Walks resource and asset roots, skipping ignored entries
pub struct FileFinder<'a> {
    config: &'a MergeConfig,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a MergeConfig) -> Self {
        Self { config }
    }

    /// Find every file under `root`, sorted by relative path.
    ///
    /// A missing root yields no files.
    pub fn find_files(&self, root: &Path) -> Result<Vec<ResourceFile>> {
        if !root.exists() {
            trace!("Directory does not exist: {}", root.display());
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                // Never filter the root itself
                entry.depth() == 0 || !self.config.should_ignore(&entry.file_name().to_string_lossy())
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(source) => AaptError::io(path, source),
                    None => AaptError::io(
                        path,
                        std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
                    ),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            trace!("Found {}", relative.display());
            files.push(ResourceFile { path, relative });
        }

        debug!("Found {} files in {}", files.len(), root.display());
        Ok(files)
    }
}

/// Resolve the directory that acts as the `res/` (or `assets/`) root for a
/// declared source directory.
///
/// A directory already named `root_name` is used as is; otherwise a `root_name`
/// child is preferred when it exists.
pub fn resolve_root(dir: &Path, root_name: &str) -> PathBuf {
    let named = dir.file_name().map(|n| n == root_name).unwrap_or(false);
    let child = dir.join(root_name);
    if !named && child.is_dir() {
        child
    } else {
        dir.to_path_buf()
    }
}
