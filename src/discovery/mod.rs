mod file_finder;

pub use file_finder::{resolve_root, FileFinder, FolderType, ResourceFile};
