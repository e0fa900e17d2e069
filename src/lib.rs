//! aapt-lite - Android resource merging and data-binding stub generation
//!
//! A lightweight stand-in for the parts of the Android resource toolchain that
//! builds need before any Java/Kotlin compiles.
//!
//! # Architecture
//!
//! Two independent pipelines:
//! 1. **Merge** - Overlay resource/asset source sets, last declared wins per file,
//!    and merge the manifests
//! 2. **Compile** - Parse data-binding layouts, resolve variable and include types,
//!    collect `R` symbols, and generate `R`, `BR` and binding stub classes

pub mod binding;
pub mod compile;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generate;
pub mod merge;
pub mod symbols;

pub use binding::{Binding, BindingType, LayoutBindingData, LayoutBindingsParser, TypeName};
pub use compile::{compile, CompileRequest, CompileSummary};
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{AaptError, Result};
pub use merge::{DeclaredOutputs, MergeReport, ResourceMerger, SourceSet};
pub use symbols::{SymbolTable, SymbolValue};
