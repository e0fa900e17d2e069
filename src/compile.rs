//! The `compile` pipeline: layouts and symbols in, `R`/`BR` and binding stubs out.

use crate::binding::{LayoutBindingsParser, LayoutTypeScopes, LayoutTypeStore};
use crate::config::Config;
use crate::error::{IoContext, Result};
use crate::generate::{stage, BindingClassGenerator, BrClassGenerator, RClassGenerator};
use crate::symbols::{load_dependency_layouts, parse_r_txt, ResourceSymbolCollector};
use std::path::PathBuf;
use tracing::{debug, info};

/// Inputs of one compile run
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    pub package_name: String,
    /// Every resource file of the module; layouts are picked out of these
    pub resource_files: Vec<PathBuf>,
    /// Dependency class-info documents or directories holding them
    pub class_infos: Vec<PathBuf>,
    /// Dependency `R.txt` files
    pub r_txts: Vec<PathBuf>,
    pub non_transitive_r_class: bool,
    /// Directory receiving `R.java` and `BR.java`
    pub r_class_output: PathBuf,
    /// Directory receiving the binding stubs
    pub stubs_output: PathBuf,
    /// Build target name, used to label the working directory
    pub target_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub layouts: usize,
    pub bindings: usize,
    pub r_symbols: usize,
    pub stubs: usize,
}

/// Layout files among a module's resource files
pub fn layout_files(resource_files: &[PathBuf]) -> Vec<PathBuf> {
    resource_files
        .iter()
        .filter(|path| {
            let path = path.to_string_lossy().replace('\\', "/");
            path.contains("/layout") && path.ends_with(".xml")
        })
        .cloned()
        .collect()
}

pub fn compile(request: &CompileRequest, config: &Config) -> Result<CompileSummary> {
    let package = request.package_name.as_str();
    let binding_config = &config.binding;

    let layouts = layout_files(&request.resource_files);
    info!("Found {} layout files", layouts.len());

    let local = LayoutTypeStore::from_local_layouts(package, &binding_config.package_suffix, &layouts);
    let deps = load_dependency_layouts(&request.class_infos)?;
    debug!("{} dependency layout types", deps.len());

    let parser = LayoutBindingsParser::with_config(
        LayoutTypeScopes::local_first(local, deps),
        binding_config.clone(),
    );
    let bindings = parser.parse(package, &layouts)?;

    let local_symbols = ResourceSymbolCollector::new().collect(&request.resource_files)?;
    let dependency_symbols = request
        .r_txts
        .iter()
        .map(|path| parse_r_txt(path))
        .collect::<Result<Vec<_>>>()?;

    let working_dir = tempfile::Builder::new()
        .prefix(&format!("{}-", working_dir_label(&request.target_name)))
        .tempdir()
        .with_path(std::env::temp_dir())?;
    let r_dir = working_dir.path().join("r");
    let stubs_dir = working_dir.path().join("stubs");

    let non_transitive = request.non_transitive_r_class || config.r_class.non_transitive;
    let r_generator = RClassGenerator::new(non_transitive);
    let r_symbols = r_generator.symbols(&local_symbols, &dependency_symbols).len();
    let r_class = r_generator.generate(package, &local_symbols, &dependency_symbols, &r_dir)?;
    debug!("R class at {}", r_class.display());

    BrClassGenerator::new().generate(package, &bindings, &r_dir)?;
    let stubs = BindingClassGenerator::new(binding_config.clone())
        .generate(package, &bindings, &stubs_dir)?
        .len();

    // Both trees are staged before either output is replaced
    let staged = [
        stage(&r_dir, &request.r_class_output)?,
        stage(&stubs_dir, &request.stubs_output)?,
    ];
    for tree in staged {
        let destination = tree.destination().to_path_buf();
        let count = tree.commit()?;
        info!("Published {} files to {}", count, destination.display());
    }

    Ok(CompileSummary {
        layouts: layouts.len(),
        bindings: bindings.len(),
        r_symbols,
        stubs,
    })
}

// Target labels look like `//app:lib`
fn working_dir_label(target_name: &str) -> String {
    let label: String = target_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let label = label.trim_matches('_');
    if label.is_empty() {
        "aapt-lite".to_string()
    } else {
        label.to_string()
    }
}
