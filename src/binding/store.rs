//! Lookup of generated binding types by layout name.
//!
//! The tables are filled before parsing starts (from local layout files and from
//! dependency class-info documents) and are only read afterwards.

use super::naming::{layout_name, to_layout_binding_name};
use super::type_name::{ClassName, TypeName};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// A source of layout name → binding type mappings
pub trait LayoutTypeLookup {
    fn lookup(&self, layout_name: &str) -> Option<TypeName>;
}

impl LayoutTypeLookup for HashMap<String, TypeName> {
    fn lookup(&self, layout_name: &str) -> Option<TypeName> {
        self.get(layout_name).cloned()
    }
}

/// Where a layout type was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolScope {
    /// The module being compiled
    Local,
    /// Direct dependencies of the module
    Dependencies,
}

/// Layout name → generated binding type
#[derive(Debug, Clone, Default)]
pub struct LayoutTypeStore {
    types: HashMap<String, TypeName>,
}

impl LayoutTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from the module's own layout files
    pub fn from_local_layouts<P: AsRef<Path>>(
        package_name: &str,
        package_suffix: &str,
        layout_files: &[P],
    ) -> Self {
        let binding_package = format!("{}.{}", package_name, package_suffix);
        let mut store = Self::new();
        for file in layout_files {
            let name = layout_name(file.as_ref());
            let class = ClassName::get(&binding_package, &to_layout_binding_name(&name));
            store.insert(name, TypeName::ClassRef(class));
        }
        debug!("Seeded {} local layout types", store.len());
        store
    }

    pub fn insert(&mut self, layout_name: impl Into<String>, type_name: TypeName) {
        self.types.insert(layout_name.into(), type_name);
    }

    pub fn get(&self, layout_name: &str) -> Option<&TypeName> {
        self.types.get(layout_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl LayoutTypeLookup for LayoutTypeStore {
    fn lookup(&self, layout_name: &str) -> Option<TypeName> {
        self.get(layout_name).cloned()
    }
}

impl FromIterator<(String, TypeName)> for LayoutTypeStore {
    fn from_iter<I: IntoIterator<Item = (String, TypeName)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

/// Result of resolving an `<include>` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutTypeResolution {
    /// Found in one of the symbol scopes
    Found {
        scope: SymbolScope,
        type_name: TypeName,
    },
    /// Not found anywhere; synthesized in the module's own binding package
    Guessed(TypeName),
}

impl LayoutTypeResolution {
    pub fn type_name(&self) -> &TypeName {
        match self {
            LayoutTypeResolution::Found { type_name, .. } => type_name,
            LayoutTypeResolution::Guessed(type_name) => type_name,
        }
    }

    pub fn into_type_name(self) -> TypeName {
        match self {
            LayoutTypeResolution::Found { type_name, .. } => type_name,
            LayoutTypeResolution::Guessed(type_name) => type_name,
        }
    }

    pub fn is_guessed(&self) -> bool {
        matches!(self, LayoutTypeResolution::Guessed(_))
    }
}

/// Layout type sources queried in priority order
#[derive(Default)]
pub struct LayoutTypeScopes {
    sources: Vec<(SymbolScope, Box<dyn LayoutTypeLookup>)>,
}

impl LayoutTypeScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local symbols first, then dependencies
    pub fn local_first(local: impl LayoutTypeLookup + 'static, deps: impl LayoutTypeLookup + 'static) -> Self {
        Self::new()
            .with_source(SymbolScope::Local, local)
            .with_source(SymbolScope::Dependencies, deps)
    }

    /// Append a source with lower priority than those already present
    pub fn with_source(mut self, scope: SymbolScope, source: impl LayoutTypeLookup + 'static) -> Self {
        self.sources.push((scope, Box::new(source)));
        self
    }

    /// First match across the sources, in priority order
    pub fn lookup(&self, layout_name: &str) -> Option<(SymbolScope, TypeName)> {
        self.sources
            .iter()
            .find_map(|(scope, source)| source.lookup(layout_name).map(|t| (*scope, t)))
    }

    /// Resolve an included layout, falling back to
    /// `<package>.<suffix>.<LayoutName>Binding` when no scope knows it
    pub fn resolve_include(
        &self,
        layout_name: &str,
        package_name: &str,
        package_suffix: &str,
    ) -> LayoutTypeResolution {
        match self.lookup(layout_name) {
            Some((scope, type_name)) => LayoutTypeResolution::Found { scope, type_name },
            None => {
                let binding_package = format!("{}.{}", package_name, package_suffix);
                let guess = ClassName::get(&binding_package, &to_layout_binding_name(layout_name));
                debug!(
                    "Included layout `{}` not found in any scope, assuming {}",
                    layout_name, guess
                );
                LayoutTypeResolution::Guessed(TypeName::ClassRef(guess))
            }
        }
    }
}
