//! Resource symbols feeding `R` class generation, and the dependency layout
//! types feeding the binding parser.

mod class_info;
mod r_txt;
mod resources;

pub use class_info::load_dependency_layouts;
pub use r_txt::parse_r_txt;
pub use resources::ResourceSymbolCollector;

use std::collections::BTreeMap;

/// Shape of a generated `R` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolValue {
    Int,
    IntArray,
}

/// Resource type → symbol name → value shape, kept sorted for stable output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: BTreeMap<String, BTreeMap<String, SymbolValue>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, res_type: &str, name: &str, value: SymbolValue) {
        self.entries
            .entry(res_type.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    pub fn get(&self, res_type: &str, name: &str) -> Option<SymbolValue> {
        self.entries.get(res_type)?.get(name).copied()
    }

    pub fn contains(&self, res_type: &str, name: &str) -> bool {
        self.get(res_type, name).is_some()
    }

    /// Add every symbol of `other`; existing entries keep their shape
    pub fn extend(&mut self, other: &SymbolTable) {
        for (res_type, symbols) in &other.entries {
            let target = self.entries.entry(res_type.clone()).or_default();
            for (name, value) in symbols {
                target.entry(name.clone()).or_insert(*value);
            }
        }
    }

    /// Resource types with their symbols, both sorted
    pub fn types(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, SymbolValue>)> {
        self.entries.iter().map(|(t, symbols)| (t.as_str(), symbols))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
