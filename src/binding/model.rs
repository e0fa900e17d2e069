use super::type_name::TypeName;
use std::path::PathBuf;

/// How a binding was declared in its layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// Declared through `<variable>`
    Variable,

    /// A view tag carrying a new `android:id`
    View,

    /// An `<include>` of another layout.
    ///
    /// `layout_missing` is set when the included layout's binding type was found in
    /// neither the local nor the dependency symbols and had to be guessed.
    IncludedLayout {
        layout_name: String,
        layout_missing: bool,
    },
}

/// A named, typed reference that becomes a field of the generated binding class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Variable name, or the id with its `@+id/` prefix stripped
    pub raw_name: String,
    pub type_name: TypeName,
    pub binding_type: BindingType,
}

impl Binding {
    pub fn new(raw_name: impl Into<String>, type_name: TypeName, binding_type: BindingType) -> Self {
        Self {
            raw_name: raw_name.into(),
            type_name,
            binding_type,
        }
    }
}

/// Everything extracted from one binding layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBindingData {
    /// Generated class name, e.g. `RowItemBinding`
    pub binding_class_name: String,
    pub source_file: PathBuf,
    /// Views and includes, in document order
    pub view_bindings: Vec<Binding>,
    /// `<variable>` declarations, in document order
    pub variable_bindings: Vec<Binding>,
}
