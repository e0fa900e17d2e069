//! Data-binding layout parsing.
//!
//! Layouts are walked tag by tag; `<import>` tags feed a per-document
//! [`ImportedTypes`] table that later `<variable>` types are resolved against,
//! and id'd views and `<include>`s become view bindings. Included layouts are
//! looked up in [`LayoutTypeScopes`], local module first.

mod model;
mod naming;
mod parser;
mod resolver;
mod store;
mod type_name;

pub use model::{Binding, BindingType, LayoutBindingData};
pub use naming::{capitalize, layout_name, to_class_name, to_field_name, to_layout_binding_name};
pub use parser::LayoutBindingsParser;
pub use resolver::{resolve, split_type_parameters, ImportedTypes};
pub use store::{
    LayoutTypeLookup, LayoutTypeResolution, LayoutTypeScopes, LayoutTypeStore, SymbolScope,
};
pub use type_name::{ClassName, PrimitiveKind, TypeName};
