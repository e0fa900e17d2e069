//! Resolution of data-binding type expressions such as `Map<String, List<Foo>>[]`.
//!
//! The grammar mirrors what the data-binding compiler accepts in `<variable type="...">`:
//! array suffixes bind loosest, then generic parameter lists, then plain names. Plain
//! names are looked up in the layout's `<import>` table, then in the primitive
//! keywords, and are otherwise taken verbatim as a fully-qualified class guess.
//! Resolution never fails.

use super::type_name::{ClassName, PrimitiveKind, TypeName};
use std::collections::HashMap;

/// Short names (or aliases) introduced by `<import>` tags of one layout document.
///
/// Later imports with the same short name replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ImportedTypes {
    types: HashMap<String, ClassName>,
}

impl ImportedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an `<import type=".." alias=".."/>`, returning the name it is visible under
    pub fn import(&mut self, fqcn: &str, alias: Option<&str>) -> String {
        let display_name = match alias {
            Some(alias) => alias.to_string(),
            None => fqcn.rsplit('.').next().unwrap_or(fqcn).to_string(),
        };
        self.types
            .insert(display_name.clone(), ClassName::best_guess(fqcn));
        display_name
    }

    pub fn get(&self, name: &str) -> Option<&ClassName> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Resolve a type expression against the imports visible at that point
pub fn resolve(expression: &str, imported_types: &ImportedTypes) -> TypeName {
    if let Some(component) = expression.strip_suffix("[]") {
        return TypeName::array_of(resolve(component.trim(), imported_types));
    }

    if let Some(generic_end) = expression.rfind('>') {
        match expression.find('<') {
            Some(generic_start) if generic_start > 0 && generic_start < generic_end => {
                let type_params = expression[generic_start + 1..generic_end].trim();
                let arguments = split_type_parameters(type_params)
                    .iter()
                    .map(|param| resolve(param, imported_types))
                    .collect();

                let raw = expression[..generic_start].trim();
                let raw_class = match resolve(raw, imported_types) {
                    TypeName::ClassRef(class) => class,
                    // A primitive or array can't carry type arguments; keep the guess
                    _ => ClassName::best_guess(raw),
                };
                return TypeName::Parameterized(raw_class, arguments);
            }
            _ => {}
        }
    }

    if let Some(class) = imported_types.get(expression) {
        return TypeName::ClassRef(class.clone());
    }

    match PrimitiveKind::from_keyword(expression) {
        Some(kind) => TypeName::Primitive(kind),
        None => TypeName::ClassRef(ClassName::best_guess(expression)),
    }
}

/// Split a generic parameter list on top-level commas.
///
/// All whitespace is dropped, so `String, List<Foo>` yields `["String", "List<Foo>"]`.
pub fn split_type_parameters(type_params: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();

    for c in type_params.chars() {
        if c == ',' && depth == 0 {
            params.push(std::mem::take(&mut current));
        } else if !c.is_whitespace() {
            current.push(c);
            match c {
                '<' => depth += 1,
                '>' => depth -= 1,
                _ => {}
            }
        }
    }
    params.push(current);

    params
}
