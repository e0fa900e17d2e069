use std::path::Path;

/// Convert a layout name to its generated binding class name.
///
/// `row_item` becomes `RowItemBinding`; `-` is treated like `_`.
pub fn to_layout_binding_name(layout_name: &str) -> String {
    format!("{}Binding", to_class_name(layout_name))
}

/// Logical layout name of a layout file: the file name up to `.xml`
pub fn layout_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.find(".xml") {
        Some(index) => file_name[..index].to_string(),
        None => file_name,
    }
}

/// `row_item` → `RowItem`
pub fn to_class_name(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

/// `header_inc` → `headerInc`, the field name data binding derives from an id
pub fn to_field_name(raw_name: &str) -> String {
    let class_name = to_class_name(raw_name);
    let mut chars = class_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
