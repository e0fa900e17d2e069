use super::{SymbolTable, SymbolValue};
use crate::discovery::FolderType;
use crate::error::{AaptError, IoContext, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Collects the `R` symbols a module's own resource files declare
pub struct ResourceSymbolCollector {
    // `@+id/name` anywhere in an XML resource declares an id
    new_id_pattern: Regex,
}

/// Position inside a values document
enum ValuesScope {
    Other,
    Styleable { name: String, attrs: Vec<String> },
    Attr,
}

impl ResourceSymbolCollector {
    pub fn new() -> Self {
        Self {
            new_id_pattern: Regex::new(r"@\+id/([A-Za-z0-9_]+)").expect("valid id pattern"),
        }
    }

    /// Collect symbols from a list of resource files.
    ///
    /// Files outside a recognised `res/` sub-folder are skipped.
    pub fn collect<P: AsRef<Path>>(&self, files: &[P]) -> Result<SymbolTable> {
        let mut table = SymbolTable::new();
        for file in files {
            self.collect_file(file.as_ref(), &mut table)?;
        }
        debug!("Collected {} local resource symbols", table.len());
        Ok(table)
    }

    fn collect_file(&self, path: &Path, table: &mut SymbolTable) -> Result<()> {
        let Some(folder) = FolderType::from_path(path) else {
            trace!("Not a resource file: {}", path.display());
            return Ok(());
        };

        if folder == FolderType::Values {
            let contents = fs::read_to_string(path).with_path(path)?;
            return parse_values_xml(path, &contents, table);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Resource names never contain dots, so `ic_logo.9.png` is `ic_logo`
        let name = file_name.split('.').next().unwrap_or_default();
        if !name.is_empty() {
            table.add(folder.resource_type(), name, SymbolValue::Int);
        }

        let is_xml = path.extension().map(|e| e == "xml").unwrap_or(false);
        if is_xml && folder.may_declare_ids() {
            let contents = fs::read_to_string(path).with_path(path)?;
            self.collect_ids(&contents, table);
        }

        Ok(())
    }

    fn collect_ids(&self, contents: &str, table: &mut SymbolTable) {
        for cap in self.new_id_pattern.captures_iter(contents) {
            table.add("id", &cap[1], SymbolValue::Int);
        }
    }
}

impl Default for ResourceSymbolCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a values XML document for resource declarations
pub(crate) fn parse_values_xml(path: &Path, contents: &str, table: &mut SymbolTable) -> Result<()> {
    let mut reader = Reader::from_str(contents);
    reader.trim_text(true);

    let mut buf = Vec::new();
    // Scope per open element below <resources>
    let mut stack: Vec<ValuesScope> = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let scope = visit_values_tag(path, e, depth + 1, &mut stack, table)?;
                depth += 1;
                if depth >= 2 {
                    stack.push(scope);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let scope = visit_values_tag(path, e, depth + 1, &mut stack, table)?;
                // An empty <declare-styleable/> still gets its array
                if let ValuesScope::Styleable { name, attrs } = scope {
                    close_styleable(&name, &attrs, table);
                }
            }
            Ok(Event::End(_)) => {
                if depth >= 2 {
                    if let Some(ValuesScope::Styleable { name, attrs }) = stack.pop() {
                        close_styleable(&name, &attrs, table);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AaptError::xml(path, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Record the symbols of one element at `depth` (1 = `<resources>`)
fn visit_values_tag(
    path: &Path,
    e: &BytesStart<'_>,
    depth: usize,
    stack: &mut [ValuesScope],
    table: &mut SymbolTable,
) -> Result<ValuesScope> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let Some(name) = attribute(path, e, "name")? else {
        return Ok(ValuesScope::Other);
    };

    let in_styleable = matches!(stack.last(), Some(ValuesScope::Styleable { .. }));
    let in_attr = matches!(stack.last(), Some(ValuesScope::Attr));

    let scope = if depth == 2 {
        match tag.as_str() {
            "declare-styleable" => ValuesScope::Styleable {
                name: name.replace('.', "_"),
                attrs: Vec::new(),
            },
            "attr" => {
                table.add("attr", &name, SymbolValue::Int);
                ValuesScope::Attr
            }
            "item" => {
                if let Some(res_type) = attribute(path, e, "type")? {
                    table.add(&res_type, &name, SymbolValue::Int);
                }
                ValuesScope::Other
            }
            _ => {
                if let Some(res_type) = values_type(&tag) {
                    table.add(res_type, &name.replace('.', "_"), SymbolValue::Int);
                }
                ValuesScope::Other
            }
        }
    } else if in_styleable && tag == "attr" {
        // Framework attrs are referenced, not declared
        if !name.starts_with("android:") {
            table.add("attr", &name, SymbolValue::Int);
        }
        if let Some(ValuesScope::Styleable { attrs, .. }) = stack.last_mut() {
            attrs.push(name);
        }
        ValuesScope::Attr
    } else if in_attr && (tag == "enum" || tag == "flag") {
        table.add("id", &name, SymbolValue::Int);
        ValuesScope::Other
    } else {
        ValuesScope::Other
    };
    Ok(scope)
}

fn close_styleable(name: &str, attrs: &[String], table: &mut SymbolTable) {
    table.add("styleable", name, SymbolValue::IntArray);
    for attr in attrs {
        let field = format!("{}_{}", name, attr.replace(':', "_"));
        table.add("styleable", &field, SymbolValue::Int);
    }
}

/// `R` type of a direct child of `<resources>`
fn values_type(tag: &str) -> Option<&'static str> {
    match tag {
        "string" => Some("string"),
        "color" => Some("color"),
        "dimen" => Some("dimen"),
        "bool" => Some("bool"),
        "integer" => Some("integer"),
        "fraction" => Some("fraction"),
        "plurals" => Some("plurals"),
        "style" => Some("style"),
        "id" => Some("id"),
        "drawable" => Some("drawable"),
        "array" | "string-array" | "integer-array" => Some("array"),
        _ => None,
    }
}

fn attribute(path: &Path, e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| AaptError::xml(path, err.into()))?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
        }
    }
    Ok(None)
}
