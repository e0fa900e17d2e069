use super::model::{Binding, BindingType, LayoutBindingData};
use super::naming::{layout_name, to_layout_binding_name};
use super::resolver::{resolve, ImportedTypes};
use super::store::LayoutTypeScopes;
use super::type_name::{ClassName, TypeName};
use crate::config::BindingConfig;
use crate::error::{AaptError, IoContext, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

const TYPE: &str = "type";
const ALIAS: &str = "alias";
const NAME: &str = "name";
const VARIABLE: &str = "variable";
const ANDROID_ID: &str = "android:id";
const LAYOUT: &str = "layout";
const IMPORT: &str = "import";
const INCLUDE: &str = "include";

const NEW_ID_PREFIX: &str = "@+id/";
const LAYOUT_PREFIX: &str = "@layout/";

/// Extracts variables, imports and id'd views from data-binding layouts
pub struct LayoutBindingsParser {
    scopes: LayoutTypeScopes,
    config: BindingConfig,
}

/// State carried across the start tags of one layout document
#[derive(Default)]
struct LayoutWalk {
    imported_types: ImportedTypes,
    view_bindings: Vec<Binding>,
    variable_bindings: Vec<Binding>,
}

impl LayoutWalk {
    fn add_view(&mut self, binding: Binding) {
        if !self.view_bindings.contains(&binding) {
            self.view_bindings.push(binding);
        }
    }

    fn add_variable(&mut self, binding: Binding) {
        if !self.variable_bindings.contains(&binding) {
            self.variable_bindings.push(binding);
        }
    }
}

/// The tag being looked at, for diagnostics
struct TagContext<'a> {
    package_name: &'a str,
    file: &'a Path,
    tag: &'a str,
}

impl TagContext<'_> {
    fn missing(&self, attribute: &'static str) -> AaptError {
        AaptError::MissingAttribute {
            attribute,
            tag: self.tag.to_string(),
            package: self.package_name.to_string(),
            file: self.file.to_path_buf(),
        }
    }

    fn require<'m>(&self, attributes: &'m HashMap<String, String>, name: &'static str) -> Result<&'m str> {
        attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| self.missing(name))
    }
}

impl LayoutBindingsParser {
    pub fn new(scopes: LayoutTypeScopes) -> Self {
        Self::with_config(scopes, BindingConfig::default())
    }

    pub fn with_config(scopes: LayoutTypeScopes, config: BindingConfig) -> Self {
        Self { scopes, config }
    }

    /// Parse every layout file, keeping the first file for each binding class name
    pub fn parse<P: AsRef<Path>>(
        &self,
        package_name: &str,
        layout_files: &[P],
    ) -> Result<Vec<LayoutBindingData>> {
        let mut parsed = Vec::with_capacity(layout_files.len());
        for file in layout_files {
            let path = file.as_ref();
            let contents = std::fs::read_to_string(path).with_path(path)?;
            parsed.push(self.parse_layout(package_name, path, &contents)?);
        }

        let mut seen = HashSet::new();
        parsed.retain(|data| {
            let first = seen.insert(data.binding_class_name.clone());
            if !first {
                debug!(
                    "Dropping {} for already seen {}",
                    data.source_file.display(),
                    data.binding_class_name
                );
            }
            first
        });

        Ok(parsed)
    }

    /// Parse one layout document
    pub fn parse_layout(
        &self,
        package_name: &str,
        path: &Path,
        contents: &str,
    ) -> Result<LayoutBindingData> {
        let binding_class_name = to_layout_binding_name(&layout_name(path));
        let mut walk = LayoutWalk::default();

        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let attributes = attributes_of(e, path)?;
                    let context = TagContext {
                        package_name,
                        file: path,
                        tag: &tag_name,
                    };
                    self.visit_tag(&context, &attributes, &mut walk)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(AaptError::xml(path, e)),
                _ => {}
            }
            buf.clear();
        }

        debug!(
            "Parsed layout {}: {} views, {} variables",
            path.display(),
            walk.view_bindings.len(),
            walk.variable_bindings.len()
        );

        Ok(LayoutBindingData {
            binding_class_name,
            source_file: path.to_path_buf(),
            view_bindings: walk.view_bindings,
            variable_bindings: walk.variable_bindings,
        })
    }

    fn visit_tag(
        &self,
        context: &TagContext<'_>,
        attributes: &HashMap<String, String>,
        walk: &mut LayoutWalk,
    ) -> Result<()> {
        match context.tag {
            IMPORT => {
                let fqcn = context.require(attributes, TYPE)?;
                let alias = attributes.get(ALIAS).map(String::as_str);
                walk.imported_types.import(fqcn, alias);
            }
            VARIABLE => {
                let name = context.require(attributes, NAME)?;
                let type_expression = context.require(attributes, TYPE)?;
                let type_name = resolve(type_expression, &walk.imported_types);
                walk.add_variable(Binding::new(name, type_name, BindingType::Variable));
            }
            _ => {
                if let Some(binding) = self.parse_binding(context, attributes)? {
                    walk.add_view(binding);
                }
            }
        }
        Ok(())
    }

    /// Build the binding for a view or `<include>` tag declaring a new id
    fn parse_binding(
        &self,
        context: &TagContext<'_>,
        attributes: &HashMap<String, String>,
    ) -> Result<Option<Binding>> {
        let id = match attributes.get(ANDROID_ID) {
            Some(id) if id.contains('+') => id,
            _ => return Ok(None),
        };

        let raw_name = id.rsplit(NEW_ID_PREFIX).next().unwrap_or(id.as_str());
        if raw_name.is_empty() {
            return Err(context.missing(ANDROID_ID));
        }

        let tag = context.tag;
        let binding = if tag == INCLUDE {
            let layout = context.require(attributes, LAYOUT)?;
            let included = layout.rsplit(LAYOUT_PREFIX).next().unwrap_or(layout);
            let resolution = self.scopes.resolve_include(
                included,
                context.package_name,
                &self.config.package_suffix,
            );
            let binding_type = BindingType::IncludedLayout {
                layout_name: included.to_string(),
                layout_missing: resolution.is_guessed(),
            };
            Binding::new(raw_name, resolution.into_type_name(), binding_type)
        } else {
            Binding::new(raw_name, self.view_type(tag), BindingType::View)
        };

        Ok(Some(binding))
    }

    /// Type of a plain view tag
    fn view_type(&self, tag: &str) -> TypeName {
        if tag.contains('.') {
            return TypeName::class(tag);
        }

        let class = match tag {
            "ViewStub" => ClassName::best_guess(self.config.view_stub_proxy.as_str()),
            "View" | "ViewGroup" | "TextureView" | "SurfaceView" => ClassName::get("android.view", tag),
            "WebView" => ClassName::get("android.webkit", tag),
            _ => ClassName::get("android.widget", tag),
        };
        TypeName::ClassRef(class)
    }
}

/// Attribute name → unescaped value for one start tag
fn attributes_of(e: &BytesStart<'_>, path: &Path) -> Result<HashMap<String, String>> {
    let mut attributes = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| AaptError::xml(path, err.into()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| AaptError::xml(path, err))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}
