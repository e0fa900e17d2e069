use super::{package_dir, write_source, HEADER};
use crate::binding::{capitalize, to_field_name, Binding, BindingType, LayoutBindingData};
use crate::config::BindingConfig;
use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const NON_NULL: &str = "@androidx.annotation.NonNull";
const NULLABLE: &str = "@androidx.annotation.Nullable";

/// Generates abstract binding classes that compile against the layout's views
/// and variables without the full data-binding compiler
pub struct BindingClassGenerator {
    config: BindingConfig,
}

impl BindingClassGenerator {
    pub fn new(config: BindingConfig) -> Self {
        Self { config }
    }

    /// Write one stub per layout below `output_dir`
    pub fn generate(
        &self,
        package_name: &str,
        bindings: &[LayoutBindingData],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let binding_package = self.binding_package(package_name);
        let dir = package_dir(output_dir, &binding_package);

        let mut written = Vec::with_capacity(bindings.len());
        for data in bindings {
            let path = dir.join(format!("{}.java", data.binding_class_name));
            write_source(&path, &self.render(package_name, data))?;
            debug!("{} -> {}", data.source_file.display(), path.display());
            written.push(path);
        }

        info!("Generated {} binding stubs", written.len());
        Ok(written)
    }

    pub fn render(&self, package_name: &str, data: &LayoutBindingData) -> String {
        BindingSource {
            generator: self,
            package_name,
            data,
        }
        .to_string()
    }

    fn binding_package(&self, package_name: &str) -> String {
        format!("{}.{}", package_name, self.config.package_suffix)
    }

    /// Declared Java type of a view field; unresolved includes fall back to the base class
    fn field_type(&self, binding: &Binding) -> String {
        match &binding.binding_type {
            BindingType::IncludedLayout {
                layout_missing: true,
                ..
            } => self.config.base_class.clone(),
            BindingType::IncludedLayout {
                layout_missing: false,
                ..
            }
            | BindingType::View
            | BindingType::Variable => binding.type_name.to_string(),
        }
    }
}

/// Java source of one binding stub
struct BindingSource<'a> {
    generator: &'a BindingClassGenerator,
    package_name: &'a str,
    data: &'a LayoutBindingData,
}

impl fmt::Display for BindingSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let generator = self.generator;
        let class_name = &self.data.binding_class_name;

        f.write_str(HEADER)?;
        writeln!(f, "package {};\n", generator.binding_package(self.package_name))?;
        writeln!(
            f,
            "public abstract class {} extends {} {{",
            class_name, generator.config.base_class
        )?;

        for view in &self.data.view_bindings {
            writeln!(
                f,
                "    {}\n    public final {} {};\n",
                NON_NULL,
                generator.field_type(view),
                to_field_name(&view.raw_name)
            )?;
        }

        for variable in &self.data.variable_bindings {
            writeln!(
                f,
                "    @androidx.databinding.Bindable\n    protected {} m{};\n",
                variable.type_name,
                capitalize(&variable.raw_name)
            )?;
        }

        // Constructor
        write!(
            f,
            "    protected {}(java.lang.Object _bindingComponent, android.view.View _root, int _localFieldCount",
            class_name
        )?;
        for view in &self.data.view_bindings {
            write!(f, ",\n            {} {}", generator.field_type(view), to_field_name(&view.raw_name))?;
        }
        f.write_str(") {\n        super(_bindingComponent, _root, _localFieldCount);\n")?;
        for view in &self.data.view_bindings {
            let field = to_field_name(&view.raw_name);
            writeln!(f, "        this.{} = {};", field, field)?;
        }
        f.write_str("    }\n\n")?;

        for variable in &self.data.variable_bindings {
            write_accessors(f, variable)?;
        }

        write_factories(f, class_name)?;
        f.write_str("}\n")
    }
}

fn write_accessors(f: &mut fmt::Formatter<'_>, variable: &Binding) -> fmt::Result {
    let name = &variable.raw_name;
    let accessor = capitalize(name);
    let annotation = if variable.type_name.is_primitive() {
        String::new()
    } else {
        format!("{} ", NULLABLE)
    };

    writeln!(
        f,
        "    public abstract void set{}({}{} {});\n",
        accessor, annotation, variable.type_name, name
    )?;
    if !annotation.is_empty() {
        writeln!(f, "    {}", NULLABLE)?;
    }
    writeln!(
        f,
        "    public {} get{}() {{\n        return m{};\n    }}\n",
        variable.type_name, accessor, accessor
    )
}

fn write_factories(f: &mut fmt::Formatter<'_>, class_name: &str) -> fmt::Result {
    let stub = "        throw new RuntimeException(\"Stub!\");\n    }\n";
    write!(
        f,
        "    {nn}\n    public static {c} inflate({nn} android.view.LayoutInflater inflater,\n            \
         {n} android.view.ViewGroup root, boolean attachToRoot) {{\n{stub}\n",
        nn = NON_NULL,
        n = NULLABLE,
        c = class_name,
        stub = stub
    )?;
    write!(
        f,
        "    {nn}\n    public static {c} inflate({nn} android.view.LayoutInflater inflater) {{\n{stub}\n",
        nn = NON_NULL,
        c = class_name,
        stub = stub
    )?;
    write!(
        f,
        "    public static {c} bind({nn} android.view.View view) {{\n{stub}",
        nn = NON_NULL,
        c = class_name,
        stub = stub
    )
}
