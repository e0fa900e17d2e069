use super::{package_dir, write_source, HEADER};
use crate::binding::LayoutBindingData;
use crate::error::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Generates the `BR` class listing every bindable variable name
#[derive(Debug, Default)]
pub struct BrClassGenerator;

impl BrClassGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Write `BR.java` for `package_name` below `output_dir`
    pub fn generate(
        &self,
        package_name: &str,
        bindings: &[LayoutBindingData],
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let path = package_dir(output_dir, package_name).join("BR.java");
        let source = self.render(package_name, bindings);
        write_source(&path, &source)?;
        info!("Generated BR class for {} layouts", bindings.len());
        Ok(path)
    }

    pub fn render(&self, package_name: &str, bindings: &[LayoutBindingData]) -> String {
        let names: BTreeSet<&str> = bindings
            .iter()
            .flat_map(|data| data.variable_bindings.iter())
            .map(|binding| binding.raw_name.as_str())
            .collect();

        BrClassSource { package_name, names }.to_string()
    }
}

struct BrClassSource<'a> {
    package_name: &'a str,
    names: BTreeSet<&'a str>,
}

impl fmt::Display for BrClassSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEADER)?;
        if !self.package_name.is_empty() {
            writeln!(f, "package {};\n", self.package_name)?;
        }
        f.write_str("public class BR {\n")?;
        f.write_str("    public static int _all = 0;\n")?;
        for (index, name) in self.names.iter().enumerate() {
            writeln!(f, "    public static int {} = {};", name, index + 1)?;
        }
        f.write_str("}\n")
    }
}
