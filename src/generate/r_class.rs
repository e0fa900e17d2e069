use super::{package_dir, write_source, HEADER};
use crate::error::Result;
use crate::symbols::{SymbolTable, SymbolValue};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Generates the `R` class of a module
pub struct RClassGenerator {
    non_transitive: bool,
}

impl RClassGenerator {
    pub fn new(non_transitive: bool) -> Self {
        Self { non_transitive }
    }

    /// Write `R.java` for `package_name` below `output_dir`.
    ///
    /// Dependency symbols are only included for transitive `R` classes.
    pub fn generate(
        &self,
        package_name: &str,
        local: &SymbolTable,
        dependencies: &[SymbolTable],
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let symbols = self.symbols(local, dependencies);
        let path = package_dir(output_dir, package_name).join("R.java");
        write_source(&path, &self.render(package_name, &symbols))?;
        info!("Generated R class with {} symbols", symbols.len());
        Ok(path)
    }

    /// Symbols the generated class declares
    pub fn symbols(&self, local: &SymbolTable, dependencies: &[SymbolTable]) -> SymbolTable {
        let mut symbols = local.clone();
        if !self.non_transitive {
            for dependency in dependencies {
                symbols.extend(dependency);
            }
        }
        symbols
    }

    pub fn render(&self, package_name: &str, symbols: &SymbolTable) -> String {
        RClassSource { package_name, symbols }.to_string()
    }
}

struct RClassSource<'a> {
    package_name: &'a str,
    symbols: &'a SymbolTable,
}

impl fmt::Display for RClassSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEADER)?;
        if !self.package_name.is_empty() {
            writeln!(f, "package {};\n", self.package_name)?;
        }
        f.write_str("public final class R {\n")?;

        for (res_type, entries) in self.symbols.types() {
            writeln!(f, "    public static final class {} {{", res_type)?;
            for (name, value) in entries {
                match value {
                    SymbolValue::Int => writeln!(f, "        public static int {} = 0;", name)?,
                    SymbolValue::IntArray => writeln!(f, "        public static int[] {} = {{}};", name)?,
                }
            }
            f.write_str("    }\n")?;
        }

        f.write_str("}\n")
    }
}
