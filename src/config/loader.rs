use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for aapt-lite runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resource merging configuration
    pub merge: MergeConfig,

    /// Layout binding configuration
    pub binding: BindingConfig,

    /// R class generation configuration
    pub r_class: RClassConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// File or directory name patterns skipped while merging and collecting symbols
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Sub-package that generated binding classes live in
    pub package_suffix: String,

    /// Type used for `<ViewStub>` bindings
    pub view_stub_proxy: String,

    /// Base class of every generated binding stub
    pub base_class: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RClassConfig {
    /// Only emit symbols declared by the module itself
    pub non_transitive: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            // Same spirit as aapt's default --ignore-assets list
            ignore_patterns: vec![
                ".*".to_string(),
                "*~".to_string(),
                "thumbs.db".to_string(),
                "picasa.ini".to_string(),
                "CVS".to_string(),
                "*.scc".to_string(),
                "*.orig".to_string(),
            ],
        }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            package_suffix: "databinding".to_string(),
            view_stub_proxy: "androidx.databinding.ViewStubProxy".to_string(),
            base_class: "androidx.databinding.ViewDataBinding".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        let default_names = [
            ".aapt-lite.yml",
            ".aapt-lite.yaml",
            ".aapt-lite.toml",
            "aapt-lite.toml",
        ];

        for name in &default_names {
            let path = root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}

impl MergeConfig {
    /// Check if a file or directory name is skipped by the ignore patterns
    pub fn should_ignore(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.ignore_patterns
            .iter()
            .any(|pattern| glob_match(&pattern.to_ascii_lowercase(), &name))
    }
}

/// Simple glob matching on a single path segment, e.g. "*.orig" or ".*"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return text.ends_with(suffix);
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return text.starts_with(prefix);
    }

    text == pattern
}
