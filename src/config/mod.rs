mod loader;

pub use loader::{BindingConfig, Config, MergeConfig, RClassConfig};
