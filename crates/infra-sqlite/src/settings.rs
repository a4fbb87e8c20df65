// Settings Loader
//
// Sources, lowest to highest precedence:
// 1. Optional TOML file
// 2. Environment variables: MULTITX__COORDINATOR__COMMIT_FAILURE=abandon

use multitx_core::error::{AppError, Result};
use multitx_core::{CoordinatorConfig, ResourceName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MULTITX";

/// Default pool size per resource
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

/// One named SQLite resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteResourceConfig {
    pub name: ResourceName,
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub coordinator: CoordinatorConfig,
    pub resources: Vec<SqliteResourceConfig>,
}

impl Settings {
    /// Load from an optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        Self::from_builder(builder)
    }

    /// Parse TOML text only (no environment)
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check resource names are unique and pool sizes usable
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for resource in &self.resources {
            if !seen.insert(resource.name.as_str()) {
                return Err(AppError::Config(format!(
                    "resource '{}' configured more than once",
                    resource.name
                )));
            }
            if resource.url.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "resource '{}' has an empty url",
                    resource.name
                )));
            }
            if resource.max_connections == 0 {
                return Err(AppError::Config(format!(
                    "resource '{}' needs max_connections >= 1",
                    resource.name
                )));
            }
        }
        Ok(())
    }

    /// Look up configured resources by name, keeping the requested order
    pub fn select(&self, names: &[ResourceName]) -> Result<Vec<&SqliteResourceConfig>> {
        names
            .iter()
            .map(|name| {
                self.resources
                    .iter()
                    .find(|r| &r.name == name)
                    .ok_or_else(|| AppError::Config(format!("resource '{}' is not configured", name)))
            })
            .collect()
    }
}
