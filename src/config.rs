use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::{Normalization, Source};
use crate::data::paginate::PageSize;
use crate::session::Credentials;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "DOMAIN_INSIGHTS_CONFIG";
/// Environment variable overriding the configured resource.
pub const RESOURCE_ENV: &str = "DOMAIN_INSIGHTS_RESOURCE";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "domain-insights.json";

/// Application settings. Every field is optional in the JSON file.
///
/// ```json
/// {
///   "resource": "https://example.com/Domain.csv",
///   "normalize_column": "Traffic",
///   "placeholder": "Not provided",
///   "page_size": 20,
///   "username": "admin",
///   "password": "admin"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File path or http(s) URL of the CSV resource.
    pub resource: String,
    pub normalize_column: String,
    pub placeholder: String,
    pub page_size: PageSize,
    pub username: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        let norm = Normalization::default();
        Self {
            resource: "Domain.csv".to_string(),
            normalize_column: norm.column,
            placeholder: norm.placeholder,
            page_size: PageSize::default(),
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Config {
    /// Resolve the config from the environment and working directory.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => Some(PathBuf::from(p)),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            }
        };
        let resource = std::env::var(RESOURCE_ENV).ok();
        Self::resolve(path.as_deref(), resource)
    }

    /// Read `path` (if any) and apply a resource override on top.
    pub fn resolve(path: Option<&Path>, resource: Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        if let Some(resource) = resource.filter(|r| !r.trim().is_empty()) {
            config.resource = resource;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn source(&self) -> Source {
        Source::parse(&self.resource)
    }

    pub fn normalization(&self) -> Normalization {
        Normalization {
            column: self.normalize_column.clone(),
            placeholder: self.placeholder.clone(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
