use crate::app::Settings;
use crate::error::ConfigError;
use crate::host::ColorScheme;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::time::Duration;

#[derive(Debug, Deserialize, Clone)]
#[serde(from = "RawConfig")]
pub struct Config {
    pub backend_url: String,
    pub init_data: Option<String>,
    pub color_scheme: ColorScheme,
    pub page_size: u32,
    pub notification_ttl_seconds: u64,
}

/// Intermediate type for deserialization (blank `init_data` → `None`).
#[derive(Deserialize)]
struct RawConfig {
    backend_url: String,
    init_data: Option<String>,
    #[serde(default)]
    color_scheme: ColorScheme,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default = "default_notification_ttl")]
    notification_ttl_seconds: u64,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            backend_url: raw.backend_url,
            init_data: raw.init_data.filter(|s| !s.trim().is_empty()),
            color_scheme: raw.color_scheme,
            page_size: raw.page_size,
            notification_ttl_seconds: raw.notification_ttl_seconds,
        }
    }
}

const fn default_page_size() -> u32 {
    10
}

const fn default_notification_ttl() -> u64 {
    5
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_path(&config_file_path()?),
        }
    }

    pub fn load_from_path(config_path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            ConfigError::Invalid(format!(
                "Cannot read config at {}: {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            ConfigError::Invalid(format!("Invalid TOML in {}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.backend_url)
            .map_err(|e| anyhow::anyhow!("backend_url is not a valid URL: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("backend_url must use http or https");
        }
        if url.query().is_some() || url.fragment().is_some() {
            anyhow::bail!("backend_url must not carry a query or fragment");
        }
        if self.page_size == 0 || self.page_size > 100 {
            anyhow::bail!("page_size must be between 1 and 100");
        }
        if self.notification_ttl_seconds == 0 || self.notification_ttl_seconds > 60 {
            anyhow::bail!("notification_ttl_seconds must be between 1 and 60");
        }
        Ok(())
    }

    pub fn backend_url(&self) -> anyhow::Result<Url> {
        Ok(Url::parse(&self.backend_url)?)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            page_size: self.page_size,
            notification_ttl: Duration::from_secs(self.notification_ttl_seconds),
        }
    }
}

fn config_file_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("minibank").join("config.toml"))
}
