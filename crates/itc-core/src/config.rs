use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::domain::{AnalyticsEndpoint, DEFAULT_MEASURES};

const PROXY_ENV: &str = "ITC_PROXY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("invalid {field} url {value}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub portal: PortalConfig,
    pub analytics: AnalyticsConfig,
    pub network: NetworkConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub base_url: String,
    pub login_path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NetworkConfig {
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    pub measures: Option<Vec<String>>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunesconnect.apple.com".to_string(),
            login_path: "/WebObjects/iTunesConnect.woa".to_string(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://analytics.itunes.apple.com/analytics/api/v1/data".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("itc-analytics")
            .join("config.toml")
    }

    pub fn endpoints(&self) -> Result<EndpointConfig, ConfigError> {
        EndpointConfig::new(
            &self.portal.base_url,
            &self.portal.login_path,
            &self.analytics.base_url,
        )
    }

    /// Command line value first, then `ITC_PROXY`, then the config file.
    pub fn resolve_proxy(&self, command_line: Option<String>) -> Option<String> {
        command_line
            .or_else(|| std::env::var(PROXY_ENV).ok())
            .or_else(|| self.network.proxy.clone())
            .filter(|proxy| !proxy.trim().is_empty())
    }

    pub fn measure_names(&self) -> Vec<String> {
        match &self.report.measures {
            Some(measures) if !measures.is_empty() => measures.clone(),
            _ => DEFAULT_MEASURES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// Base urls of the portal and the analytics API, fixed for the lifetime
/// of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    portal_base: Url,
    login_url: Url,
    analytics_base: Url,
}

impl EndpointConfig {
    pub fn new(
        portal_base: &str,
        login_path: &str,
        analytics_base: &str,
    ) -> Result<Self, ConfigError> {
        let portal_base = parse_url("portal", portal_base)?;
        let mut analytics_base = parse_url("analytics", analytics_base)?;

        if !analytics_base.path().ends_with('/') {
            let path = format!("{}/", analytics_base.path());
            analytics_base.set_path(&path);
        }

        let login_url = portal_base
            .join(login_path)
            .map_err(|source| ConfigError::InvalidUrl {
                field: "login path",
                value: login_path.to_string(),
                source,
            })?;

        Ok(Self {
            portal_base,
            login_url,
            analytics_base,
        })
    }

    pub fn login_page_url(&self) -> &Url {
        &self.login_url
    }

    /// Resolves a path scraped from portal markup against the portal origin.
    pub fn resolve_portal_path(&self, path: &str) -> Result<Url, url::ParseError> {
        self.portal_base.join(path)
    }

    pub fn analytics_url(&self, endpoint: AnalyticsEndpoint) -> String {
        format!("{}{}", self.analytics_base, endpoint.path())
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}
