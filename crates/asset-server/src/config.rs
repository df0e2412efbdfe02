//! Configuration management for the asset server.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use upload_common::constants::{DEFAULT_ASSET_ROOT, DEFAULT_HOST, DEFAULT_PORT};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory whose files are served
    #[serde(default = "default_asset_root")]
    pub asset_root: String,

    /// File served for directory requests
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_asset_root() -> String { DEFAULT_ASSET_ROOT.to_string() }
fn default_index_file() -> String { "index.html".to_string() }

impl AppConfig {
    /// Load configuration from file, with CLI/env overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = Self::from_file(config_path)?;

        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(ref host) = args.host {
            config.host = host.clone();
        }
        if let Some(ref root) = args.asset_root {
            config.asset_root = root.clone();
        }

        Ok(config)
    }

    fn from_file(config_path: &str) -> Result<Self> {
        if !Path::new(config_path).exists() {
            tracing::debug!(path = %config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path))
            .build()
            .context("Failed to load config file")?;

        settings
            .try_deserialize()
            .context("Failed to parse config")
    }

    /// Reject configurations that cannot serve anything
    pub fn validate(&self) -> Result<()> {
        let root = Path::new(&self.asset_root);
        if !root.is_dir() {
            bail!("Asset root {} is not a directory", root.display());
        }
        if self.index_file.contains('/') || self.index_file.contains('\\') {
            bail!("Index file must be a bare file name, got {}", self.index_file);
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            asset_root: default_asset_root(),
            index_file: default_index_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.listen_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset-server.toml");
        std::fs::write(&path, "port = 5000\nasset_root = \"static\"\n").unwrap();

        let args = crate::Args::parse_from(["asset-server", "--port", "6000"]);
        let config = AppConfig::load(path.to_str().unwrap(), &args).unwrap();

        assert_eq!(config.port, 6000);
        assert_eq!(config.asset_root, "static");
    }

    #[test]
    fn test_defaults_apply_without_overrides() {
        let args = crate::Args {
            config: "/no/such/asset-server.toml".to_string(),
            port: None,
            host: None,
            asset_root: None,
            log_level: "info".to_string(),
            json_logs: false,
        };
        let config = AppConfig::load(&args.config, &args).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.asset_root, "public");
        assert_eq!(config.listen_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let config = AppConfig {
            asset_root: "/definitely/not/here".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
