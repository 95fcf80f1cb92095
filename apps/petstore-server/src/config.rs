//! Layered server configuration.
//!
//! Sources, lowest to highest precedence:
//! 1) built-in defaults
//! 2) YAML file passed with `--config`
//! 3) environment variables prefixed with `APP__` (`__` separates nesting levels)
//! 4) CLI overrides (`--port`, `-v`)

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use restkit::api::OpenApiInfo;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Upper bound for draining in-flight requests after a shutdown signal
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            shutdown_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Serve `/openapi.json`
    pub enable_docs: bool,
    /// Answer 415/406 for requests that do not speak JSON
    pub enforce_media_types: bool,
    pub body_limit_bytes: usize,
    pub openapi: OpenApiConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_docs: true,
            enforce_media_types: true,
            body_limit_bytes: 1024 * 1024,
            openapi: OpenApiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub seal_schemas: bool,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "OpenAPI v3.1 Fundamentals Example".to_owned(),
            version: "1.0.0".to_owned(),
            description: Some(
                "A stripped-down version of the Petstore API for the OpenAPI v3.1 Fundamentals course."
                    .to_owned(),
            ),
            seal_schemas: true,
        }
    }
}

impl OpenApiConfig {
    /// Document metadata with the given root tags.
    #[must_use]
    pub fn to_info(&self, tags: Vec<restkit::TagInfo>) -> OpenApiInfo {
        OpenApiInfo {
            title: self.title.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            tags,
            seal_schemas: self.seal_schemas,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `petstore=debug,tower_http=info`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then `APP__*` environment variables.
    ///
    /// # Errors
    /// Fails when `path` is given but is not a file, or when a source does not parse.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Apply `--port` and `-v` on top of the loaded configuration.
    ///
    /// # Errors
    /// Fails when a port override is given but `server.bind_addr` is not a socket address.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) -> Result<()> {
        if let Some(port) = port {
            let mut addr = self.bind_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }

        match verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        Ok(())
    }

    /// # Errors
    /// Fails when `server.bind_addr` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr: {:?}", self.server.bind_addr))
    }

    /// Check the values that only fail at use time.
    ///
    /// # Errors
    /// Describes the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.api.body_limit_bytes == 0 {
            bail!("api.body_limit_bytes must be greater than zero");
        }
        if self.api.openapi.title.trim().is_empty() {
            bail!("api.openapi.title must not be empty");
        }
        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("invalid logging.level: {:?}", self.logging.level))?;
        Ok(())
    }

    /// # Errors
    /// Fails if the configuration cannot be rendered as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| anyhow::anyhow!("failed to render configuration as YAML: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.api.body_limit_bytes, 1_048_576);
        assert!(cfg.api.enforce_media_types);
        assert_eq!(cfg.logging.format, LogFormat::Text);
        cfg.validate().unwrap();
    }

    #[test]
    fn yaml_overrides_defaults_partially() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "app.yaml",
                "server:\n  bind_addr: \"0.0.0.0:9000\"\nlogging:\n  format: json\n",
            )?;

            let cfg = AppConfig::load_or_default(Some(Path::new("app.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
            assert_eq!(cfg.server.shutdown_timeout_secs, 30);
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(cfg.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "app.yaml",
                "server:\n  bind_addr: \"127.0.0.1:9000\"\napi:\n  enable_docs: true\n",
            )?;
            jail.set_env("APP__SERVER__BIND_ADDR", "127.0.0.1:7000");
            jail.set_env("APP__API__ENABLE_DOCS", "false");

            let cfg = AppConfig::load_or_default(Some(Path::new("app.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:7000");
            assert!(!cfg.api.enable_docs);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_or_default(Some(Path::new("/nonexistent/petstore.yaml")))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn cli_overrides() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(Some(9999), 2).unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9999");
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(None, 5).unwrap();
        assert_eq!(cfg.logging.level, "trace");
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9999");
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut cfg = AppConfig::default();
        cfg.server.bind_addr = "not-an-address".to_owned();
        assert!(cfg.validate().is_err());
        assert!(cfg.apply_cli_overrides(Some(1), 0).is_err());

        let mut cfg = AppConfig::default();
        cfg.api.body_limit_bytes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn yaml_rendering_parses_back() {
        let cfg = AppConfig::default();
        let yaml = cfg.to_yaml().unwrap();
        assert!(yaml.contains("bind_addr"));
        let parsed: AppConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
    }
}
