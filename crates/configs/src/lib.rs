use std::io;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "ADMIN_API_BASE_URL";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Backend API location used by the HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: String::new(), timeout_secs: default_timeout() }
    }
}

/// List pages the editors navigate to after a successful save or on cancel.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_services_route")]
    pub services: String,
    #[serde(default = "default_testimonials_route")]
    pub testimonials: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self { services: default_services_route(), testimonials: default_testimonials_route() }
    }
}

fn default_timeout() -> u64 { 30 }
fn default_services_route() -> String { "/services".into() }
fn default_testimonials_route() -> String { "/testimonials".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AdminConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AdminConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    parse(&content).with_context(|| format!("parsing {path}"))
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>().is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

pub fn parse(content: &str) -> Result<AdminConfig> {
    let cfg: AdminConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AdminConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults plus
    /// environment only when the file does not exist, then normalize and
    /// validate.
    pub fn load_and_validate() -> Result<Self> {
        common::env::load_dotenv();
        let mut cfg = Self::load_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_env(path: &str) -> Result<Self> {
        match load_from_file(path) {
            Ok(cfg) => Ok(cfg),
            Err(e) if is_missing_file(&e) => {
                warn!(path, "config file not found, using environment");
                Ok(Self::from_env())
            }
            Err(e) => Err(e),
        }
    }

    /// Defaults with `ADMIN_API_BASE_URL` applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.api.normalize_from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        self.routes.validate()?;
        debug!(base_url = %self.api.base_url, "admin config ready");
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        if self.base_url.trim().is_empty() {
            if let Some(url) = common::env::non_empty_var(BASE_URL_ENV) {
                self.base_url = url;
            }
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(anyhow!("api.base_url is empty; set it in config.toml or {BASE_URL_ENV}"));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl RoutesConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [("routes.services", &self.services), ("routes.testimonials", &self.testimonials)] {
            if !path.starts_with('/') {
                return Err(anyhow!("{name} must start with '/'"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.routes.services, "/services");
        assert_eq!(cfg.routes.testimonials, "/testimonials");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let mut cfg = parse("[api]\nbase_url = \"https://cms.example.com/api/\"\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.api.base_url, "https://cms.example.com/api");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut cfg = parse("[api]\nbase_url = \"ftp://cms.example.com\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut cfg = parse("[api]\nbase_url = \"http://localhost:4000\"\ntimeout_secs = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("admin-config-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = scratch_file("malformed", "[api\nbase_url = \"http://real-cms:4000\"\n");
        let err = AdminConfig::load_or_env(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("parsing"), "got {err:#}");
    }

    #[test]
    fn readable_file_is_used() {
        let path = scratch_file("valid", "[api]\nbase_url = \"http://real-cms:4000\"\n");
        let cfg = AdminConfig::load_or_env(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.api.base_url, "http://real-cms:4000");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("admin-config-does-not-exist.toml");
        let cfg = AdminConfig::load_or_env(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.routes.services, "/services");
        assert_eq!(cfg.api.timeout_secs, 30);
    }

    #[test]
    fn rejects_relative_route() {
        let mut cfg = parse(
            "[api]\nbase_url = \"http://localhost:4000\"\n[routes]\nservices = \"services\"\n",
        )
        .unwrap();
        let err = cfg.normalize_and_validate().unwrap_err();
        assert!(err.to_string().contains("routes.services"));
    }
}
