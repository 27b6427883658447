//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::common::ConfigError;
use crate::site::DEFAULT_ROTATION_MS;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BackendKind {
    Http,
    Postgres,
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Http => "http",
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        })
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid {
                name: "ENTITY_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub backend: BackendKind,
    pub entity_api_url: Option<String>,
    pub entity_api_token: Option<String>,
    pub database_url: Option<String>,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub rotation_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let entity_api_url = var("ENTITY_API_URL");
        let database_url = var("DATABASE_URL");

        let backend = match var("ENTITY_BACKEND") {
            Some(v) => v.parse::<BackendKind>()?,
            None if entity_api_url.is_some() => BackendKind::Http,
            None if database_url.is_some() => BackendKind::Postgres,
            None => BackendKind::Memory,
        };

        match backend {
            BackendKind::Http if entity_api_url.is_none() => {
                return Err(ConfigError::Missing {
                    name: "ENTITY_API_URL",
                    backend: backend.to_string(),
                })
            }
            BackendKind::Postgres if database_url.is_none() => {
                return Err(ConfigError::Missing {
                    name: "DATABASE_URL",
                    backend: backend.to_string(),
                })
            }
            _ => {}
        }

        let rotation_ms = match var("BANNER_ROTATION_MS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid {
                    name: "BANNER_ROTATION_MS",
                    value: v,
                })?,
            None => DEFAULT_ROTATION_MS,
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            backend,
            entity_api_url,
            entity_api_token: var("ENTITY_API_TOKEN"),
            database_url,
            upload_dir: var("UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string()).into(),
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "./static".to_string()).into(),
            rotation_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_use_memory_backend() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.backend, BackendKind::Memory);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.rotation_ms, 3000);
        assert_eq!(cfg.upload_dir, PathBuf::from("./uploads"));
    }

    #[test]
    fn test_backend_is_inferred_from_urls() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/pn")]).unwrap();
        assert_eq!(cfg.backend, BackendKind::Postgres);

        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/pn"),
            ("ENTITY_API_URL", "https://api.example.com"),
        ])
        .unwrap();
        assert_eq!(cfg.backend, BackendKind::Http);
    }

    #[test]
    fn test_explicit_backend_requires_its_url() {
        let err = config(&[("ENTITY_BACKEND", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { name: "DATABASE_URL", .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            config(&[("ENTITY_BACKEND", "mongo")]),
            Err(ConfigError::Invalid { name: "ENTITY_BACKEND", .. })
        ));
        assert!(matches!(
            config(&[("BANNER_ROTATION_MS", "0")]),
            Err(ConfigError::Invalid { name: "BANNER_ROTATION_MS", .. })
        ));
    }
}
