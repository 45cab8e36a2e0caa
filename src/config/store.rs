//! Data store configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Which adapter serves the per-user reads.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Direct PostgreSQL connection
    #[default]
    Postgres,
    /// PostgREST facade of the hosted store
    Rest,
}

/// Data store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// PostgreSQL connection URL (postgres backend)
    #[serde(default)]
    pub database_url: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Project URL, e.g. `https://<project>.supabase.co` (rest backend)
    #[serde(default)]
    pub rest_url: String,

    /// Service role key sent as `apikey` and bearer token (rest backend)
    pub service_key: Option<SecretString>,

    /// Per-request HTTP timeout in seconds (rest backend)
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl StoreConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get REST request timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate the settings of the selected backend
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match self.backend {
            StoreBackend::Postgres => self.validate_postgres(),
            StoreBackend::Rest => self.validate_rest(environment),
        }
    }

    fn validate_postgres(&self) -> Result<(), ValidationError> {
        if self.database_url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__DATABASE_URL"));
        }
        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }

    fn validate_rest(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.rest_url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__REST_URL"));
        }
        if !self.rest_url.starts_with("https://") && !self.rest_url.starts_with("http://") {
            return Err(ValidationError::InvalidRestUrl);
        }
        if *environment == Environment::Production && !self.rest_url.starts_with("https://") {
            return Err(ValidationError::RestUrlMustBeHttps);
        }
        if self.service_key.is_none() {
            return Err(ValidationError::MissingRequired("STORE__SERVICE_KEY"));
        }
        if self.http_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            rest_url: String::new(),
            service_key: None,
            http_timeout_secs: default_http_timeout(),
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_http_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres() -> StoreConfig {
        StoreConfig {
            database_url: "postgresql://resonance@localhost/resonance".to_string(),
            ..Default::default()
        }
    }

    fn rest() -> StoreConfig {
        StoreConfig {
            backend: StoreBackend::Rest,
            rest_url: "https://project.supabase.co".to_string(),
            service_key: Some(SecretString::new("service-key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Postgres);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_valid_postgres_config() {
        assert!(postgres().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let config = StoreConfig::default();
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_postgres_rejects_other_schemes() {
        let config = StoreConfig {
            database_url: "mysql://localhost/db".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn test_pool_size_constraints() {
        let config = StoreConfig {
            min_connections: 20,
            max_connections: 5,
            ..postgres()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidPoolSize)
        ));

        let config = StoreConfig {
            max_connections: 500,
            ..postgres()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::PoolSizeTooLarge)
        ));
    }

    #[test]
    fn test_valid_rest_config() {
        assert!(rest().validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_rest_requires_service_key() {
        let config = StoreConfig {
            service_key: None,
            ..rest()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("STORE__SERVICE_KEY"))
        ));
    }

    #[test]
    fn test_rest_requires_https_in_production() {
        let config = StoreConfig {
            rest_url: "http://localhost:54321".to_string(),
            ..rest()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::RestUrlMustBeHttps)
        ));
    }

    #[test]
    fn test_backend_ignores_other_backend_settings() {
        // A REST deployment does not need a database URL.
        let config = rest();
        assert!(config.database_url.is_empty());
        assert!(config.validate(&Environment::Development).is_ok());
    }
}
