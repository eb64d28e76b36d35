//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PAQUEXPRESS_*` environment variables, or
//! a configuration file, in that order of precedence.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/paquexpress";

/// Server, datastore, and token settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PAQUEXPRESS")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Directory proof photos are written to.
    pub uploads_dir: Option<PathBuf>,
    /// HMAC secret for signing bearer tokens. Required in release builds.
    pub token_secret: Option<String>,
    /// Token lifetime in minutes.
    #[ortho_config(default = 60)]
    pub token_ttl_minutes: i64,
    /// Maximum database connections in the pool.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
}

impl AppSettings {
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    /// Resolve the token signing secret.
    ///
    /// Release builds refuse to start without one; debug builds fall back
    /// to an ephemeral secret so local runs need no setup, at the cost of
    /// tokens not surviving a restart.
    pub fn token_secret(&self) -> Result<String, MissingTokenSecret> {
        if let Some(secret) = &self.token_secret {
            return Ok(secret.clone());
        }
        if cfg!(debug_assertions) {
            warn!("using ephemeral token secret (dev only); tokens will not survive restarts");
            return Ok(uuid::Uuid::new_v4().to_string());
        }
        Err(MissingTokenSecret)
    }
}

/// No token secret was configured in a release build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("PAQUEXPRESS_TOKEN_SECRET must be set")]
pub struct MissingTokenSecret;

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and fallbacks.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PAQUEXPRESS_DATABASE_URL", None::<String>),
            ("PAQUEXPRESS_BIND_ADDR", None::<String>),
            ("PAQUEXPRESS_UPLOADS_DIR", None::<String>),
            ("PAQUEXPRESS_TOKEN_SECRET", None::<String>),
            ("PAQUEXPRESS_TOKEN_TTL_MINUTES", None::<String>),
            ("PAQUEXPRESS_DB_POOL_SIZE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.uploads_dir(), PathBuf::from(DEFAULT_UPLOADS_DIR));
        assert_eq!(settings.token_ttl_minutes, 60);
        assert_eq!(settings.db_pool_size, 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "PAQUEXPRESS_DATABASE_URL",
                Some("postgres://db/px".to_owned()),
            ),
            ("PAQUEXPRESS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("PAQUEXPRESS_UPLOADS_DIR", Some("/srv/uploads".to_owned())),
            ("PAQUEXPRESS_TOKEN_SECRET", Some("s3cret".to_owned())),
            ("PAQUEXPRESS_TOKEN_TTL_MINUTES", Some("15".to_owned())),
            ("PAQUEXPRESS_DB_POOL_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), "postgres://db/px");
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(settings.uploads_dir(), PathBuf::from("/srv/uploads"));
        assert_eq!(settings.token_secret().expect("secret"), "s3cret");
        assert_eq!(settings.token_ttl_minutes, 15);
        assert_eq!(settings.db_pool_size, 4);
    }

    #[rstest]
    fn configured_secret_is_returned_verbatim() {
        let _guard = lock_env([("PAQUEXPRESS_TOKEN_SECRET", Some("stable".to_owned()))]);
        let settings = load_from_empty_args();
        assert_eq!(settings.token_secret().expect("secret"), "stable");
    }
}
