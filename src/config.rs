//! Runtime configuration read from the environment.
//!
//! `.env` in the working directory is loaded first (if present); real
//! environment variables take precedence over it.

use std::path::PathBuf;
use std::time::Duration;

use crate::session::{Role, DEFAULT_INACTIVITY_TIMEOUT};

/// Store location when `POISE_STORE` is unset.
pub const DEFAULT_STORE_DIR: &str = ".poise";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root directory of the settings store (`POISE_STORE`).
    pub store_root: PathBuf,
    /// Role the CLI acts as (`POISE_ROLE`).
    pub role: Role,
    /// Inactivity timeout for `poise session` (`POISE_SESSION_TIMEOUT_SECS`).
    pub session_timeout: Duration,
    /// When set, port interactions are recorded under this directory
    /// (`POISE_RECORD`).
    pub record_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from(DEFAULT_STORE_DIR),
            role: Role::Artist,
            session_timeout: DEFAULT_INACTIVITY_TIMEOUT,
            record_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads `.env` and reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let role = match non_empty("POISE_ROLE") {
            Some(raw) => raw.parse().map_err(|e| format!("POISE_ROLE: {e}"))?,
            None => defaults.role,
        };
        let session_timeout = match non_empty("POISE_SESSION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| format!("POISE_SESSION_TIMEOUT_SECS: {e}"))?;
                if secs == 0 {
                    return Err("POISE_SESSION_TIMEOUT_SECS must be positive".to_string());
                }
                Duration::from_secs(secs)
            }
            None => defaults.session_timeout,
        };

        Ok(Self {
            store_root: non_empty("POISE_STORE").map_or(defaults.store_root, PathBuf::from),
            role,
            session_timeout,
            record_dir: non_empty("POISE_RECORD").map(PathBuf::from),
        })
    }
}
