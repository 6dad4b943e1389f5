//! Configuration for connecting to a Jitbit Helpdesk instance.
//!
//! Settings come either from explicit values ([`Config::new`]) or from
//! environment variables ([`Config::from_env`]), and are validated before
//! a client is built from them.

use std::env;
use std::fmt;

use url::Url;

use crate::error::JitbitError;

/// Environment variable holding the helpdesk base URL.
pub const ENV_URL: &str = "JITBIT_URL";
/// Environment variable holding the account username.
pub const ENV_USERNAME: &str = "JITBIT_USERNAME";
/// Environment variable holding the account password.
pub const ENV_PASSWORD: &str = "JITBIT_PASSWORD";

/// Connection settings: base URL plus the Basic auth credential pair.
///
/// The password is never printed; `Debug` redacts it.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the helpdesk (e.g., `https://support.example.com`),
    /// without trailing slash or `/api` suffix.
    pub base_url: String,

    /// Account username.
    pub username: String,

    /// Account password.
    /// This value must never be logged or included in error messages.
    password: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Builds a validated configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Config` if the URL is not an absolute
    /// http(s) URL or the username is blank.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, JitbitError> {
        let base_url = Self::validate_base_url(base_url.into())?;
        let username = username.into();
        if username.trim().is_empty() {
            return Err(JitbitError::invalid_config("username must not be empty"));
        }

        Ok(Config {
            base_url,
            username,
            password: password.into(),
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `JITBIT_URL`: base URL of the helpdesk
    /// - `JITBIT_USERNAME`: account username
    /// - `JITBIT_PASSWORD`: account password
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Config` if any variable is missing or invalid.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, JitbitError> {
        let base_url = Self::get_required_env(ENV_URL)?;
        let username = Self::get_required_env(ENV_USERNAME)?;
        let password = Self::get_required_env(ENV_PASSWORD)?;

        Self::new(base_url, username, password)
    }

    /// The account password. Only for building the Authorization header.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, JitbitError> {
        env::var(name)
            .map_err(|_| JitbitError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(JitbitError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    ///
    /// Strips trailing slashes and a trailing `/api` segment, since endpoint
    /// paths are always appended as `/api/<Endpoint>`.
    fn validate_base_url(url: String) -> Result<String, JitbitError> {
        let url = url.trim().trim_end_matches('/');
        let url = url.strip_suffix("/api").unwrap_or(url).to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(JitbitError::invalid_config(format!(
                "{} must start with http:// or https://",
                ENV_URL
            )));
        }

        let parsed = Url::parse(&url)
            .map_err(|e| JitbitError::invalid_config(format!("invalid {}: {}", ENV_URL, e)))?;
        if parsed.host().is_none() {
            return Err(JitbitError::invalid_config(format!(
                "{} must include a host",
                ENV_URL
            )));
        }

        Ok(url)
    }
}
