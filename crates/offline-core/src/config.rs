//! Deployment configuration for the delivery controller.

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A path could not be resolved against the scope.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The TOML input did not parse.
    #[error("configuration error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The shell asset list is empty.
    #[error("shell asset list is empty")]
    EmptyShell,
}

/// Deployment configuration: version, scope and the application shell.
///
/// The version string is the sole cache-invalidation mechanism. Bumping
/// it renames both cache namespaces; activation then evicts the old
/// ones wholesale.
///
/// The shell asset list is a fixed, ordered sequence of root-relative
/// paths known at deployment time: the root document, the primary
/// stylesheet, core scripts, the manifest descriptor and the icons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Deployment version stamped into cache namespace names.
    pub version: String,
    /// Origin this controller serves.
    pub scope: Url,
    /// Root-relative paths fetched into the static cache at install.
    pub shell_assets: Vec<String>,
    /// Document served when a navigation has no network and no cache entry.
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: String,
}

fn default_offline_fallback() -> String {
    "/index.html".to_string()
}

impl ShellConfig {
    /// Create a configuration for the given version and scope.
    pub fn new(version: impl Into<String>, scope: Url) -> Self {
        Self {
            version: version.into(),
            scope,
            shell_assets: Vec::new(),
            offline_fallback: default_offline_fallback(),
        }
    }

    /// Add a shell asset path.
    pub fn with_asset(mut self, path: impl Into<String>) -> Self {
        self.shell_assets.push(path.into());
        self
    }

    /// Add several shell asset paths.
    pub fn with_assets<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shell_assets.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the offline fallback document.
    pub fn with_offline_fallback(mut self, path: impl Into<String>) -> Self {
        self.offline_fallback = path.into();
        self
    }

    /// Parse a configuration from TOML.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        if config.shell_assets.is_empty() {
            return Err(ConfigError::EmptyShell);
        }
        Ok(config)
    }

    /// Absolute URL of a root-relative asset path.
    pub fn asset_url(&self, path: &str) -> Result<Url, ConfigError> {
        Ok(self.scope.join(path)?)
    }

    /// Origin this controller intercepts.
    pub fn origin(&self) -> url::Origin {
        self.scope.origin()
    }
}
