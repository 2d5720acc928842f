//! Settings loaded from `config.toml`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the user's config dir.
const CONFIG_DIR: &str = "merge-candidate";

/// Filename for settings.
const CONFIG_FILE: &str = "config.toml";

/// GitHub caps `per_page` at 100.
const MAX_PAGE_SIZE: u8 = 100;

/// Tunables for talking to GitHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// API base URL for GitHub Enterprise (None = api.github.com)
    pub api_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of pull requests fetched concurrently
    pub concurrency: usize,
    /// Page size for paginated listings
    pub per_page: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: 30,
            concurrency: 4,
            per_page: MAX_PAGE_SIZE,
        }
    }
}

impl Settings {
    /// Per-request timeout
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Page size clamped to what GitHub accepts
    pub fn page_size(&self) -> u8 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    fn validate(self) -> Result<Self> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".to_string()));
        }
        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be greater than 0".to_string()));
        }
        Ok(self)
    }
}

/// Default location of the settings file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load settings.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is used and a missing file yields [`Settings::default`].
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(Settings::default()),
        },
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!("{} does not exist", path.display())));
        }
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    parse_settings(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Parse settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(content).map_err(|e| Error::Config(e.message().to_string()))?;
    settings.validate()
}
