//! CODEOWNERS resolution
//!
//! Reads the ownership file from the locations GitHub recognises and
//! collects every `@username` mentioned in them.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Candidate CODEOWNERS locations, in lookup order
pub const CODEOWNERS_PATHS: [&str; 3] = ["CODEOWNERS", "docs/CODEOWNERS", ".github/CODEOWNERS"];

/// `@login`: alphanumerics with single hyphens between them
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9]){0,38})").expect("valid regex")
});

/// Canonical form used for every login comparison
pub fn normalize_login(login: &str) -> String {
    login.to_lowercase()
}

/// Set of owner logins, deduplicated case-insensitively
///
/// The spelling of the first occurrence is kept for display. An empty set
/// means the repository has no ownership policy at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codeowners {
    by_key: BTreeMap<String, String>,
}

impl Codeowners {
    /// Empty set ("no ownership policy")
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a login; later spellings of a known login are ignored
    pub fn insert(&mut self, login: &str) {
        self.by_key
            .entry(normalize_login(login))
            .or_insert_with(|| login.to_string());
    }

    /// Case-insensitive membership test
    pub fn contains(&self, login: &str) -> bool {
        self.by_key.contains_key(&normalize_login(login))
    }

    /// Whether no owners were found
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Number of distinct owners
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Logins as first spelled
    pub fn logins(&self) -> impl Iterator<Item = &str> {
        self.by_key.values().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Codeowners {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut owners = Self::new();
        for login in iter {
            owners.insert(login.as_ref());
        }
        owners
    }
}

/// Every `@username` in a CODEOWNERS body, without the `@`
pub fn extract_usernames(content: &str) -> Vec<&str> {
    USERNAME_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Collect owners from every CODEOWNERS file present in the repository
///
/// A missing file is skipped; any other error aborts resolution.
pub async fn resolve_codeowners(platform: &dyn PlatformService) -> Result<Codeowners> {
    let mut owners = Codeowners::new();

    for path in CODEOWNERS_PATHS {
        let bytes = match platform.get_file_content(path).await {
            Ok(bytes) => bytes,
            Err(Error::NotFound(_)) => {
                debug!(path, "no CODEOWNERS file");
                continue;
            }
            Err(e) => return Err(e),
        };

        let content = String::from_utf8(bytes).map_err(|e| Error::Codeowners {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let found = extract_usernames(&content);
        debug!(path, count = found.len(), "read CODEOWNERS file");
        for login in found {
            owners.insert(login);
        }
    }

    debug!(owners = owners.len(), "resolved CODEOWNERS");
    Ok(owners)
}
