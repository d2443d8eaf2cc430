//! Locating installed package share directories.

use crate::error::{LaunchError, Result};
use crate::utils::path::{expand_tilde, parse_package_uri};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Resolves `package://` references to absolute paths.
///
/// Explicit entries (from `[share]` in the configuration) win; otherwise the
/// first install prefix holding `share/<package>` is used, the way an ament
/// workspace lays packages out.
#[derive(Debug, Clone, Default)]
pub struct ShareResolver {
    explicit: BTreeMap<String, PathBuf>,
    prefixes: Vec<PathBuf>,
}

impl ShareResolver {
    pub fn new(explicit: &BTreeMap<String, String>, prefixes: Vec<PathBuf>) -> Self {
        let explicit = explicit
            .iter()
            .map(|(package, dir)| {
                let path = expand_tilde(dir).unwrap_or_else(|| PathBuf::from(dir));
                (package.clone(), path)
            })
            .collect();
        Self { explicit, prefixes }
    }

    pub fn share_dir(&self, package: &str) -> Result<PathBuf> {
        if let Some(dir) = self.explicit.get(package) {
            return Ok(dir.clone());
        }

        self.prefixes
            .iter()
            .map(|prefix| prefix.join("share").join(package))
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| LaunchError::PackageNotFound(package.to_string()))
    }

    /// Resolve a `package://` reference; other values come back unchanged.
    pub fn resolve(&self, value: &str) -> Result<String> {
        let Some((package, relative)) = parse_package_uri(value) else {
            return Ok(value.to_string());
        };

        let dir = self.share_dir(package)?;
        let path = if relative.is_empty() {
            dir
        } else {
            dir.join(relative)
        };
        tracing::debug!(uri = value, path = %path.display(), "Resolved package path");
        Ok(path.to_string_lossy().to_string())
    }
}
