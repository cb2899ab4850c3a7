//! Saved searches loaded from `searches.yaml`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProfile {
    pub name: String,
    pub location: String,
    pub radius_miles: f64,
    pub place_types: Vec<String>,
    #[serde(default)]
    pub extract_emails: bool,
    #[serde(default)]
    pub skip_details: bool,
    pub output: Option<PathBuf>,
}

impl SearchProfile {
    /// Generate a URL-safe slug from the profile name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' || c == '_' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfilesFile {
    #[serde(default)]
    pub searches: Vec<SearchProfile>,
}

impl ProfilesFile {
    /// Looks a profile up by exact name or by slug.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SearchProfile> {
        let wanted = name.trim().to_lowercase();
        self.searches
            .iter()
            .find(|p| p.name.to_lowercase() == wanted || p.slug() == wanted)
    }
}

/// Load and validate saved searches from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profiles(path: &Path) -> Result<ProfilesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfilesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profiles: ProfilesFile = serde_yaml::from_str(&content)?;

    validate_profiles(&profiles)?;

    Ok(profiles)
}

fn validate_profiles(profiles: &ProfilesFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for profile in &profiles.searches {
        if profile.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search name must be non-empty".to_string(),
            ));
        }

        if profile.location.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "search '{}' has an empty location",
                profile.name
            )));
        }

        if !profile.radius_miles.is_finite() || profile.radius_miles <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "search '{}' has invalid radius {}; must be a positive number of miles",
                profile.name, profile.radius_miles
            )));
        }

        if profile.place_types.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "search '{}' must list at least one place type",
                profile.name
            )));
        }

        let slug = profile.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate search name: '{}' (slug '{}')",
                profile.name, slug
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;
