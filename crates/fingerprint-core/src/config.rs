use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ruby;

/// Name of the optional tool configuration file in the source root.
pub const CONFIG_FILE: &str = "fingerprint.toml";

/// fingerprint.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FingerprintConfig {
    #[serde(default)]
    pub ruby: RubySettings,
    #[serde(default)]
    pub probe: ProbeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubySettings {
    /// Base image for the generated Dockerfile
    #[serde(default = "default_base_image")]
    pub base_image: String,
    /// Version recommended when the app does not request one
    #[serde(default = "default_preferred_version")]
    pub preferred_version: String,
    /// Bundler gem version installed alongside a custom interpreter
    #[serde(default = "default_bundler_version")]
    pub bundler_version: String,
    /// Foreman gem version installed alongside a custom interpreter
    #[serde(default = "default_foreman_version")]
    pub foreman_version: String,
    /// Extra Gemfile version → rbenv version entries.
    /// Entries here take precedence over the built-in table.
    #[serde(default)]
    pub version_map: BTreeMap<String, String>,
    /// Extra gem → apt package entries.
    /// Entries here take precedence over the built-in table.
    #[serde(default)]
    pub gem_packages: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Bundler executable
    #[serde(default = "default_bundler")]
    pub bundler: String,
    /// Upper bound for every bundler invocation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RubySettings {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            preferred_version: default_preferred_version(),
            bundler_version: default_bundler_version(),
            foreman_version: default_foreman_version(),
            version_map: BTreeMap::new(),
            gem_packages: BTreeMap::new(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            bundler: default_bundler(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FingerprintConfig {
    /// Load from fingerprint.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

impl RubySettings {
    /// Map a requested version onto its rbenv name with patchlevel.
    ///
    /// Exact match only; unknown versions are returned unchanged.
    pub fn normalize_version(&self, version: &str) -> String {
        if let Some(mapped) = self.version_map.get(version) {
            return mapped.clone();
        }
        ruby::builtin_version(version)
            // arch-lint: allow(no-silent-result-drop) reason="Option lookup; an unmapped version passes through unchanged"
            .unwrap_or(version)
            .to_owned()
    }

    /// System packages a gem needs, or `None` for gems with no known requirements.
    pub fn packages_for_gem(&self, gem: &str) -> Option<Vec<String>> {
        if let Some(packages) = self.gem_packages.get(gem) {
            return Some(packages.clone());
        }
        ruby::builtin_packages(gem).map(|p| p.iter().map(|s| (*s).to_owned()).collect())
    }
}

fn default_base_image() -> String {
    "gcr.io/google_appengine/ruby".to_owned()
}

fn default_preferred_version() -> String {
    "2.3.0".to_owned()
}

fn default_bundler_version() -> String {
    "1.11.2".to_owned()
}

fn default_foreman_version() -> String {
    "0.78.0".to_owned()
}

fn default_bundler() -> String {
    "bundle".to_owned()
}

fn default_timeout_secs() -> u64 {
    60
}
