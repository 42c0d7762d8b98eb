use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Name of the declarative deployment descriptor.
pub const APP_YAML: &str = "app.yaml";

/// The subset of a pre-existing `app.yaml` the fingerprinter reads.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppInfo {
    pub runtime: Option<String>,
    pub env: Option<String>,
    pub entrypoint: Option<String>,
    #[serde(default)]
    pub vm: bool,
    pub vm_settings: Option<HashMap<String, String>>,
    pub beta_settings: Option<HashMap<String, String>>,
}

impl AppInfo {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load an app descriptor from an explicit path.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::AppYamlLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content).map_err(|e| crate::Error::AppYamlParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `app.yaml` from the source root, if present.
    pub fn find(root: &Path) -> crate::Result<Option<Self>> {
        let path = root.join(APP_YAML);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// The runtime the descriptor actually selects.
    ///
    /// `runtime: vm` defers to the `vm_runtime` key of `vm_settings`
    /// (or `beta_settings`).
    pub fn effective_runtime(&self) -> Option<&str> {
        let runtime = self.runtime.as_deref();
        if runtime == Some("vm") || (runtime.is_none() && self.vm) {
            return self
                .vm_settings
                .as_ref()
                .and_then(|s| s.get("vm_runtime"))
                .or_else(|| self.beta_settings.as_ref().and_then(|s| s.get("vm_runtime")))
                .map(String::as_str)
                .or(runtime);
        }
        runtime
    }

    /// The declared entrypoint; a blank value counts as absent.
    pub fn entrypoint(&self) -> Option<&str> {
        self.entrypoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}
