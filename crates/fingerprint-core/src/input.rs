use std::path::PathBuf;

use crate::AppInfo;

/// What the caller knows before fingerprinting starts.
#[derive(Debug, Clone, Default)]
pub struct DetectionInput {
    /// Root of the application source tree
    pub root: PathBuf,
    /// Pre-existing `app.yaml`, if any
    pub appinfo: Option<AppInfo>,
    /// Generate a Dockerfile for a custom runtime
    pub custom: bool,
    /// Configuration is being produced as part of a deploy
    pub deploy: bool,
}

impl DetectionInput {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_appinfo(mut self, appinfo: Option<AppInfo>) -> Self {
        self.appinfo = appinfo;
        self
    }

    pub fn custom(mut self, custom: bool) -> Self {
        self.custom = custom;
        self
    }

    pub fn deploy(mut self, deploy: bool) -> Self {
        self.deploy = deploy;
        self
    }

    pub fn declared_runtime(&self) -> Option<&str> {
        self.appinfo.as_ref().and_then(AppInfo::effective_runtime)
    }

    pub fn declared_entrypoint(&self) -> Option<&str> {
        self.appinfo.as_ref().and_then(AppInfo::entrypoint)
    }
}
