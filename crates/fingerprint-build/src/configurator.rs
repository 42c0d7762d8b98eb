use std::path::{Path, PathBuf};

use fingerprint_core::appinfo::APP_YAML;
use fingerprint_core::ruby::{CUSTOM_RUNTIME_NAME, RUNTIME_NAME};
use fingerprint_core::{DetectionInput, Notify, RubySettings, RuntimeDecision};

use crate::dockerfile::DockerfileGenerator;
use crate::generated::{GeneratedFile, WriteError};

pub const DOCKERFILE: &str = "Dockerfile";
pub const DOCKERIGNORE: &str = ".dockerignore";

const DOCKERIGNORE_CONTENTS: &str = ".dockerignore
Dockerfile
.git
.hg
.svn
";

/// Render the `app.yaml` for a flexible environment app.
pub fn render_app_yaml(runtime: &str, entrypoint: &str) -> String {
    format!("env: flex\nruntime: {runtime}\nentrypoint: {entrypoint}\n")
}

/// Generates config files for a fingerprinted Ruby app.
pub struct RubyConfigurator<N: Notify> {
    root: PathBuf,
    has_appinfo: bool,
    custom: bool,
    deploy: bool,
    decision: RuntimeDecision,
    settings: RubySettings,
    notify: N,
}

impl<N: Notify> RubyConfigurator<N> {
    pub fn new(
        input: &DetectionInput,
        decision: RuntimeDecision,
        settings: RubySettings,
        notify: N,
    ) -> Self {
        Self {
            root: input.root.clone(),
            has_appinfo: input.appinfo.is_some(),
            custom: input.custom,
            deploy: input.deploy,
            decision,
            settings,
            notify,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn decision(&self) -> &RuntimeDecision {
        &self.decision
    }

    /// Write every config file that does not exist yet.
    ///
    /// Returns whether anything was written.
    pub fn generate_configs(&self) -> Result<bool, WriteError> {
        let mut all_config_files = Vec::new();
        if let Some(app_yaml) = self.app_yaml() {
            all_config_files.push(app_yaml);
        }
        all_config_files.extend(self.container_files());

        let mut created = false;
        for file in &all_config_files {
            created |= file.write_to(&self.root, &self.notify)?;
        }

        if !created {
            self.notify
                .notify("All config files already exist. No files generated.");
        }
        Ok(created)
    }

    /// Write `app.yaml` if needed and hand back the container files that
    /// are missing on disk, without writing them.
    pub fn generate_config_data(&self) -> Result<Vec<GeneratedFile>, WriteError> {
        if let Some(app_yaml) = self.app_yaml() {
            app_yaml.write_to(&self.root, &self.notify)?;
        }

        Ok(self
            .container_files()
            .into_iter()
            .filter(|f| !f.exists_in(&self.root))
            .collect())
    }

    /// Every file [`generate_configs`](Self::generate_configs) would write.
    pub fn pending_files(&self) -> Vec<GeneratedFile> {
        self.app_yaml()
            .into_iter()
            .chain(self.container_files())
            .filter(|f| !f.exists_in(&self.root))
            .collect()
    }

    fn app_yaml(&self) -> Option<GeneratedFile> {
        if self.has_appinfo {
            return None;
        }
        let runtime = if self.custom {
            CUSTOM_RUNTIME_NAME
        } else {
            RUNTIME_NAME
        };
        Some(GeneratedFile::new(
            APP_YAML,
            render_app_yaml(runtime, self.decision.entrypoint.as_str()),
        ))
    }

    fn container_files(&self) -> Vec<GeneratedFile> {
        if !(self.custom || self.deploy) {
            return Vec::new();
        }
        let dockerfile = DockerfileGenerator::new(&self.settings, &self.decision).render();
        vec![
            GeneratedFile::new(DOCKERFILE, dockerfile),
            GeneratedFile::new(DOCKERIGNORE, DOCKERIGNORE_CONTENTS),
        ]
    }
}
