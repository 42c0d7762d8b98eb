use std::collections::BTreeSet;
use std::path::Path;

use fingerprint_build::RubyConfigurator;
use fingerprint_core::ruby::{
    ALLOWED_RUNTIME_NAMES, CONFIG_RU, ENTRYPOINT_FOREMAN, ENTRYPOINT_PUMA, ENTRYPOINT_RACKUP,
    ENTRYPOINT_UNICORN, GEMFILE, PROCFILE, RUNTIME_NAME,
};
use fingerprint_core::{
    DetectionInput, Entrypoint, Notifier, Notify, RubySettings, RuntimeDecision,
};
use fingerprint_probe::{BundlerProbe, CommandRunner, RealRunner};

use crate::error::FingerprintError;
use crate::prompt::{NonInteractive, Prompter};

const GOT_RUBY_MESSAGE: &str = "This looks like a Ruby application.";

/// Decides how a Ruby app should be deployed.
///
/// Collaborators are injected: bundler access through the probe's runner,
/// the console through `P`, and user-facing notices through `N`.
pub struct RubyFingerprinter<
    E: CommandRunner = RealRunner,
    P: Prompter = NonInteractive,
    N: Notify = Notifier,
> {
    probe: BundlerProbe<E>,
    prompter: P,
    status: N,
    settings: RubySettings,
}

impl<E: CommandRunner, P: Prompter, N: Notify> RubyFingerprinter<E, P, N> {
    pub fn new(probe: BundlerProbe<E>, prompter: P, status: N, settings: RubySettings) -> Self {
        Self {
            probe,
            prompter,
            status,
            settings,
        }
    }

    /// Fingerprint the app and build a configurator for it.
    ///
    /// Returns `None` when the source tree is not a Ruby app. `notify`
    /// receives the configurator's write notices.
    pub async fn fingerprint<M: Notify>(
        &self,
        input: &DetectionInput,
        notify: M,
    ) -> Result<Option<RubyConfigurator<M>>, FingerprintError> {
        let Some(decision) = self.decide(input).await? else {
            return Ok(None);
        };
        Ok(Some(RubyConfigurator::new(
            input,
            decision,
            self.settings.clone(),
            notify,
        )))
    }

    /// Resolve interpreter, entrypoint, and packages without rendering anything.
    pub async fn decide(
        &self,
        input: &DetectionInput,
    ) -> Result<Option<RuntimeDecision>, FingerprintError> {
        if let Some(runtime) = input.declared_runtime() {
            if !ALLOWED_RUNTIME_NAMES.contains(&runtime) {
                tracing::debug!(runtime, "app.yaml selects another runtime, skipping Ruby");
                return Ok(None);
            }
        }

        if !self.check_for_ruby_runtime(input)? {
            return Ok(None);
        }

        let snapshot = self
            .probe
            .snapshot(&input.root, &self.settings, &self.status)
            .await?;
        let packages = detect_needed_packages(&snapshot.gems, &self.settings);

        let entrypoint = match input.declared_entrypoint().and_then(Entrypoint::new) {
            Some(entrypoint) => entrypoint,
            None => {
                let default = detect_default_entrypoint(&input.root, &snapshot.gems);
                self.choose_entrypoint(default, input.appinfo.is_some())?
            }
        };

        tracing::info!(
            ruby = ?snapshot.ruby_version,
            %entrypoint,
            ?packages,
            "resolved Ruby runtime"
        );

        Ok(Some(RuntimeDecision {
            ruby_version: snapshot.ruby_version,
            entrypoint,
            packages,
        }))
    }

    /// Whether to treat the app as `runtime: ruby`.
    ///
    /// Honors the app.yaml runtime; otherwise looks for a Gemfile and
    /// confirms with the user when possible.
    pub fn check_for_ruby_runtime(&self, input: &DetectionInput) -> Result<bool, FingerprintError> {
        if input.declared_runtime() == Some(RUNTIME_NAME) {
            return Ok(true);
        }

        tracing::info!("Checking for Ruby.");

        if !input.root.join(GEMFILE).is_file() {
            return Ok(false);
        }

        if self.prompter.can_prompt() {
            self.prompter
                .confirm(GOT_RUBY_MESSAGE, "Proceed to configure deployment for Ruby?")
                .map_err(|e| FingerprintError::Prompt { source: e })
        } else {
            tracing::info!("{GOT_RUBY_MESSAGE}");
            Ok(true)
        }
    }

    /// Settle on an entrypoint when app.yaml does not name one.
    pub fn choose_entrypoint(
        &self,
        default: Option<&str>,
        has_appinfo: bool,
    ) -> Result<Entrypoint, FingerprintError> {
        if !self.prompter.can_prompt() {
            let entrypoint = default
                .and_then(Entrypoint::new)
                .ok_or(FingerprintError::NonInteractiveAmbiguity)?;
            self.status
                .notify(&format!("\nUsing default entrypoint [{entrypoint}]."));
            return Ok(entrypoint);
        }

        let question = match default {
            Some(default) => format!(
                "\nPlease enter the command to run this Ruby app in production, or leave blank \
                 to accept the default:\n[{default}] "
            ),
            None => "\nPlease enter the command to run this Ruby app in production: ".to_owned(),
        };
        let answer = self
            .prompter
            .ask(&question)
            .map_err(|e| FingerprintError::Prompt { source: e })?;

        let entrypoint = Entrypoint::new(&answer)
            .or_else(|| default.and_then(Entrypoint::new))
            .ok_or(FingerprintError::MissingEntrypoint)?;

        if has_appinfo {
            // TODO: offer to add the entrypoint to the existing app.yaml.
            self.status.notify(&format!(
                "\nTo avoid being asked for an entrypoint in the future, please add it to your \
                 app.yaml. e.g.\n  entrypoint: {entrypoint}"
            ));
        }
        Ok(entrypoint)
    }
}

/// The app server command implied by the source tree, if any.
///
/// A Procfile wins, then the puma and unicorn gems, then a rackup file.
pub fn detect_default_entrypoint(root: &Path, gems: &[String]) -> Option<&'static str> {
    if root.join(PROCFILE).is_file() {
        return Some(ENTRYPOINT_FOREMAN);
    }

    let has_gem = |name: &str| gems.iter().any(|g| g == name);
    if has_gem("puma") {
        return Some(ENTRYPOINT_PUMA);
    }
    if has_gem("unicorn") {
        return Some(ENTRYPOINT_UNICORN);
    }

    if root.join(CONFIG_RU).is_file() {
        return Some(ENTRYPOINT_RACKUP);
    }

    None
}

/// Extra apt packages required by the given gems.
pub fn detect_needed_packages(gems: &[String], settings: &RubySettings) -> BTreeSet<String> {
    gems.iter()
        .filter_map(|gem| settings.packages_for_gem(gem))
        .flatten()
        .collect()
}
