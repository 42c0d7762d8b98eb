use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fingerprint_core::ruby::{GEMFILE, GEMFILE_LOCK, RUBY_VERSION_FILE};
use fingerprint_core::{Notify, ProbeSettings, RubySettings};
use regex::Regex;

use crate::runner::{CommandRunner, RealRunner, RunnerError};

static PLATFORM_RUBY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ruby (\d+\.\d+(\.\d+)?)").expect("valid regex"));

static BUNDLE_LIST_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\s+(\S+)\s+\(").expect("valid regex"));

const BUNDLER_MISSING_NOTICE: &str = "\nNOTICE: fingerprint could not run bundler in your local \
environment, and so its ability to determine your application's requirements will be limited. \
We will still attempt to configure your application, but if it has trouble starting up due to \
missing requirements, we recommend installing bundler by running [gem install bundler]";

const LOCKFILE_MISSING_NOTICE: &str = "\nNOTICE: We could not find a Gemfile.lock, which \
suggests this application has not been tested locally, or the Gemfile.lock has not been \
committed to source control. Bundler has created a Gemfile.lock for you, but it is recommended \
that you verify it yourself (by installing your bundle and testing locally) to ensure that the \
gems we deploy are the same as those you tested.";

/// What bundler told us about the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySnapshot {
    pub bundler_available: bool,
    /// Gem names in `bundle list` order
    pub gems: Vec<String>,
    /// Requested interpreter, already normalized; `None` keeps the runtime default.
    pub ruby_version: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Gemfile is required for Ruby runtime — create {} listing your gems", path.display())]
    MissingManifest { path: PathBuf },

    #[error("your bundle is not up-to-date — install missing gems with 'bundle install'")]
    StaleDependencyLock,

    #[error("unable to run [{command}] — fix the error below and retry")]
    Subprocess {
        command: String,
        source: RunnerError,
    },
}

/// Bundler probes, parameterized over the runner for testability.
pub struct BundlerProbe<E: CommandRunner = RealRunner> {
    pub(crate) runner: E,
}

impl BundlerProbe<RealRunner> {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            runner: RealRunner::from_settings(settings),
        }
    }
}

impl<E: CommandRunner> BundlerProbe<E> {
    pub fn with_runner(runner: E) -> Self {
        Self { runner }
    }

    /// Run every probe in order and collect the results.
    pub async fn snapshot(
        &self,
        root: &Path,
        ruby: &RubySettings,
        status: &dyn Notify,
    ) -> Result<DependencySnapshot, ProbeError> {
        let mut snapshot = self.check_environment(root, status).await?;
        snapshot.gems = self.detect_gems(root, &snapshot, status).await?;
        snapshot.ruby_version = self
            .detect_ruby_interpreter(root, &snapshot, ruby, status)
            .await?;
        Ok(snapshot)
    }

    // ── Environment ──

    /// Check that the app has a Gemfile and whether bundler can be used.
    ///
    /// The returned snapshot only carries `bundler_available`.
    pub async fn check_environment(
        &self,
        root: &Path,
        status: &dyn Notify,
    ) -> Result<DependencySnapshot, ProbeError> {
        let gemfile = root.join(GEMFILE);
        if !gemfile.is_file() {
            return Err(ProbeError::MissingManifest { path: gemfile });
        }

        let lock_present = root.join(GEMFILE_LOCK).is_file();
        let bundler_available = self.succeeds(root, args(["version"])).await
            && self.bundle_is_current(root).await?;

        if !bundler_available {
            status.notify(BUNDLER_MISSING_NOTICE);
        } else if !lock_present {
            status.notify(LOCKFILE_MISSING_NOTICE);
        }

        Ok(DependencySnapshot {
            bundler_available,
            ..Default::default()
        })
    }

    // ── Gems ──

    /// List the gems in the bundle; empty when bundler is unavailable.
    pub async fn detect_gems(
        &self,
        root: &Path,
        snapshot: &DependencySnapshot,
        status: &dyn Notify,
    ) -> Result<Vec<String>, ProbeError> {
        if !snapshot.bundler_available {
            return Ok(Vec::new());
        }

        let Some(output) = self.required_output(root, args(["list"]), status).await? else {
            return Ok(Vec::new());
        };

        Ok(parse_bundle_list(&output))
    }

    // ── Interpreter ──

    /// Determine the interpreter version requested by the app.
    ///
    /// Tries `bundle platform --ruby` first, then `.ruby-version`. Returns
    /// `None` to keep the base image default.
    pub async fn detect_ruby_interpreter(
        &self,
        root: &Path,
        snapshot: &DependencySnapshot,
        ruby: &RubySettings,
        status: &dyn Notify,
    ) -> Result<Option<String>, ProbeError> {
        if snapshot.bundler_available {
            let platform = self
                .required_output(root, args(["platform", "--ruby"]), status)
                .await?;
            if let Some(platform) = platform {
                match parse_platform(&platform) {
                    Platform::Ruby(version) => {
                        let version = ruby.normalize_version(version);
                        status.notify(&format!(
                            "\nUsing Ruby {version} as requested in the Gemfile."
                        ));
                        return Ok(Some(version));
                    }
                    Platform::Unspecified => {}
                    Platform::Unrecognized => {
                        status.notify(&format!(
                            "Unrecognized platform in Gemfile: [{}]",
                            platform.trim()
                        ));
                    }
                }
            }
        }

        if let Some(version) = read_version_file(root, status) {
            let version = ruby.normalize_version(&version);
            status.notify(&format!(
                "\nUsing Ruby {version} as requested in the .ruby-version file"
            ));
            return Ok(Some(version));
        }

        status.notify(&format!(
            "\nNOTICE: We will deploy your application using a recent version of the standard \
             \"MRI\" Ruby runtime by default. If you want to use a specific Ruby runtime, you can \
             create a \".ruby-version\" file in this directory. (For best performance, we \
             recommend MRI version {}.)",
            ruby.preferred_version
        ));
        Ok(None)
    }

    // ── Helpers ──

    pub(crate) async fn succeeds(&self, root: &Path, args: Vec<String>) -> bool {
        match self.runner.exec_check(root, &args).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, ?args, "bundler probe failed");
                false
            }
        }
    }

    /// `bundle check`: a non-zero exit means the lock is stale. Any other
    /// failure (timeout, vanished binary) counts as bundler being unavailable.
    async fn bundle_is_current(&self, root: &Path) -> Result<bool, ProbeError> {
        match self.runner.exec_check(root, &args(["check"])).await {
            Ok(()) => Ok(true),
            Err(RunnerError::CommandFailed { stderr, .. }) => {
                tracing::debug!(%stderr, "bundle check failed");
                Err(ProbeError::StaleDependencyLock)
            }
            Err(e) => {
                tracing::warn!(error = %e, "bundle check did not complete");
                Ok(false)
            }
        }
    }

    /// Output of a command that must succeed once bundler is known to work.
    ///
    /// Timeouts and unreadable output degrade to `None`; any other failure
    /// is fatal.
    async fn required_output(
        &self,
        root: &Path,
        args: Vec<String>,
        status: &dyn Notify,
    ) -> Result<Option<String>, ProbeError> {
        match self.runner.exec(root, &args).await {
            Ok(output) => Ok(Some(output)),
            Err(e @ (RunnerError::TimedOut { .. } | RunnerError::InvalidUtf8 { .. })) => {
                status.notify(&format!("WARNING: {e}; continuing without it."));
                Ok(None)
            }
            Err(e) => Err(ProbeError::Subprocess {
                command: format!("bundle {}", args.join(" ")),
                source: e,
            }),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Platform<'a> {
    Ruby(&'a str),
    Unspecified,
    Unrecognized,
}

fn parse_platform(output: &str) -> Platform<'_> {
    if output.starts_with("No ") {
        return Platform::Unspecified;
    }
    match PLATFORM_RUBY.captures(output).and_then(|c| c.get(1)) {
        Some(version) => Platform::Ruby(version.as_str()),
        None => Platform::Unrecognized,
    }
}

fn parse_bundle_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| BUNDLE_LIST_ENTRY.captures(line))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Trimmed contents of `.ruby-version`; an unreadable file is reported and skipped.
fn read_version_file(root: &Path, status: &dyn Notify) -> Option<String> {
    let path = root.join(RUBY_VERSION_FILE);
    if !path.is_file() {
        return None;
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let version = content.trim();
            (!version.is_empty()).then(|| version.to_owned())
        }
        Err(e) => {
            status.notify(&format!(
                "WARNING: could not read {}: {e}; ignoring it.",
                path.display()
            ));
            None
        }
    }
}

pub(crate) fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_with_patchlevel() {
        assert_eq!(parse_platform("ruby 2.0.0p645\n"), Platform::Ruby("2.0.0"));
        assert_eq!(parse_platform("ruby 2.2\n"), Platform::Ruby("2.2"));
    }

    #[test]
    fn platform_unspecified() {
        assert_eq!(
            parse_platform("No ruby version specified\n"),
            Platform::Unspecified
        );
    }

    #[test]
    fn platform_unrecognized() {
        assert_eq!(
            parse_platform("jruby 9.0.4.0\n"),
            Platform::Unrecognized
        );
    }

    #[test]
    fn bundle_list_extracts_names() {
        let output = "Gems included by the bundle:\n  * puma (2.15.3)\n  * rack (1.6.4)\n  * rgeo (0.4.0)\nUse `bundle show [gemname]` to see where a bundled gem is installed.\n";
        assert_eq!(parse_bundle_list(output), vec!["puma", "rack", "rgeo"]);
    }
}
