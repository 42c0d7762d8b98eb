use std::fmt;
use std::path::Path;

use fingerprint_core::ruby::{GEMFILE, GEMFILE_LOCK, RUBY_VERSION_FILE};

use crate::probe::{BundlerProbe, args};
use crate::runner::CommandRunner;

impl<E: CommandRunner> BundlerProbe<E> {
    /// Run all diagnostic checks without early return.
    /// Returns a report with pass/fail for each check item.
    pub async fn doctor(&self, root: &Path) -> DoctorReport {
        let mut report = DoctorReport::default();

        // 1. Gemfile
        report.gemfile = if root.join(GEMFILE).is_file() {
            CheckResult::ok("Found")
        } else {
            CheckResult::fail("Not found — a Ruby app needs a Gemfile")
        };

        // 2. Gemfile.lock
        report.gemfile_lock = if root.join(GEMFILE_LOCK).is_file() {
            CheckResult::ok("Found")
        } else {
            CheckResult::fail("Not found — run: bundle install")
        };

        // 3. bundler
        match self.runner.exec(root, &args(["version"])).await {
            Ok(v) => {
                // "Bundler version 1.11.2"
                let version = v
                    .lines()
                    .next()
                    .and_then(|line| line.strip_prefix("Bundler version "))
                    // arch-lint: allow(no-silent-result-drop) reason="an unparsed bundle version line is shown raw"
                    .unwrap_or(v.trim());
                report.bundler = CheckResult::ok(version.trim());
            }
            Err(e) => {
                report.bundler = CheckResult::fail(&e.to_string());
                report.bundle_check = CheckResult::fail("skipped — bundler unavailable");
                report.ruby = self.ruby_fallback(root);
                return report;
            }
        }

        // 4. bundle check
        report.bundle_check = if self.succeeds(root, args(["check"])).await {
            CheckResult::ok("Up to date")
        } else {
            CheckResult::fail("Out of date — run: bundle install")
        };

        // 5. Requested interpreter
        report.ruby = match self.runner.exec(root, &args(["platform", "--ruby"])).await {
            Ok(platform) if platform.starts_with("ruby ") => CheckResult::ok(platform.trim()),
            Ok(_) => self.ruby_fallback(root),
            Err(e) => CheckResult::fail(&e.to_string()),
        };

        report
    }

    fn ruby_fallback(&self, root: &Path) -> CheckResult {
        match std::fs::read_to_string(root.join(RUBY_VERSION_FILE)) {
            Ok(v) if !v.trim().is_empty() => {
                CheckResult::ok(&format!("{} (.ruby-version)", v.trim()))
            }
            Ok(_) => CheckResult::ok("base image default (.ruby-version is empty)"),
            Err(e) => {
                tracing::debug!(error = %e, "no readable .ruby-version");
                CheckResult::ok("base image default")
            }
        }
    }
}

// ── Doctor types ──

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub bundler: CheckResult,
    pub gemfile: CheckResult,
    pub gemfile_lock: CheckResult,
    pub bundle_check: CheckResult,
    pub ruby: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.rows().iter().all(|(_, r)| r.passed)
    }

    fn rows(&self) -> [(&'static str, &CheckResult); 5] {
        [
            ("Gemfile", &self.gemfile),
            ("Gemfile.lock", &self.gemfile_lock),
            ("bundler", &self.bundler),
            ("bundle check", &self.bundle_check),
            ("Ruby", &self.ruby),
        ]
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, result) in self.rows() {
            writeln!(f, "  [{}] {label:<14} {}", result.icon(), result.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
