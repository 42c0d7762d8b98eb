//! Built-in Ruby tables and well-known file names.
//!
//! The version map translates Gemfile-style versions into rbenv versions
//! with a patchlevel. Only versions that actually carry a patchlevel in
//! ruby-build are listed; later releases are used as-is.

pub const RUNTIME_NAME: &str = "ruby";
pub const CUSTOM_RUNTIME_NAME: &str = "custom";

/// Runtime names a declarative config may carry for this fingerprinter to run.
pub const ALLOWED_RUNTIME_NAMES: [&str; 2] = [RUNTIME_NAME, CUSTOM_RUNTIME_NAME];

pub const GEMFILE: &str = "Gemfile";
pub const GEMFILE_LOCK: &str = "Gemfile.lock";
pub const RUBY_VERSION_FILE: &str = ".ruby-version";
pub const PROCFILE: &str = "Procfile";
pub const CONFIG_RU: &str = "config.ru";

pub const ENTRYPOINT_FOREMAN: &str = "foreman start web -p 8080";
pub const ENTRYPOINT_PUMA: &str = "bundle exec puma -p 8080 -e deployment";
pub const ENTRYPOINT_UNICORN: &str = "bundle exec unicorn -p 8080 -E deployment";
pub const ENTRYPOINT_RACKUP: &str = "bundle exec rackup -p 8080 -E deployment config.ru";

pub const RUBY_VERSION_MAP: &[(&str, &str)] = &[
    ("1.8.6", "1.8.6-p420"),
    ("1.8.7", "1.8.7-p375"),
    ("1.9.1", "1.9.1-p430"),
    ("1.9.2", "1.9.2-p330"),
    ("1.9.3", "1.9.3-p551"),
    ("2.0.0", "2.0.0-p648"),
];

/// Gems that need extra system libraries at install time.
pub const GEM_PACKAGES: &[(&str, &[&str])] = &[("rgeo", &["libgeos-dev", "libproj-dev"])];

pub(crate) fn builtin_version(version: &str) -> Option<&'static str> {
    RUBY_VERSION_MAP
        .iter()
        .find(|(from, _)| *from == version)
        .map(|(_, to)| *to)
}

pub(crate) fn builtin_packages(gem: &str) -> Option<&'static [&'static str]> {
    GEM_PACKAGES
        .iter()
        .find(|(name, _)| *name == gem)
        .map(|(_, packages)| *packages)
}
