use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A command used to launch the application process.
///
/// **Invariant:** never empty and never surrounded by whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entrypoint(String);

impl Entrypoint {
    /// Returns `None` for a blank command.
    pub fn new(command: &str) -> Option<Self> {
        let command = command.trim();
        if command.is_empty() {
            None
        } else {
            Some(Self(command.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The resolved configuration handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeDecision {
    /// Interpreter in rbenv format; `None` keeps the base image default.
    pub ruby_version: Option<String>,
    pub entrypoint: Entrypoint,
    /// Extra apt packages, sorted and deduplicated.
    pub packages: BTreeSet<String>,
}

impl RuntimeDecision {
    pub fn packages_line(&self) -> String {
        self.packages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrypoint_rejects_blank() {
        assert!(Entrypoint::new("").is_none());
        assert!(Entrypoint::new("  \n").is_none());
        assert_eq!(
            Entrypoint::new(" bundle exec puma ").unwrap().as_str(),
            "bundle exec puma"
        );
    }

    #[test]
    fn packages_line_is_sorted() {
        let decision = RuntimeDecision {
            ruby_version: None,
            entrypoint: Entrypoint::new("rackup").unwrap(),
            packages: ["libproj-dev", "libgeos-dev", "libproj-dev"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        };
        assert_eq!(decision.packages_line(), "libgeos-dev libproj-dev");
    }
}
