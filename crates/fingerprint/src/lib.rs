//! Ruby runtime fingerprinting.
//!
//! [`RubyFingerprinter`] inspects a source tree, asks bundler what the app
//! needs, and resolves a [`RuntimeDecision`] (interpreter, entrypoint, extra
//! packages). The decision is handed to a [`RubyConfigurator`] that writes
//! `app.yaml`, `Dockerfile`, and `.dockerignore`.
//!
//! ```no_run
//! use fingerprint::{NonInteractive, RubyFingerprinter};
//! use fingerprint_core::{DetectionInput, FingerprintConfig, Notifier};
//! use fingerprint_probe::BundlerProbe;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FingerprintConfig::default();
//! let fingerprinter = RubyFingerprinter::new(
//!     BundlerProbe::new(&config.probe),
//!     NonInteractive,
//!     Notifier::Status,
//!     config.ruby,
//! );
//! let input = DetectionInput::new("./my-app").custom(true);
//! if let Some(configurator) = fingerprinter.fingerprint(&input, Notifier::Status).await? {
//!     configurator.generate_configs()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod prompt;
pub mod ruby;

pub use error::FingerprintError;
pub use fingerprint_build::RubyConfigurator;
pub use fingerprint_core::RuntimeDecision;
pub use prompt::{NonInteractive, Prompter};
pub use ruby::RubyFingerprinter;
