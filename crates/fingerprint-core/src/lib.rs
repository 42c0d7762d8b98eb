//! Core types and configuration for fingerprint.
//!
//! This crate defines the `fingerprint.toml` schema ([`FingerprintConfig`]),
//! the parsed `app.yaml` descriptor ([`AppInfo`]), the resolved
//! [`RuntimeDecision`], the notification sink, and shared error types.

pub mod appinfo;
pub mod config;
pub mod decision;
pub mod error;
pub mod input;
pub mod notify;
pub mod ruby;

pub use appinfo::AppInfo;
pub use config::{FingerprintConfig, ProbeSettings, RubySettings};
pub use decision::{Entrypoint, RuntimeDecision};
pub use error::{Error, Result};
pub use input::DetectionInput;
pub use notify::{Notifier, Notify};
