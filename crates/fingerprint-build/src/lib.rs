//! Config file generation for Ruby apps.
//!
//! # Generated files
//!
//! ```text
//! app.yaml       ── only when the app has no app.yaml yet
//! Dockerfile     ── --custom or deploy
//! .dockerignore  ── alongside the Dockerfile
//! ```
//!
//! # Dockerfile sections
//!
//! 1. Header ── `FROM` the Ruby base image
//! 2. Interpreter ── rbenv install of the requested version, or a note
//!    that the base image default is used
//! 3. Packages ── apt-get install of gem-required libraries, or a
//!    commented-out placeholder
//! 4. Gems ── `bundle install --deployment`
//! 5. Entrypoint
//!
//! Every file is rendered in memory before anything is written, and an
//! existing file is never overwritten.

pub mod configurator;
pub mod dockerfile;
pub mod generated;

pub use configurator::RubyConfigurator;
pub use dockerfile::DockerfileGenerator;
pub use generated::{GeneratedFile, WriteError};
