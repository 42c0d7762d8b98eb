pub mod doctor;
pub mod probe;
pub mod runner;

pub use doctor::{CheckResult, DoctorReport};
pub use probe::{BundlerProbe, DependencySnapshot, ProbeError};
pub use runner::{CommandRunner, RealRunner, RunnerError};
