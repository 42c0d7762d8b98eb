mod console;
mod detect;
mod doctor;
mod gen_config;

use fingerprint::RubyFingerprinter;
use fingerprint_core::{AppInfo, DetectionInput, FingerprintConfig, Notifier};
use fingerprint_probe::{BundlerProbe, RealRunner};

use crate::SourceArgs;
use console::ConsolePrompter;

pub use detect::detect;
pub use doctor::doctor;
pub use gen_config::gen_config;

type Fingerprinter = RubyFingerprinter<RealRunner, ConsolePrompter, Notifier>;

/// Load `fingerprint.toml` and `app.yaml` for the source directory and
/// wire up a fingerprinter for it.
fn prepare(args: &SourceArgs) -> anyhow::Result<(Fingerprinter, DetectionInput)> {
    let config = FingerprintConfig::load(&args.source_dir)?;

    let appinfo = match &args.config {
        Some(path) => Some(AppInfo::load(path)?),
        None => AppInfo::find(&args.source_dir)?,
    };

    let input = DetectionInput::new(&args.source_dir)
        .with_appinfo(appinfo)
        .custom(args.custom)
        .deploy(args.deploy);

    let fingerprinter = RubyFingerprinter::new(
        BundlerProbe::new(&config.probe),
        ConsolePrompter::new(args.no_prompt),
        Notifier::Status,
        config.ruby,
    );

    Ok((fingerprinter, input))
}

fn not_ruby(args: &SourceArgs) -> anyhow::Error {
    anyhow::anyhow!(
        "{} does not look like a Ruby app — add a Gemfile or set `runtime: ruby` in app.yaml",
        args.source_dir.display()
    )
}
