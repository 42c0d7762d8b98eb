use std::path::Path;

use fingerprint_core::FingerprintConfig;
use fingerprint_probe::BundlerProbe;

pub async fn doctor(source_dir: &Path) -> anyhow::Result<()> {
    let config = match FingerprintConfig::load(source_dir) {
        Ok(config) => config,
        Err(e) => {
            // Still report the environment with default settings.
            eprintln!("warning: {e}; using default settings");
            FingerprintConfig::default()
        }
    };

    let report = BundlerProbe::new(&config.probe).doctor(source_dir).await;

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}
