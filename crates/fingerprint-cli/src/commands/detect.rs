use fingerprint::RuntimeDecision;
use fingerprint_core::Notifier;
use serde::Serialize;

use crate::SourceArgs;

#[derive(Serialize)]
struct DetectOutput<'a> {
    decision: &'a RuntimeDecision,
    pending_files: Vec<String>,
}

pub async fn detect(args: &SourceArgs, json: bool) -> anyhow::Result<()> {
    let (fingerprinter, input) = super::prepare(args)?;

    let Some(configurator) = fingerprinter.fingerprint(&input, Notifier::Log).await? else {
        return Err(super::not_ruby(args));
    };

    let pending_files: Vec<String> = configurator
        .pending_files()
        .into_iter()
        .map(|f| f.filename)
        .collect();
    let decision = configurator.decision();

    if json {
        let output = DetectOutput {
            decision,
            pending_files,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Ruby:       {}",
        decision.ruby_version.as_deref().unwrap_or("base image default")
    );
    println!("Entrypoint: {}", decision.entrypoint);
    if decision.packages.is_empty() {
        println!("Packages:   (none)");
    } else {
        println!("Packages:   {}", decision.packages_line());
    }
    if pending_files.is_empty() {
        println!("\nAll config files already exist.");
    } else {
        println!("\nWould write: {}", pending_files.join(", "));
    }

    Ok(())
}
