use fingerprint_core::Notifier;

use crate::SourceArgs;

pub async fn gen_config(args: &SourceArgs) -> anyhow::Result<()> {
    let (fingerprinter, input) = super::prepare(args)?;

    let notify = Notifier::for_mode(args.deploy);
    let Some(configurator) = fingerprinter.fingerprint(&input, notify).await? else {
        return Err(super::not_ruby(args));
    };

    let written = configurator.generate_configs()?;
    tracing::info!(written, root = %configurator.root().display(), "config generation finished");

    Ok(())
}
