use fingerprint_build::WriteError;
use fingerprint_probe::ProbeError;

#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(
        "entrypoint command is required — enter the command that starts your app, \
         or add an \"entrypoint\" field to app.yaml"
    )]
    MissingEntrypoint,

    #[error(
        "This appears to be a Ruby app. You'll need to provide the full command to run the app \
         in production, but fingerprint is not running interactively and cannot ask for the \
         entrypoint. Please either run fingerprint interactively, or create an app.yaml with \
         \"runtime: ruby\" and an \"entrypoint\" field."
    )]
    NonInteractiveAmbiguity,

    #[error("failed to read a response from the console")]
    Prompt { source: std::io::Error },

    #[error(transparent)]
    Write(#[from] WriteError),
}
