use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── app.yaml ──
    #[error("failed to read app descriptor at {path}")]
    AppYamlLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse app descriptor at {path} — check the YAML syntax")]
    AppYamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
