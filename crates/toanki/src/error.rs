#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Outline file error: {0}")]
    OutlineFile(String),

    #[error("AnkiConnect `{action}` failed: {reason}")]
    RemoteCall { action: String, reason: String },
}
