use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Settings as they appear in the JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub input_file_path: Option<String>,
    #[serde(rename = "specificFilePath")]
    pub specific_path: Option<String>,
    pub mubu_base_url: Option<String>,
    pub auto_model_name: Option<String>,
    pub anki_connect_host: Option<String>,
}

impl FileConfig {
    /// Read a JSON config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())).into())
    }

    /// Read the config file named on the command line, or the default one if present
    ///
    /// An explicitly requested file must exist; the default file is optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_path(default)
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using flags and environment only");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply CLI and environment overrides on top of the file values
    pub fn with_overrides(mut self, global: &crate::Global) -> Self {
        if let Some(input) = &global.input {
            self.input_file_path = Some(input.clone());
        }
        if let Some(path) = &global.specific_path {
            self.specific_path = Some(path.clone());
        }
        if let Some(url) = &global.media_base_url {
            self.mubu_base_url = Some(url.clone());
        }
        if let Some(name) = &global.model_name {
            self.auto_model_name = Some(name.clone());
        }
        if let Some(host) = &global.anki_host {
            self.anki_connect_host = Some(host.clone());
        }
        self
    }
}

/// Fully resolved import settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the export, or the `.opml` file itself
    pub input_path: PathBuf,
    /// Deck path the exported branch lives under (empty when not specified)
    pub specific_path: String,
    /// Prefix joined to every image `uri`
    pub media_base_url: String,
    pub model_name: String,
    pub anki_connect_host: String,
}

impl Config {
    pub const DEFAULT_ANKI_CONNECT_HOST: &'static str = "http://127.0.0.1:8765";
    pub const DEFAULT_MODEL_NAME: &'static str = "toanki-auto";
    pub const DEFAULT_MEDIA_BASE_URL: &'static str = "https://api2.mubu.com/v3/";

    /// Load the config file and apply overrides from the command line
    pub fn load(global: &crate::Global) -> Result<Self> {
        let file = FileConfig::discover(global.config.as_deref())?;
        Self::resolve(file.with_overrides(global))
    }

    /// Fill defaults and check that required values are present
    pub fn resolve(file: FileConfig) -> Result<Self> {
        let input_path = file
            .input_file_path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "input path not set (use --input, TOANKI_INPUT, or `inputFilePath`)"
                        .to_string(),
                )
            })?;

        Ok(Self {
            input_path: PathBuf::from(input_path),
            specific_path: file.specific_path.unwrap_or_default(),
            media_base_url: file
                .mubu_base_url
                .unwrap_or_else(|| Self::DEFAULT_MEDIA_BASE_URL.to_string()),
            model_name: file
                .auto_model_name
                .unwrap_or_else(|| Self::DEFAULT_MODEL_NAME.to_string()),
            anki_connect_host: file
                .anki_connect_host
                .unwrap_or_else(|| Self::DEFAULT_ANKI_CONNECT_HOST.to_string()),
        })
    }
}
