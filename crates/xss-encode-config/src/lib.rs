use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use xss_encode_engine::{Codec, CodecOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file at {config_path} names an unknown default codec '{name}'")]
    UnknownDefaultCodec { config_path: PathBuf, name: String },
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `html-escape` also escapes `"` and `'`.
    pub escape_quotes: bool,
    /// Codec run when the command line names none.
    pub default_codec: Option<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(name) = &config.default_codec
            && name.parse::<Codec>().is_err()
        {
            return Err(ConfigError::UnknownDefaultCodec {
                config_path: config_path.to_path_buf(),
                name: name.clone(),
            });
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/xss-encode");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The configured default codec, already validated on load.
    pub fn default_codec(&self) -> Option<Codec> {
        self.default_codec
            .as_deref()
            .and_then(|name| name.parse().ok())
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            escape_quotes: self.escape_quotes,
        }
    }
}
