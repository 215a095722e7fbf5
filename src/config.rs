use crate::writer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_sysroot")]
    pub sysroot: String,
    #[serde(default = "default_command_timeout")]
    pub command_timeout: String,
    #[serde(default = "default_file_timeout")]
    pub file_timeout: String,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: OutputFormat::default(),
            sysroot: default_sysroot(),
            command_timeout: default_command_timeout(),
            file_timeout: default_file_timeout(),
            parallel: default_parallel(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать файл конфигурации {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("не удалось разобрать YAML в {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("ошибка валидации конфигурации: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "поле output_dir не должно быть пустым".to_string(),
            ));
        }
        if self.sysroot.trim().is_empty() {
            return Err(ConfigError::Validation(
                "поле sysroot не должно быть пустым".to_string(),
            ));
        }
        self.command_timeout_duration()?;
        self.file_timeout_duration()?;
        Ok(())
    }

    pub fn command_timeout_duration(&self) -> Result<Duration, ConfigError> {
        parse_timeout("command_timeout", &self.command_timeout)
    }

    pub fn file_timeout_duration(&self) -> Result<Duration, ConfigError> {
        parse_timeout("file_timeout", &self.file_timeout)
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn parse_timeout(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value.trim()).map_err(|err| {
        ConfigError::Validation(format!("{field}: некорректная длительность '{value}': {err}"))
    })?;
    if duration.is_zero() {
        return Err(ConfigError::Validation(format!(
            "{field} должно быть > 0"
        )));
    }
    Ok(duration)
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_sysroot() -> String {
    "/".to_string()
}

fn default_command_timeout() -> String {
    "30s".to_string()
}

fn default_file_timeout() -> String {
    "5s".to_string()
}

const fn default_parallel() -> bool {
    true
}
