//! Конфигурация для rustcql
//!
//! Файл TOML с разделами `[parser]`, `[logging]` и `[output]`. Значения из
//! переменных окружения `RUSTCQL_*` и флагов командной строки накладываются
//! поверх файла через [`ParserConfig::merge`].

use crate::common::constants::*;
use crate::common::error::{Error, Result};
use crate::parser::ParserSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Полная конфигурация
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub parser: ParserSection,
    pub logging: LoggingSection,
    pub output: OutputSection,
}

/// Раздел `[parser]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    /// Максимальная глубина вложенности типов и литералов
    pub max_recursion_depth: usize,
    /// Выполнять семантические проверки
    pub strict_validation: bool,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            strict_validation: true,
        }
    }
}

/// Раздел `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Уровень логирования (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Формат вывода разобранных инструкций
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Отладочное представление AST
    #[default]
    Debug,
    /// AST в JSON
    Json,
    /// Канонический CQL
    Cql,
}

/// Раздел `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputKind,
}

impl ParserConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParserConfig = toml::from_str(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Сохраняет конфигурацию в TOML файл
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Загружает конфигурацию из переменных окружения
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Собирает конфигурацию из пар `имя = значение`; неизвестные имена пропускаются
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = ParserConfig::default();

        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref().trim();

            match name {
                "MAX_RECURSION_DEPTH" => {
                    config.parser.max_recursion_depth = value.parse().map_err(|_| {
                        Error::configuration(format!("{}MAX_RECURSION_DEPTH is not a number: {}", ENV_PREFIX, value))
                    })?;
                }
                "STRICT_VALIDATION" => {
                    config.parser.strict_validation = parse_flag(value).ok_or_else(|| {
                        Error::configuration(format!("{}STRICT_VALIDATION is not a boolean: {}", ENV_PREFIX, value))
                    })?;
                }
                "LOG_LEVEL" => config.logging.level = value.to_ascii_lowercase(),
                _ => {}
            }
        }

        Ok(config)
    }

    /// Объединяет конфигурацию с другой; значения `other`, отличные от
    /// значений по умолчанию, имеют приоритет
    pub fn merge(mut self, other: Self) -> Self {
        let defaults = ParserConfig::default();

        if other.parser.max_recursion_depth != defaults.parser.max_recursion_depth {
            self.parser.max_recursion_depth = other.parser.max_recursion_depth;
        }
        if other.parser.strict_validation != defaults.parser.strict_validation {
            self.parser.strict_validation = other.parser.strict_validation;
        }
        if other.logging.level != defaults.logging.level {
            self.logging.level = other.logging.level;
        }
        if other.output.format != defaults.output.format {
            self.output.format = other.output.format;
        }

        self
    }

    /// Валидирует конфигурацию
    pub fn validate(&self) -> Result<()> {
        if self.parser.max_recursion_depth == 0 {
            return Err(Error::configuration("max_recursion_depth must be greater than 0"));
        }
        if self.parser.max_recursion_depth > MAX_RECURSION_DEPTH_LIMIT {
            return Err(Error::configuration(format!(
                "max_recursion_depth must not exceed {}",
                MAX_RECURSION_DEPTH_LIMIT
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "unknown log level '{}', expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Настройки парсера из конфигурации
    pub fn settings(&self) -> ParserSettings {
        ParserSettings::from(self)
    }
}

impl From<&ParserConfig> for ParserSettings {
    fn from(config: &ParserConfig) -> Self {
        ParserSettings {
            max_recursion_depth: config.parser.max_recursion_depth,
            strict_validation: config.parser.strict_validation,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
