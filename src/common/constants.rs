//! Константы для rustcql

/// Максимальная глубина вложенности типов и литералов по умолчанию
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 64;

/// Верхняя граница настраиваемой глубины вложенности; разбор на этой
/// глубине укладывается в стек потока по умолчанию (2 МБ)
pub const MAX_RECURSION_DEPTH_LIMIT: usize = 256;

/// Уровень логирования по умолчанию
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Допустимые уровни логирования
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Префикс переменных окружения
pub const ENV_PREFIX: &str = "RUSTCQL_";

/// Имя файла конфигурации по умолчанию
pub const DEFAULT_CONFIG_FILE: &str = "rustcql.toml";
