//! Интеграционные тесты rustcql
//!
//! Модули сгруппированы по проверяемому сценарию; общие данные и утилиты
//! лежат в `common`.

pub mod common;
pub mod concurrency_tests;
pub mod config_tests;
pub mod property_tests;
pub mod roundtrip_tests;
pub mod scenario_tests;

pub use common::*;
