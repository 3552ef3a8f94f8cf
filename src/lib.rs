//! rustcql - Разбор CQL для интерактивной оболочки Cassandra
//!
//! Библиотека превращает текст, набранный пользователем оболочки, в
//! типизированные инструкции CQL и команды оболочки либо в позиционированные
//! диагностики с множеством ожидаемых элементов. Те же множества используются
//! для автодополнения, а лексер дает разметку для подсветки синтаксиса.
//!
//! ```
//! use rustcql::parser::{parse_statement, Statement};
//!
//! let statement = parse_statement("USE myks;").unwrap();
//! assert!(matches!(statement, Statement::UseKeyspace(_)));
//! ```

pub mod cli;
pub mod common;
pub mod parser;

pub use common::error::{Error, Result};
pub use parser::{
    complete, highlight, is_statement_complete, parse_script, parse_statement, Diagnostic,
    ParseOutcome, ParserSettings, Statement,
};

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
