//! Парсер CQL для rustcql

pub mod ast;
pub mod completion;
pub mod diagnostics;
pub mod display;
mod grammar;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod splitter;
pub mod token;

#[cfg(test)]
pub mod tests;

// Переэкспортируем основные типы
pub use ast::*;
pub use completion::{complete, complete_with_settings, highlight, Completion, HighlightKind};
pub use diagnostics::{Diagnostic, DiagnosticKind, Expected, ParseOutcome, ParseResult};
pub use keywords::Keyword;
pub use lexer::{tokenize, Lexer};
pub use parser::{CqlParser, ParserSettings, STATEMENT_KEYWORDS};
pub use splitter::is_statement_complete;
pub use token::{Position, Span, Token, TokenType};

/// Разбирает одну инструкцию
pub fn parse_statement(text: &str) -> ParseResult<Statement> {
    parse_statement_with_settings(text, ParserSettings::default())
}

pub fn parse_statement_with_settings(text: &str, settings: ParserSettings) -> ParseResult<Statement> {
    CqlParser::with_settings(text, settings)?.parse()
}

/// Разбирает скрипт из нескольких инструкций; ошибка в одной инструкции
/// не мешает разбору остальных
pub fn parse_script(text: &str) -> Vec<ParseOutcome> {
    parse_script_with_settings(text, ParserSettings::default())
}

pub fn parse_script_with_settings(text: &str, settings: ParserSettings) -> Vec<ParseOutcome> {
    CqlParser::for_script(text, settings).parse_script()
}
