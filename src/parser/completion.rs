//! Автодополнение и подсветка синтаксиса
//!
//! Автодополнение не имеет своей грамматики: текст до курсора разбирается
//! обычным парсером, и множество ожидаемых элементов в конце ввода становится
//! списком кандидатов. Незаконченное слово перед курсором служит фильтром.

use crate::parser::diagnostics::{DiagnosticKind, Expected, ParseOutcome};
use crate::parser::lexer;
use crate::parser::parser::{CqlParser, ParserSettings};
use crate::parser::token::{Span, TokenType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Результат автодополнения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Смещение в байтах, с которого начинается заменяемый префикс
    pub position: usize,
    /// Незаконченное слово перед курсором
    pub prefix: String,
    /// Все элементы, допустимые в этой позиции
    pub expected: Vec<Expected>,
    /// Подставляемые варианты, отфильтрованные по префиксу
    pub candidates: Vec<String>,
}

/// Варианты продолжения текста `text`, курсор стоит в конце
pub fn complete(text: &str) -> Completion {
    complete_with_settings(text, ParserSettings::default())
}

pub fn complete_with_settings(text: &str, settings: ParserSettings) -> Completion {
    let prefix = trailing_word(text);
    let position = text.len() - prefix.len();
    let stem = &text[..position];

    let expected = expected_after(stem, settings);
    let lowered = prefix.to_ascii_lowercase();

    let mut candidates: Vec<String> = expected
        .iter()
        .filter_map(Expected::completion_text)
        .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&lowered))
        .collect();
    candidates.sort();
    candidates.dedup();

    log::trace!("completion at byte {}: {} candidates", position, candidates.len());
    Completion {
        position,
        prefix: prefix.to_string(),
        expected,
        candidates,
    }
}

/// Незаконченное слово в конце текста
fn trailing_word(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, ch)| ch.is_ascii_alphanumeric() || *ch == '_')
        .last()
        .map_or(text.len(), |(index, _)| index);
    let word = &text[start..];
    if word.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
        word
    } else {
        ""
    }
}

/// Ожидаемые элементы в конце `stem`
fn expected_after(stem: &str, settings: ParserSettings) -> Vec<Expected> {
    let (tokens, lex_error) = lexer::tokenize_partial(stem);
    if lex_error.is_some() {
        return Vec::new();
    }

    let at_statement_start = tokens
        .iter()
        .rev()
        .find(|token| !token.is(TokenType::Eof))
        .map_or(true, |token| token.is(TokenType::Semicolon));

    let mut parser = CqlParser::for_script(stem, settings.clone());
    let outcomes = parser.parse_script();

    // Незакрытый пакет обрывается в конце ввода: ожидания берутся из него
    if let Some(ParseOutcome::Diagnostic { diagnostic, .. }) = outcomes.last() {
        if diagnostic.kind == DiagnosticKind::SyntaxError && diagnostic.found.is_none() {
            return diagnostic.expected.clone();
        }
    }

    if at_statement_start {
        // Пустой ввод: парсер перечисляет все начальные ключевые слова
        let mut parser = CqlParser::for_script("", settings);
        return match parser.parse() {
            Err(diagnostic) => diagnostic.expected,
            Ok(_) => Vec::new(),
        };
    }

    match outcomes.last() {
        Some(ParseOutcome::Parsed { .. }) => parser.expected_at_eof(),
        _ => Vec::new(),
    }
}

/// Класс токена для подсветки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightKind {
    Keyword,
    Identifier,
    String,
    Number,
    Punctuation,
}

/// Классифицирует токены текста; комментарии пропускаются, при лексической
/// ошибке возвращается разметка корректного префикса
///
/// Незарезервированное ключевое слово в позиции имени (`key`, `ttl`, `type`)
/// размечается как идентификатор: класс берется из разбора, а не из таблицы.
pub fn highlight(text: &str) -> Vec<(Span, HighlightKind)> {
    let (tokens, _) = lexer::tokenize_partial(text);

    let mut parser = CqlParser::for_script(text, ParserSettings::default());
    parser.parse_script();
    let names: HashSet<usize> = parser.identifier_offsets().iter().copied().collect();

    tokens
        .iter()
        .filter_map(|token| {
            let kind = match token.token_type {
                TokenType::Eof | TokenType::Comment => return None,
                TokenType::Word if token.keyword.is_some() && !names.contains(&token.span.start) => {
                    HighlightKind::Keyword
                }
                TokenType::Word | TokenType::QuotedName => HighlightKind::Identifier,
                TokenType::BooleanLiteral => HighlightKind::Keyword,
                TokenType::StringLiteral | TokenType::CodeBlock => HighlightKind::String,
                TokenType::IntegerLiteral
                | TokenType::FloatLiteral
                | TokenType::HexLiteral
                | TokenType::UuidLiteral => HighlightKind::Number,
                _ => HighlightKind::Punctuation,
            };
            Some((token.span, kind))
        })
        .collect()
}
