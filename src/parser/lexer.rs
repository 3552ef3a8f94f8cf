//! Лексический анализатор CQL для rustcql
//!
//! Преобразует входной CQL текст в последовательность токенов для дальнейшего парсинга.
//! Пропускает пробелы и комментарии (`--`, `//`, `/* */`), распознает строки,
//! идентификаторы в кавычках, числа, шестнадцатеричные литералы, UUID и блоки `$$...$$`.

use crate::parser::diagnostics::{Diagnostic, ParseResult};
use crate::parser::token::{Position, Token, TokenType};

/// Лексический анализатор CQL
pub struct Lexer {
    /// Исходный текст
    input: Vec<char>,
    /// Текущая позиция в тексте (индекс символа)
    position: usize,
    /// Текущая позиция для отображения ошибок
    current_position: Position,
}

impl Lexer {
    /// Создает новый лексический анализатор
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            current_position: Position::start(),
        }
    }
}

/// Разбивает текст на токены; первая ошибка прерывает разбор
pub fn tokenize(text: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(text).tokenize()
}

/// Разбивает текст на токены, сохраняя корректный префикс при ошибке
pub fn tokenize_partial(text: &str) -> (Vec<Token>, Option<Diagnostic>) {
    Lexer::new(text).tokenize_partial()
}

// Подключаем методы из отдельных файлов
include!("lexer_methods.rs");
include!("lexer_readers.rs");
