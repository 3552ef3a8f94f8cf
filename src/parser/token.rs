//! Токены для CQL лексера
//!
//! Определяет все типы токенов, которые может распознать лексический анализатор.
//! Ключевые слова на этом уровне не выделяются: любое слово остается кандидатом,
//! а роль (ключевое слово или идентификатор) определяет грамматика.

use crate::parser::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Позиция токена в исходном тексте
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    /// Смещение в байтах от начала текста
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Диапазон байтов исходного текста `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Вырезает фрагмент исходного текста
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Токен с позицией и значением
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Исходный текст токена без изменений
    pub text: String,
    /// Обработанное значение: содержимое строки без кавычек, имя без `""` и т.п.
    pub value: String,
    pub position: Position,
    pub span: Span,
    /// Ключевое слово, если слово совпадает с ним по написанию
    pub keyword: Option<Keyword>,
}

impl Token {
    pub fn new(token_type: TokenType, text: String, value: String, position: Position, end: usize) -> Self {
        let keyword = if token_type == TokenType::Word {
            Keyword::lookup(&value)
        } else {
            None
        };
        let span = Span::new(position.offset, end);
        Self {
            token_type,
            text,
            value,
            position,
            span,
            keyword,
        }
    }

    /// Токен конца ввода
    pub fn eof(position: Position) -> Self {
        let offset = position.offset;
        Self::new(TokenType::Eof, String::new(), String::new(), position, offset)
    }

    /// Проверяет, написано ли слово как указанное ключевое слово
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword == Some(keyword)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}('{}') at {}", self.token_type, self.text, self.position)
    }
}

/// Типы токенов CQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenType {
    // === Слова и литералы ===
    /// Слово: ключевое слово или идентификатор, решает грамматика
    Word,
    /// Идентификатор в двойных кавычках
    QuotedName,
    /// Строковый литерал в одинарных кавычках
    StringLiteral,
    /// Целое число
    IntegerLiteral,
    /// Число с плавающей точкой
    FloatLiteral,
    /// Шестнадцатеричный литерал `0x...`
    HexLiteral,
    /// UUID литерал
    UuidLiteral,
    /// `true` / `false`
    BooleanLiteral,
    /// Тело функции `$$ ... $$`
    CodeBlock,

    // === Операторы ===
    Plus,          // +
    Minus,         // -
    Star,          // *
    Equal,         // =
    NotEqual,      // !=
    Less,          // <
    Greater,       // >
    LessEqual,     // <=
    GreaterEqual,  // >=

    // === Разделители и символы ===
    LeftParen,     // (
    RightParen,    // )
    LeftBracket,   // [
    RightBracket,  // ]
    LeftBrace,     // {
    RightBrace,    // }
    Comma,         // ,
    Semicolon,     // ;
    Dot,           // .
    Colon,         // :
    Question,      // ?

    // === Специальные токены ===
    /// Комментарий (однострочный или многострочный)
    Comment,

    /// Конец ввода
    Eof,
}

impl TokenType {
    /// Проверяет, является ли токен литералом
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenType::StringLiteral
                | TokenType::IntegerLiteral
                | TokenType::FloatLiteral
                | TokenType::HexLiteral
                | TokenType::UuidLiteral
                | TokenType::BooleanLiteral
                | TokenType::CodeBlock
        )
    }

    /// Проверяет, является ли токен оператором
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenType::Plus
                | TokenType::Minus
                | TokenType::Star
                | TokenType::Equal
                | TokenType::NotEqual
                | TokenType::Less
                | TokenType::Greater
                | TokenType::LessEqual
                | TokenType::GreaterEqual
        )
    }

    /// Проверяет, является ли токен разделителем
    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            TokenType::LeftParen
                | TokenType::RightParen
                | TokenType::LeftBracket
                | TokenType::RightBracket
                | TokenType::LeftBrace
                | TokenType::RightBrace
                | TokenType::Comma
                | TokenType::Semicolon
                | TokenType::Dot
                | TokenType::Colon
                | TokenType::Question
        )
    }

    /// Проверяет, следует ли пропустить токен при парсинге
    pub fn should_skip(&self) -> bool {
        matches!(self, TokenType::Comment)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Word => "WORD",
            TokenType::QuotedName => "QUOTED NAME",
            TokenType::StringLiteral => "STRING",
            TokenType::IntegerLiteral => "INTEGER",
            TokenType::FloatLiteral => "FLOAT",
            TokenType::HexLiteral => "BLOB",
            TokenType::UuidLiteral => "UUID",
            TokenType::BooleanLiteral => "BOOLEAN",
            TokenType::CodeBlock => "CODE BLOCK",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Equal => "=",
            TokenType::NotEqual => "!=",
            TokenType::Less => "<",
            TokenType::Greater => ">",
            TokenType::LessEqual => "<=",
            TokenType::GreaterEqual => ">=",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::LeftBracket => "[",
            TokenType::RightBracket => "]",
            TokenType::LeftBrace => "{",
            TokenType::RightBrace => "}",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Dot => ".",
            TokenType::Colon => ":",
            TokenType::Question => "?",
            TokenType::Comment => "COMMENT",
            TokenType::Eof => "EOF",
        };
        write!(f, "{}", name)
    }
}
