//! Диагностика ошибок разбора CQL
//!
//! Все ошибки лексера, грамматики и семантических проверок представлены одним
//! типом [`Diagnostic`]: вид ошибки, позиция, найденный токен и множество
//! ожидаемых элементов. То же множество используется для автодополнения.

use crate::parser::ast::Statement;
use crate::parser::keywords::Keyword;
use crate::parser::token::{Position, Span, TokenType};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Результат работы правил грамматики
pub type ParseResult<T> = std::result::Result<T, Diagnostic>;

/// Вид диагностики
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    LexError,
    SyntaxError,
    RecursionLimitExceeded,
    SemanticError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::LexError => "lex error",
            DiagnosticKind::SyntaxError => "syntax error",
            DiagnosticKind::RecursionLimitExceeded => "recursion limit exceeded",
            DiagnosticKind::SemanticError => "semantic error",
        };
        f.write_str(name)
    }
}

/// Элемент, который грамматика была готова принять в точке ошибки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Expected {
    Keyword(Keyword),
    Token(TokenType),
    Identifier,
    StringLiteral,
    IntegerLiteral,
    Constant,
    Term,
    DataType,
}

impl Expected {
    /// Текст, который можно подставить при автодополнении
    pub fn completion_text(&self) -> Option<String> {
        match self {
            Expected::Keyword(keyword) => Some(keyword.as_str().to_string()),
            Expected::Token(token_type) if token_type.is_operator() || token_type.is_delimiter() => {
                Some(token_type.to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Keyword(keyword) => write!(f, "{}", keyword),
            Expected::Token(token_type) => write!(f, "'{}'", token_type),
            Expected::Identifier => f.write_str("identifier"),
            Expected::StringLiteral => f.write_str("string literal"),
            Expected::IntegerLiteral => f.write_str("integer"),
            Expected::Constant => f.write_str("constant"),
            Expected::Term => f.write_str("term"),
            Expected::DataType => f.write_str("data type"),
        }
    }
}

/// Позиционированная ошибка разбора
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} at {position}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
    /// Текст найденного токена; `None` означает конец ввода
    pub found: Option<String>,
    /// Отсортированное множество ожидаемых элементов
    pub expected: Vec<Expected>,
    pub message: String,
    /// Лексическая ошибка из-за незакрытой строки, имени, комментария или блока
    #[serde(default)]
    pub unterminated: bool,
}

impl Diagnostic {
    /// Создает лексическую ошибку
    pub fn lex(position: Position, found: Option<String>, message: impl Into<String>) -> Self {
        let diagnostic = Self {
            kind: DiagnosticKind::LexError,
            position,
            found,
            expected: Vec::new(),
            message: message.into(),
            unterminated: false,
        };
        log::debug!("{}", diagnostic);
        diagnostic
    }

    /// Создает лексическую ошибку для литерала, не закрытого до конца ввода
    pub fn unterminated(position: Position, found: Option<String>, message: impl Into<String>) -> Self {
        Self {
            unterminated: true,
            ..Self::lex(position, found, message)
        }
    }

    /// Ввод оборвался внутри литерала: продолжение может его закрыть
    pub fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    /// Создает синтаксическую ошибку по найденному токену и ожидаемому множеству
    pub fn syntax(position: Position, found: Option<String>, mut expected: Vec<Expected>) -> Self {
        expected.sort();
        expected.dedup();

        let found_text = match &found {
            Some(text) => format!("'{}'", text),
            None => "end of input".to_string(),
        };
        let message = match expected.len() {
            0 => format!("unexpected {}", found_text),
            1 => format!("found {}, expected {}", found_text, expected[0]),
            _ => {
                let list: Vec<String> = expected.iter().map(|item| item.to_string()).collect();
                format!("found {}, expected one of: {}", found_text, list.join(", "))
            }
        };

        let diagnostic = Self {
            kind: DiagnosticKind::SyntaxError,
            position,
            found,
            expected,
            message,
            unterminated: false,
        };
        log::debug!("{}", diagnostic);
        diagnostic
    }

    /// Создает ошибку превышения глубины вложенности
    pub fn recursion_limit(position: Position, limit: usize) -> Self {
        let diagnostic = Self {
            kind: DiagnosticKind::RecursionLimitExceeded,
            position,
            found: None,
            expected: Vec::new(),
            message: format!("nesting deeper than {} levels", limit),
            unterminated: false,
        };
        log::debug!("{}", diagnostic);
        diagnostic
    }

    /// Создает семантическую ошибку
    pub fn semantic(position: Position, found: Option<String>, message: impl Into<String>) -> Self {
        let diagnostic = Self {
            kind: DiagnosticKind::SemanticError,
            position,
            found,
            expected: Vec::new(),
            message: message.into(),
            unterminated: false,
        };
        log::debug!("{}", diagnostic);
        diagnostic
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Проверяет, входит ли элемент в ожидаемое множество
    pub fn expects(&self, expected: &Expected) -> bool {
        self.expected.contains(expected)
    }
}

/// Результат разбора одной инструкции скрипта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseOutcome {
    Parsed { statement: Statement, span: Span },
    Diagnostic { diagnostic: Diagnostic, span: Span },
}

impl ParseOutcome {
    pub fn span(&self) -> Span {
        match self {
            ParseOutcome::Parsed { span, .. } | ParseOutcome::Diagnostic { span, .. } => *span,
        }
    }

    pub fn statement(&self) -> Option<&Statement> {
        match self {
            ParseOutcome::Parsed { statement, .. } => Some(statement),
            ParseOutcome::Diagnostic { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ParseOutcome::Parsed { .. } => None,
            ParseOutcome::Diagnostic { diagnostic, .. } => Some(diagnostic),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed { .. })
    }

    /// Преобразует в обычный `Result`
    pub fn into_result(self) -> ParseResult<Statement> {
        match self {
            ParseOutcome::Parsed { statement, .. } => Ok(statement),
            ParseOutcome::Diagnostic { diagnostic, .. } => Err(diagnostic),
        }
    }
}
