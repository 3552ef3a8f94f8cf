//! Проверка завершенности буфера ввода оболочки
//!
//! Оболочка накапливает строки, пока последняя инструкция не завершена.
//! Команды оболочки завершаются концом строки, инструкции CQL требуют `;`,
//! пакет `BEGIN ... BATCH` завершается только `APPLY BATCH ;`.

use crate::parser::keywords::Keyword;
use crate::parser::lexer;
use crate::parser::token::{Token, TokenType};

/// Команды оболочки, которым не нужна `;`
const LINE_COMMANDS: [Keyword; 14] = [
    Keyword::Describe,
    Keyword::Desc,
    Keyword::Consistency,
    Keyword::Serial,
    Keyword::Output,
    Keyword::Tracing,
    Keyword::Paging,
    Keyword::Autofetch,
    Keyword::Expand,
    Keyword::Show,
    Keyword::Source,
    Keyword::Capture,
    Keyword::Copy,
    Keyword::Help,
];

fn is_line_command(token: &Token) -> bool {
    LINE_COMMANDS.iter().any(|keyword| token.is_keyword(*keyword))
}

/// Состояние текущей инструкции при просмотре токенов
#[derive(Debug, Default)]
struct PendingStatement {
    line_command: bool,
    batch: bool,
    after_apply: bool,
    applied: bool,
}

impl PendingStatement {
    fn start(first: &Token) -> Self {
        Self {
            line_command: is_line_command(first),
            batch: first.is_keyword(Keyword::Begin),
            ..Self::default()
        }
    }

    /// Завершает ли `;` инструкцию
    fn accepts_terminator(&self) -> bool {
        !self.batch || self.applied
    }

    fn observe(&mut self, token: &Token) {
        if self.batch {
            if self.after_apply && token.is_keyword(Keyword::Batch) {
                self.applied = true;
            }
            self.after_apply = token.is_keyword(Keyword::Apply);
        }
    }
}

/// Можно ли отправлять буфер на выполнение
///
/// Возвращает `true`, если буфер содержит хотя бы одну инструкцию и последняя
/// из них завершена. Незакрытые строка, имя в кавычках, комментарий или блок
/// `$$` делают буфер незавершенным. Прочие лексические ошибки считаются
/// завершенным вводом: их покажет парсер.
pub fn is_statement_complete(buffer: &str) -> bool {
    let (tokens, lex_error) = lexer::tokenize_partial(buffer);
    if let Some(error) = lex_error {
        log::trace!("buffer stops at lex error: {}", error.message);
        return !error.is_unterminated();
    }

    let mut pending: Option<PendingStatement> = None;
    let mut seen_statement = false;

    for token in tokens.iter().filter(|token| !token.is(TokenType::Eof)) {
        match pending.as_mut() {
            None => {
                if token.is(TokenType::Semicolon) {
                    seen_statement = true;
                } else {
                    pending = Some(PendingStatement::start(token));
                }
            }
            Some(statement) => {
                if token.is(TokenType::Semicolon) && statement.accepts_terminator() {
                    pending = None;
                    seen_statement = true;
                } else {
                    statement.observe(token);
                }
            }
        }
    }

    match pending {
        Some(statement) => statement.line_command,
        None => seen_statement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_need_terminator() {
        assert!(!is_statement_complete(""));
        assert!(is_statement_complete(";"));
        assert!(!is_statement_complete("SELECT * FROM t"));
        assert!(is_statement_complete("SELECT * FROM t;"));
        assert!(is_statement_complete("SELECT *\nFROM t\n;"));
    }

    #[test]
    fn test_line_commands() {
        assert!(is_statement_complete("DESCRIBE TABLES"));
        assert!(is_statement_complete("CONSISTENCY QUORUM"));
        assert!(is_statement_complete("SERIAL CONSISTENCY"));
        assert!(is_statement_complete("SELECT * FROM t; DESCRIBE"));
        assert!(!is_statement_complete("DESCRIBE TABLES; SELECT * FROM t"));
    }

    #[test]
    fn test_session_commands_end_at_line_end() {
        for command in [
            "TRACING ON",
            "paging 100",
            "AUTOFETCH OFF",
            "EXPAND",
            "SHOW VERSION",
            "SOURCE 'schema.cql'",
            "CAPTURE JSON 'out.json'",
            "COPY ks.t (a, b) TO 'out.csv' WITH HEADER = true",
            "HELP",
        ] {
            assert!(is_statement_complete(command), "{}", command);
        }
        assert!(!is_statement_complete("SOURCE 'schema"));
    }

    #[test]
    fn test_batch_needs_apply() {
        assert!(!is_statement_complete("BEGIN BATCH INSERT INTO t (a) VALUES (1);"));
        assert!(!is_statement_complete("BEGIN BATCH INSERT INTO t (a) VALUES (1); APPLY BATCH"));
        assert!(is_statement_complete("BEGIN BATCH INSERT INTO t (a) VALUES (1); APPLY BATCH;"));
    }

    #[test]
    fn test_unterminated_literals() {
        assert!(!is_statement_complete("SELECT 'abc"));
        assert!(!is_statement_complete("SELECT \"col"));
        assert!(!is_statement_complete("/* open"));
        assert!(!is_statement_complete("CREATE FUNCTION f () CALLED ON NULL INPUT RETURNS int LANGUAGE java AS $$ x;"));
        assert!(is_statement_complete("SELECT 'a;b';"));
    }

    #[test]
    fn test_other_lex_errors_complete_the_buffer() {
        assert!(is_statement_complete("SELECT @"));
        assert!(is_statement_complete("SELECT \"\" FROM t"));
    }

    #[test]
    fn test_unterminated_errors_are_typed() {
        let (_, error) = lexer::tokenize_partial("SELECT $$ body");
        assert!(error.is_some_and(|error| error.is_unterminated()));

        let (_, error) = lexer::tokenize_partial("SELECT #");
        assert!(error.is_some_and(|error| !error.is_unterminated()));
    }

    #[test]
    fn test_comments_alone_are_not_statements() {
        assert!(!is_statement_complete("-- comment"));
        assert!(is_statement_complete("SELECT * FROM t; -- done"));
    }
}
