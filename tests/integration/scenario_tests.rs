//! Сценарии интерактивной оболочки
//!
//! Оболочка накапливает строки до завершенной инструкции, разбирает буфер,
//! показывает диагностики и предлагает продолжения.

use super::common::*;
use rustcql::parser::{
    complete, highlight, is_statement_complete, parse_script, DiagnosticKind, Expected,
    HighlightKind, Keyword, Statement, StatementCategory,
};
use rustcql::Result;

/// Подает строки по одной, как оболочка, и возвращает отправленные буферы
fn feed_lines(lines: &[&str]) -> Vec<String> {
    let mut submitted = Vec::new();
    let mut buffer = String::new();

    for line in lines {
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(line);
        if is_statement_complete(&buffer) {
            submitted.push(std::mem::take(&mut buffer));
        }
    }

    submitted
}

#[test]
fn test_multiline_input_is_accumulated() -> Result<()> {
    init_test_logging();

    let submitted = feed_lines(&[
        "SELECT name",
        "FROM customers",
        "WHERE id = ?;",
        "DESCRIBE TABLES",
        "BEGIN BATCH",
        "INSERT INTO t (a) VALUES (1);",
        "UPDATE t SET a = 2 WHERE k = 1;",
        "APPLY BATCH;",
    ]);

    assert_eq!(submitted.len(), 3);
    assert_eq!(submitted[0], "SELECT name\nFROM customers\nWHERE id = ?;");
    assert_eq!(submitted[1], "DESCRIBE TABLES");

    let statements = parse_all(&submitted[2])?;
    match &statements[..] {
        [Statement::Batch(batch)] => assert_eq!(batch.statements.len(), 2),
        other => panic!("Ожидался один BATCH, получено {:?}", other),
    }
    Ok(())
}

#[test]
fn test_unterminated_string_keeps_buffering() {
    let submitted = feed_lines(&["INSERT INTO t (a) VALUES ('first line", "second line');"]);

    assert_eq!(submitted, vec!["INSERT INTO t (a) VALUES ('first line\nsecond line');"]);
}

#[test]
fn test_script_with_errors_reports_each_statement() {
    let script = "USE shop;\nSELECT FROM t;\nINSERT INTO t (a, b) VALUES (1);\nDESCRIBE TABLE t;";
    let outcomes = parse_script(script);

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[0].is_parsed());

    let syntax = outcomes[1].diagnostic().map(|diagnostic| (diagnostic.kind, diagnostic.line()));
    assert_eq!(syntax, Some((DiagnosticKind::SyntaxError, 2)));

    let semantic = outcomes[2].diagnostic().map(|diagnostic| diagnostic.kind);
    assert_eq!(semantic, Some(DiagnosticKind::SemanticError));

    assert!(outcomes[3].statement().is_some_and(Statement::is_meta_command));
}

#[test]
fn test_statement_categories_of_schema() -> Result<()> {
    let categories: Vec<StatementCategory> = parse_all(SAMPLE_SCHEMA)?
        .iter()
        .map(Statement::category)
        .collect();

    assert!(categories.contains(&StatementCategory::Ddl));
    assert!(categories.contains(&StatementCategory::Dml));
    assert!(categories.contains(&StatementCategory::Dcl));
    assert!(!categories.contains(&StatementCategory::Meta));
    Ok(())
}

#[test]
fn test_completion_while_typing() {
    let typed = "SELECT * FROM customers WHERE id = ? ";

    let completion = complete(typed);
    assert!(completion.expected.contains(&Expected::Keyword(Keyword::And)));
    assert!(completion.candidates.contains(&"LIMIT".to_string()));

    let completion = complete("SELECT * FROM customers WHERE id = ? LIM");
    assert_eq!(completion.candidates, vec!["LIMIT"]);
    assert_eq!(completion.prefix, "LIM");
}

#[test]
fn test_completion_after_error_is_empty() {
    let completion = complete("SELECT FROM customers WHERE ");
    assert!(completion.candidates.is_empty());
    assert!(completion.expected.is_empty());
}

#[test]
fn test_highlight_of_partial_buffer() {
    let marks = highlight("SELECT 'open");

    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].1, HighlightKind::Keyword);
}
