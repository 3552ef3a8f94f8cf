//! Канонический вывод и сериализация AST

use super::common::*;
use pretty_assertions::assert_eq;
use rustcql::parser::{parse_statement, Statement};
use rustcql::Result;

#[test]
fn test_canonical_script_reparses() -> Result<()> {
    let statements = parse_all(SAMPLE_SCHEMA)?;

    let printed: Vec<String> = statements.iter().map(|statement| format!("{};", statement)).collect();
    let reparsed = parse_all(&printed.join("\n"))?;

    assert_eq!(reparsed, statements);
    Ok(())
}

#[test]
fn test_canonical_text_is_stable() -> Result<()> {
    for text in sample_statements() {
        let first = parse_statement(&text)?.to_string();
        let second = parse_statement(&first)?.to_string();
        assert_eq!(second, first);
    }
    Ok(())
}

#[test]
fn test_json_roundtrip() -> Result<()> {
    let statements = parse_all(SAMPLE_SCHEMA)?;

    let json = serde_json::to_string_pretty(&statements)?;
    let restored: Vec<Statement> = serde_json::from_str(&json)?;

    assert_eq!(restored, statements);
    Ok(())
}

#[test]
fn test_keyword_case_does_not_matter() -> Result<()> {
    for text in sample_statements() {
        let lowered = text.to_lowercase();
        // Содержимое строковых литералов зависит от регистра
        if lowered.contains('\'') {
            continue;
        }
        assert_eq!(parse_statement(&lowered)?, parse_statement(&text)?);
    }
    Ok(())
}
