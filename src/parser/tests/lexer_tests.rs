//! Тесты для лексического анализатора rustcql

use crate::parser::lexer::{tokenize, tokenize_partial};
use crate::parser::{DiagnosticKind, Keyword, Lexer, Span, TokenType};

fn types(text: &str) -> Vec<TokenType> {
    tokenize(text)
        .unwrap()
        .iter()
        .map(|token| token.token_type)
        .collect()
}

#[test]
fn test_lexer_creation() {
    let mut lexer = Lexer::new("SELECT * FROM users");
    let tokens = lexer.tokenize().unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[4].token_type, TokenType::Eof);
}

#[test]
fn test_keywords_are_words() {
    let tokens = tokenize("SELECT FROM WHERE users").unwrap();

    assert_eq!(tokens[0].token_type, TokenType::Word);
    assert_eq!(tokens[0].keyword, Some(Keyword::Select));
    assert_eq!(tokens[1].keyword, Some(Keyword::From));
    assert_eq!(tokens[2].keyword, Some(Keyword::Where));
    assert_eq!(tokens[3].keyword, None);
}

#[test]
fn test_case_insensitive_keywords() {
    let tokens = tokenize("select SELECT Select sElEcT").unwrap();

    assert_eq!(tokens.len(), 5);
    for token in &tokens[..4] {
        assert!(token.is_keyword(Keyword::Select));
    }
    // Исходный текст сохраняется
    assert_eq!(tokens[3].text, "sElEcT");
}

#[test]
fn test_string_literal_escapes() {
    let tokens = tokenize("'it''s'").unwrap();

    assert_eq!(tokens[0].token_type, TokenType::StringLiteral);
    assert_eq!(tokens[0].text, "'it''s'");
    assert_eq!(tokens[0].value, "it's");
}

#[test]
fn test_quoted_identifier() {
    let tokens = tokenize("\"My\"\"Col\"").unwrap();

    assert_eq!(tokens[0].token_type, TokenType::QuotedName);
    assert_eq!(tokens[0].value, "My\"Col");
    assert_eq!(tokens[0].keyword, None);
}

#[test]
fn test_numbers() {
    assert_eq!(
        types("42 3.14 1e10 -5 1.5E-3"),
        vec![
            TokenType::IntegerLiteral,
            TokenType::FloatLiteral,
            TokenType::FloatLiteral,
            TokenType::Minus,
            TokenType::IntegerLiteral,
            TokenType::FloatLiteral,
            TokenType::Eof,
        ]
    );

    // Точка без цифры после нее не входит в число
    assert_eq!(
        types("3."),
        vec![TokenType::IntegerLiteral, TokenType::Dot, TokenType::Eof]
    );
}

#[test]
fn test_hex_and_uuid_literals() {
    let tokens = tokenize("0xCAFE 123e4567-e89b-12d3-a456-426614174000").unwrap();

    assert_eq!(tokens[0].token_type, TokenType::HexLiteral);
    assert_eq!(tokens[0].value, "CAFE");
    assert_eq!(tokens[1].token_type, TokenType::UuidLiteral);
    assert_eq!(tokens[1].value, "123e4567-e89b-12d3-a456-426614174000");
}

#[test]
fn test_boolean_literals() {
    assert_eq!(
        types("TRUE false"),
        vec![TokenType::BooleanLiteral, TokenType::BooleanLiteral, TokenType::Eof]
    );
}

#[test]
fn test_code_block() {
    let tokens = tokenize("$$ return 1; $$").unwrap();

    assert_eq!(tokens[0].token_type, TokenType::CodeBlock);
    assert_eq!(tokens[0].value, " return 1; ");
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        types("SELECT -- comment\n* /* block */ FROM t // end"),
        vec![
            TokenType::Word,
            TokenType::Star,
            TokenType::Word,
            TokenType::Word,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_operators_and_delimiters() {
    assert_eq!(
        types("<= >= != < > = + - ; , . : ? ( ) [ ] { }"),
        vec![
            TokenType::LessEqual,
            TokenType::GreaterEqual,
            TokenType::NotEqual,
            TokenType::Less,
            TokenType::Greater,
            TokenType::Equal,
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Semicolon,
            TokenType::Comma,
            TokenType::Dot,
            TokenType::Colon,
            TokenType::Question,
            TokenType::LeftParen,
            TokenType::RightParen,
            TokenType::LeftBracket,
            TokenType::RightBracket,
            TokenType::LeftBrace,
            TokenType::RightBrace,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_positions_and_spans() {
    let text = "SELECT\n  a";
    let tokens = tokenize(text).unwrap();

    assert_eq!(tokens[1].position.line, 2);
    assert_eq!(tokens[1].position.column, 3);
    assert_eq!(tokens[1].position.offset, 9);

    let tokens = tokenize("USE ks").unwrap();
    assert_eq!(tokens[1].span, Span::new(4, 6));
    assert_eq!(tokens[1].span.slice("USE ks"), "ks");
}

#[test]
fn test_lex_errors() {
    let error = tokenize("'abc").unwrap_err();
    assert_eq!(error.kind, DiagnosticKind::LexError);
    assert_eq!(error.message, "unterminated string literal");

    let error = tokenize("SELECT @").unwrap_err();
    assert_eq!(error.message, "invalid character '@'");
    assert_eq!(error.column(), 8);

    assert_eq!(tokenize("/* open").unwrap_err().message, "unterminated comment");
    assert_eq!(tokenize("\"\"").unwrap_err().message, "empty quoted identifier");
    assert_eq!(tokenize("$$ body").unwrap_err().message, "unterminated code block");
}

#[test]
fn test_partial_tokenization() {
    let (tokens, error) = tokenize_partial("USE ks; 'oops");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[2].token_type, TokenType::Semicolon);
    assert_eq!(tokens[3].token_type, TokenType::Eof);
    assert_eq!(tokens[3].position.offset, 8);
    assert!(error.is_some());

    let (tokens, error) = tokenize_partial("USE ks");
    assert_eq!(tokens.len(), 3);
    assert!(error.is_none());
}
