//! Пробелы и комментарии между токенами не меняют результат разбора
//!
//! Разделители выбираются детерминированным генератором, чтобы падение
//! воспроизводилось.

use super::common::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustcql::parser::{parse_statement, tokenize, TokenType};
use rustcql::Result;

const SEPARATORS: &[&str] = &[" ", "  ", "\n", "\t", " /* note */ ", " -- note\n", "\n// note\n"];

/// Пересобирает текст из токенов со случайными разделителями
fn respace(text: &str, rng: &mut StdRng) -> Result<String> {
    let tokens = tokenize(text)?;
    let mut rebuilt = String::new();

    for token in tokens.iter().filter(|token| !token.is(TokenType::Eof)) {
        if !rebuilt.is_empty() {
            rebuilt.push_str(SEPARATORS[rng.gen_range(0..SEPARATORS.len())]);
        }
        rebuilt.push_str(token.span.slice(text));
    }

    Ok(rebuilt)
}

#[test]
fn test_separators_between_tokens_are_ignored() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for text in sample_statements() {
        let expected = parse_statement(&text)?;
        for _ in 0..8 {
            let noisy = respace(&text, &mut rng)?;
            assert_eq!(parse_statement(&noisy)?, expected, "текст: {}", noisy);
        }
    }
    Ok(())
}

#[test]
fn test_noisy_script_keeps_statement_count() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let statements = sample_statements();
    let noisy: Vec<String> = statements
        .iter()
        .map(|text| respace(text, &mut rng))
        .collect::<Result<_>>()?;

    let parsed = parse_all(&noisy.join(";\n"))?;
    assert_eq!(parsed.len(), statements.len());
    Ok(())
}

#[test]
fn test_truncated_input_never_panics() {
    let mut rng = StdRng::seed_from_u64(7);

    for text in sample_statements() {
        for _ in 0..16 {
            let mut cut = rng.gen_range(0..=text.len());
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            let prefix = &text[..cut];
            let _ = parse_statement(prefix);
            let _ = rustcql::complete(prefix);
            let _ = rustcql::is_statement_complete(prefix);
        }
    }
}
