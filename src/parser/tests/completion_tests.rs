//! Тесты автодополнения и подсветки

use crate::parser::{complete, highlight, Expected, HighlightKind, Keyword, Span};

fn candidates(text: &str) -> Vec<String> {
    complete(text).candidates
}

#[test]
fn test_statement_starters() {
    let completion = complete("");

    assert_eq!(completion.position, 0);
    assert!(completion.prefix.is_empty());
    for keyword in ["SELECT", "INSERT", "CREATE", "DESCRIBE", "CONSISTENCY", "BEGIN"] {
        assert!(completion.candidates.contains(&keyword.to_string()), "{}", keyword);
    }
}

#[test]
fn test_prefix_filtering() {
    let completion = complete("sel");

    assert_eq!(completion.prefix, "sel");
    assert_eq!(completion.position, 0);
    assert_eq!(completion.candidates, vec!["SELECT"]);
    assert!(completion.expected.contains(&Expected::Keyword(Keyword::Insert)));
}

#[test]
fn test_after_table_name() {
    let found = candidates("SELECT * FROM t ");

    for candidate in [".", "WHERE", "ORDER", "PER", "LIMIT", "ALLOW", ";"] {
        assert!(found.contains(&candidate.to_string()), "{}", candidate);
    }
    assert!(!found.contains(&"SELECT".to_string()));
}

#[test]
fn test_relation_operators() {
    let found = candidates("SELECT * FROM t WHERE a ");

    for candidate in ["=", "!=", "<", "<=", ">", ">=", "IN", "CONTAINS", "LIKE", "IS"] {
        assert!(found.contains(&candidate.to_string()), "{}", candidate);
    }
}

#[test]
fn test_completion_after_previous_statement() {
    let completion = complete("SELECT * FROM t; UP");

    assert_eq!(completion.position, 17);
    assert_eq!(completion.candidates, vec!["UPDATE"]);
}

/// Внутри открытого пакета после `;` допустимы только его инструкции и APPLY
#[test]
fn test_completion_inside_open_batch() {
    let completion = complete("BEGIN BATCH INSERT INTO t (a) VALUES (1); ");

    assert_eq!(completion.candidates, vec!["APPLY", "DELETE", "INSERT", "UPDATE"]);
    assert!(!completion.expected.contains(&Expected::Keyword(Keyword::Select)));

    assert_eq!(candidates("BEGIN UNLOGGED BATCH UPDATE t SET a = 1 WHERE k = 1; ap"), vec!["APPLY"]);

    // После закрытого пакета снова начинается новая инструкция
    let found = candidates("BEGIN BATCH DELETE FROM t WHERE k = 1; APPLY BATCH; ");
    assert!(found.contains(&"SELECT".to_string()));
    assert!(!found.contains(&"APPLY".to_string()));
}

#[test]
fn test_consistency_levels() {
    let found = candidates("CONSISTENCY ");
    assert!(found.contains(&"QUORUM".to_string()));
    assert!(found.contains(&"LOCAL_ONE".to_string()));
    assert!(found.contains(&";".to_string()));

    assert_eq!(candidates("consistency local_q"), vec!["LOCAL_QUORUM"]);
}

#[test]
fn test_identifier_positions_have_no_keywords() {
    let completion = complete("SELECT * FROM ");

    assert!(completion.expected.contains(&Expected::Identifier));
    assert!(completion.candidates.is_empty());
}

#[test]
fn test_no_candidates_inside_string() {
    let completion = complete("SELECT 'abc");

    assert_eq!(completion.prefix, "abc");
    assert!(completion.candidates.is_empty());
}

#[test]
fn test_no_candidates_after_error() {
    assert!(candidates("SELECT FROM FROM ").is_empty());
}

#[test]
fn test_highlight() {
    let text = "SELECT name FROM t WHERE id = 'x' -- c";
    let marks = highlight(text);

    let kinds: Vec<HighlightKind> = marks.iter().map(|(_, kind)| *kind).collect();
    assert_eq!(
        kinds,
        vec![
            HighlightKind::Keyword,
            HighlightKind::Identifier,
            HighlightKind::Keyword,
            HighlightKind::Identifier,
            HighlightKind::Keyword,
            HighlightKind::Identifier,
            HighlightKind::Punctuation,
            HighlightKind::String,
        ]
    );
    assert_eq!(marks[0].0, Span::new(0, 6));
    assert_eq!(marks[7].0.slice(text), "'x'");
}

#[test]
fn test_highlight_keywords_used_as_names() {
    let text = "SELECT key, ttl FROM t WHERE type = 1";
    let marks = highlight(text);

    let kinds: Vec<(&str, HighlightKind)> = marks
        .iter()
        .map(|(span, kind)| (span.slice(text), *kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("SELECT", HighlightKind::Keyword),
            ("key", HighlightKind::Identifier),
            (",", HighlightKind::Punctuation),
            ("ttl", HighlightKind::Identifier),
            ("FROM", HighlightKind::Keyword),
            ("t", HighlightKind::Identifier),
            ("WHERE", HighlightKind::Keyword),
            ("type", HighlightKind::Identifier),
            ("=", HighlightKind::Punctuation),
            ("1", HighlightKind::Number),
        ]
    );

    // Ключевое слово на своем месте остается ключевым словом
    let marks = highlight("CREATE TABLE t (id int PRIMARY KEY)");
    assert!(marks.contains(&(Span::new(31, 34), HighlightKind::Keyword)));
}

#[test]
fn test_highlight_literals_and_partial_input() {
    let kinds: Vec<HighlightKind> = highlight("VALUES (1, 2.5, 0xff, true) @")
        .into_iter()
        .map(|(_, kind)| kind)
        .collect();

    assert_eq!(
        kinds,
        vec![
            HighlightKind::Keyword,
            HighlightKind::Punctuation,
            HighlightKind::Number,
            HighlightKind::Punctuation,
            HighlightKind::Number,
            HighlightKind::Punctuation,
            HighlightKind::Number,
            HighlightKind::Punctuation,
            HighlightKind::Keyword,
            HighlightKind::Punctuation,
        ]
    );
}
