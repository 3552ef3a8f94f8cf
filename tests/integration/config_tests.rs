//! Загрузка конфигурации и ее влияние на разбор

use super::common::*;
use clap::Parser;
use rustcql::cli::Cli;
use rustcql::common::{OutputKind, ParserConfig};
use rustcql::parser::{parse_statement_with_settings, DiagnosticKind};
use rustcql::{Error, Result};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_roundtrip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("rustcql.toml");

    let mut config = ParserConfig::default();
    config.parser.max_recursion_depth = 8;
    config.output.format = OutputKind::Cql;
    config.to_file(&path)?;

    let loaded = ParserConfig::from_file(&path)?;
    assert_eq!(loaded, config);
    loaded.validate()?;
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[parser\nmax_recursion_depth = ")?;

    match ParserConfig::from_file(&path) {
        Err(Error::Configuration { .. }) => {}
        other => panic!("Ожидалась ошибка конфигурации, получено {:?}", other),
    }

    assert!(matches!(
        ParserConfig::from_file(&temp_dir.path().join("missing.toml")),
        Err(Error::Io(_))
    ));
    Ok(())
}

#[test]
fn test_settings_from_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("rustcql.toml");
    fs::write(&path, "[parser]\nmax_recursion_depth = 2\nstrict_validation = false\n")?;

    let settings = ParserConfig::from_file(&path)?.settings();

    let error = parse_statement_with_settings("SELECT * FROM t WHERE a = [[[1]]]", settings.clone()).unwrap_err();
    assert_eq!(error.kind, DiagnosticKind::RecursionLimitExceeded);

    // Без строгого режима несовпадение колонок и значений не проверяется
    parse_statement_with_settings("INSERT INTO t (a, b) VALUES (1)", settings)?;
    Ok(())
}

#[test]
fn test_cli_with_config_and_file_input() -> anyhow::Result<()> {
    init_test_logging();

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("cli.toml");
    let script_path = temp_dir.path().join("schema.cql");
    fs::write(&config_path, "[output]\nformat = \"cql\"\n")?;
    fs::write(&script_path, "use Shop; select * from t where k = 1")?;

    let cli = Cli::try_parse_from([
        "rustcql",
        "--config",
        config_path.to_str().unwrap_or_default(),
        "parse",
        "--file",
        script_path.to_str().unwrap_or_default(),
    ])?;
    let config = cli.load_config()?;
    assert_eq!(config.output.format, OutputKind::Cql);

    let mut out = Vec::new();
    assert!(cli.execute(&config, &mut out)?);
    assert_eq!(String::from_utf8(out)?, "USE shop;\nSELECT * FROM t WHERE k = 1;\n");
    Ok(())
}

#[test]
fn test_cli_check_reports_failures() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(["rustcql", "check", "SELECT * FROM t; INSERT INTO t (a) VALUES (1, 2);"])?;

    let mut out = Vec::new();
    assert!(!cli.execute(&ParserConfig::default(), &mut out)?);

    let output = String::from_utf8(out)?;
    assert!(output.contains("semantic error"));
    assert!(output.contains("INSERT lists 1 columns but 2 values"));
    Ok(())
}
