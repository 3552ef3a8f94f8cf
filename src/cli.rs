//! CLI интерфейс для rustcql
//!
//! Инструмент разработчика: разбор, проверка, автодополнение и вывод токенов
//! для текста CQL. Интерактивная оболочка в него не входит.

use crate::common::constants::DEFAULT_CONFIG_FILE;
use crate::common::{OutputKind, ParserConfig};
use crate::parser::{
    self, lexer, Diagnostic, ParseOutcome, ParserSettings, Token, TokenType,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// RustCQL - разбор CQL для оболочки Cassandra
#[derive(Parser, Debug)]
#[command(name = "rustcql")]
#[command(about = "RustCQL - CQL parser for an interactive Cassandra shell")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Максимальная глубина вложенности
    #[arg(long, value_name = "DEPTH", global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Источник текста: аргумент, файл или stdin
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Текст CQL
    pub text: Option<String>,

    /// Прочитать текст из файла
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Разобрать инструкции и вывести AST
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Формат вывода
        #[arg(long, value_enum)]
        format: Option<OutputKind>,

        /// Отключить семантические проверки
        #[arg(long)]
        lenient: bool,
    },

    /// Показать варианты продолжения текста
    Complete {
        /// Текст до курсора
        text: String,

        /// Вывести результат в JSON
        #[arg(long)]
        json: bool,
    },

    /// Проверить текст; ненулевой код выхода при ошибках
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Вывести поток токенов
    Tokens {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Cli {
    /// Загружает конфигурацию: файл, затем переменные окружения, затем флаги
    pub fn load_config(&self) -> anyhow::Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => ParserConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    ParserConfig::from_file(default_path)?
                } else {
                    ParserConfig::default()
                }
            }
        };

        config = config.merge(ParserConfig::from_env()?);

        if let Some(level) = &self.log_level {
            config.logging.level = level.to_ascii_lowercase();
        }
        if let Some(depth) = self.max_depth {
            config.parser.max_recursion_depth = depth;
        }

        config.validate()?;
        Ok(config)
    }

    /// Выполняет команду; `false` означает, что во входе найдены ошибки
    pub fn execute(&self, config: &ParserConfig, out: &mut impl Write) -> anyhow::Result<bool> {
        let settings = config.settings();

        match &self.command {
            Commands::Parse {
                input,
                format,
                lenient,
            } => {
                let text = read_input(input)?;
                let settings = ParserSettings {
                    strict_validation: settings.strict_validation && !lenient,
                    ..settings
                };
                let format = format.unwrap_or(config.output.format);
                print_outcomes(&text, &parser::parse_script_with_settings(&text, settings), format, out)
            }
            Commands::Complete { text, json } => {
                let completion = parser::complete_with_settings(text, settings);
                if *json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&completion)?)?;
                } else {
                    let expected: Vec<String> = completion.expected.iter().map(|item| item.to_string()).collect();
                    writeln!(out, "prefix: '{}' at byte {}", completion.prefix, completion.position)?;
                    writeln!(out, "expected: {}", expected.join(", "))?;
                    for candidate in &completion.candidates {
                        writeln!(out, "  {}", candidate)?;
                    }
                }
                Ok(true)
            }
            Commands::Check { input } => {
                let text = read_input(input)?;
                let outcomes = parser::parse_script_with_settings(&text, settings);
                let mut clean = true;
                for outcome in &outcomes {
                    if let Some(diagnostic) = outcome.diagnostic() {
                        clean = false;
                        write!(out, "{}", render_diagnostic(&text, diagnostic))?;
                    }
                }
                if clean {
                    writeln!(out, "ok: {} statement(s)", outcomes.len())?;
                }
                Ok(clean)
            }
            Commands::Tokens { input } => {
                let text = read_input(input)?;
                let (tokens, lex_error) = lexer::tokenize_partial(&text);
                for token in tokens.iter().filter(|token| !token.is(TokenType::Eof)) {
                    writeln!(out, "{}", format_token(token))?;
                }
                match lex_error {
                    Some(diagnostic) => {
                        write!(out, "{}", render_diagnostic(&text, &diagnostic))?;
                        Ok(false)
                    }
                    None => Ok(true),
                }
            }
        }
    }
}

/// Читает текст из аргумента, файла или stdin
fn read_input(input: &InputArgs) -> anyhow::Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()));
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
    Ok(text)
}

fn print_outcomes(
    text: &str,
    outcomes: &[ParseOutcome],
    format: OutputKind,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let clean = outcomes.iter().all(ParseOutcome::is_parsed);

    if format == OutputKind::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(outcomes)?)?;
        return Ok(clean);
    }

    for outcome in outcomes {
        match outcome {
            ParseOutcome::Parsed { statement, span } => match format {
                OutputKind::Cql => writeln!(out, "{};", statement)?,
                _ => writeln!(out, "[{}..{}] {:#?}", span.start, span.end, statement)?,
            },
            ParseOutcome::Diagnostic { diagnostic, .. } => {
                write!(out, "{}", render_diagnostic(text, diagnostic))?;
            }
        }
    }
    Ok(clean)
}

/// Диагностика со строкой исходного текста и указателем на позицию
pub fn render_diagnostic(source: &str, diagnostic: &Diagnostic) -> String {
    let mut rendered = format!("error: {}\n", diagnostic);
    if let Some(line) = source.lines().nth(diagnostic.line().saturating_sub(1)) {
        let indent = " ".repeat(diagnostic.column().saturating_sub(1));
        rendered.push_str(&format!("  | {}\n  | {}^\n", line, indent));
    }
    rendered
}

fn format_token(token: &Token) -> String {
    let kind = match token.keyword {
        Some(keyword) => format!("{} ({})", token.token_type, keyword),
        None => token.token_type.to_string(),
    };
    format!("{:>8} {:<24} {}", token.position.to_string(), kind, token.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> (bool, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let ok = cli.execute(&ParserConfig::default(), &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_command_cql_output() {
        let (ok, output) = run(&["rustcql", "parse", "--format", "cql", "use MyKs ; select * from t"]);
        assert!(ok);
        assert_eq!(output, "USE myks;\nSELECT * FROM t;\n");
    }

    #[test]
    fn test_check_command_reports_errors() {
        let (ok, output) = run(&["rustcql", "check", "SELECT FROM t;"]);
        assert!(!ok);
        assert!(output.contains("syntax error at 1:8"));
        assert!(output.contains("       ^"));
    }

    #[test]
    fn test_complete_command() {
        let (ok, output) = run(&["rustcql", "complete", "SELECT * FR"]);
        assert!(ok);
        assert!(output.contains("  FROM"));
    }

    #[test]
    fn test_tokens_command() {
        let (ok, output) = run(&["rustcql", "tokens", "USE ks"]);
        assert!(ok);
        assert!(output.contains("(USE)"));
        assert!(output.contains("ks"));
    }
}
