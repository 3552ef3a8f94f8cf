//! Главный исполняемый файл rustcql

use anyhow::Context;
use clap::Parser;
use rustcql::cli::Cli;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_logging(&config.logging.level)?;
    log::debug!("rustcql {} with {:?}", rustcql::VERSION, config.parser);

    let mut stdout = std::io::stdout().lock();
    let clean = cli.execute(&config, &mut stdout)?;
    stdout.flush()?;
    if !clean {
        std::process::exit(1);
    }

    Ok(())
}

/// Подписчик tracing пишет в stderr; записи `log` из библиотеки проходят через него.
/// `RUST_LOG` имеет приоритет над уровнем из конфигурации.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing subscriber")?;
    tracing_log::LogTracer::init().context("failed to bridge log records")?;
    Ok(())
}
