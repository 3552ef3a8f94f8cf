//! Общие утилиты для интеграционных тестов

use rustcql::parser::{parse_script_with_settings, ParserSettings, Statement};
use rustcql::{parse_script, Error, Result};

/// Скрипт схемы, который используют несколько групп тестов
pub const SAMPLE_SCHEMA: &str = "\
-- схема приложения
CREATE KEYSPACE IF NOT EXISTS shop
    WITH replication = {'class': 'NetworkTopologyStrategy', 'dc1': 3}
    AND durable_writes = true;
USE shop;

CREATE TYPE IF NOT EXISTS address (street text, city text, zip int);

CREATE TABLE IF NOT EXISTS customers (
    id uuid PRIMARY KEY,
    name text,
    emails set<text>,
    home frozen<address>
) WITH comment = 'customers';

CREATE TABLE orders (
    customer_id uuid,
    placed timeuuid,
    items map<text, int>,
    total decimal,
    note text STATIC,
    PRIMARY KEY ((customer_id), placed)
) WITH CLUSTERING ORDER BY (placed DESC)
  AND compaction = {'class': 'TimeWindowCompactionStrategy'};

CREATE INDEX IF NOT EXISTS orders_items ON orders (keys(items));

/* представление по имени */
CREATE MATERIALIZED VIEW customers_by_name AS
    SELECT id, name FROM customers
    WHERE name IS NOT NULL AND id IS NOT NULL
    PRIMARY KEY (name, id);

INSERT INTO customers (id, name, emails)
    VALUES (123e4567-e89b-12d3-a456-426614174000, 'Ann', {'ann@example.com'})
    IF NOT EXISTS;

UPDATE orders USING TTL 3600
    SET items['apple'] = 2, note = 'gift'
    WHERE customer_id = 123e4567-e89b-12d3-a456-426614174000 AND placed = now();

BEGIN UNLOGGED BATCH
    INSERT INTO customers (id, name) VALUES (?, ?);
    DELETE emails FROM customers WHERE id = ?;
APPLY BATCH;

SELECT name, writetime(name) AS written FROM customers WHERE id IN (?, ?) LIMIT 10;
GRANT SELECT ON KEYSPACE shop TO analyst;
";

/// Подключает `log` к выводу тестов; повторный вызов безопасен
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Разбирает скрипт и превращает первую диагностику в ошибку
pub fn parse_all(text: &str) -> Result<Vec<Statement>> {
    parse_script(text)
        .into_iter()
        .map(|outcome| outcome.into_result().map_err(Error::from))
        .collect()
}

/// То же с заданными настройками парсера
#[allow(dead_code)]
pub fn parse_all_with(text: &str, settings: ParserSettings) -> Result<Vec<Statement>> {
    parse_script_with_settings(text, settings)
        .into_iter()
        .map(|outcome| outcome.into_result().map_err(Error::from))
        .collect()
}

/// Инструкции схемы по одной, без завершающей `;`
pub fn sample_statements() -> Vec<String> {
    parse_script(SAMPLE_SCHEMA)
        .iter()
        .map(|outcome| {
            let span = outcome.span();
            SAMPLE_SCHEMA[span.start..span.end]
                .trim_end_matches(';')
                .to_string()
        })
        .collect()
}
