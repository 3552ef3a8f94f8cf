//! Модульные тесты парсера CQL

mod completion_tests;
mod ddl_tests;
mod lexer_tests;
