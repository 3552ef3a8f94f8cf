//! Правила грамматики CQL
//!
//! Каждый модуль добавляет к [`CqlParser`](crate::parser::parser::CqlParser)
//! свой блок методов: общие конструкции, DML, DDL, управление доступом и
//! команды оболочки.

mod common;
mod dcl;
mod ddl;
mod dml;
mod meta;
