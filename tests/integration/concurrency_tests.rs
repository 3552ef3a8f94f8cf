//! Параллельный разбор: парсер не имеет общего состояния между вызовами

use super::common::*;
use rayon::prelude::*;
use rustcql::parser::{parse_statement, Statement};
use rustcql::{Error, Result};
use std::sync::Arc;
use std::thread;

#[test]
fn test_parallel_parsing_matches_sequential() -> Result<()> {
    let texts = sample_statements();
    let sequential: Vec<Statement> = texts
        .iter()
        .map(|text| parse_statement(text).map_err(Error::from))
        .collect::<Result<_>>()?;

    let parallel: Vec<Statement> = texts
        .par_iter()
        .map(|text| parse_statement(text).map_err(Error::from))
        .collect::<Result<_>>()?;

    assert_eq!(parallel, sequential);
    Ok(())
}

#[test]
fn test_threads_share_parsed_statements() -> Result<()> {
    let expected = Arc::new(parse_all(SAMPLE_SCHEMA)?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let expected = Arc::clone(&expected);
            thread::spawn(move || -> Result<bool> {
                for _ in 0..25 {
                    if parse_all(SAMPLE_SCHEMA)? != *expected {
                        return Ok(false);
                    }
                }
                Ok(true)
            })
        })
        .collect();

    for handle in handles {
        let matched = handle
            .join()
            .map_err(|_| Error::internal("parser thread panicked"))??;
        assert!(matched);
    }
    Ok(())
}
