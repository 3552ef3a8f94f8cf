//! Тесты разбора DDL: keyspace, таблицы, типы, индексы, представления,
//! функции, агрегаты и триггеры

use crate::common::Result;
use crate::parser::{
    parse_statement, parse_statement_with_settings, AlterTableOperation, AlterTypeOperation,
    Constant, DataType, DiagnosticKind, Expected, FieldDefinition, Identifier, IndexTargetKind,
    NativeType, OnNullInput, OptionValue, OrderDirection, ParserSettings, QualifiedName,
    SelectClause, Statement, Term,
};

fn id(name: &str) -> Identifier {
    Identifier::unquoted(name)
}

fn native(native: NativeType) -> DataType {
    DataType::Native(native)
}

fn semantic_message(text: &str) -> String {
    let error = parse_statement(text).unwrap_err();
    assert_eq!(error.kind, DiagnosticKind::SemanticError, "{}", text);
    error.message
}

#[test]
fn test_create_keyspace() -> Result<()> {
    let statement = parse_statement(
        "CREATE KEYSPACE IF NOT EXISTS ks WITH replication = \
         {'class': 'SimpleStrategy', 'replication_factor': 3} AND durable_writes = true",
    )?;

    match statement {
        Statement::CreateKeyspace(create) => {
            assert!(create.if_not_exists);
            assert_eq!(create.name, id("ks"));

            let keys: Vec<&String> = create.options.keys().collect();
            assert_eq!(keys, vec!["replication", "durable_writes"]);

            match &create.options["replication"] {
                OptionValue::Map(entries) => {
                    assert_eq!(
                        entries.get("class"),
                        Some(&Constant::String("SimpleStrategy".to_string()))
                    );
                    assert_eq!(entries.get("replication_factor"), Some(&Constant::Integer(3)));
                }
                _ => panic!("Ожидалась карта опций"),
            }
            assert_eq!(
                create.options["durable_writes"],
                OptionValue::Constant(Constant::Boolean(true))
            );
        }
        _ => panic!("Ожидался CREATE KEYSPACE"),
    }

    Ok(())
}

#[test]
fn test_keyspace_synonyms_and_alter_drop() -> Result<()> {
    assert!(matches!(
        parse_statement("CREATE SCHEMA ks WITH replication = {'class': 'SimpleStrategy'}")?,
        Statement::CreateKeyspace(_)
    ));

    match parse_statement("ALTER KEYSPACE ks WITH durable_writes = false")? {
        Statement::AlterKeyspace(alter) => {
            assert_eq!(alter.name, id("ks"));
            assert_eq!(alter.options.len(), 1);
        }
        _ => panic!("Ожидался ALTER KEYSPACE"),
    }

    match parse_statement("DROP KEYSPACE IF EXISTS ks")? {
        Statement::DropKeyspace(drop) => assert!(drop.if_exists),
        _ => panic!("Ожидался DROP KEYSPACE"),
    }

    Ok(())
}

#[test]
fn test_duplicate_option() {
    assert_eq!(
        semantic_message("CREATE KEYSPACE ks WITH durable_writes = true AND durable_writes = false"),
        "duplicate option 'durable_writes'"
    );
    assert_eq!(
        semantic_message("CREATE KEYSPACE ks WITH replication = {'a': 1, 'a': 2}"),
        "duplicate map key 'a'"
    );
}

#[test]
fn test_create_table_with_composite_key() -> Result<()> {
    let statement = parse_statement(
        "CREATE TABLE IF NOT EXISTS ks.events (\
           tenant text, day date, ts timeuuid, \
           payload map<text, frozen<list<int>>>, tags set<text> STATIC, \
           PRIMARY KEY ((tenant, day), ts)\
         ) WITH CLUSTERING ORDER BY (ts DESC) AND comment = 'events' \
           AND compaction = {'class': 'LeveledCompactionStrategy'}",
    )?;

    match statement {
        Statement::CreateTable(create) => {
            assert!(create.if_not_exists);
            assert_eq!(create.name, QualifiedName::qualified(id("ks"), id("events")));
            assert_eq!(create.columns.len(), 5);
            assert_eq!(
                create.columns[3].data_type,
                DataType::Map(
                    Box::new(native(NativeType::Text)),
                    Box::new(DataType::Frozen(Box::new(DataType::List(Box::new(native(
                        NativeType::Int
                    ))))))
                )
            );
            assert!(create.columns[4].is_static);
            assert_eq!(create.columns[4].data_type, DataType::Set(Box::new(native(NativeType::Text))));

            assert_eq!(create.primary_key.partition_key, vec![id("tenant"), id("day")]);
            assert_eq!(create.primary_key.clustering_columns, vec![id("ts")]);

            assert_eq!(create.options.clustering_order.len(), 1);
            assert_eq!(create.options.clustering_order[0].direction, OrderDirection::Desc);
            assert_eq!(
                create.options.options["comment"],
                OptionValue::Constant(Constant::String("events".to_string()))
            );
            assert!(!create.options.compact_storage);
        }
        _ => panic!("Ожидался CREATE TABLE"),
    }

    Ok(())
}

#[test]
fn test_column_types() -> Result<()> {
    let statement = parse_statement(
        "CREATE TABLE t (id int PRIMARY KEY, emb vector<float, 3>, pair tuple<int, text>, \
         addr ks.address, \"Frozen\" frozen<address>)",
    )?;

    match statement {
        Statement::CreateTable(create) => {
            assert_eq!(
                create.columns[1].data_type,
                DataType::Vector(Box::new(native(NativeType::Float)), 3)
            );
            assert_eq!(
                create.columns[2].data_type,
                DataType::Tuple(vec![native(NativeType::Int), native(NativeType::Text)])
            );
            assert_eq!(
                create.columns[3].data_type,
                DataType::UserDefined(QualifiedName::qualified(id("ks"), id("address")))
            );
            assert_eq!(create.columns[4].name, Identifier::quoted("Frozen"));
        }
        _ => panic!("Ожидался CREATE TABLE"),
    }

    Ok(())
}

#[test]
fn test_table_definition_errors() {
    assert_eq!(semantic_message("CREATE TABLE t (a int)"), "table has no PRIMARY KEY");
    assert_eq!(
        semantic_message("CREATE TABLE t (a int PRIMARY KEY, b int, PRIMARY KEY (b))"),
        "PRIMARY KEY is defined more than once"
    );
    assert_eq!(
        semantic_message("CREATE TABLE t (a int, PRIMARY KEY (z))"),
        "PRIMARY KEY column 'z' is not defined"
    );
    assert_eq!(
        semantic_message("CREATE TABLE t (a int PRIMARY KEY, s int STATIC)"),
        "static column 's' requires clustering columns"
    );
    assert_eq!(
        semantic_message("CREATE TABLE t (a int STATIC, b int, PRIMARY KEY (a, b))"),
        "primary key column 'a' cannot be STATIC"
    );
    assert_eq!(
        semantic_message("CREATE TABLE t (a int, b int, PRIMARY KEY (a, a))"),
        "column 'a' appears more than once in PRIMARY KEY"
    );
}

#[test]
fn test_vector_dimension_must_be_positive() {
    assert_eq!(
        semantic_message("CREATE TABLE t (a int PRIMARY KEY, v vector<float, 0>)"),
        "vector dimension must be a positive integer"
    );
}

#[test]
fn test_quoted_key_column_matches_definition() -> Result<()> {
    // Имя в кавычках и без кавычек с одинаковым текстом означает одну колонку
    parse_statement("CREATE TABLE t (\"id\" int, PRIMARY KEY (id))")?;

    let lenient = ParserSettings {
        strict_validation: false,
        ..ParserSettings::default()
    };
    match parse_statement_with_settings("CREATE TABLE t (a int)", lenient)? {
        Statement::CreateTable(create) => assert!(create.primary_key.partition_key.is_empty()),
        _ => panic!("Ожидался CREATE TABLE"),
    }
    Ok(())
}

#[test]
fn test_alter_table_operations() -> Result<()> {
    let operation = |text: &str| -> Result<AlterTableOperation> {
        match parse_statement(text)? {
            Statement::AlterTable(alter) => Ok(alter.operation),
            _ => panic!("Ожидался ALTER TABLE"),
        }
    };

    match operation("ALTER TABLE t ADD (a int, b text)")? {
        AlterTableOperation::AddColumns(columns) => assert_eq!(columns.len(), 2),
        _ => panic!("Ожидался ADD"),
    }
    match operation("ALTER TABLE t ADD s int STATIC")? {
        AlterTableOperation::AddColumns(columns) => assert!(columns[0].is_static),
        _ => panic!("Ожидался ADD"),
    }
    assert_eq!(
        operation("ALTER TABLE t DROP c")?,
        AlterTableOperation::DropColumns(vec![id("c")])
    );
    assert_eq!(
        operation("ALTER TABLE t DROP (c, d)")?,
        AlterTableOperation::DropColumns(vec![id("c"), id("d")])
    );
    assert_eq!(
        operation("ALTER TABLE t DROP COMPACT STORAGE")?,
        AlterTableOperation::DropCompactStorage
    );
    assert_eq!(
        operation("ALTER TABLE t RENAME a TO b AND c TO d")?,
        AlterTableOperation::RenameColumns(vec![(id("a"), id("b")), (id("c"), id("d"))])
    );
    assert_eq!(
        operation("ALTER TABLE t ALTER a TYPE blob")?,
        AlterTableOperation::AlterColumnType {
            column: id("a"),
            data_type: native(NativeType::Blob),
        }
    );
    match operation("ALTER TABLE t WITH COMPACT STORAGE AND gc_grace_seconds = 0")? {
        AlterTableOperation::WithOptions(options) => {
            assert!(options.compact_storage);
            assert_eq!(options.options.len(), 1);
        }
        _ => panic!("Ожидался WITH"),
    }

    Ok(())
}

#[test]
fn test_drop_and_truncate_tables() -> Result<()> {
    match parse_statement("DROP COLUMNFAMILY IF EXISTS ks.t")? {
        Statement::DropTable(drop) => {
            assert!(drop.if_exists);
            assert_eq!(drop.name, QualifiedName::qualified(id("ks"), id("t")));
        }
        _ => panic!("Ожидался DROP TABLE"),
    }

    assert_eq!(parse_statement("TRUNCATE TABLE t")?, parse_statement("TRUNCATE t")?);
    Ok(())
}

#[test]
fn test_user_types() -> Result<()> {
    match parse_statement("CREATE TYPE ks.address (street text, zip int)")? {
        Statement::CreateType(create) => {
            assert_eq!(
                create.fields,
                vec![
                    FieldDefinition {
                        name: id("street"),
                        data_type: native(NativeType::Text),
                    },
                    FieldDefinition {
                        name: id("zip"),
                        data_type: native(NativeType::Int),
                    },
                ]
            );
        }
        _ => panic!("Ожидался CREATE TYPE"),
    }

    assert_eq!(
        semantic_message("CREATE TYPE address (zip int, zip text)"),
        "field 'zip' is defined more than once"
    );

    match parse_statement("ALTER TYPE address RENAME zip TO postcode")? {
        Statement::AlterType(alter) => {
            assert_eq!(
                alter.operation,
                AlterTypeOperation::RenameFields(vec![(id("zip"), id("postcode"))])
            );
        }
        _ => panic!("Ожидался ALTER TYPE"),
    }

    assert!(matches!(
        parse_statement("ALTER TYPE address ADD city text")?,
        Statement::AlterType(_)
    ));
    assert!(matches!(
        parse_statement("DROP TYPE IF EXISTS address")?,
        Statement::DropType(_)
    ));
    Ok(())
}

#[test]
fn test_indexes() -> Result<()> {
    match parse_statement(
        "CREATE CUSTOM INDEX IF NOT EXISTS idx ON t (keys(m)) USING 'org.Foo' \
         WITH options = {'mode': 'CONTAINS'}",
    )? {
        Statement::CreateIndex(create) => {
            assert!(create.custom);
            assert!(create.if_not_exists);
            assert_eq!(create.name, Some(id("idx")));
            assert_eq!(create.target.kind, IndexTargetKind::Keys);
            assert_eq!(create.target.column, id("m"));
            assert_eq!(create.using.as_deref(), Some("org.Foo"));
            assert!(matches!(create.options["options"], OptionValue::Map(_)));
        }
        _ => panic!("Ожидался CREATE INDEX"),
    }

    match parse_statement("CREATE INDEX ON t (full(frozen_list))")? {
        Statement::CreateIndex(create) => {
            assert_eq!(create.name, None);
            assert_eq!(create.target.kind, IndexTargetKind::Full);
        }
        _ => panic!("Ожидался CREATE INDEX"),
    }

    // Колонка с именем values без скобок
    match parse_statement("CREATE INDEX ON t (values)")? {
        Statement::CreateIndex(create) => {
            assert_eq!(create.target.kind, IndexTargetKind::Simple);
            assert_eq!(create.target.column, id("values"));
        }
        _ => panic!("Ожидался CREATE INDEX"),
    }

    assert!(matches!(
        parse_statement("DROP INDEX IF EXISTS ks.idx")?,
        Statement::DropIndex(_)
    ));
    Ok(())
}

#[test]
fn test_materialized_views() -> Result<()> {
    match parse_statement(
        "CREATE MATERIALIZED VIEW ks.by_name AS SELECT id, name FROM ks.users \
         WHERE name IS NOT NULL AND id IS NOT NULL PRIMARY KEY (name, id) \
         WITH CLUSTERING ORDER BY (id ASC)",
    )? {
        Statement::CreateMaterializedView(view) => {
            assert_eq!(view.name.name, id("by_name"));
            assert!(matches!(view.selection, SelectClause::Elements(_)));
            assert_eq!(view.where_clause.len(), 2);
            assert_eq!(view.primary_key.partition_key, vec![id("name")]);
            assert_eq!(view.primary_key.clustering_columns, vec![id("id")]);
            assert_eq!(view.options.clustering_order[0].direction, OrderDirection::Asc);
        }
        _ => panic!("Ожидался CREATE MATERIALIZED VIEW"),
    }

    assert!(matches!(
        parse_statement("ALTER MATERIALIZED VIEW by_name WITH comment = 'x'")?,
        Statement::AlterMaterializedView(_)
    ));
    assert!(matches!(
        parse_statement("DROP MATERIALIZED VIEW IF EXISTS by_name")?,
        Statement::DropMaterializedView(_)
    ));

    let error = parse_statement("CREATE MATERIALIZED VIEW v AS SELECT * FROM t PRIMARY KEY (a)").unwrap_err();
    assert!(error.expects(&Expected::Keyword(crate::parser::Keyword::Where)));
    Ok(())
}

#[test]
fn test_functions() -> Result<()> {
    match parse_statement(
        "CREATE OR REPLACE FUNCTION ks.plus (a int, b int) CALLED ON NULL INPUT \
         RETURNS int LANGUAGE java AS $$ return a + b; $$",
    )? {
        Statement::CreateFunction(function) => {
            assert!(function.or_replace);
            assert!(!function.if_not_exists);
            assert_eq!(function.params.len(), 2);
            assert_eq!(function.on_null_input, OnNullInput::Called);
            assert_eq!(function.return_type, native(NativeType::Int));
            assert_eq!(function.language, id("java"));
            assert_eq!(function.body, " return a + b; ");
        }
        _ => panic!("Ожидался CREATE FUNCTION"),
    }

    match parse_statement(
        "CREATE FUNCTION IF NOT EXISTS f (x text) RETURNS NULL ON NULL INPUT \
         RETURNS text LANGUAGE javascript AS 'x;'",
    )? {
        Statement::CreateFunction(function) => {
            assert_eq!(function.on_null_input, OnNullInput::ReturnsNull);
            assert_eq!(function.body, "x;");
        }
        _ => panic!("Ожидался CREATE FUNCTION"),
    }

    match parse_statement("DROP FUNCTION ks.plus (int, int)")? {
        Statement::DropFunction(drop) => {
            assert_eq!(
                drop.signature,
                Some(vec![native(NativeType::Int), native(NativeType::Int)])
            );
        }
        _ => panic!("Ожидался DROP FUNCTION"),
    }

    match parse_statement("DROP FUNCTION IF EXISTS plus")? {
        Statement::DropFunction(drop) => assert_eq!(drop.signature, None),
        _ => panic!("Ожидался DROP FUNCTION"),
    }

    assert_eq!(
        semantic_message("CREATE FUNCTION f (a int, a int) CALLED ON NULL INPUT RETURNS int LANGUAGE java AS 'a'"),
        "parameter 'a' is defined more than once"
    );
    Ok(())
}

#[test]
fn test_aggregates_and_triggers() -> Result<()> {
    match parse_statement(
        "CREATE AGGREGATE IF NOT EXISTS average (int) SFUNC acc STYPE tuple<int, bigint> \
         FINALFUNC fin INITCOND (0, 0)",
    )? {
        Statement::CreateAggregate(aggregate) => {
            assert_eq!(aggregate.arg_types, vec![native(NativeType::Int)]);
            assert_eq!(aggregate.state_function, id("acc"));
            assert_eq!(aggregate.final_function, Some(id("fin")));
            assert_eq!(
                aggregate.initial_condition,
                Some(Term::Tuple(vec![
                    Term::Constant(Constant::Integer(0)),
                    Term::Constant(Constant::Integer(0)),
                ]))
            );
        }
        _ => panic!("Ожидался CREATE AGGREGATE"),
    }

    assert!(matches!(
        parse_statement("DROP AGGREGATE average (int)")?,
        Statement::DropAggregate(_)
    ));

    match parse_statement("CREATE TRIGGER audit ON ks.t USING 'org.Audit'")? {
        Statement::CreateTrigger(trigger) => {
            assert_eq!(trigger.name, id("audit"));
            assert_eq!(trigger.class, "org.Audit");
        }
        _ => panic!("Ожидался CREATE TRIGGER"),
    }

    match parse_statement("DROP TRIGGER IF EXISTS audit ON ks.t")? {
        Statement::DropTrigger(trigger) => assert!(trigger.if_exists),
        _ => panic!("Ожидался DROP TRIGGER"),
    }
    Ok(())
}

#[test]
fn test_create_dispatch_error() {
    let error = parse_statement("CREATE SOMETHING x").unwrap_err();

    assert_eq!(error.found.as_deref(), Some("SOMETHING"));
    assert!(error.expects(&Expected::Keyword(crate::parser::Keyword::Table)));
    assert!(error.expects(&Expected::Keyword(crate::parser::Keyword::Materialized)));
}
