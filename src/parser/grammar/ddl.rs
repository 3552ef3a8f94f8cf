// Правила DDL: keyspace, таблицы, типы, индексы, представления, функции,
// агрегаты и триггеры

use crate::parser::ast::*;
use crate::parser::diagnostics::ParseResult;
use crate::parser::keywords::Keyword;
use crate::parser::parser::CqlParser;
use crate::parser::semantic;
use crate::parser::token::TokenType;

impl CqlParser {
    /// CREATE ...
    pub(crate) fn parse_create(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Create)?;

        if self.eat_keyword(Keyword::Or) {
            self.expect_keyword(Keyword::Replace)?;
            if self.check_keyword(Keyword::Function) {
                return self.parse_create_function(true).map(Statement::CreateFunction);
            }
            if self.check_keyword(Keyword::Aggregate) {
                return self.parse_create_aggregate(true).map(Statement::CreateAggregate);
            }
            return Err(self.error_here());
        }

        if self.check_keyword(Keyword::Keyspace) || self.check_keyword(Keyword::Schema) {
            return self.parse_create_keyspace().map(Statement::CreateKeyspace);
        }
        if self.check_keyword(Keyword::Table) || self.check_keyword(Keyword::Columnfamily) {
            return self.parse_create_table().map(Statement::CreateTable);
        }
        if self.check_keyword(Keyword::Type) {
            return self.parse_create_type().map(Statement::CreateType);
        }
        if self.check_keyword(Keyword::Index) || self.check_keyword(Keyword::Custom) {
            return self.parse_create_index().map(Statement::CreateIndex);
        }
        if self.check_keyword(Keyword::Materialized) {
            return self.parse_create_materialized_view().map(Statement::CreateMaterializedView);
        }
        if self.check_keyword(Keyword::Function) {
            return self.parse_create_function(false).map(Statement::CreateFunction);
        }
        if self.check_keyword(Keyword::Aggregate) {
            return self.parse_create_aggregate(false).map(Statement::CreateAggregate);
        }
        if self.check_keyword(Keyword::Trigger) {
            return self.parse_create_trigger().map(Statement::CreateTrigger);
        }
        if self.check_keyword(Keyword::Role) {
            return self.parse_create_role().map(Statement::CreateRole);
        }
        if self.check_keyword(Keyword::User) {
            return self.parse_create_user().map(Statement::CreateUser);
        }

        Err(self.error_here())
    }

    /// ALTER ...
    pub(crate) fn parse_alter(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Alter)?;

        if self.eat_keyword(Keyword::Keyspace) || self.eat_keyword(Keyword::Schema) {
            let name = self.parse_identifier()?;
            self.expect_keyword(Keyword::With)?;
            let options = self.parse_options()?;
            return Ok(Statement::AlterKeyspace(AlterKeyspaceStatement { name, options }));
        }
        if self.eat_keyword(Keyword::Table) || self.eat_keyword(Keyword::Columnfamily) {
            return self.parse_alter_table().map(Statement::AlterTable);
        }
        if self.eat_keyword(Keyword::Type) {
            return self.parse_alter_type().map(Statement::AlterType);
        }
        if self.eat_keyword(Keyword::Materialized) {
            self.expect_keyword(Keyword::View)?;
            let name = self.parse_qualified_name()?;
            self.expect_keyword(Keyword::With)?;
            let options = self.parse_table_options()?;
            return Ok(Statement::AlterMaterializedView(AlterMaterializedViewStatement {
                name,
                options,
            }));
        }
        if self.check_keyword(Keyword::Role) {
            return self.parse_alter_role().map(Statement::AlterRole);
        }
        if self.check_keyword(Keyword::User) {
            return self.parse_alter_user().map(Statement::AlterUser);
        }

        Err(self.error_here())
    }

    /// DROP ...
    pub(crate) fn parse_drop(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Drop)?;

        if self.eat_keyword(Keyword::Keyspace) || self.eat_keyword(Keyword::Schema) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_identifier()?;
            return Ok(Statement::DropKeyspace(DropKeyspaceStatement { if_exists, name }));
        }
        if self.eat_keyword(Keyword::Table) || self.eat_keyword(Keyword::Columnfamily) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropTable(DropTableStatement { if_exists, name }));
        }
        if self.eat_keyword(Keyword::Type) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropType(DropTypeStatement { if_exists, name }));
        }
        if self.eat_keyword(Keyword::Index) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropIndex(DropIndexStatement { if_exists, name }));
        }
        if self.eat_keyword(Keyword::Materialized) {
            self.expect_keyword(Keyword::View)?;
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_qualified_name()?;
            return Ok(Statement::DropMaterializedView(DropMaterializedViewStatement {
                if_exists,
                name,
            }));
        }
        if self.eat_keyword(Keyword::Function) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_qualified_name()?;
            let signature = self.parse_optional_signature()?;
            return Ok(Statement::DropFunction(DropFunctionStatement {
                if_exists,
                name,
                signature,
            }));
        }
        if self.eat_keyword(Keyword::Aggregate) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_qualified_name()?;
            let signature = self.parse_optional_signature()?;
            return Ok(Statement::DropAggregate(DropAggregateStatement {
                if_exists,
                name,
                signature,
            }));
        }
        if self.eat_keyword(Keyword::Trigger) {
            let if_exists = self.parse_if_exists()?;
            let name = self.parse_identifier()?;
            self.expect_keyword(Keyword::On)?;
            let table = self.parse_qualified_name()?;
            return Ok(Statement::DropTrigger(DropTriggerStatement {
                if_exists,
                name,
                table,
            }));
        }
        if self.check_keyword(Keyword::Role) {
            return self.parse_drop_role().map(Statement::DropRole);
        }
        if self.check_keyword(Keyword::User) {
            return self.parse_drop_user().map(Statement::DropUser);
        }

        Err(self.error_here())
    }

    /// USE keyspace
    pub(crate) fn parse_use(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Use)?;
        let name = self.parse_identifier()?;
        Ok(Statement::UseKeyspace(UseKeyspaceStatement { name }))
    }

    /// TRUNCATE [TABLE] name
    pub(crate) fn parse_truncate(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Truncate)?;
        if !self.eat_keyword(Keyword::Table) {
            self.eat_keyword(Keyword::Columnfamily);
        }
        let name = self.parse_qualified_name()?;
        Ok(Statement::Truncate(TruncateStatement { name }))
    }

    // === Keyspace ===

    fn parse_create_keyspace(&mut self) -> ParseResult<CreateKeyspaceStatement> {
        self.advance();
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::With)?;
        let options = self.parse_options()?;

        Ok(CreateKeyspaceStatement {
            if_not_exists,
            name,
            options,
        })
    }

    // === Таблицы ===

    /// CREATE TABLE [IF NOT EXISTS] name (definitions) [WITH options]
    fn parse_create_table(&mut self) -> ParseResult<CreateTableStatement> {
        self.advance();
        let if_not_exists = self.parse_if_not_exists()?;
        let name_token = self.current().clone();
        let name = self.parse_qualified_name()?;

        self.expect(TokenType::LeftParen)?;
        let mut columns = Vec::new();
        let mut primary_key: Option<PrimaryKey> = None;
        let mut key_definitions = 0;

        loop {
            if self.eat_keyword(Keyword::Primary) {
                self.expect_keyword(Keyword::Key)?;
                let key = self.parse_primary_key_clause()?;
                key_definitions += 1;
                primary_key.get_or_insert(key);
            } else {
                let column = self.parse_column_definition()?;
                if self.eat_keyword(Keyword::Primary) {
                    self.expect_keyword(Keyword::Key)?;
                    key_definitions += 1;
                    primary_key.get_or_insert(PrimaryKey {
                        partition_key: vec![column.name.clone()],
                        clustering_columns: Vec::new(),
                    });
                }
                columns.push(column);
            }
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightParen)?;

        let options = if self.eat_keyword(Keyword::With) {
            self.parse_table_options()?
        } else {
            TableOptions::default()
        };

        let primary_key = primary_key.unwrap_or_default();
        self.validate(
            &name_token,
            semantic::check_table_definition(&columns, &primary_key, key_definitions),
        )?;

        Ok(CreateTableStatement {
            if_not_exists,
            name,
            columns,
            primary_key,
            options,
        })
    }

    /// `name type [STATIC]`
    fn parse_column_definition(&mut self) -> ParseResult<ColumnDefinition> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let is_static = self.eat_keyword(Keyword::Static);
        Ok(ColumnDefinition {
            name,
            data_type,
            is_static,
        })
    }

    /// `(pk)`, `(pk, ck...)`, `((pk1, pk2), ck...)` (`PRIMARY KEY` уже потреблено)
    pub(crate) fn parse_primary_key_clause(&mut self) -> ParseResult<PrimaryKey> {
        self.expect(TokenType::LeftParen)?;

        let partition_key = if self.eat(TokenType::LeftParen) {
            let columns = self.parse_identifier_list()?;
            self.expect(TokenType::RightParen)?;
            columns
        } else {
            vec![self.parse_identifier()?]
        };

        let mut clustering_columns = Vec::new();
        while self.eat(TokenType::Comma) {
            clustering_columns.push(self.parse_identifier()?);
        }
        self.expect(TokenType::RightParen)?;

        Ok(PrimaryKey {
            partition_key,
            clustering_columns,
        })
    }

    /// ALTER TABLE name ADD | DROP | RENAME | ALTER | WITH (`ALTER TABLE` уже потреблено)
    fn parse_alter_table(&mut self) -> ParseResult<AlterTableStatement> {
        let name = self.parse_qualified_name()?;

        let operation = if self.eat_keyword(Keyword::Add) {
            let mut columns = Vec::new();
            if self.eat(TokenType::LeftParen) {
                loop {
                    columns.push(self.parse_column_definition()?);
                    if !self.eat(TokenType::Comma) {
                        break;
                    }
                }
                self.expect(TokenType::RightParen)?;
            } else {
                columns.push(self.parse_column_definition()?);
            }
            AlterTableOperation::AddColumns(columns)
        } else if self.eat_keyword(Keyword::Drop) {
            if self.check_keyword(Keyword::Compact) && self.peek_at(1).is_keyword(Keyword::Storage) {
                self.advance();
                self.advance();
                AlterTableOperation::DropCompactStorage
            } else if self.eat(TokenType::LeftParen) {
                let columns = self.parse_identifier_list()?;
                self.expect(TokenType::RightParen)?;
                AlterTableOperation::DropColumns(columns)
            } else {
                AlterTableOperation::DropColumns(vec![self.parse_identifier()?])
            }
        } else if self.eat_keyword(Keyword::Rename) {
            AlterTableOperation::RenameColumns(self.parse_renames()?)
        } else if self.eat_keyword(Keyword::Alter) {
            let column = self.parse_identifier()?;
            self.expect_keyword(Keyword::Type)?;
            let data_type = self.parse_data_type()?;
            AlterTableOperation::AlterColumnType { column, data_type }
        } else if self.eat_keyword(Keyword::With) {
            AlterTableOperation::WithOptions(self.parse_table_options()?)
        } else {
            return Err(self.error_here());
        };

        Ok(AlterTableStatement { name, operation })
    }

    /// `a TO b [AND c TO d ...]`
    fn parse_renames(&mut self) -> ParseResult<Vec<(Identifier, Identifier)>> {
        let mut renames = Vec::new();
        loop {
            let from = self.parse_identifier()?;
            self.expect_keyword(Keyword::To)?;
            let to = self.parse_identifier()?;
            renames.push((from, to));
            if !self.eat_keyword(Keyword::And) {
                break;
            }
        }
        Ok(renames)
    }

    // === Пользовательские типы ===

    fn parse_create_type(&mut self) -> ParseResult<CreateTypeStatement> {
        self.advance();
        let if_not_exists = self.parse_if_not_exists()?;
        let name_token = self.current().clone();
        let name = self.parse_qualified_name()?;

        self.expect(TokenType::LeftParen)?;
        let mut fields = vec![self.parse_field_definition()?];
        while self.eat(TokenType::Comma) {
            fields.push(self.parse_field_definition()?);
        }
        self.expect(TokenType::RightParen)?;

        self.validate(&name_token, semantic::check_fields(&fields, "field"))?;
        Ok(CreateTypeStatement {
            if_not_exists,
            name,
            fields,
        })
    }

    /// `name type`
    fn parse_field_definition(&mut self) -> ParseResult<FieldDefinition> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        Ok(FieldDefinition { name, data_type })
    }

    fn parse_alter_type(&mut self) -> ParseResult<AlterTypeStatement> {
        let name = self.parse_qualified_name()?;

        let operation = if self.eat_keyword(Keyword::Add) {
            AlterTypeOperation::AddField(self.parse_field_definition()?)
        } else if self.eat_keyword(Keyword::Rename) {
            AlterTypeOperation::RenameFields(self.parse_renames()?)
        } else if self.eat_keyword(Keyword::Alter) {
            let field = self.parse_identifier()?;
            self.expect_keyword(Keyword::Type)?;
            let data_type = self.parse_data_type()?;
            AlterTypeOperation::AlterFieldType { field, data_type }
        } else {
            return Err(self.error_here());
        };

        Ok(AlterTypeStatement { name, operation })
    }

    // === Индексы ===

    /// CREATE [CUSTOM] INDEX [IF NOT EXISTS] [name] ON table (target) [USING 'class'] [WITH options]
    fn parse_create_index(&mut self) -> ParseResult<CreateIndexStatement> {
        let custom = self.eat_keyword(Keyword::Custom);
        self.expect_keyword(Keyword::Index)?;
        let if_not_exists = self.parse_if_not_exists()?;

        let name = if self.check_keyword(Keyword::On) {
            None
        } else {
            Some(self.parse_identifier()?)
        };
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_qualified_name()?;

        self.expect(TokenType::LeftParen)?;
        let target = self.parse_index_target()?;
        self.expect(TokenType::RightParen)?;

        let using = if self.eat_keyword(Keyword::Using) {
            Some(self.parse_string()?)
        } else {
            None
        };
        let options = if self.eat_keyword(Keyword::With) {
            self.parse_options()?
        } else {
            OptionMap::new()
        };

        Ok(CreateIndexStatement {
            custom,
            if_not_exists,
            name,
            table,
            target,
            using,
            options,
        })
    }

    /// `column`, `keys(column)`, `values(column)`, `entries(column)`, `full(column)`
    fn parse_index_target(&mut self) -> ParseResult<IndexTarget> {
        let kinds = [
            (Keyword::Keys, IndexTargetKind::Keys),
            (Keyword::Values, IndexTargetKind::Values),
            (Keyword::Entries, IndexTargetKind::Entries),
            (Keyword::Full, IndexTargetKind::Full),
        ];

        for (keyword, kind) in kinds {
            if self.check_keyword(keyword) && self.peek_at(1).is(TokenType::LeftParen) {
                self.advance();
                self.advance();
                let column = self.parse_identifier()?;
                self.expect(TokenType::RightParen)?;
                return Ok(IndexTarget { column, kind });
            }
        }

        let column = self.parse_identifier()?;
        Ok(IndexTarget {
            column,
            kind: IndexTargetKind::Simple,
        })
    }

    // === Материализованные представления ===

    /// CREATE MATERIALIZED VIEW [IF NOT EXISTS] name AS SELECT ... FROM ... WHERE ...
    /// PRIMARY KEY (...) [WITH options]
    fn parse_create_materialized_view(&mut self) -> ParseResult<CreateMaterializedViewStatement> {
        self.expect_keywords(&[Keyword::Materialized, Keyword::View])?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name()?;

        self.expect_keywords(&[Keyword::As, Keyword::Select])?;
        let selection = self.parse_select_clause()?;
        self.expect_keyword(Keyword::From)?;
        let from = self.parse_qualified_name()?;
        self.expect_keyword(Keyword::Where)?;
        let where_clause = self.parse_relations()?;

        let key_token = self.current().clone();
        self.expect_keywords(&[Keyword::Primary, Keyword::Key])?;
        let primary_key = self.parse_primary_key_clause()?;
        self.validate(&key_token, semantic::check_primary_key(&primary_key, |_| true))?;

        let options = if self.eat_keyword(Keyword::With) {
            self.parse_table_options()?
        } else {
            TableOptions::default()
        };

        Ok(CreateMaterializedViewStatement {
            if_not_exists,
            name,
            selection,
            from,
            where_clause,
            primary_key,
            options,
        })
    }

    // === Функции и агрегаты ===

    /// CREATE [OR REPLACE] FUNCTION [IF NOT EXISTS] name (params)
    /// (CALLED | RETURNS NULL) ON NULL INPUT RETURNS type LANGUAGE lang AS body
    fn parse_create_function(&mut self, or_replace: bool) -> ParseResult<CreateFunctionStatement> {
        self.expect_keyword(Keyword::Function)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name_token = self.current().clone();
        let name = self.parse_qualified_name()?;

        self.expect(TokenType::LeftParen)?;
        let mut params = Vec::new();
        if !self.eat(TokenType::RightParen) {
            loop {
                params.push(self.parse_field_definition()?);
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
            self.expect(TokenType::RightParen)?;
        }
        self.validate(&name_token, semantic::check_fields(&params, "parameter"))?;

        let on_null_input = if self.eat_keyword(Keyword::Called) {
            OnNullInput::Called
        } else {
            self.expect_keywords(&[Keyword::Returns, Keyword::Null])?;
            OnNullInput::ReturnsNull
        };
        self.expect_keywords(&[Keyword::On, Keyword::Null, Keyword::Input])?;

        self.expect_keyword(Keyword::Returns)?;
        let return_type = self.parse_data_type()?;
        self.expect_keyword(Keyword::Language)?;
        let language = self.parse_identifier()?;
        self.expect_keyword(Keyword::As)?;

        let body = if self.check(TokenType::CodeBlock) {
            self.advance().value
        } else {
            self.parse_string()?
        };

        Ok(CreateFunctionStatement {
            or_replace,
            if_not_exists,
            name,
            params,
            on_null_input,
            return_type,
            language,
            body,
        })
    }

    /// Необязательная сигнатура `(type, ...)` у DROP FUNCTION / DROP AGGREGATE
    fn parse_optional_signature(&mut self) -> ParseResult<Option<Vec<DataType>>> {
        if self.check(TokenType::LeftParen) {
            Ok(Some(self.parse_type_list()?))
        } else {
            Ok(None)
        }
    }

    /// CREATE [OR REPLACE] AGGREGATE [IF NOT EXISTS] name (types) SFUNC f STYPE type
    /// [FINALFUNC f] [INITCOND term]
    fn parse_create_aggregate(&mut self, or_replace: bool) -> ParseResult<CreateAggregateStatement> {
        self.expect_keyword(Keyword::Aggregate)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name()?;
        let arg_types = self.parse_type_list()?;

        self.expect_keyword(Keyword::Sfunc)?;
        let state_function = self.parse_identifier()?;
        self.expect_keyword(Keyword::Stype)?;
        let state_type = self.parse_data_type()?;

        let final_function = if self.eat_keyword(Keyword::Finalfunc) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let initial_condition = if self.eat_keyword(Keyword::Initcond) {
            Some(self.parse_term()?)
        } else {
            None
        };

        Ok(CreateAggregateStatement {
            or_replace,
            if_not_exists,
            name,
            arg_types,
            state_function,
            state_type,
            final_function,
            initial_condition,
        })
    }

    // === Триггеры ===

    /// CREATE TRIGGER [IF NOT EXISTS] name ON table USING 'class'
    fn parse_create_trigger(&mut self) -> ParseResult<CreateTriggerStatement> {
        self.expect_keyword(Keyword::Trigger)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_qualified_name()?;
        self.expect_keyword(Keyword::Using)?;
        let class = self.parse_string()?;

        Ok(CreateTriggerStatement {
            if_not_exists,
            name,
            table,
            class,
        })
    }
}
