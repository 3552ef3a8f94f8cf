// Правила DML: SELECT, INSERT, UPDATE, DELETE, BATCH

use crate::parser::ast::*;
use crate::parser::diagnostics::ParseResult;
use crate::parser::keywords::Keyword;
use crate::parser::parser::CqlParser;
use crate::parser::semantic;
use crate::parser::token::TokenType;

impl CqlParser {
    /// SELECT [JSON] [DISTINCT] selection FROM table [WHERE ...] [ORDER BY ...]
    /// [PER PARTITION LIMIT n] [LIMIT n] [ALLOW FILTERING]
    pub(crate) fn parse_select(&mut self) -> ParseResult<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;

        let json = self.eat_select_modifier(Keyword::Json);
        let distinct = self.eat_select_modifier(Keyword::Distinct);
        let selection = self.parse_select_clause()?;

        self.expect_keyword(Keyword::From)?;
        let from = self.parse_qualified_name()?;
        let where_clause = self.parse_optional_where()?;

        let mut order_by = Vec::new();
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            loop {
                order_by.push(self.parse_ordering()?);
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
        }

        let per_partition_limit = if self.eat_keyword(Keyword::Per) {
            self.expect_keywords(&[Keyword::Partition, Keyword::Limit])?;
            Some(self.parse_integer_value()?)
        } else {
            None
        };

        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_integer_value()?)
        } else {
            None
        };

        let allow_filtering = if self.eat_keyword(Keyword::Allow) {
            self.expect_keyword(Keyword::Filtering)?;
            true
        } else {
            false
        };

        Ok(SelectStatement {
            json,
            distinct,
            selection,
            from,
            where_clause,
            order_by,
            per_partition_limit,
            limit,
            allow_filtering,
        })
    }

    /// JSON и DISTINCT не зарезервированы: это модификатор, только если
    /// за словом начинается список выборки
    fn eat_select_modifier(&mut self, keyword: Keyword) -> bool {
        if !self.check_keyword(keyword) {
            return false;
        }
        let next = self.peek_at(1);
        let starts_selection = next.is(TokenType::Star)
            || next.is_keyword(Keyword::Token)
            || (Self::is_identifier_token(next) && !next.is_keyword(Keyword::As));
        if starts_selection {
            self.advance();
        }
        starts_selection
    }

    /// Список выборки: `*` или элементы через запятую
    pub(crate) fn parse_select_clause(&mut self) -> ParseResult<SelectClause> {
        if self.eat(TokenType::Star) {
            return Ok(SelectClause::Wildcard);
        }

        let mut elements = vec![self.parse_select_element()?];
        while self.eat(TokenType::Comma) {
            elements.push(self.parse_select_element()?);
        }
        Ok(SelectClause::Elements(elements))
    }

    fn parse_select_element(&mut self) -> ParseResult<SelectElement> {
        let selector = if self.at_function_call() {
            Selector::FunctionCall(self.parse_function_call()?)
        } else {
            Selector::Column(self.parse_identifier()?)
        };

        let alias = if self.eat_keyword(Keyword::As) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        Ok(SelectElement { selector, alias })
    }

    /// INSERT INTO table (cols) VALUES (terms) | JSON '...' [DEFAULT NULL|UNSET]
    /// [IF NOT EXISTS] [USING ...]
    pub(crate) fn parse_insert(&mut self) -> ParseResult<InsertStatement> {
        self.expect_keywords(&[Keyword::Insert, Keyword::Into])?;
        let table = self.parse_qualified_name()?;
        let source_token = self.current().clone();

        let source = if self.eat_keyword(Keyword::Json) {
            let value = match self.parse_bind_marker()? {
                Some(marker) => Term::BindMarker(marker),
                None => Term::Constant(Constant::String(self.parse_string()?)),
            };
            let default = if self.eat_keyword(Keyword::Default) {
                if self.eat_keyword(Keyword::Null) {
                    Some(JsonDefault::Null)
                } else {
                    self.expect_keyword(Keyword::Unset)?;
                    Some(JsonDefault::Unset)
                }
            } else {
                None
            };
            InsertSource::Json { value, default }
        } else {
            self.expect(TokenType::LeftParen)?;
            let columns = self.parse_identifier_list()?;
            self.expect(TokenType::RightParen)?;
            self.expect_keyword(Keyword::Values)?;
            self.expect(TokenType::LeftParen)?;
            let mut values = vec![self.parse_term()?];
            while self.eat(TokenType::Comma) {
                values.push(self.parse_term()?);
            }
            self.expect(TokenType::RightParen)?;
            InsertSource::Values { columns, values }
        };

        let if_not_exists = self.parse_if_not_exists()?;
        let using = self.parse_using(true)?;

        let statement = InsertStatement {
            table,
            source,
            if_not_exists,
            using,
        };
        self.validate(&source_token, semantic::check_insert(&statement))?;
        Ok(statement)
    }

    /// UPDATE table [USING ...] SET assignments WHERE relations [IF ...]
    pub(crate) fn parse_update(&mut self) -> ParseResult<UpdateStatement> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_qualified_name()?;
        let using = self.parse_using(true)?;

        self.expect_keyword(Keyword::Set)?;
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(TokenType::Comma) {
            assignments.push(self.parse_assignment()?);
        }

        self.expect_keyword(Keyword::Where)?;
        let where_clause = self.parse_relations()?;
        let condition = self.parse_update_condition()?;

        Ok(UpdateStatement {
            table,
            using,
            assignments,
            where_clause,
            condition,
        })
    }

    /// Присваивание: `c = v`, `c = c + v`, `c = v + c`, `c = c - v`, `c[k] = v`, `c.f = v`
    fn parse_assignment(&mut self) -> ParseResult<Assignment> {
        let column = self.parse_identifier()?;

        if self.eat(TokenType::LeftBracket) {
            let key = self.parse_term()?;
            self.expect(TokenType::RightBracket)?;
            self.expect(TokenType::Equal)?;
            let value = self.parse_term()?;
            return Ok(Assignment::SetElement { column, key, value });
        }
        if self.eat(TokenType::Dot) {
            let field = self.parse_identifier()?;
            self.expect(TokenType::Equal)?;
            let value = self.parse_term()?;
            return Ok(Assignment::SetField { column, field, value });
        }

        self.expect(TokenType::Equal)?;

        // c = c + v / c = c - v
        let operator_follows = matches!(self.peek_at(1).token_type, TokenType::Plus | TokenType::Minus);
        if Self::is_identifier_token(self.current()) && operator_follows {
            self.expect_same_column(&column)?;
            if self.eat(TokenType::Plus) {
                let value = self.parse_term()?;
                return Ok(Assignment::Append { column, value });
            }
            self.expect(TokenType::Minus)?;
            let value = self.parse_term()?;
            return Ok(Assignment::Remove { column, value });
        }

        let value = self.parse_term()?;

        // c = v + c
        if self.eat(TokenType::Plus) {
            self.expect_same_column(&column)?;
            return Ok(Assignment::Prepend { column, value });
        }

        Ok(Assignment::Set { column, value })
    }

    /// Правая часть `c = c + v` должна ссылаться на ту же колонку
    fn expect_same_column(&mut self, column: &Identifier) -> ParseResult<()> {
        let token = self.current().clone();
        let other = self.parse_identifier()?;
        if other.name != column.name {
            return Err(self.semantic_error(
                &token,
                format!("only '{0} = {0} + value' style updates are supported for column '{0}'", column.name),
            ));
        }
        Ok(())
    }

    /// DELETE [targets] FROM table [USING TIMESTAMP n] WHERE relations [IF ...]
    pub(crate) fn parse_delete(&mut self) -> ParseResult<DeleteStatement> {
        self.expect_keyword(Keyword::Delete)?;

        let mut targets = Vec::new();
        if !self.check_keyword(Keyword::From) {
            loop {
                let column = self.parse_identifier()?;
                if self.eat(TokenType::LeftBracket) {
                    let key = self.parse_term()?;
                    self.expect(TokenType::RightBracket)?;
                    targets.push(DeleteTarget::Element { column, key });
                } else {
                    targets.push(DeleteTarget::Column(column));
                }
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
        }

        self.expect_keyword(Keyword::From)?;
        let table = self.parse_qualified_name()?;
        let using = self.parse_using(false)?;
        self.expect_keyword(Keyword::Where)?;
        let where_clause = self.parse_relations()?;
        let condition = self.parse_update_condition()?;

        Ok(DeleteStatement {
            targets,
            table,
            using,
            where_clause,
            condition,
        })
    }

    /// BEGIN [UNLOGGED|COUNTER] BATCH [USING TIMESTAMP n] stmt; ... APPLY BATCH
    pub(crate) fn parse_batch(&mut self) -> ParseResult<BatchStatement> {
        self.expect_keyword(Keyword::Begin)?;

        let kind = if self.eat_keyword(Keyword::Unlogged) {
            BatchKind::Unlogged
        } else if self.eat_keyword(Keyword::Counter) {
            BatchKind::Counter
        } else {
            BatchKind::Logged
        };
        self.expect_keyword(Keyword::Batch)?;
        let using = self.parse_using(false)?;

        let mut statements = Vec::new();
        loop {
            if self.check_keyword(Keyword::Insert) {
                statements.push(BatchEntry::Insert(self.parse_insert()?));
            } else if self.check_keyword(Keyword::Update) {
                statements.push(BatchEntry::Update(self.parse_update()?));
            } else if self.check_keyword(Keyword::Delete) {
                statements.push(BatchEntry::Delete(self.parse_delete()?));
            } else if self.eat_keyword(Keyword::Apply) {
                self.expect_keyword(Keyword::Batch)?;
                break;
            } else {
                return Err(self.error_here());
            }
            self.eat(TokenType::Semicolon);
        }

        log::trace!("batch with {} statements", statements.len());
        Ok(BatchStatement {
            kind,
            using,
            statements,
        })
    }
}
