// Общие правила: имена, типы данных, константы, термы, отношения, опции

use crate::parser::ast::*;
use crate::parser::diagnostics::{Expected, ParseResult};
use crate::parser::keywords::Keyword;
use crate::parser::parser::CqlParser;
use crate::parser::semantic;
use crate::parser::token::{Token, TokenType};
use indexmap::IndexMap;

/// Операторы сравнения и соответствующие им отношения
const COMPARISONS: [(TokenType, RelationOperator); 6] = [
    (TokenType::Equal, RelationOperator::Eq),
    (TokenType::NotEqual, RelationOperator::NotEq),
    (TokenType::Less, RelationOperator::Lt),
    (TokenType::LessEqual, RelationOperator::Le),
    (TokenType::Greater, RelationOperator::Gt),
    (TokenType::GreaterEqual, RelationOperator::Ge),
];

/// Собирает идентификатор из токена слова или имени в кавычках
fn identifier_from(token: &Token) -> Identifier {
    if token.is(TokenType::QuotedName) {
        Identifier::quoted(token.value.clone())
    } else {
        Identifier::unquoted(&token.value)
    }
}

/// Декодирует шестнадцатеричные цифры в байты
fn decode_hex(digits: &str) -> Option<Vec<u8>> {
    if digits.len() % 2 != 0 {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|index| u8::from_str_radix(&digits[index..index + 2], 16).ok())
        .collect()
}

impl CqlParser {
    // === Имена ===

    /// Может ли токен быть идентификатором без учета позиции в грамматике
    pub(crate) fn is_identifier_token(token: &Token) -> bool {
        match token.token_type {
            TokenType::Word => !token.keyword.is_some_and(|keyword| keyword.is_reserved()),
            TokenType::QuotedName => true,
            _ => false,
        }
    }

    pub(crate) fn check_identifier(&mut self) -> bool {
        let matched = Self::is_identifier_token(self.current());
        if !matched {
            self.note(Expected::Identifier);
        }
        matched
    }

    /// Идентификатор: незарезервированное слово или имя в кавычках
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        if !self.check_identifier() {
            return Err(self.error_here());
        }
        let token = self.advance();
        self.mark_identifier(&token);
        Ok(identifier_from(&token))
    }

    /// Имя с необязательным keyspace: `name` или `ks.name`
    pub(crate) fn parse_qualified_name(&mut self) -> ParseResult<QualifiedName> {
        let first = self.parse_identifier()?;
        if self.eat(TokenType::Dot) {
            let name = self.parse_identifier()?;
            Ok(QualifiedName::qualified(first, name))
        } else {
            Ok(QualifiedName::simple(first))
        }
    }

    /// Имя роли или пользователя: идентификатор или строка
    pub(crate) fn parse_role_name(&mut self) -> ParseResult<Identifier> {
        if self.current().is(TokenType::StringLiteral) {
            let token = self.advance();
            return Ok(Identifier::quoted(token.value));
        }
        self.note(Expected::StringLiteral);
        self.parse_identifier()
    }

    /// Список идентификаторов через запятую
    pub(crate) fn parse_identifier_list(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut identifiers = vec![self.parse_identifier()?];
        while self.eat(TokenType::Comma) {
            identifiers.push(self.parse_identifier()?);
        }
        Ok(identifiers)
    }

    // === IF [NOT] EXISTS ===

    pub(crate) fn parse_if_not_exists(&mut self) -> ParseResult<bool> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keywords(&[Keyword::Not, Keyword::Exists])?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn parse_if_exists(&mut self) -> ParseResult<bool> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // === Литералы ===

    pub(crate) fn parse_string(&mut self) -> ParseResult<String> {
        if self.current().is(TokenType::StringLiteral) {
            return Ok(self.advance().value);
        }
        self.note(Expected::StringLiteral);
        Err(self.error_here())
    }

    /// Целое число из токена; выход за диапазон `i64` дает семантическую ошибку
    fn integer_from(&self, token: &Token, negative: bool) -> ParseResult<i64> {
        let text = if negative {
            format!("-{}", token.value)
        } else {
            token.value.clone()
        };
        text.parse::<i64>()
            .map_err(|_| self.semantic_error(token, format!("integer {} is out of range", text)))
    }

    /// Неотрицательное целое
    pub(crate) fn parse_integer(&mut self) -> ParseResult<i64> {
        if self.current().is(TokenType::IntegerLiteral) {
            let token = self.advance();
            return self.integer_from(&token, false);
        }
        self.note(Expected::IntegerLiteral);
        Err(self.error_here())
    }

    /// Целое число или маркер привязки
    pub(crate) fn parse_integer_value(&mut self) -> ParseResult<IntegerValue> {
        if let Some(marker) = self.parse_bind_marker()? {
            return Ok(IntegerValue::BindMarker(marker));
        }
        self.parse_integer().map(IntegerValue::Literal)
    }

    /// `?` или `:name`
    pub(crate) fn parse_bind_marker(&mut self) -> ParseResult<Option<BindMarker>> {
        if self.eat(TokenType::Question) {
            return Ok(Some(BindMarker::Anonymous));
        }
        if self.eat(TokenType::Colon) {
            let name = self.parse_identifier()?;
            return Ok(Some(BindMarker::Named(name)));
        }
        Ok(None)
    }

    /// Может ли текущий токен начинать константу
    fn at_constant(&self) -> bool {
        let token = self.current();
        match token.token_type {
            TokenType::StringLiteral
            | TokenType::IntegerLiteral
            | TokenType::FloatLiteral
            | TokenType::HexLiteral
            | TokenType::UuidLiteral
            | TokenType::BooleanLiteral
            | TokenType::Minus => true,
            TokenType::Word => matches!(
                token.keyword,
                Some(Keyword::Null) | Some(Keyword::Nan) | Some(Keyword::Infinity)
            ),
            _ => false,
        }
    }

    /// Константа: число, строка, логическое значение, blob, UUID или NULL
    pub(crate) fn parse_constant(&mut self) -> ParseResult<Constant> {
        if !self.at_constant() {
            self.note(Expected::Constant);
            return Err(self.error_here());
        }

        let token = self.advance();
        match token.token_type {
            TokenType::StringLiteral => Ok(Constant::String(token.value)),
            TokenType::IntegerLiteral => self.integer_from(&token, false).map(Constant::Integer),
            TokenType::FloatLiteral => self.float_from(&token, false).map(Constant::Float),
            TokenType::BooleanLiteral => Ok(Constant::Boolean(token.value.eq_ignore_ascii_case("true"))),
            TokenType::HexLiteral => decode_hex(&token.value)
                .map(Constant::Blob)
                .ok_or_else(|| self.semantic_error(&token, "blob literal must have an even number of hex digits")),
            TokenType::UuidLiteral => uuid::Uuid::parse_str(&token.value)
                .map(Constant::Uuid)
                .map_err(|error| self.semantic_error(&token, format!("invalid uuid: {}", error))),
            TokenType::Minus => self.parse_negative_number(),
            _ => match token.keyword {
                Some(Keyword::Nan) => Ok(Constant::Float(f64::NAN)),
                Some(Keyword::Infinity) => Ok(Constant::Float(f64::INFINITY)),
                _ => Ok(Constant::Null),
            },
        }
    }

    /// Число после унарного минуса
    fn parse_negative_number(&mut self) -> ParseResult<Constant> {
        let token = self.current().clone();
        match token.token_type {
            TokenType::IntegerLiteral => {
                self.advance();
                self.integer_from(&token, true).map(Constant::Integer)
            }
            TokenType::FloatLiteral => {
                self.advance();
                self.float_from(&token, true).map(Constant::Float)
            }
            TokenType::Word if token.is_keyword(Keyword::Infinity) => {
                self.advance();
                Ok(Constant::Float(f64::NEG_INFINITY))
            }
            _ => {
                self.note(Expected::IntegerLiteral);
                self.note(Expected::Keyword(Keyword::Infinity));
                Err(self.error_here())
            }
        }
    }

    fn float_from(&self, token: &Token, negative: bool) -> ParseResult<f64> {
        let value = token
            .value
            .parse::<f64>()
            .map_err(|_| self.semantic_error(token, format!("invalid float literal {}", token.value)))?;
        Ok(if negative { -value } else { value })
    }

    // === Термы ===

    /// Начинается ли в текущей позиции вызов функции `f(` или `ks.f(`
    pub(crate) fn at_function_call(&self) -> bool {
        let token = self.current();
        let is_name = Self::is_identifier_token(token) || token.is_keyword(Keyword::Token);
        if !is_name {
            return false;
        }
        if self.peek_at(1).is(TokenType::LeftParen) {
            return true;
        }
        self.peek_at(1).is(TokenType::Dot)
            && Self::is_identifier_token(self.peek_at(2))
            && self.peek_at(3).is(TokenType::LeftParen)
    }

    /// Терм: константа, коллекция, кортеж, UDT, маркер привязки или вызов функции
    pub(crate) fn parse_term(&mut self) -> ParseResult<Term> {
        self.nested(|parser| parser.parse_term_inner())
    }

    fn parse_term_inner(&mut self) -> ParseResult<Term> {
        if let Some(marker) = self.parse_bind_marker()? {
            return Ok(Term::BindMarker(marker));
        }
        if self.eat(TokenType::LeftBracket) {
            let items = self.parse_term_sequence(TokenType::RightBracket)?;
            return Ok(Term::List(items));
        }
        if self.eat(TokenType::LeftParen) {
            let items = self.parse_term_sequence(TokenType::RightParen)?;
            return Ok(Term::Tuple(items));
        }
        if self.eat(TokenType::LeftBrace) {
            return self.parse_brace_literal();
        }
        if self.at_function_call() {
            return self.parse_function_call().map(Term::FunctionCall);
        }
        if self.at_constant() {
            return self.parse_constant().map(Term::Constant);
        }

        self.note(Expected::Term);
        Err(self.error_here())
    }

    /// Термы через запятую до закрывающего токена (возможно пустой список)
    fn parse_term_sequence(&mut self, close: TokenType) -> ParseResult<Vec<Term>> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_term()?);
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    /// Литерал в фигурных скобках: карта, множество или UDT (`{` уже потреблена)
    fn parse_brace_literal(&mut self) -> ParseResult<Term> {
        if self.eat(TokenType::RightBrace) {
            return Ok(Term::Map(Vec::new()));
        }

        // Поле UDT: имя и двоеточие
        if Self::is_identifier_token(self.current()) && self.peek_at(1).is(TokenType::Colon) {
            let mut fields = Vec::new();
            loop {
                let field = self.parse_identifier()?;
                self.expect(TokenType::Colon)?;
                fields.push((field, self.parse_term()?));
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
            self.expect(TokenType::RightBrace)?;
            return Ok(Term::UserType(fields));
        }

        let first = self.parse_term()?;
        if self.eat(TokenType::Colon) {
            let mut entries = vec![(first, self.parse_term()?)];
            while self.eat(TokenType::Comma) {
                let key = self.parse_term()?;
                self.expect(TokenType::Colon)?;
                entries.push((key, self.parse_term()?));
            }
            self.expect(TokenType::RightBrace)?;
            return Ok(Term::Map(entries));
        }

        let mut items = vec![first];
        while self.eat(TokenType::Comma) {
            items.push(self.parse_term()?);
        }
        self.expect(TokenType::RightBrace)?;
        Ok(Term::Set(items))
    }

    /// Вызов функции `name(args)`
    pub(crate) fn parse_function_call(&mut self) -> ParseResult<FunctionCall> {
        let name = if self.current().is_keyword(Keyword::Token) {
            self.advance();
            QualifiedName::simple(Identifier::unquoted("token"))
        } else {
            self.parse_qualified_name()?
        };

        self.expect(TokenType::LeftParen)?;
        let mut args = Vec::new();
        if !self.eat(TokenType::RightParen) {
            loop {
                args.push(self.nested(|parser| parser.parse_function_arg())?);
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
            self.expect(TokenType::RightParen)?;
        }

        Ok(FunctionCall { name, args })
    }

    fn parse_function_arg(&mut self) -> ParseResult<FunctionArg> {
        if self.eat(TokenType::Star) {
            return Ok(FunctionArg::Star);
        }
        if Self::is_identifier_token(self.current()) && !self.at_function_call() {
            return self.parse_identifier().map(FunctionArg::Column);
        }
        self.note(Expected::Identifier);
        self.parse_term().map(FunctionArg::Term)
    }

    // === Типы данных ===

    /// Тип данных; вложенность ограничена настройками
    pub(crate) fn parse_data_type(&mut self) -> ParseResult<DataType> {
        self.nested(|parser| parser.parse_data_type_inner())
    }

    fn parse_data_type_inner(&mut self) -> ParseResult<DataType> {
        let token = self.current().clone();
        if !token.is(TokenType::Word) {
            if token.is(TokenType::QuotedName) {
                return self.parse_qualified_name().map(DataType::UserDefined);
            }
            self.note(Expected::DataType);
            return Err(self.error_here());
        }

        let name = token.value.to_ascii_lowercase();
        match name.as_str() {
            "list" | "set" | "frozen" => {
                self.advance();
                self.expect(TokenType::Less)?;
                let inner = Box::new(self.parse_data_type()?);
                self.expect(TokenType::Greater)?;
                Ok(match name.as_str() {
                    "list" => DataType::List(inner),
                    "set" => DataType::Set(inner),
                    _ => DataType::Frozen(inner),
                })
            }
            "map" => {
                self.advance();
                self.expect(TokenType::Less)?;
                let key = Box::new(self.parse_data_type()?);
                self.expect(TokenType::Comma)?;
                let value = Box::new(self.parse_data_type()?);
                self.expect(TokenType::Greater)?;
                Ok(DataType::Map(key, value))
            }
            "tuple" => {
                self.advance();
                self.expect(TokenType::Less)?;
                let mut items = vec![self.parse_data_type()?];
                while self.eat(TokenType::Comma) {
                    items.push(self.parse_data_type()?);
                }
                self.expect(TokenType::Greater)?;
                Ok(DataType::Tuple(items))
            }
            "vector" => {
                self.advance();
                self.expect(TokenType::Less)?;
                let element = Box::new(self.parse_data_type()?);
                self.expect(TokenType::Comma)?;
                let size_token = self.current().clone();
                let size = self.parse_integer()?;
                let size = u32::try_from(size)
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| self.semantic_error(&size_token, "vector dimension must be a positive integer"))?;
                self.expect(TokenType::Greater)?;
                Ok(DataType::Vector(element, size))
            }
            _ => match NativeType::from_name(&name) {
                Some(native) => {
                    self.advance();
                    Ok(DataType::Native(native))
                }
                None => {
                    if !Self::is_identifier_token(&token) {
                        self.note(Expected::DataType);
                        return Err(self.error_here());
                    }
                    self.parse_qualified_name().map(DataType::UserDefined)
                }
            },
        }
    }

    /// Список типов в скобках: `(int, text)`; скобки обязательны
    pub(crate) fn parse_type_list(&mut self) -> ParseResult<Vec<DataType>> {
        self.expect(TokenType::LeftParen)?;
        let mut types = Vec::new();
        if !self.eat(TokenType::RightParen) {
            loop {
                types.push(self.parse_data_type()?);
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
            self.expect(TokenType::RightParen)?;
        }
        Ok(types)
    }

    // === Отношения ===

    /// Отношения WHERE, объединенные через AND (`WHERE` уже потреблено)
    pub(crate) fn parse_relations(&mut self) -> ParseResult<Vec<Relation>> {
        let mut relations = vec![self.parse_relation()?];
        while self.eat_keyword(Keyword::And) {
            relations.push(self.parse_relation()?);
        }
        Ok(relations)
    }

    /// Необязательная клауза WHERE
    pub(crate) fn parse_optional_where(&mut self) -> ParseResult<Vec<Relation>> {
        if self.eat_keyword(Keyword::Where) {
            self.parse_relations()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_relation(&mut self) -> ParseResult<Relation> {
        let target = if self.check_keyword(Keyword::Token) && self.peek_at(1).is(TokenType::LeftParen) {
            self.advance();
            self.advance();
            let columns = self.parse_identifier_list()?;
            self.expect(TokenType::RightParen)?;
            RelationTarget::Token(columns)
        } else if self.eat(TokenType::LeftParen) {
            let columns = self.parse_identifier_list()?;
            self.expect(TokenType::RightParen)?;
            RelationTarget::Tuple(columns)
        } else {
            RelationTarget::Column(self.parse_identifier()?)
        };

        let (operator, value) = self.parse_operator_and_value()?;
        Ok(Relation {
            target,
            operator,
            value,
        })
    }

    /// Оператор отношения и правая часть
    pub(crate) fn parse_operator_and_value(&mut self) -> ParseResult<(RelationOperator, RelationValue)> {
        let current = self.current().token_type;
        if let Some((_, operator)) = COMPARISONS.iter().find(|(token_type, _)| *token_type == current) {
            self.advance();
            return Ok((*operator, RelationValue::Term(self.parse_term()?)));
        }
        for (token_type, _) in COMPARISONS.iter() {
            self.note(Expected::Token(*token_type));
        }

        if self.eat_keyword(Keyword::In) {
            if self.eat(TokenType::LeftParen) {
                let items = self.parse_term_sequence(TokenType::RightParen)?;
                return Ok((RelationOperator::In, RelationValue::List(items)));
            }
            return Ok((RelationOperator::In, RelationValue::Term(self.parse_term()?)));
        }
        if self.eat_keyword(Keyword::Contains) {
            let operator = if self.eat_keyword(Keyword::Key) {
                RelationOperator::ContainsKey
            } else {
                RelationOperator::Contains
            };
            return Ok((operator, RelationValue::Term(self.parse_term()?)));
        }
        if self.eat_keyword(Keyword::Like) {
            return Ok((RelationOperator::Like, RelationValue::Term(self.parse_term()?)));
        }
        if self.eat_keyword(Keyword::Is) {
            self.expect_keywords(&[Keyword::Not, Keyword::Null])?;
            return Ok((RelationOperator::IsNotNull, RelationValue::Absent));
        }

        Err(self.error_here())
    }

    /// `IF EXISTS` или `IF cond AND ...` для UPDATE и DELETE
    pub(crate) fn parse_update_condition(&mut self) -> ParseResult<Option<UpdateCondition>> {
        if !self.eat_keyword(Keyword::If) {
            return Ok(None);
        }
        if self.eat_keyword(Keyword::Exists) {
            return Ok(Some(UpdateCondition::Exists));
        }

        let mut conditions = Vec::new();
        loop {
            let column = self.parse_identifier()?;
            let element = if self.eat(TokenType::LeftBracket) {
                let key = self.parse_term()?;
                self.expect(TokenType::RightBracket)?;
                Some(key)
            } else {
                None
            };
            let (operator, value) = self.parse_operator_and_value()?;
            conditions.push(Condition {
                column,
                element,
                operator,
                value,
            });
            if !self.eat_keyword(Keyword::And) {
                break;
            }
        }

        Ok(Some(UpdateCondition::Conditions(conditions)))
    }

    // === USING ===

    /// `USING TTL n AND TIMESTAMP n`; без `allow_ttl` допустим только TIMESTAMP
    pub(crate) fn parse_using(&mut self, allow_ttl: bool) -> ParseResult<Vec<UsingOption>> {
        let mut options = Vec::new();
        if !self.eat_keyword(Keyword::Using) {
            return Ok(options);
        }

        loop {
            let token = self.current().clone();
            let option = if allow_ttl && self.eat_keyword(Keyword::Ttl) {
                UsingOption::Ttl(self.parse_integer_value()?)
            } else if self.eat_keyword(Keyword::Timestamp) {
                UsingOption::Timestamp(self.parse_integer_value()?)
            } else {
                return Err(self.error_here());
            };
            self.validate(&token, semantic::check_using_option(&options, &option))?;
            options.push(option);
            if !self.eat_keyword(Keyword::And) {
                break;
            }
        }

        Ok(options)
    }

    // === Опции ===

    /// Сортировка: `column [ASC|DESC]`
    pub(crate) fn parse_ordering(&mut self) -> ParseResult<Ordering> {
        let column = self.parse_identifier()?;
        let direction = if self.eat_keyword(Keyword::Desc) {
            OrderDirection::Desc
        } else {
            self.eat_keyword(Keyword::Asc);
            OrderDirection::Asc
        };
        Ok(Ordering { column, direction })
    }

    /// Опции `name = value AND ...` (`WITH` уже потреблено)
    pub(crate) fn parse_options(&mut self) -> ParseResult<OptionMap> {
        let mut options = OptionMap::new();
        loop {
            self.parse_option_into(&mut options)?;
            if !self.eat_keyword(Keyword::And) {
                break;
            }
        }
        Ok(options)
    }

    /// Одна опция `name = value`
    pub(crate) fn parse_option_into(&mut self, options: &mut OptionMap) -> ParseResult<()> {
        let token = self.current().clone();
        let name = self.parse_identifier()?.name;
        self.expect(TokenType::Equal)?;
        let value = self.parse_option_value()?;
        self.validate(&token, semantic::check_duplicate_option(options, &name))?;
        options.insert(name, value);
        Ok(())
    }

    fn parse_option_value(&mut self) -> ParseResult<OptionValue> {
        if self.eat(TokenType::LeftBrace) {
            return self.parse_option_map().map(OptionValue::Map);
        }
        if Self::is_identifier_token(self.current()) {
            return self.parse_identifier().map(OptionValue::Identifier);
        }
        self.note(Expected::Token(TokenType::LeftBrace));
        self.parse_constant().map(OptionValue::Constant)
    }

    /// Карта опций `{'key': value, ...}` (`{` уже потреблена)
    pub(crate) fn parse_option_map(&mut self) -> ParseResult<IndexMap<String, Constant>> {
        let mut entries = IndexMap::new();
        if self.eat(TokenType::RightBrace) {
            return Ok(entries);
        }
        loop {
            let token = self.current().clone();
            let key = if token.is(TokenType::StringLiteral) {
                self.advance().value
            } else {
                self.note(Expected::StringLiteral);
                self.parse_identifier()?.name
            };
            self.expect(TokenType::Colon)?;
            let value = self.parse_constant()?;
            if self.strict() && entries.contains_key(&key) {
                return Err(self.semantic_error(&token, format!("duplicate map key '{}'", key)));
            }
            entries.insert(key, value);
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightBrace)?;
        Ok(entries)
    }

    /// Опции таблицы: CLUSTERING ORDER, COMPACT STORAGE и обычные опции
    pub(crate) fn parse_table_options(&mut self) -> ParseResult<TableOptions> {
        let mut options = TableOptions::default();
        loop {
            if self.eat_keyword(Keyword::Clustering) {
                self.expect_keywords(&[Keyword::Order, Keyword::By])?;
                self.expect(TokenType::LeftParen)?;
                loop {
                    options.clustering_order.push(self.parse_ordering()?);
                    if !self.eat(TokenType::Comma) {
                        break;
                    }
                }
                self.expect(TokenType::RightParen)?;
            } else if self.eat_keyword(Keyword::Compact) {
                self.expect_keyword(Keyword::Storage)?;
                options.compact_storage = true;
            } else {
                self.parse_option_into(&mut options.options)?;
            }
            if !self.eat_keyword(Keyword::And) {
                break;
            }
        }
        Ok(options)
    }

    // === Семантика ===

    /// Превращает результат семантической проверки в диагностику;
    /// в нестрогом режиме проверки пропускаются
    pub(crate) fn validate(&self, token: &Token, check: Result<(), String>) -> ParseResult<()> {
        if !self.strict() {
            return Ok(());
        }
        check.map_err(|message| self.semantic_error(token, message))
    }
}
