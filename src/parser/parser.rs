//! Парсер CQL для rustcql
//!
//! Рекурсивный нисходящий разбор с ограниченным просмотром вперед (1-3 токена)
//! и без отката. Правила грамматики разнесены по модулям `grammar::*` как
//! отдельные блоки `impl CqlParser`. Парсер запоминает множество ожидаемых
//! элементов в самой дальней точке разбора: оно попадает в диагностику и
//! используется автодополнением.

use crate::common::constants::{DEFAULT_MAX_RECURSION_DEPTH, MAX_RECURSION_DEPTH_LIMIT};
use crate::parser::ast::Statement;
use crate::parser::diagnostics::{Diagnostic, Expected, ParseOutcome, ParseResult};
use crate::parser::keywords::Keyword;
use crate::parser::lexer;
use crate::parser::token::{Position, Span, Token, TokenType};

/// Ключевые слова, с которых начинается инструкция
pub const STATEMENT_KEYWORDS: [Keyword; 27] = [
    Keyword::Select,
    Keyword::Insert,
    Keyword::Update,
    Keyword::Delete,
    Keyword::Begin,
    Keyword::Use,
    Keyword::Truncate,
    Keyword::Create,
    Keyword::Alter,
    Keyword::Drop,
    Keyword::Grant,
    Keyword::Revoke,
    Keyword::List,
    Keyword::Describe,
    Keyword::Desc,
    Keyword::Consistency,
    Keyword::Serial,
    Keyword::Output,
    Keyword::Tracing,
    Keyword::Paging,
    Keyword::Autofetch,
    Keyword::Expand,
    Keyword::Show,
    Keyword::Source,
    Keyword::Capture,
    Keyword::Copy,
    Keyword::Help,
];

/// Начинает ли токен инструкцию, которая не может входить в пакет
fn starts_statement_outside_batch(token: &Token) -> bool {
    STATEMENT_KEYWORDS
        .iter()
        .filter(|keyword| !matches!(keyword, Keyword::Insert | Keyword::Update | Keyword::Delete))
        .any(|keyword| token.is_keyword(*keyword))
}

/// Настройки парсера
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSettings {
    /// Максимальная глубина вложенности типов и литералов
    pub max_recursion_depth: usize,
    /// Строгий режим: выполнять семантические проверки
    pub strict_validation: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            strict_validation: true,
        }
    }
}

/// Рекурсивный парсер CQL
pub struct CqlParser {
    tokens: Vec<Token>,
    position: usize,
    settings: ParserSettings,
    /// Текущая глубина вложенности
    depth: usize,
    /// Индекс самого дальнего токена, на котором записывались ожидания
    furthest: usize,
    /// Ожидаемые элементы в позиции `furthest`
    expected: Vec<Expected>,
    /// Лексическая ошибка, на которой остановился частичный разбор
    lex_error: Option<Diagnostic>,
    /// Длина исходного текста в байтах
    source_len: usize,
    /// Начала токенов, разобранных как имена
    identifier_offsets: Vec<usize>,
}

impl CqlParser {
    /// Создает парсер; лексическая ошибка возвращается сразу
    pub fn new(input: &str) -> ParseResult<Self> {
        Self::with_settings(input, ParserSettings::default())
    }

    /// Создает парсер с настройками
    pub fn with_settings(input: &str, settings: ParserSettings) -> ParseResult<Self> {
        let tokens = lexer::tokenize(input)?;
        Ok(Self::from_tokens(tokens, input.len(), settings, None))
    }

    /// Создает парсер для скрипта: корректный префикс разбирается даже
    /// при лексической ошибке дальше по тексту
    pub fn for_script(input: &str, settings: ParserSettings) -> Self {
        let (tokens, lex_error) = lexer::tokenize_partial(input);
        Self::from_tokens(tokens, input.len(), settings, lex_error)
    }

    fn from_tokens(
        mut tokens: Vec<Token>,
        source_len: usize,
        settings: ParserSettings,
        lex_error: Option<Diagnostic>,
    ) -> Self {
        if tokens.last().map_or(true, |token| !token.is(TokenType::Eof)) {
            let position = tokens
                .last()
                .map(|token| Position::new(token.position.line, token.position.column, token.span.end))
                .unwrap_or_else(Position::start);
            tokens.push(Token::eof(position));
        }

        Self {
            tokens,
            position: 0,
            settings,
            depth: 0,
            furthest: 0,
            expected: Vec::new(),
            lex_error,
            source_len,
            identifier_offsets: Vec::new(),
        }
    }

    /// Получает настройки парсера
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Парсит ровно одну инструкцию (завершающая `;` необязательна)
    pub fn parse(&mut self) -> ParseResult<Statement> {
        self.reset_expected();

        let statement = if self.current().is(TokenType::Semicolon) {
            Statement::Empty
        } else {
            self.parse_cql()?
        };

        self.eat(TokenType::Semicolon);
        if !self.at_eof() {
            return Err(self.error_here());
        }

        Ok(statement)
    }

    /// Парсит скрипт `cql (';' cql)* ';'?`
    ///
    /// Каждая инструкция дает отдельный результат со своим диапазоном текста.
    /// После ошибки разбор продолжается со следующей `;`. Ошибочный пакет
    /// пропускается до `APPLY BATCH`, а без него до `;` перед инструкцией,
    /// которая не может входить в пакет.
    pub fn parse_script(&mut self) -> Vec<ParseOutcome> {
        let mut outcomes = Vec::new();

        while !self.at_eof() {
            let start_index = self.position;
            let start = self.current().span.start;
            self.reset_expected();

            // Пустая инструкция
            if self.current().is(TokenType::Semicolon) {
                let token = self.advance();
                outcomes.push(ParseOutcome::Parsed {
                    statement: Statement::Empty,
                    span: token.span,
                });
                continue;
            }

            match self.parse_terminated() {
                Ok((statement, end)) => outcomes.push(ParseOutcome::Parsed {
                    statement,
                    span: Span::new(start, end),
                }),
                Err(diagnostic) => {
                    let end = self.recover(start_index);
                    log::debug!("recovered after {} at byte {}", diagnostic.kind, end);
                    outcomes.push(ParseOutcome::Diagnostic {
                        diagnostic,
                        span: Span::new(start, end),
                    });
                }
            }
        }

        if let Some(lex_error) = self.lex_error.take() {
            self.attach_lex_error(&mut outcomes, lex_error);
        }

        outcomes
    }

    /// Инструкция с завершающей `;` или концом ввода; возвращает конец диапазона
    fn parse_terminated(&mut self) -> ParseResult<(Statement, usize)> {
        let statement = self.parse_cql()?;
        let end = self.previous_end();

        if self.check(TokenType::Semicolon) {
            let token = self.advance();
            return Ok((statement, token.span.end));
        }
        if self.at_eof() {
            return Ok((statement, end));
        }

        Err(self.error_here())
    }

    /// Пропускает токены до конца ошибочной инструкции
    fn recover(&mut self, start_index: usize) -> usize {
        if !self.tokens[start_index].is_keyword(Keyword::Begin) {
            return self.skip_statement(start_index, |_| true);
        }

        let error_index = self.position;
        if let Some(end) = self.skip_past_apply_batch() {
            return end;
        }

        // APPLY BATCH не найден: пакет заканчивается на `;` перед инструкцией,
        // которая не может в него входить
        self.position = error_index;
        self.skip_statement(start_index, starts_statement_outside_batch)
    }

    /// Пропускает токены до `;`, за которой следует подходящий токен
    fn skip_statement(&mut self, start_index: usize, accepts_next: fn(&Token) -> bool) -> usize {
        loop {
            if self.at_eof() {
                return self.previous_end().max(self.tokens[start_index].span.end);
            }

            let token = self.advance();
            if token.is(TokenType::Semicolon) && accepts_next(self.current()) {
                return token.span.end;
            }
        }
    }

    /// Ищет `APPLY BATCH [;]` до начала следующего пакета
    fn skip_past_apply_batch(&mut self) -> Option<usize> {
        while !self.at_eof() {
            let token = self.advance();
            if token.is(TokenType::Semicolon) && self.current().is_keyword(Keyword::Begin) {
                return None;
            }
            if token.is_keyword(Keyword::Apply) && self.current().is_keyword(Keyword::Batch) {
                let batch = self.advance();
                if self.current().is(TokenType::Semicolon) {
                    return Some(self.advance().span.end);
                }
                return Some(batch.span.end);
            }
        }
        None
    }

    /// Встраивает лексическую ошибку в список результатов
    fn attach_lex_error(&self, outcomes: &mut Vec<ParseOutcome>, lex_error: Diagnostic) {
        let terminated = self
            .tokens
            .iter()
            .rev()
            .find(|token| !token.is(TokenType::Eof))
            .map_or(true, |token| token.is(TokenType::Semicolon));

        let error_start = lex_error.position.offset;
        let start = match outcomes.last() {
            Some(last) if !terminated => {
                let start = last.span().start;
                outcomes.pop();
                start
            }
            _ => error_start,
        };

        outcomes.push(ParseOutcome::Diagnostic {
            diagnostic: lex_error,
            span: Span::new(start, self.source_len),
        });
    }

    /// Разбирает одну инструкцию по первому ключевому слову
    pub(crate) fn parse_cql(&mut self) -> ParseResult<Statement> {
        log::trace!("dispatching statement at {}", self.current().position);

        if self.check_keyword(Keyword::Select) {
            return self.parse_select().map(Statement::Select);
        }
        if self.check_keyword(Keyword::Insert) {
            return self.parse_insert().map(Statement::Insert);
        }
        if self.check_keyword(Keyword::Update) {
            return self.parse_update().map(Statement::Update);
        }
        if self.check_keyword(Keyword::Delete) {
            return self.parse_delete().map(Statement::Delete);
        }
        if self.check_keyword(Keyword::Begin) {
            return self.parse_batch().map(Statement::Batch);
        }
        if self.check_keyword(Keyword::Use) {
            return self.parse_use();
        }
        if self.check_keyword(Keyword::Truncate) {
            return self.parse_truncate();
        }
        if self.check_keyword(Keyword::Create) {
            return self.parse_create();
        }
        if self.check_keyword(Keyword::Alter) {
            return self.parse_alter();
        }
        if self.check_keyword(Keyword::Drop) {
            return self.parse_drop();
        }
        if self.check_keyword(Keyword::Grant) {
            return self.parse_grant();
        }
        if self.check_keyword(Keyword::Revoke) {
            return self.parse_revoke();
        }
        if self.check_keyword(Keyword::List) {
            return self.parse_list();
        }
        if self.check_keyword(Keyword::Describe) || self.check_keyword(Keyword::Desc) {
            return self.parse_describe();
        }
        if self.check_keyword(Keyword::Consistency) {
            return self.parse_consistency();
        }
        if self.check_keyword(Keyword::Serial) {
            return self.parse_serial_consistency();
        }
        if self.check_keyword(Keyword::Output) {
            return self.parse_output_format();
        }
        if self.check_keyword(Keyword::Tracing) {
            return self.parse_toggle(Keyword::Tracing, Statement::Tracing);
        }
        if self.check_keyword(Keyword::Paging) {
            return self.parse_paging();
        }
        if self.check_keyword(Keyword::Autofetch) {
            return self.parse_toggle(Keyword::Autofetch, Statement::Autofetch);
        }
        if self.check_keyword(Keyword::Expand) {
            return self.parse_toggle(Keyword::Expand, Statement::Expand);
        }
        if self.check_keyword(Keyword::Show) {
            return self.parse_show();
        }
        if self.check_keyword(Keyword::Source) {
            return self.parse_source();
        }
        if self.check_keyword(Keyword::Capture) {
            return self.parse_capture();
        }
        if self.check_keyword(Keyword::Copy) {
            return self.parse_copy();
        }
        if self.check_keyword(Keyword::Help) {
            return self.parse_help();
        }

        Err(self.error_here())
    }

    // === Работа с потоком токенов ===

    /// Текущий токен; поток всегда завершается `Eof`
    pub(crate) fn current(&self) -> &Token {
        self.peek_at(0)
    }

    /// Токен на расстоянии `offset` без записи ожиданий
    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current().is(TokenType::Eof)
    }

    /// Возвращает текущий токен и переходит к следующему
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenType::Eof) {
            self.position += 1;
        }
        token
    }

    /// Запоминает токен, который грамматика разобрала как имя
    pub(crate) fn mark_identifier(&mut self, token: &Token) {
        self.identifier_offsets.push(token.span.start);
    }

    /// Смещения токенов, разобранных как имена (включая ключевые слова)
    pub fn identifier_offsets(&self) -> &[usize] {
        &self.identifier_offsets
    }

    /// Конец последнего потребленного токена
    pub(crate) fn previous_end(&self) -> usize {
        if self.position == 0 {
            self.current().span.start
        } else {
            self.tokens[self.position - 1].span.end
        }
    }

    // === Ожидания ===

    fn reset_expected(&mut self) {
        self.furthest = self.position;
        self.expected.clear();
    }

    /// Записывает ожидаемый элемент в текущей позиции
    pub(crate) fn note(&mut self, expected: Expected) {
        if self.position > self.furthest {
            self.furthest = self.position;
            self.expected.clear();
        }
        if self.position == self.furthest && !self.expected.contains(&expected) {
            self.expected.push(expected);
        }
    }

    /// Ожидаемые элементы в конце ввода, если разбор дошел до него
    pub(crate) fn expected_at_eof(&self) -> Vec<Expected> {
        if self.furthest == self.tokens.len() - 1 {
            self.expected.clone()
        } else {
            Vec::new()
        }
    }

    /// Синтаксическая ошибка на текущем токене
    pub(crate) fn error_here(&self) -> Diagnostic {
        let token = self.current();
        let expected = if self.position == self.furthest {
            self.expected.clone()
        } else {
            Vec::new()
        };
        let found = if token.is(TokenType::Eof) {
            None
        } else {
            Some(token.text.clone())
        };
        Diagnostic::syntax(token.position.clone(), found, expected)
    }

    /// Семантическая ошибка, привязанная к токену
    pub(crate) fn semantic_error(&self, token: &Token, message: impl Into<String>) -> Diagnostic {
        Diagnostic::semantic(token.position.clone(), Some(token.text.clone()), message)
    }

    // === Проверка токенов ===

    pub(crate) fn check(&mut self, token_type: TokenType) -> bool {
        let matched = self.current().is(token_type);
        if !matched {
            self.note(Expected::Token(token_type));
        }
        matched
    }

    pub(crate) fn eat(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, token_type: TokenType) -> ParseResult<Token> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            Err(self.error_here())
        }
    }

    pub(crate) fn check_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.current().is_keyword(keyword);
        if !matched {
            self.note(Expected::Keyword(keyword));
        }
        matched
    }

    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error_here())
        }
    }

    /// Потребляет последовательность ключевых слов
    pub(crate) fn expect_keywords(&mut self, keywords: &[Keyword]) -> ParseResult<()> {
        for keyword in keywords {
            self.expect_keyword(*keyword)?;
        }
        Ok(())
    }

    // === Ограничение глубины ===

    /// Выполняет вложенное правило с учетом глубины рекурсии
    ///
    /// Настройка не может поднять предел выше `MAX_RECURSION_DEPTH_LIMIT`.
    pub(crate) fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let limit = self.settings.max_recursion_depth.min(MAX_RECURSION_DEPTH_LIMIT);
        if self.depth >= limit {
            return Err(Diagnostic::recursion_limit(self.current().position.clone(), limit));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn strict(&self) -> bool {
        self.settings.strict_validation
    }
}
