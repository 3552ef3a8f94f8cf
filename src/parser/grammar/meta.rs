// Команды оболочки: DESCRIBE, CONSISTENCY, OUTPUT, настройки сеанса, COPY

use crate::parser::ast::*;
use crate::parser::diagnostics::{Expected, ParseResult};
use crate::parser::keywords::Keyword;
use crate::parser::parser::CqlParser;
use crate::parser::semantic;
use crate::parser::token::TokenType;

const CONSISTENCY_LEVELS: [(Keyword, ConsistencyLevel); 11] = [
    (Keyword::Any, ConsistencyLevel::Any),
    (Keyword::One, ConsistencyLevel::One),
    (Keyword::Two, ConsistencyLevel::Two),
    (Keyword::Three, ConsistencyLevel::Three),
    (Keyword::Quorum, ConsistencyLevel::Quorum),
    (Keyword::All, ConsistencyLevel::All),
    (Keyword::LocalQuorum, ConsistencyLevel::LocalQuorum),
    (Keyword::EachQuorum, ConsistencyLevel::EachQuorum),
    (Keyword::Serial, ConsistencyLevel::Serial),
    (Keyword::LocalSerial, ConsistencyLevel::LocalSerial),
    (Keyword::LocalOne, ConsistencyLevel::LocalOne),
];

const OUTPUT_FORMATS: [(Keyword, OutputFormat); 4] = [
    (Keyword::Ascii, OutputFormat::Ascii),
    (Keyword::Table, OutputFormat::Table),
    (Keyword::Expand, OutputFormat::Expand),
    (Keyword::Json, OutputFormat::Json),
];

const SHOW_TARGETS: [(Keyword, ShowTarget); 3] = [
    (Keyword::Version, ShowTarget::Version),
    (Keyword::Host, ShowTarget::Host),
    (Keyword::Session, ShowTarget::Session),
];

const CAPTURE_FORMATS: [(Keyword, CaptureFormat); 3] = [
    (Keyword::Json, CaptureFormat::Json),
    (Keyword::Csv, CaptureFormat::Csv),
    (Keyword::Parquet, CaptureFormat::Parquet),
];

impl CqlParser {
    /// Конец команды оболочки: `;` или конец ввода
    fn at_command_end(&self) -> bool {
        matches!(self.current().token_type, TokenType::Semicolon | TokenType::Eof)
    }

    /// Ключевое слово вида объекта, если за ним не следует `.` (иначе это имя)
    fn eat_describe_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) && !self.peek_at(1).is(TokenType::Dot) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// DESCRIBE | DESC объект
    pub(crate) fn parse_describe(&mut self) -> ParseResult<Statement> {
        self.advance();

        let target = if self.eat_describe_keyword(Keyword::Cluster) {
            DescribeTarget::Cluster
        } else if self.eat_describe_keyword(Keyword::Schema) {
            DescribeTarget::Schema
        } else if self.eat_describe_keyword(Keyword::Keyspaces) {
            DescribeTarget::Keyspaces
        } else if self.eat_describe_keyword(Keyword::Keyspace) {
            if self.at_command_end() {
                self.note(Expected::Identifier);
                DescribeTarget::Keyspace(None)
            } else {
                DescribeTarget::Keyspace(Some(self.parse_identifier()?))
            }
        } else if self.eat_describe_keyword(Keyword::Tables) {
            DescribeTarget::Tables
        } else if self.eat_describe_keyword(Keyword::Table) || self.eat_describe_keyword(Keyword::Columnfamily) {
            DescribeTarget::Table(self.parse_qualified_name()?)
        } else if self.eat_describe_keyword(Keyword::Types) {
            DescribeTarget::Types
        } else if self.eat_describe_keyword(Keyword::Type) {
            DescribeTarget::Type(self.parse_qualified_name()?)
        } else if self.eat_describe_keyword(Keyword::Functions) {
            DescribeTarget::Functions
        } else if self.eat_describe_keyword(Keyword::Function) {
            DescribeTarget::Function(self.parse_qualified_name()?)
        } else if self.eat_describe_keyword(Keyword::Aggregates) {
            DescribeTarget::Aggregates
        } else if self.eat_describe_keyword(Keyword::Aggregate) {
            DescribeTarget::Aggregate(self.parse_qualified_name()?)
        } else if self.eat_describe_keyword(Keyword::Index) {
            DescribeTarget::Index(self.parse_qualified_name()?)
        } else if self.eat_describe_keyword(Keyword::Materialized) {
            self.expect_keyword(Keyword::View)?;
            DescribeTarget::MaterializedView(self.parse_qualified_name()?)
        } else if self.eat_describe_keyword(Keyword::Roles) {
            DescribeTarget::Roles
        } else {
            DescribeTarget::Object(self.parse_qualified_name()?)
        };

        Ok(Statement::Describe(target))
    }

    /// Необязательный уровень согласованности из набора
    fn parse_optional_level(
        &mut self,
        levels: &[(Keyword, ConsistencyLevel)],
    ) -> ParseResult<Option<ConsistencyLevel>> {
        for (keyword, level) in levels {
            if self.eat_keyword(*keyword) {
                return Ok(Some(*level));
            }
        }
        if self.at_command_end() {
            Ok(None)
        } else {
            Err(self.error_here())
        }
    }

    /// CONSISTENCY [level]
    pub(crate) fn parse_consistency(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Consistency)?;
        let level = self.parse_optional_level(&CONSISTENCY_LEVELS)?;
        Ok(Statement::Consistency(level))
    }

    /// SERIAL CONSISTENCY [SERIAL | LOCAL_SERIAL]
    pub(crate) fn parse_serial_consistency(&mut self) -> ParseResult<Statement> {
        self.expect_keywords(&[Keyword::Serial, Keyword::Consistency])?;
        let serial_levels: Vec<(Keyword, ConsistencyLevel)> = CONSISTENCY_LEVELS
            .iter()
            .copied()
            .filter(|(_, level)| level.is_serial())
            .collect();
        let level = self.parse_optional_level(&serial_levels)?;
        Ok(Statement::SerialConsistency(level))
    }

    /// OUTPUT [ASCII | TABLE | EXPAND | JSON]
    pub(crate) fn parse_output_format(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Output)?;
        for (keyword, format) in OUTPUT_FORMATS {
            if self.eat_keyword(keyword) {
                return Ok(Statement::OutputFormat(Some(format)));
            }
        }
        if self.at_command_end() {
            Ok(Statement::OutputFormat(None))
        } else {
            Err(self.error_here())
        }
    }

    /// Необязательный переключатель `ON | OFF`
    fn parse_optional_toggle(&mut self) -> ParseResult<Option<bool>> {
        if self.eat_keyword(Keyword::On) {
            return Ok(Some(true));
        }
        if self.eat_keyword(Keyword::Off) {
            return Ok(Some(false));
        }
        if self.at_command_end() {
            Ok(None)
        } else {
            Err(self.error_here())
        }
    }

    /// TRACING, AUTOFETCH или EXPAND с необязательным `ON | OFF`
    pub(crate) fn parse_toggle(
        &mut self,
        command: Keyword,
        build: fn(Option<bool>) -> Statement,
    ) -> ParseResult<Statement> {
        self.expect_keyword(command)?;
        self.parse_optional_toggle().map(build)
    }

    /// PAGING [n | OFF]
    pub(crate) fn parse_paging(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Paging)?;
        if self.eat_keyword(Keyword::Off) {
            return Ok(Statement::Paging(Some(PagingSetting::Off)));
        }

        let token = self.current().clone();
        if token.is(TokenType::IntegerLiteral) {
            let size = self.parse_integer()?;
            self.validate(&token, semantic::check_page_size(size))?;
            return Ok(Statement::Paging(Some(PagingSetting::PageSize(size))));
        }

        self.note(Expected::IntegerLiteral);
        if self.at_command_end() {
            Ok(Statement::Paging(None))
        } else {
            Err(self.error_here())
        }
    }

    /// SHOW VERSION | HOST | SESSION
    pub(crate) fn parse_show(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Show)?;
        for (keyword, target) in SHOW_TARGETS {
            if self.eat_keyword(keyword) {
                return Ok(Statement::Show(target));
            }
        }
        Err(self.error_here())
    }

    /// SOURCE 'file'
    pub(crate) fn parse_source(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Source)?;
        self.parse_string().map(Statement::Source)
    }

    /// CAPTURE [JSON | CSV | PARQUET] 'file' | CAPTURE OFF | CAPTURE
    pub(crate) fn parse_capture(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Capture)?;
        if self.eat_keyword(Keyword::Off) {
            return Ok(Statement::Capture(CaptureCommand::Off));
        }

        let mut format = CaptureFormat::Text;
        for (keyword, candidate) in CAPTURE_FORMATS {
            if self.eat_keyword(keyword) {
                format = candidate;
                break;
            }
        }

        if format == CaptureFormat::Text && self.at_command_end() {
            self.note(Expected::StringLiteral);
            return Ok(Statement::Capture(CaptureCommand::Status));
        }

        let path = self.parse_string()?;
        Ok(Statement::Capture(CaptureCommand::Start { format, path }))
    }

    /// COPY table [(columns)] TO | FROM 'file' | STDOUT | STDIN [WITH options]
    pub(crate) fn parse_copy(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Copy)?;
        let table = self.parse_qualified_name()?;

        let columns = if self.eat(TokenType::LeftParen) {
            let columns = self.parse_identifier_list()?;
            self.expect(TokenType::RightParen)?;
            columns
        } else {
            Vec::new()
        };

        let (direction, stream) = if self.eat_keyword(Keyword::To) {
            (CopyDirection::To, Keyword::Stdout)
        } else {
            self.expect_keyword(Keyword::From)?;
            (CopyDirection::From, Keyword::Stdin)
        };

        let target = if self.eat_keyword(stream) {
            CopyTarget::Standard
        } else {
            CopyTarget::File(self.parse_string()?)
        };

        let options = if self.eat_keyword(Keyword::With) {
            self.parse_options()?
        } else {
            OptionMap::new()
        };

        Ok(Statement::Copy(CopyStatement {
            table,
            columns,
            direction,
            target,
            options,
        }))
    }

    /// HELP
    pub(crate) fn parse_help(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Help)?;
        Ok(Statement::Help)
    }
}
