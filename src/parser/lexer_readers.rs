// Методы чтения отдельных видов токенов

/// Длины групп UUID: 8-4-4-4-12
const UUID_GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

impl Lexer {
    /// Читает однострочный комментарий (`--` или `//`)
    pub(crate) fn read_line_comment(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let mut value = String::new();

        // Читаем до конца строки
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            value.push(self.advance());
        }

        self.make_token(TokenType::Comment, start_position, value.clone(), value)
    }

    /// Читает многострочный комментарий
    pub(crate) fn read_block_comment(&mut self) -> ParseResult<Token> {
        let start_position = self.current_position.clone();
        let mut value = String::new();

        // Пропускаем "/*"
        value.push(self.advance());
        value.push(self.advance());

        loop {
            match self.peek() {
                Some('*') if self.peek_ahead(1) == Some('/') => {
                    value.push(self.advance());
                    value.push(self.advance());
                    return Ok(self.make_token(TokenType::Comment, start_position, value.clone(), value));
                }
                Some(_) => value.push(self.advance()),
                None => {
                    return Err(Diagnostic::unterminated(
                        start_position,
                        Some("/*".to_string()),
                        "unterminated comment",
                    ));
                }
            }
        }
    }

    /// Читает фрагмент в кавычках; удвоенная кавычка означает саму кавычку
    fn read_quoted(&mut self, quote: char) -> Option<(String, String)> {
        let mut text = String::new();
        let mut value = String::new();

        text.push(self.advance());

        loop {
            match self.peek() {
                Some(ch) if ch == quote => {
                    text.push(self.advance());
                    if self.peek() == Some(quote) {
                        text.push(self.advance());
                        value.push(quote);
                    } else {
                        return Some((text, value));
                    }
                }
                Some(_) => {
                    let ch = self.advance();
                    text.push(ch);
                    value.push(ch);
                }
                None => return None,
            }
        }
    }

    /// Читает строковый литерал
    pub(crate) fn read_string_literal(&mut self) -> ParseResult<Token> {
        let start_position = self.current_position.clone();
        match self.read_quoted('\'') {
            Some((text, value)) => Ok(self.make_token(TokenType::StringLiteral, start_position, text, value)),
            None => Err(Diagnostic::unterminated(
                start_position,
                Some("'".to_string()),
                "unterminated string literal",
            )),
        }
    }

    /// Читает идентификатор в кавычках
    pub(crate) fn read_quoted_identifier(&mut self) -> ParseResult<Token> {
        let start_position = self.current_position.clone();
        match self.read_quoted('"') {
            Some((text, value)) if !value.is_empty() => {
                Ok(self.make_token(TokenType::QuotedName, start_position, text, value))
            }
            Some(_) => Err(Diagnostic::lex(
                start_position,
                Some("\"\"".to_string()),
                "empty quoted identifier",
            )),
            None => Err(Diagnostic::unterminated(
                start_position,
                Some("\"".to_string()),
                "unterminated quoted identifier",
            )),
        }
    }

    /// Читает блок `$$ ... $$`
    pub(crate) fn read_code_block(&mut self) -> ParseResult<Token> {
        let start_position = self.current_position.clone();
        let mut text = String::new();
        let mut value = String::new();

        text.push(self.advance());
        text.push(self.advance());

        loop {
            match self.peek() {
                Some('$') if self.peek_ahead(1) == Some('$') => {
                    text.push(self.advance());
                    text.push(self.advance());
                    return Ok(self.make_token(TokenType::CodeBlock, start_position, text, value));
                }
                Some(_) => {
                    let ch = self.advance();
                    text.push(ch);
                    value.push(ch);
                }
                None => {
                    return Err(Diagnostic::unterminated(
                        start_position,
                        Some("$$".to_string()),
                        "unterminated code block",
                    ));
                }
            }
        }
    }

    /// Проверяет, начинается ли в текущей позиции UUID
    pub(crate) fn uuid_ahead(&self) -> bool {
        let mut offset = 0;
        for (index, group) in UUID_GROUPS.iter().enumerate() {
            if index > 0 {
                if self.peek_ahead(offset) != Some('-') {
                    return false;
                }
                offset += 1;
            }
            for _ in 0..*group {
                match self.peek_ahead(offset) {
                    Some(ch) if ch.is_ascii_hexdigit() => offset += 1,
                    _ => return false,
                }
            }
        }

        // UUID не должен продолжаться символами слова
        !matches!(self.peek_ahead(offset), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_')
    }

    /// Читает UUID литерал (длина проверена заранее)
    pub(crate) fn read_uuid(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let mut value = String::new();
        for _ in 0..36 {
            value.push(self.advance());
        }
        self.make_token(TokenType::UuidLiteral, start_position, value.clone(), value)
    }

    /// Читает шестнадцатеричный литерал `0x...`
    pub(crate) fn read_hex_literal(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let mut text = String::new();
        let mut value = String::new();

        text.push(self.advance());
        text.push(self.advance());

        while let Some(ch) = self.peek() {
            if ch.is_ascii_hexdigit() {
                let ch = self.advance();
                text.push(ch);
                value.push(ch);
            } else {
                break;
            }
        }

        self.make_token(TokenType::HexLiteral, start_position, text, value)
    }

    /// Читает числовой литерал
    pub(crate) fn read_number(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let mut value = String::new();
        let mut is_float = false;
        let mut has_exponent = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                value.push(self.advance());
            } else if ch == '.' && !is_float {
                // Точка входит в число только перед цифрой
                match self.peek_ahead(1) {
                    Some(next_ch) if next_ch.is_ascii_digit() => {
                        is_float = true;
                        value.push(self.advance());
                    }
                    _ => break,
                }
            } else if (ch == 'e' || ch == 'E') && !has_exponent {
                // Научная нотация: после e нужна цифра, возможно со знаком
                let exponent_ok = match self.peek_ahead(1) {
                    Some(d) if d.is_ascii_digit() => true,
                    Some('+') | Some('-') => self.peek_ahead(2).is_some_and(|d| d.is_ascii_digit()),
                    _ => false,
                };
                if !exponent_ok {
                    break;
                }
                is_float = true;
                has_exponent = true;
                value.push(self.advance());
                if let Some('+') | Some('-') = self.peek() {
                    value.push(self.advance());
                }
            } else {
                break;
            }
        }

        let token_type = if is_float {
            TokenType::FloatLiteral
        } else {
            TokenType::IntegerLiteral
        };

        self.make_token(token_type, start_position, value.clone(), value)
    }

    /// Читает слово; `true` и `false` становятся логическими литералами
    pub(crate) fn read_word(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let mut value = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                value.push(self.advance());
            } else {
                break;
            }
        }

        let token_type = if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            TokenType::BooleanLiteral
        } else {
            TokenType::Word
        };

        self.make_token(token_type, start_position, value.clone(), value)
    }

    /// Читает операторы сравнения
    pub(crate) fn read_comparison_operator(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let first_char = self.advance();

        let (token_type, text) = match (first_char, self.peek()) {
            ('<', Some('=')) => {
                self.advance();
                (TokenType::LessEqual, "<=")
            }
            ('>', Some('=')) => {
                self.advance();
                (TokenType::GreaterEqual, ">=")
            }
            ('<', _) => (TokenType::Less, "<"),
            _ => (TokenType::Greater, ">"),
        };

        self.make_token(token_type, start_position, text.to_string(), text.to_string())
    }
}
