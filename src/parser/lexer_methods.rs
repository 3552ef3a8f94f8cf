// Методы лексического анализатора

impl Lexer {
    /// Возвращает следующий токен
    pub fn next_token(&mut self) -> ParseResult<Token> {
        // Пропускаем пробелы
        self.skip_whitespace();

        // Проверяем конец ввода
        if self.position >= self.input.len() {
            return Ok(Token::eof(self.current_position.clone()));
        }

        let current_char = self.input[self.position];
        let next_char = self.peek_ahead(1);

        // Определяем тип токена по первому символу
        let token = match current_char {
            // Строки и имена в кавычках
            '\'' => self.read_string_literal()?,
            '"' => self.read_quoted_identifier()?,
            '$' if next_char == Some('$') => self.read_code_block()?,

            // Комментарии (проверяем до операторов)
            '-' if next_char == Some('-') => self.read_line_comment(),
            '/' if next_char == Some('/') => self.read_line_comment(),
            '/' if next_char == Some('*') => self.read_block_comment()?,

            // UUID проверяется раньше чисел и слов
            c if c.is_ascii_hexdigit() && self.uuid_ahead() => self.read_uuid(),

            // Числовые литералы
            '0' if matches!(next_char, Some('x') | Some('X')) => self.read_hex_literal(),
            '0'..='9' => self.read_number(),

            // Слова: ключевые слова и идентификаторы
            'a'..='z' | 'A'..='Z' => self.read_word(),

            // Операторы
            '+' => self.read_single_char_token(TokenType::Plus),
            '-' => self.read_single_char_token(TokenType::Minus),
            '*' => self.read_single_char_token(TokenType::Star),
            '=' => self.read_single_char_token(TokenType::Equal),
            '<' | '>' => self.read_comparison_operator(),
            '!' if next_char == Some('=') => self.read_two_char_token(TokenType::NotEqual),

            // Разделители
            '(' => self.read_single_char_token(TokenType::LeftParen),
            ')' => self.read_single_char_token(TokenType::RightParen),
            '[' => self.read_single_char_token(TokenType::LeftBracket),
            ']' => self.read_single_char_token(TokenType::RightBracket),
            '{' => self.read_single_char_token(TokenType::LeftBrace),
            '}' => self.read_single_char_token(TokenType::RightBrace),
            ',' => self.read_single_char_token(TokenType::Comma),
            ';' => self.read_single_char_token(TokenType::Semicolon),
            '.' => self.read_single_char_token(TokenType::Dot),
            ':' => self.read_single_char_token(TokenType::Colon),
            '?' => self.read_single_char_token(TokenType::Question),

            // Неизвестный символ
            other => {
                return Err(Diagnostic::lex(
                    self.current_position.clone(),
                    Some(other.to_string()),
                    format!("invalid character '{}'", other),
                ));
            }
        };

        Ok(token)
    }

    /// Возвращает все токены из входного текста
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.token_type == TokenType::Eof;

            // Пропускаем комментарии в финальном списке токенов
            if !token.token_type.should_skip() {
                tokens.push(token);
            }

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Возвращает токены, прочитанные до первой ошибки, и саму ошибку.
    /// Список всегда завершается токеном `Eof` в точке остановки.
    pub fn tokenize_partial(&mut self) -> (Vec<Token>, Option<Diagnostic>) {
        let mut tokens = Vec::new();

        loop {
            let start = self.current_position.clone();
            match self.next_token() {
                Ok(token) => {
                    let is_eof = token.token_type == TokenType::Eof;
                    if !token.token_type.should_skip() {
                        tokens.push(token);
                    }
                    if is_eof {
                        return (tokens, None);
                    }
                }
                Err(error) => {
                    // Конец потока ставим перед ошибочным фрагментом
                    let position = if error.position.offset >= start.offset {
                        error.position.clone()
                    } else {
                        start
                    };
                    tokens.push(Token::eof(position));
                    return (tokens, Some(error));
                }
            }
        }
    }

    // === Вспомогательные методы ===

    /// Возвращает текущий символ и продвигает позицию
    pub(crate) fn advance(&mut self) -> char {
        if self.position >= self.input.len() {
            return '\0';
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.current_position.line += 1;
            self.current_position.column = 1;
        } else {
            self.current_position.column += 1;
        }
        self.current_position.offset += ch.len_utf8();

        ch
    }

    /// Возвращает следующий символ без продвижения позиции
    pub(crate) fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Возвращает символ на определенном расстоянии от текущей позиции
    pub(crate) fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Пропускает пробельные символы
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Собирает токен от `start` до текущей позиции
    pub(crate) fn make_token(&self, token_type: TokenType, start: Position, text: String, value: String) -> Token {
        let end = self.current_position.offset;
        Token::new(token_type, text, value, start, end)
    }

    /// Читает токен из одного символа
    pub(crate) fn read_single_char_token(&mut self, token_type: TokenType) -> Token {
        let start_position = self.current_position.clone();
        let ch = self.advance().to_string();
        self.make_token(token_type, start_position, ch.clone(), ch)
    }

    /// Читает токен из двух символов
    pub(crate) fn read_two_char_token(&mut self, token_type: TokenType) -> Token {
        let start_position = self.current_position.clone();
        let first = self.advance();
        let second = self.advance();
        let value = format!("{}{}", first, second);
        self.make_token(token_type, start_position, value.clone(), value)
    }
}
