use std::str::FromStr;

use regex::Regex;

use crate::krl::token::{Keywords, Symbols, Token, TokenType, TokenValue};
use crate::util::krl_log;

const UNKNOWN_CHARACTER: &str = "Unknown character sequence!";
const UNEXPECTED_NEWLINE: &str = "Unexpected newline!";
const INVALID_SYNTAX: &str = "Invalid syntax!";

// Single-use tokenizer over one piece of KRL source text
pub struct Lexer {
    // The source as characters so the cursor can step one character at a time
    chars: Vec<char>,
    pos: usize,
    line_number: usize,
    column: usize,

    // A token that has to be returned before any new input is scanned
    // Used to report an error right after the partial token it belongs to
    pending: Option<Token>,

    // The type of the last token handed out, needed for the final newline
    last_token_type: Option<TokenType>,

    // Shapes of the decimal literals
    integer_pattern: Regex,
    real_pattern: Regex
}

impl Lexer {
    // Constructor for the lexer
    pub fn new(code: &str) -> Self {
        return Lexer {
            chars: code.chars().collect(),
            pos: 0,
            line_number: 0,
            column: 0,
            pending: None,
            last_token_type: None,
            integer_pattern: Regex::new(r"^[0-9]+$").expect("integer pattern should compile"),
            real_pattern: Regex::new(r"^[0-9]+(\.[0-9]*)?([Ee][+-]?[0-9]+)?$").expect("real pattern should compile")
        };
    }

    // Tokenizes the whole input, the result always ends with a single end of file token
    pub fn generate_tokens(mut self) -> Vec<Token> {
        let mut token_list: Vec<Token> = Vec::new();

        loop {
            let next_token: Token = self.get_next_token();
            krl_log::log(
                krl_log::LogTypes::Debug,
                krl_log::LogSources::Lexer,
                format!("Found {:?} [ {} ] at {:?}", next_token.token_type, next_token.value, next_token.position)
            );

            self.last_token_type = Some(next_token.token_type);
            let is_end: bool = next_token.token_type == TokenType::EndOfFile;
            token_list.push(next_token);

            if is_end {
                return token_list;
            }
        }
    }

    fn get_next_token(&mut self) -> Token {
        // Errors that were found while scanning the previous token come first
        if let Some(token) = self.pending.take() {
            return token;
        }

        loop {
            let cur_char: char = match self.current_char() {
                Some(c) => c,
                None => return self.end_of_file()
            };

            // Whitespace other than the newline is skipped
            if cur_char != '\n' && cur_char.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            return match cur_char {
                '\n' => self.end_of_line(),
                ';' => self.comment(),
                '&' => self.file_attribute(),
                '"' => self.string(),
                '\'' => self.based_number(),
                '=' => self.equal(),
                '>' => self.greater(),
                '<' => self.less(),
                c if is_first_name_char(c) => self.name(),
                c if c.is_ascii_digit() => self.number(),
                c => match Symbols::from_char(c) {
                    Some(symbol) => self.symbol(symbol, 1),
                    None => self.unknown()
                }
            };
        }
    }

    fn current_char(&self) -> Option<char> {
        return self.chars.get(self.pos).copied();
    }

    fn peek(&self) -> Option<char> {
        return self.chars.get(self.pos + 1).copied();
    }

    fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
            self.column += 1;
        }
    }

    fn end_of_file(&mut self) -> Token {
        // Every file conceptually ends its last line, so close it first if needed
        if self.last_token_type != Some(TokenType::Newline) {
            return Token::text(TokenType::Newline, "\n", self.line_number, self.column);
        }
        return Token::new(TokenType::EndOfFile, TokenValue::Empty, self.line_number, self.column);
    }

    fn end_of_line(&mut self) -> Token {
        let token: Token = Token::text(TokenType::Newline, "\n", self.line_number, self.column);

        self.advance();
        self.column = 0;
        self.line_number += 1;
        return token;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn comment(&mut self) -> Token {
        let start: usize = self.column;
        let line: String = self.read_line();
        return Token::new(TokenType::Comment, TokenValue::Text(line), self.line_number, start);
    }

    fn file_attribute(&mut self) -> Token {
        let start: usize = self.column;
        let line: String = self.read_line();
        return Token::new(TokenType::FileAttribute, TokenValue::Text(line), self.line_number, start);
    }

    // Reads the rest of the line after the current character, without the newline
    fn read_line(&mut self) -> String {
        self.advance();

        let mut line: String = String::new();
        while let Some(c) = self.current_char() {
            if c == '\n' {
                break;
            }
            line.push(c);
            self.advance();
        }

        return line;
    }

    // Reads up to the terminator and consumes it
    // Hitting a newline or the end of input first queues an error for the next call
    fn read_until(&mut self, terminator: char) -> String {
        let mut value: String = String::new();
        loop {
            match self.current_char() {
                None | Some('\n') => {
                    self.pending = Some(Token::text(TokenType::Error, UNEXPECTED_NEWLINE, self.line_number, self.column));
                    return value;
                },
                Some(c) if c == terminator => {
                    self.advance();
                    return value;
                },
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    fn string(&mut self) -> Token {
        let start: usize = self.column;
        self.advance();

        let value: String = self.read_until('"');
        return Token::new(TokenType::Str, TokenValue::Text(value), self.line_number, start);
    }

    fn name(&mut self) -> Token {
        let start: usize = self.column;
        let mut name: String = String::new();
        while let Some(c) = self.current_char() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.advance();
        }

        // Keywords are their own token types, but keep the casing of the source
        let token_type: TokenType = match Keywords::from_str(&name) {
            Ok(keyword) => TokenType::Keyword(keyword),
            Err(_) => TokenType::Name
        };

        return Token::new(token_type, TokenValue::Text(name), self.line_number, start);
    }

    // Literals like 'H1F', 'B1010' or '12'
    fn based_number(&mut self) -> Token {
        let start: usize = self.column;
        self.advance();

        let base: u32 = match self.current_char() {
            Some('H') | Some('h') => 16,
            Some('B') | Some('b') => 2,
            _ => 10
        };

        // The base indicator is consumed no matter which base was picked, but never a newline
        if self.current_char() != Some('\n') {
            self.advance();
        }
        let digits: String = self.read_until('\'');

        return match i64::from_str_radix(&digits, base) {
            Ok(value) => Token::new(TokenType::Integer, TokenValue::Integer(value), self.line_number, start),
            Err(_) => Token::text(TokenType::Error, INVALID_SYNTAX, self.line_number, start)
        };
    }

    // Scans digits, '.', 'E'/'e' and a sign, but a sign only right after the exponent marker.
    // This departs from taking any run of those characters, so "1+2" stays three tokens.
    fn number(&mut self) -> Token {
        let start: usize = self.column;

        let mut value: String = String::new();
        while let Some(c) = self.current_char() {
            let is_exponent_sign: bool = (c == '+' || c == '-') && value.ends_with(&['E', 'e'][..]);
            if !(c.is_ascii_digit() || c == '.' || c == 'E' || c == 'e' || is_exponent_sign) {
                break;
            }
            value.push(c);
            self.advance();
        }

        if self.integer_pattern.is_match(&value) {
            if let Ok(int) = value.parse::<i64>() {
                return Token::new(TokenType::Integer, TokenValue::Integer(int), self.line_number, start);
            }
        } else if self.real_pattern.is_match(&value) {
            if let Ok(real) = value.parse::<f64>() {
                return Token::new(TokenType::Real, TokenValue::Real(real), self.line_number, start);
            }
        }

        return Token::text(TokenType::Error, INVALID_SYNTAX, self.line_number, start);
    }

    fn equal(&mut self) -> Token {
        if self.peek() == Some('=') {
            return self.symbol(Symbols::EqualEqual, 2);
        }
        return self.symbol(Symbols::Equal, 1);
    }

    fn greater(&mut self) -> Token {
        if self.peek() == Some('=') {
            return self.symbol(Symbols::GreaterEqual, 2);
        }
        return self.symbol(Symbols::Greater, 1);
    }

    fn less(&mut self) -> Token {
        return match self.peek() {
            Some('=') => self.symbol(Symbols::LessEqual, 2),
            Some('>') => self.symbol(Symbols::NotEqual, 2),
            _ => self.symbol(Symbols::Less, 1)
        };
    }

    // Creates the symbol token at the current position and consumes its characters
    fn symbol(&mut self, symbol: Symbols, length: usize) -> Token {
        let token: Token = Token::new(
            TokenType::Symbol(symbol),
            TokenValue::Text(symbol.to_string()),
            self.line_number,
            self.column
        );

        for _ in 0..length {
            self.advance();
        }
        return token;
    }

    fn unknown(&mut self) -> Token {
        let token: Token = Token::text(TokenType::Error, UNKNOWN_CHARACTER, self.line_number, self.column);
        self.advance();
        return token;
    }
}

fn is_first_name_char(c: char) -> bool {
    return c.is_ascii_alphabetic() || c == '$' || c == '_';
}

fn is_name_char(c: char) -> bool {
    return is_first_name_char(c) || c.is_ascii_digit();
}
