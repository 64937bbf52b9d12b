use std::fmt;

use strum::{Display, EnumString};

// Defines a token
#[derive (Debug, Clone, PartialEq)]
pub struct Token {
    // The type of the token
    pub token_type: TokenType,
    // The literal payload of the token
    pub value: TokenValue,
    // The zero-based (line, column) position of the first character of the token
    pub position: (usize, usize)
}

impl Token {
    // Create a new token with the given information
    pub fn new(token_type_in: TokenType, token_value: TokenValue, line_number: usize, col_number: usize) -> Self {
        return Token {
            token_type: token_type_in,
            value: token_value,
            position: (line_number, col_number)
        };
    }

    // Shortcut for tokens whose payload is plain text
    pub fn text(token_type_in: TokenType, token_text: &str, line_number: usize, col_number: usize) -> Self {
        return Token::new(token_type_in, TokenValue::Text(String::from(token_text)), line_number, col_number);
    }

    pub fn line(&self) -> usize {
        return self.position.0;
    }

    pub fn column(&self) -> usize {
        return self.position.1;
    }
}

// Defines the token types and what they hold
#[derive (Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Keyword(Keywords),
    Name,
    Integer,
    Real,
    Str,
    Comment,
    FileAttribute,
    Newline,
    EndOfFile,
    Symbol(Symbols),
    Error
}

// Used in parser error messages
impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Keyword(keyword) => write!(f, "{}", keyword),
            TokenType::Symbol(symbol) => write!(f, "'{}'", symbol),
            TokenType::Name => write!(f, "NAME"),
            TokenType::Integer => write!(f, "INTEGER"),
            TokenType::Real => write!(f, "REAL"),
            TokenType::Str => write!(f, "STRING"),
            TokenType::Comment => write!(f, "COMMENT"),
            TokenType::FileAttribute => write!(f, "FILE_ATTRIBUTE"),
            TokenType::Newline => write!(f, "NEWLINE"),
            TokenType::EndOfFile => write!(f, "END_OF_FILE"),
            TokenType::Error => write!(f, "ERROR_TOKEN")
        }
    }
}

// The payload carried by a token
#[derive (Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Integer(i64),
    Real(f64),
    // Only the end of file marker has no payload
    Empty
}

impl TokenValue {
    // Gets the text payload, if this value holds text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text.as_str()),
            _ => None
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(text) => write!(f, "{}", text),
            TokenValue::Integer(int) => write!(f, "{}", int),
            TokenValue::Real(real) => write!(f, "{}", real),
            TokenValue::Empty => Ok(())
        }
    }
}

// Defines the reserved words; matched case-insensitively by the lexer
#[derive (Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum (serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Keywords {
    Global,
    Public,
    Def,
    DefFct,
    DefDat,
    In,
    Out,
    End,
    EndFct,
    EndDat
}

// Defines the possible operators and brackets
#[derive (Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Symbols {
    #[strum (serialize = "(")]
    LeftBrace,
    #[strum (serialize = ")")]
    RightBrace,
    #[strum (serialize = "[")]
    LeftSquareBrace,
    #[strum (serialize = "]")]
    RightSquareBrace,
    #[strum (serialize = "{")]
    LeftCurlyBrace,
    #[strum (serialize = "}")]
    RightCurlyBrace,
    #[strum (serialize = "+")]
    Plus,
    #[strum (serialize = "-")]
    Minus,
    #[strum (serialize = "*")]
    Star,
    #[strum (serialize = "/")]
    Slash,
    #[strum (serialize = ".")]
    Dot,
    #[strum (serialize = ",")]
    Comma,
    #[strum (serialize = ":")]
    Colon,
    #[strum (serialize = "#")]
    Hash,
    #[strum (serialize = "=")]
    Equal,
    #[strum (serialize = "==")]
    EqualEqual,
    #[strum (serialize = "<>")]
    NotEqual,
    #[strum (serialize = ">")]
    Greater,
    #[strum (serialize = "<")]
    Less,
    #[strum (serialize = ">=")]
    GreaterEqual,
    #[strum (serialize = "<=")]
    LessEqual
}

impl Symbols {
    // Maps a character to its single character symbol, if there is one
    // The comparison operators are handled separately because of their lookahead
    pub fn from_char(c: char) -> Option<Symbols> {
        return match c {
            '(' => Some(Symbols::LeftBrace),
            ')' => Some(Symbols::RightBrace),
            '[' => Some(Symbols::LeftSquareBrace),
            ']' => Some(Symbols::RightSquareBrace),
            '{' => Some(Symbols::LeftCurlyBrace),
            '}' => Some(Symbols::RightCurlyBrace),
            '+' => Some(Symbols::Plus),
            '-' => Some(Symbols::Minus),
            '*' => Some(Symbols::Star),
            '/' => Some(Symbols::Slash),
            '.' => Some(Symbols::Dot),
            ',' => Some(Symbols::Comma),
            ':' => Some(Symbols::Colon),
            '#' => Some(Symbols::Hash),
            _ => None
        };
    }
}
