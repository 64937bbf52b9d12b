use thiserror::Error;

use crate::krl::token::Token;

// The only error the parser reports, pointing at the offending token
#[derive (Debug, Clone, PartialEq, Eq, Error)]
#[error ("Parsing error at ({line}, {column}): {message}")]
pub struct ParsingError {
    pub line: usize,
    pub column: usize,
    pub message: String
}

impl ParsingError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        return ParsingError {
            line,
            column,
            message: message.into()
        };
    }

    // Creates an error located at the given token
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        return ParsingError::new(token.line(), token.column(), message);
    }
}

// Raised when a tree is annotated by a different analyzer than the one visiting it
#[derive (Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error ("{node} is already bound to a scope of another symbol table")]
    ForeignScope {
        node: String
    }
}
