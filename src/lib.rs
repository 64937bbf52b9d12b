//! Lexer, recursive-descent parser and scope analysis for KRL (KUKA Robot
//! Language) source, data and submit files.
//!
//! ```text
//! Lexer -> Parser -> AST -> SemanticAnalyzer -> scoped SymbolTable
//! ```

pub mod krl;
pub mod util;

pub use crate::krl::ast::{
    DataDefinition, FileAttribute, FileType, FunctionCall, FunctionDefinition, KrlFile, Module, Parameter,
    ParameterType, RootNode, Statement, Type
};
pub use crate::krl::error::{ParsingError, SemanticError};
pub use crate::krl::lexer::Lexer;
pub use crate::krl::parser::{FileParser, Parser};
pub use crate::krl::semantic_analyzer::SemanticAnalyzer;
pub use crate::krl::symbol_table::{FunctionSymbol, Scope, ScopeId, Symbol, SymbolTable, VariableSymbol};
pub use crate::krl::token::{Keywords, Symbols, Token, TokenType, TokenValue};
pub use crate::krl::visitor::{render_tree, Visitor};
