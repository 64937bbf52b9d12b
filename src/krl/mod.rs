pub mod token;
pub mod lexer;
pub mod error;
pub mod parser;
pub mod ast;
pub mod visitor;
pub mod symbol_table;
pub mod semantic_analyzer;
