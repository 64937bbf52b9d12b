use std::cell::OnceCell;

use crate::krl::symbol_table::ScopeId;
use crate::krl::visitor::Visitor;

// A root node handed out by the parser, one per add_* call
#[derive (Debug, Clone, PartialEq)]
pub enum RootNode {
    Module(Module),
    File(KrlFile)
}

impl RootNode {
    // Dispatches to the visitor method for this variant
    pub fn accept<V: Visitor>(&self, visitor: &mut V, scope: V::Scope) -> Result<V::Scope, V::Error> {
        return match self {
            RootNode::Module(module) => visitor.visit_module(module, scope),
            RootNode::File(file) => visitor.visit_file(file, scope)
        };
    }
}

// A source file and a data file under one logical unit
#[derive (Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub source_file: KrlFile,
    pub data_file: KrlFile
}

// The three kinds of KRL files
#[derive (Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum FileType {
    #[strum (serialize = "SourceFile")]
    Source,
    #[strum (serialize = "DataFile")]
    Data,
    #[strum (serialize = "SubmitFile")]
    Submit
}

#[derive (Debug, Clone, PartialEq)]
pub struct KrlFile {
    pub file_type: FileType,
    pub name: String,
    pub file_attributes: Vec<FileAttribute>,
    pub statements: Vec<Statement>,
    // Bound once by the semantic analyzer
    pub symbol_table: OnceCell<ScopeId>
}

impl KrlFile {
    pub fn new(file_type: FileType, name: &str, file_attributes: Vec<FileAttribute>, statements: Vec<Statement>) -> Self {
        return KrlFile {
            file_type,
            name: String::from(name),
            file_attributes,
            statements,
            symbol_table: OnceCell::new()
        };
    }
}

// A raw &... directive line, without the ampersand
#[derive (Debug, Clone, PartialEq)]
pub struct FileAttribute {
    pub value: String,
    pub position: (usize, usize)
}

// Everything that can appear in a file or in a definition body
#[derive (Debug, Clone, PartialEq)]
pub enum Statement {
    FunctionDefinition(FunctionDefinition),
    DataDefinition(DataDefinition),
    FunctionCall(FunctionCall)
}

impl Statement {
    // Dispatches to the visitor method for this variant
    pub fn accept<V: Visitor>(&self, visitor: &mut V, scope: V::Scope) -> Result<V::Scope, V::Error> {
        return match self {
            Statement::FunctionDefinition(definition) => visitor.visit_function_definition(definition, scope),
            Statement::DataDefinition(definition) => visitor.visit_data_definition(definition, scope),
            Statement::FunctionCall(call) => visitor.visit_function_call(call, scope)
        };
    }
}

// DEF and DEFFCT blocks
// returns is None for DEF subroutines
#[derive (Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
    pub returns: Option<Type>,
    pub is_global: bool,
    pub position: (usize, usize),
    pub symbol_table: OnceCell<ScopeId>
}

impl FunctionDefinition {
    pub fn new(name: &str, parameters: Vec<Parameter>, body: Vec<Statement>, returns: Option<Type>, is_global: bool, position: (usize, usize)) -> Self {
        return FunctionDefinition {
            name: String::from(name),
            parameters,
            body,
            returns,
            is_global,
            position,
            symbol_table: OnceCell::new()
        };
    }
}

// DEFDAT blocks
#[derive (Debug, Clone, PartialEq)]
pub struct DataDefinition {
    pub name: String,
    pub body: Vec<Statement>,
    pub is_public: bool,
    pub position: (usize, usize),
    pub symbol_table: OnceCell<ScopeId>
}

impl DataDefinition {
    pub fn new(name: &str, body: Vec<Statement>, is_public: bool, position: (usize, usize)) -> Self {
        return DataDefinition {
            name: String::from(name),
            body,
            is_public,
            position,
            symbol_table: OnceCell::new()
        };
    }
}

#[derive (Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum (serialize_all = "UPPERCASE")]
pub enum ParameterType {
    In,
    Out
}

#[derive (Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub parameter_type: ParameterType,
    pub position: (usize, usize)
}

impl Parameter {
    pub fn new(name: &str, parameter_type: ParameterType, position: (usize, usize)) -> Self {
        return Parameter {
            name: String::from(name),
            parameter_type,
            position
        };
    }
}

// A bare call statement, the arguments are kept as raw names
#[derive (Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub parameters: Vec<String>,
    pub position: (usize, usize)
}

// The return type of a DEFFCT
#[derive (Debug, Clone, PartialEq)]
pub struct Type {
    pub name: String,
    pub position: (usize, usize)
}
