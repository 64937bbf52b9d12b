use std::cell::OnceCell;

use crate::krl::ast::{DataDefinition, FunctionCall, FunctionDefinition, KrlFile, Module, RootNode};
use crate::krl::error::SemanticError;
use crate::krl::symbol_table::{FunctionSymbol, ScopeId, Symbol, SymbolTable};
use crate::krl::visitor::Visitor;
use crate::util::krl_log;

pub const GLOBAL_SCOPE_NAME: &str = "GLOBAL";

// Builds the scope tree for parsed roots and binds the scopes to the nodes
pub struct SemanticAnalyzer {
    pub symbol_table: SymbolTable,
    global_scope: ScopeId
}

impl SemanticAnalyzer {
    // Constructor for the analyzer, starts out with only the global scope
    pub fn new() -> Self {
        let mut symbol_table: SymbolTable = SymbolTable::new();
        let global_scope: ScopeId = symbol_table.new_scope(GLOBAL_SCOPE_NAME, None);

        return SemanticAnalyzer {
            symbol_table,
            global_scope
        };
    }

    pub fn global_scope(&self) -> ScopeId {
        return self.global_scope;
    }

    // Annotates every root in order, each root starts without a module scope
    pub fn visit(&mut self, ast: &[RootNode]) -> Result<(), SemanticError> {
        for root in ast.iter() {
            self.visit_root(root)?;
        }

        krl_log::log(
            krl_log::LogTypes::Info,
            krl_log::LogSources::SemanticAnalyzer,
            format!("Semantic analysis completed with {} scopes", self.symbol_table.len())
        );
        return Ok(());
    }

    pub fn visit_root(&mut self, root: &RootNode) -> Result<(), SemanticError> {
        let res: Result<Option<ScopeId>, SemanticError> = root.accept(self, None);
        if let Err(err) = &res {
            krl_log::log(
                krl_log::LogTypes::Error,
                krl_log::LogSources::SemanticAnalyzer,
                err.to_string()
            );
        }
        return res.map(|_| ());
    }

    // Gets the scope a previous run bound to the node, which must belong to this analyzer
    fn bound_scope(&self, cell: &OnceCell<ScopeId>, node: impl FnOnce() -> String) -> Result<Option<ScopeId>, SemanticError> {
        return match cell.get() {
            Some(scope) if !self.symbol_table.owns(*scope) => Err(SemanticError::ForeignScope { node: node() }),
            bound => Ok(bound.copied())
        };
    }

    // Reuses the current module scope when it has the given name, otherwise starts a new one
    fn module_scope_for(&mut self, name: &str, current: Option<ScopeId>) -> ScopeId {
        if let Some(module_scope) = current {
            if self.symbol_table.name(module_scope) == name {
                return module_scope;
            }
        }

        return self.new_scope(name, self.global_scope);
    }

    fn new_scope(&mut self, name: &str, parent: ScopeId) -> ScopeId {
        let scope: ScopeId = self.symbol_table.new_scope(name, Some(parent));
        krl_log::log(
            krl_log::LogTypes::Debug,
            krl_log::LogSources::SemanticAnalyzer,
            format!("Entering new scope {} [ {} ] below {}", scope.index(), name, self.symbol_table.name(parent))
        );
        return scope;
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        return SemanticAnalyzer::new();
    }
}

// The threaded scope is the current module scope, if any
impl Visitor for SemanticAnalyzer {
    type Scope = Option<ScopeId>;
    type Error = SemanticError;

    fn visit_module(&mut self, module: &Module, _current: Option<ScopeId>) -> Result<Option<ScopeId>, SemanticError> {
        // A module that was analyzed before keeps its scope
        let module_scope: ScopeId = match self.bound_scope(&module.source_file.symbol_table, || format!("Module {}", module.name))? {
            Some(bound_scope) => bound_scope,
            None => self.new_scope(&module.name, self.global_scope)
        };

        let current: Option<ScopeId> = self.visit_file(&module.source_file, Some(module_scope))?;
        self.visit_file(&module.data_file, current)?;

        // Nothing after the module sees its scope
        return Ok(None);
    }

    fn visit_file(&mut self, file: &KrlFile, current: Option<ScopeId>) -> Result<Option<ScopeId>, SemanticError> {
        let file_scope: ScopeId = match self.bound_scope(&file.symbol_table, || format!("{} {}", file.file_type, file.name))? {
            Some(bound_scope) => bound_scope,
            None => {
                let scope: ScopeId = self.module_scope_for(&file.name, current);
                *file.symbol_table.get_or_init(|| scope)
            }
        };

        let mut module_scope: Option<ScopeId> = Some(file_scope);
        for statement in file.statements.iter() {
            module_scope = statement.accept(self, module_scope)?;
        }

        return Ok(module_scope);
    }

    fn visit_function_definition(&mut self, definition: &FunctionDefinition, current: Option<ScopeId>) -> Result<Option<ScopeId>, SemanticError> {
        let bound: Option<ScopeId> = self.bound_scope(&definition.symbol_table, || format!("FunctionDefinition {}", definition.name))?;

        // Functions only ever appear inside a file, which always provides a module scope
        let module_scope: ScopeId = match current {
            Some(scope) => scope,
            None => self.module_scope_for(&definition.name, None)
        };

        self.symbol_table.add(module_scope, Symbol::Function(FunctionSymbol::create_from_definition(definition)));
        krl_log::log(
            krl_log::LogTypes::Debug,
            krl_log::LogSources::SemanticAnalyzer,
            format!("Function [ {} ] declared at {:?} in scope {}", definition.name, definition.position, self.symbol_table.name(module_scope))
        );

        let function_scope: ScopeId = match bound {
            Some(bound_scope) => bound_scope,
            None => {
                let scope_name: String = format!("{}.{}", self.symbol_table.name(module_scope), definition.name);
                let scope: ScopeId = self.new_scope(&scope_name, module_scope);
                *definition.symbol_table.get_or_init(|| scope)
            }
        };

        // Lookups from the body resolve through the function scope
        let mut body_scope: Option<ScopeId> = Some(function_scope);
        for statement in definition.body.iter() {
            body_scope = statement.accept(self, body_scope)?;
        }

        return Ok(Some(module_scope));
    }

    fn visit_data_definition(&mut self, definition: &DataDefinition, current: Option<ScopeId>) -> Result<Option<ScopeId>, SemanticError> {
        let data_scope: ScopeId = match self.bound_scope(&definition.symbol_table, || format!("DataDefinition {}", definition.name))? {
            Some(bound_scope) => bound_scope,
            None => {
                let scope: ScopeId = self.module_scope_for(&definition.name, current);
                *definition.symbol_table.get_or_init(|| scope)
            }
        };

        let mut body_scope: Option<ScopeId> = Some(data_scope);
        for statement in definition.body.iter() {
            body_scope = statement.accept(self, body_scope)?;
        }

        // Following statements continue in the data scope
        return Ok(Some(data_scope));
    }

    fn visit_function_call(&mut self, call: &FunctionCall, current: Option<ScopeId>) -> Result<Option<ScopeId>, SemanticError> {
        if let Some(scope) = current {
            // Calls are not checked, system routines are never declared in the analyzed files
            if self.symbol_table.lookup(scope, &call.name, false).is_some() {
                krl_log::log(
                    krl_log::LogTypes::Debug,
                    krl_log::LogSources::SemanticAnalyzer,
                    format!("Call to [ {} ] at {:?} resolved in {}", call.name, call.position, self.symbol_table.name(scope))
                );
            } else {
                krl_log::log(
                    krl_log::LogTypes::Warning,
                    krl_log::LogSources::SemanticAnalyzer,
                    format!("Call to undeclared [ {} ] at {:?}", call.name, call.position)
                );
            }
        }
        return Ok(current);
    }
}
