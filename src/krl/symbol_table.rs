use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::*;

use petgraph::graph::{NodeIndex, Graph};

use crate::krl::ast::{FunctionDefinition, Parameter, Type};

// Every table gets its own id so handles can not be used with another table
static NEXT_TABLE_ID: AtomicUsize = AtomicUsize::new(0);

// Handle to a single scope inside the symbol table that created it
#[derive (Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId {
    table_id: usize,
    node: NodeIndex
}

impl ScopeId {
    // Position of the scope in creation order
    pub fn index(&self) -> usize {
        return self.node.index();
    }
}

// A declared variable, the type is kept as its raw name
#[derive (Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub name: String,
    pub symbol_type: String
}

#[derive (Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub returns: Option<Type>
}

impl FunctionSymbol {
    // Copies the signature out of a parsed definition
    pub fn create_from_definition(definition: &FunctionDefinition) -> Self {
        return FunctionSymbol {
            name: definition.name.to_owned(),
            parameters: definition.parameters.to_owned(),
            returns: definition.returns.to_owned()
        };
    }
}

#[derive (Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable(VariableSymbol),
    Function(FunctionSymbol)
}

impl Symbol {
    pub fn name(&self) -> &str {
        return match self {
            Symbol::Variable(variable) => &variable.name,
            Symbol::Function(function) => &function.name
        };
    }
}

// One lexical scope, its parent is the outgoing edge in the graph
#[derive (Debug, Clone, PartialEq)]
pub struct Scope {
    pub name: String,
    symbols: HashMap<String, Symbol>
}

impl Scope {
    pub fn symbols(&self) -> &HashMap<String, Symbol> {
        return &self.symbols;
    }
}

#[derive (Debug)]
pub struct SymbolTable {
    id: usize,
    // The graph of scopes, every edge points from a child to its parent
    graph: Graph<Scope, ()>
}

impl SymbolTable {
    // Constructor for a new symbol table
    pub fn new() -> Self {
        return SymbolTable {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            graph: Graph::new()
        };
    }

    // Function to create a new scope below the given parent
    pub fn new_scope(&mut self, name: &str, parent: Option<ScopeId>) -> ScopeId {
        debug!("Creating new scope {}", name);
        // Add a new node to the graph with the new hashmap
        let new_node: NodeIndex = self.graph.add_node(Scope {
            name: String::from(name),
            symbols: HashMap::new()
        });

        // Create the edge from the new scope to the parent
        if let Some(parent_node) = parent.and_then(|parent_scope| self.node(parent_scope)) {
            self.graph.add_edge(new_node, parent_node, ());
        }

        return ScopeId {
            table_id: self.id,
            node: new_node
        };
    }

    // Adds a symbol to the scope, replacing one of the same name
    // Handles from other tables are ignored
    pub fn add(&mut self, scope: ScopeId, symbol: Symbol) {
        let cur_scope: Option<&mut Scope> = match self.node(scope) {
            Some(node) => self.graph.node_weight_mut(node),
            None => None
        };

        match cur_scope {
            Some(cur_scope) => {
                debug!("Adding symbol [ {} ] to scope {}", symbol.name(), cur_scope.name);
                cur_scope.symbols.insert(symbol.name().to_owned(), symbol);
            },
            None => warn!("Dropping symbol [ {} ], the scope is not part of this table", symbol.name())
        }
    }

    // Looks the name up in the scope and then in every parent scope
    // unless the search is restricted to the given scope
    pub fn lookup(&self, scope: ScopeId, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        let mut cur_scope: Option<ScopeId> = Some(scope);

        while let Some(scope_id) = cur_scope {
            let symbol: Option<&Symbol> = self
                .scope(scope_id)
                .and_then(|scope_entry| scope_entry.symbols.get(name));

            if symbol.is_some() || current_scope_only {
                return symbol;
            }

            cur_scope = self.parent_scope(scope_id);
        }

        return None;
    }

    pub fn parent_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        let node: NodeIndex = self.node(scope)?;
        return self.graph.neighbors(node).next().map(|parent| ScopeId {
            table_id: self.id,
            node: parent
        });
    }

    pub fn scope(&self, scope: ScopeId) -> Option<&Scope> {
        return self.graph.node_weight(self.node(scope)?);
    }

    // Gets the name of a scope, empty if the scope does not exist
    pub fn name(&self, scope: ScopeId) -> &str {
        return match self.scope(scope) {
            Some(scope_entry) => &scope_entry.name,
            None => ""
        };
    }

    // Finds the first scope created with the given name
    pub fn scope_named(&self, name: &str) -> Option<ScopeId> {
        return self.graph
            .node_indices()
            .find(|index| self.graph[*index].name == name)
            .map(|node| ScopeId {
                table_id: self.id,
                node
            });
    }

    // Whether the handle was created by this table
    pub fn owns(&self, scope: ScopeId) -> bool {
        return self.node(scope).is_some();
    }

    fn node(&self, scope: ScopeId) -> Option<NodeIndex> {
        if scope.table_id != self.id || self.graph.node_weight(scope.node).is_none() {
            return None;
        }
        return Some(scope.node);
    }

    pub fn len(&self) -> usize {
        return self.graph.node_count();
    }

    pub fn is_empty(&self) -> bool {
        return self.graph.node_count() == 0;
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        return SymbolTable::new();
    }
}
