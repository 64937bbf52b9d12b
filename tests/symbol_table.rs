use krl_parser::{FunctionSymbol, ScopeId, Symbol, SymbolTable, VariableSymbol};

fn variable(name: &str) -> Symbol {
    Symbol::Variable(VariableSymbol {
        name: String::from(name),
        symbol_type: String::from("INT")
    })
}

#[test]
fn lookup_in_own_scope() {
    let mut table = SymbolTable::new();
    let global: ScopeId = table.new_scope("GLOBAL", None);
    table.add(global, variable("foo"));

    assert_eq!(table.lookup(global, "foo", false), Some(&variable("foo")));
    assert_eq!(table.lookup(global, "foo", true), Some(&variable("foo")));
}

#[test]
fn lookup_walks_up_to_parents() {
    let mut table = SymbolTable::new();
    let global: ScopeId = table.new_scope("GLOBAL", None);
    let module: ScopeId = table.new_scope("Foo", Some(global));
    let function: ScopeId = table.new_scope("Foo.Bar", Some(module));
    table.add(global, variable("foo"));

    assert_eq!(table.lookup(function, "foo", false), Some(&variable("foo")));
    assert_eq!(table.lookup(function, "foo", true), None);
    assert_eq!(table.lookup(module, "foo", true), None);
}

#[test]
fn unknown_name_is_absent() {
    let mut table = SymbolTable::new();
    let global: ScopeId = table.new_scope("GLOBAL", None);
    let module: ScopeId = table.new_scope("Foo", Some(global));

    assert!(table.lookup(module, "bar", false).is_none());
}

#[test]
fn inner_scope_shadows_outer() {
    let mut table = SymbolTable::new();
    let global: ScopeId = table.new_scope("GLOBAL", None);
    let module: ScopeId = table.new_scope("Foo", Some(global));
    table.add(global, variable("foo"));
    table.add(
        module,
        Symbol::Function(FunctionSymbol {
            name: String::from("foo"),
            parameters: Vec::new(),
            returns: None
        })
    );

    match table.lookup(module, "foo", false) {
        Some(Symbol::Function(function)) => assert_eq!(function.name, "foo"),
        other => panic!("expected the function symbol, got {:?}", other)
    }
    assert_eq!(table.lookup(global, "foo", false), Some(&variable("foo")));
}

#[test]
fn adding_twice_replaces() {
    let mut table = SymbolTable::new();
    let global: ScopeId = table.new_scope("GLOBAL", None);
    table.add(global, variable("foo"));
    table.add(
        global,
        Symbol::Variable(VariableSymbol {
            name: String::from("foo"),
            symbol_type: String::from("REAL")
        })
    );

    assert_eq!(table.scope(global).unwrap().symbols().len(), 1);
    match table.lookup(global, "foo", true) {
        Some(Symbol::Variable(variable)) => assert_eq!(variable.symbol_type, "REAL"),
        other => panic!("expected a variable, got {:?}", other)
    }
}

#[test]
fn scope_structure() {
    let mut table = SymbolTable::default();
    assert!(table.is_empty());

    let global: ScopeId = table.new_scope("GLOBAL", None);
    let module: ScopeId = table.new_scope("Foo", Some(global));

    assert_eq!(table.len(), 2);
    assert_eq!(table.parent_scope(module), Some(global));
    assert_eq!(table.parent_scope(global), None);
    assert_eq!(table.name(module), "Foo");
    assert_eq!(table.scope_named("Foo"), Some(module));
    assert_eq!(table.scope_named("Bar"), None);
}

#[test]
fn handles_from_another_table_are_not_used() {
    let mut first = SymbolTable::new();
    let first_global: ScopeId = first.new_scope("GLOBAL", None);

    let mut second = SymbolTable::new();
    let second_global: ScopeId = second.new_scope("GLOBAL", None);
    assert_ne!(first_global, second_global);
    assert_eq!(first_global.index(), second_global.index());

    second.add(first_global, variable("foo"));
    assert!(second.lookup(second_global, "foo", false).is_none());
    assert!(second.lookup(first_global, "foo", false).is_none());
    assert!(!second.owns(first_global));
    assert!(second.owns(second_global));
    assert_eq!(second.name(first_global), "");
    assert!(second.scope(first_global).is_none());
    assert_eq!(second.parent_scope(first_global), None);

    // A foreign parent does not link the new scope anywhere
    let orphan: ScopeId = second.new_scope("Foo", Some(first_global));
    assert_eq!(second.parent_scope(orphan), None);
}
