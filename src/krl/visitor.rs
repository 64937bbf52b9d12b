use std::convert::Infallible;

use string_builder::Builder;

use crate::krl::ast::{DataDefinition, FunctionCall, FunctionDefinition, KrlFile, Module, RootNode};

// One handler per node kind. The scope value is threaded through the walk:
// each handler receives the scope of its parent and returns the scope
// the next sibling should continue with. An error stops the walk.
pub trait Visitor {
    type Scope;
    type Error;

    fn visit_module(&mut self, module: &Module, scope: Self::Scope) -> Result<Self::Scope, Self::Error>;
    fn visit_file(&mut self, file: &KrlFile, scope: Self::Scope) -> Result<Self::Scope, Self::Error>;
    fn visit_function_definition(&mut self, definition: &FunctionDefinition, scope: Self::Scope) -> Result<Self::Scope, Self::Error>;
    fn visit_data_definition(&mut self, definition: &DataDefinition, scope: Self::Scope) -> Result<Self::Scope, Self::Error>;
    fn visit_function_call(&mut self, call: &FunctionCall, scope: Self::Scope) -> Result<Self::Scope, Self::Error>;
}

// Renders the tree as text, one node per line with a dash per level
struct TreeRenderer {
    builder: Builder
}

impl TreeRenderer {
    fn line(&mut self, level: usize, text: String) {
        // Set the level
        for _i in 0..level {
            self.builder.append("-");
        }
        self.builder.append(text);
        self.builder.append("\n");
    }
}

impl Visitor for TreeRenderer {
    type Scope = usize;
    type Error = Infallible;

    fn visit_module(&mut self, module: &Module, level: usize) -> Result<usize, Infallible> {
        self.line(level, format!("<Module {}>", module.name));
        self.visit_file(&module.source_file, level + 1)?;
        self.visit_file(&module.data_file, level + 1)?;
        return Ok(level);
    }

    fn visit_file(&mut self, file: &KrlFile, level: usize) -> Result<usize, Infallible> {
        self.line(level, format!("<{} {}>", file.file_type, file.name));
        for attribute in file.file_attributes.iter() {
            self.line(level + 1, format!("[&{}]", attribute.value));
        }
        for statement in file.statements.iter() {
            statement.accept(self, level + 1)?;
        }
        return Ok(level);
    }

    fn visit_function_definition(&mut self, definition: &FunctionDefinition, level: usize) -> Result<usize, Infallible> {
        let mut header: String = String::from("<");
        if definition.is_global {
            header.push_str("GLOBAL ");
        }
        match &definition.returns {
            Some(return_type) => header.push_str(&format!("DEFFCT {} {}", return_type.name, definition.name)),
            None => header.push_str(&format!("DEF {}", definition.name))
        }
        header.push('>');
        self.line(level, header);

        for parameter in definition.parameters.iter() {
            self.line(level + 1, format!("[{}:{}]", parameter.name, parameter.parameter_type));
        }
        for statement in definition.body.iter() {
            statement.accept(self, level + 1)?;
        }
        return Ok(level);
    }

    fn visit_data_definition(&mut self, definition: &DataDefinition, level: usize) -> Result<usize, Infallible> {
        if definition.is_public {
            self.line(level, format!("<DEFDAT {} PUBLIC>", definition.name));
        } else {
            self.line(level, format!("<DEFDAT {}>", definition.name));
        }
        for statement in definition.body.iter() {
            statement.accept(self, level + 1)?;
        }
        return Ok(level);
    }

    fn visit_function_call(&mut self, call: &FunctionCall, level: usize) -> Result<usize, Infallible> {
        self.line(level, format!("[{}({})]", call.name, call.parameters.join(", ")));
        return Ok(level);
    }
}

// Creates the text representation of the given roots
pub fn render_tree(roots: &[RootNode]) -> String {
    let mut renderer: TreeRenderer = TreeRenderer {
        builder: Builder::default()
    };

    for root in roots.iter() {
        if let Err(never) = root.accept(&mut renderer, 0) {
            match never {}
        }
    }

    return renderer.builder.string().unwrap_or_default();
}
