use krl_parser::{
    FileParser, FileType, FunctionCall, FunctionDefinition, KrlFile, Lexer, ParameterType, Parser, ParsingError,
    RootNode, Statement
};

fn source_file(code: &str) -> Result<KrlFile, ParsingError> {
    return FileParser::new(Lexer::new(code).generate_tokens()).parse_source_file("Foo");
}

fn data_file(code: &str) -> Result<KrlFile, ParsingError> {
    return FileParser::new(Lexer::new(code).generate_tokens()).parse_data_file("Foo");
}

fn submit_file(code: &str) -> Result<KrlFile, ParsingError> {
    return FileParser::new(Lexer::new(code).generate_tokens()).parse_submit_file("Foo");
}

fn function(statement: &Statement) -> &FunctionDefinition {
    match statement {
        Statement::FunctionDefinition(definition) => definition,
        other => panic!("expected a function definition, got {:?}", other)
    }
}

fn call(statement: &Statement) -> &FunctionCall {
    match statement {
        Statement::FunctionCall(call) => call,
        other => panic!("expected a function call, got {:?}", other)
    }
}

#[test]
fn module_definition_with_parameters() {
    let file = source_file("DEF Foo(bar:IN, foobar:OUT)\nEND").unwrap();
    assert_eq!(file.file_type, FileType::Source);
    assert_eq!(file.name, "Foo");
    assert_eq!(file.statements.len(), 1);

    let definition = function(&file.statements[0]);
    assert_eq!(definition.name, "Foo");
    assert_eq!(definition.position, (0, 4));
    assert!(!definition.is_global);
    assert!(definition.returns.is_none());
    assert!(definition.body.is_empty());

    let parameters: Vec<(&str, ParameterType)> = definition
        .parameters
        .iter()
        .map(|parameter| (parameter.name.as_str(), parameter.parameter_type))
        .collect();
    assert_eq!(parameters, vec![("bar", ParameterType::In), ("foobar", ParameterType::Out)]);
}

#[test]
fn several_definitions_in_one_source_file() {
    let file = source_file("DEF Foo()\nEND\n\nDEF Bar()\nEND\n").unwrap();
    let names: Vec<&str> = file.statements.iter().map(|statement| function(statement).name.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Bar"]);
}

#[test]
fn global_definition() {
    let file = source_file("GLOBAL DEF Foo()\nEND\nDEF Bar()\nEND").unwrap();
    assert!(function(&file.statements[0]).is_global);
    assert!(!function(&file.statements[1]).is_global);
}

#[test]
fn function_definition_with_return_type() {
    let file = source_file("DEFFCT INT Foo(bar:IN)\nENDFCT").unwrap();
    let definition = function(&file.statements[0]);
    assert_eq!(definition.name, "Foo");
    let return_type = definition.returns.as_ref().unwrap();
    assert_eq!(return_type.name, "INT");
    assert_eq!(return_type.position, (0, 7));
    assert_eq!(definition.parameters.len(), 1);
}

#[test]
fn function_definition_needs_matching_end() {
    let err = source_file("DEFFCT INT Foo()\nEND").unwrap_err();
    assert_eq!(err.message, "Expected ENDFCT but found END");
    assert_eq!((err.line, err.column), (1, 0));
}

#[test]
fn keywords_are_case_insensitive() {
    let file = source_file("global def Foo(bar:in)\nend").unwrap();
    let definition = function(&file.statements[0]);
    assert!(definition.is_global);
    assert_eq!(definition.parameters[0].parameter_type, ParameterType::In);
}

#[test]
fn body_with_module_calls() {
    let file = source_file("DEF Foo()\n  Bar(foo, bar)\n  Baz()\nEND\n").unwrap();
    let definition = function(&file.statements[0]);
    assert_eq!(definition.body.len(), 2);

    let first = call(&definition.body[0]);
    assert_eq!(first.name, "Bar");
    assert_eq!(first.parameters, vec![String::from("foo"), String::from("bar")]);
    assert_eq!(first.position, (1, 2));

    let second = call(&definition.body[1]);
    assert_eq!(second.name, "Baz");
    assert!(second.parameters.is_empty());
}

#[test]
fn comments_and_blank_lines_are_allowed() {
    let code = "; leading comment\n\nDEF Foo() ; header\n  ; inside\n\n  Bar()\nEND ; trailer\n; closing\n";
    let file = source_file(code).unwrap();
    let definition = function(&file.statements[0]);
    assert_eq!(definition.body.len(), 1);
    assert_eq!(call(&definition.body[0]).name, "Bar");
}

#[test]
fn file_attributes_in_header() {
    let file = source_file("&ACCESS RVP\n&REL 1\n\nDEF Foo()\nEND").unwrap();
    let attributes: Vec<&str> = file.file_attributes.iter().map(|attribute| attribute.value.as_str()).collect();
    assert_eq!(attributes, vec!["ACCESS RVP", "REL 1"]);
    assert_eq!(file.file_attributes[1].position, (1, 0));
}

#[test]
fn source_file_without_definition() {
    let err = source_file("; nothing here\n").unwrap_err();
    assert_eq!(err.message, "No module or function definition found");

    let err = source_file("").unwrap_err();
    assert_eq!(err.message, "No module or function definition found");
}

#[test]
fn stray_statement_after_definition() {
    let err = source_file("DEF Foo()\nEND\nBar()\n").unwrap_err();
    assert_eq!(err.message, "Expected GLOBAL, DEF or DEFFCT but found NAME");
    assert_eq!((err.line, err.column), (2, 0));
}

#[test]
fn missing_parameter_direction() {
    let err = source_file("DEF Foo(bar:)\nEND").unwrap_err();
    assert_eq!(err.message, "Expected IN or OUT but found ')'");
    assert_eq!((err.line, err.column), (0, 12));
}

#[test]
fn missing_parameter_colon() {
    let err = source_file("DEF Foo(bar)\nEND").unwrap_err();
    assert_eq!(err.message, "Expected ':' but found ')'");
}

#[test]
fn definition_must_end_its_line() {
    let err = source_file("DEF Foo() Bar()\nEND").unwrap_err();
    assert_eq!(err.message, "Expected NEWLINE but found NAME");
    assert_eq!((err.line, err.column), (0, 10));
}

#[test]
fn lexical_errors_are_reported_by_the_parser() {
    let err = source_file("DEF Foo(~)\nEND").unwrap_err();
    assert_eq!(err.message, "Expected ')' but found ERROR_TOKEN (Unknown character sequence!)");
    assert_eq!(err.to_string(), "Parsing error at (0, 8): Expected ')' but found ERROR_TOKEN (Unknown character sequence!)");
}

#[test]
fn data_definition() {
    let file = data_file("&ACCESS RVP\nDEFDAT Foo PUBLIC\nENDDAT\n").unwrap();
    assert_eq!(file.file_type, FileType::Data);
    assert_eq!(file.file_attributes.len(), 1);
    assert_eq!(file.statements.len(), 1);

    match &file.statements[0] {
        Statement::DataDefinition(definition) => {
            assert_eq!(definition.name, "Foo");
            assert!(definition.is_public);
            assert!(definition.body.is_empty());
            assert_eq!(definition.position, (1, 7));
        },
        other => panic!("expected a data definition, got {:?}", other)
    }
}

#[test]
fn data_file_without_definition() {
    let err = data_file("&ACCESS RVP\n").unwrap_err();
    assert_eq!(err.message, "No data definition found");
}

#[test]
fn data_file_with_two_definitions() {
    let err = data_file("DEFDAT Foo\nENDDAT\nDEFDAT Bar\nENDDAT\n").unwrap_err();
    assert_eq!(err.message, "More than one data definition found");
    assert_eq!((err.line, err.column), (2, 0));
}

#[test]
fn data_file_with_trailing_content() {
    let err = data_file("DEFDAT Foo\nENDDAT\nBar()\n").unwrap_err();
    assert_eq!(err.message, "Expected END_OF_FILE but found NAME");
}

#[test]
fn submit_file_with_calls_and_definitions() {
    let file = submit_file("&COMMENT sps\nFoo()\n; idle\nDEF Bar()\nEND\nBaz(a)\n").unwrap();
    assert_eq!(file.file_type, FileType::Submit);
    assert_eq!(file.statements.len(), 3);
    assert_eq!(call(&file.statements[0]).name, "Foo");
    assert_eq!(function(&file.statements[1]).name, "Bar");
    assert_eq!(call(&file.statements[2]).parameters, vec![String::from("a")]);
}

#[test]
fn empty_submit_file() {
    let err = submit_file("; only a comment\n").unwrap_err();
    assert_eq!(err.message, "No statement found");
}

#[test]
fn parser_collects_roots_in_order() {
    let mut parser = Parser::new();
    parser.add_module("Foo", "DEF Foo()\nEND", "DEFDAT Foo\nENDDAT").unwrap();
    parser.add_source_file("Bar", "DEF Bar()\nEND").unwrap();
    parser.add_data_file("Baz", "DEFDAT Baz\nENDDAT").unwrap();
    parser.add_submit_file("Sps", "Bar()\n").unwrap();

    let ast = parser.ast();
    assert_eq!(ast.len(), 4);

    match &ast[0] {
        RootNode::Module(module) => {
            assert_eq!(module.name, "Foo");
            assert_eq!(module.source_file.file_type, FileType::Source);
            assert_eq!(module.source_file.name, "Foo");
            assert_eq!(module.data_file.file_type, FileType::Data);
            assert_eq!(module.data_file.name, "Foo");
        },
        other => panic!("expected a module, got {:?}", other)
    }

    let file_types: Vec<FileType> = ast[1..]
        .iter()
        .map(|root| match root {
            RootNode::File(file) => file.file_type,
            RootNode::Module(_) => panic!("expected a file")
        })
        .collect();
    assert_eq!(file_types, vec![FileType::Source, FileType::Data, FileType::Submit]);
}

#[test]
fn failed_file_is_not_added() {
    let mut parser = Parser::new();
    parser.add_source_file("Foo", "DEF Foo()\nEND").unwrap();

    let err = parser.add_module("Bar", "DEF Bar()\nEND", "DEFDAT Bar\n").unwrap_err();
    assert_eq!(err.message, "Expected ENDDAT but found END_OF_FILE");
    assert_eq!(parser.ast().len(), 1);

    assert!(parser.add_data_file("Baz", "").is_err());
    assert_eq!(parser.into_ast().len(), 1);
}

#[test]
fn tree_rendering() {
    let mut parser = Parser::new();
    parser
        .add_module(
            "Foo",
            "&ACCESS RVP\nGLOBAL DEF Foo(bar:IN)\n  Bar(bar)\nEND\nDEFFCT INT Baz()\nENDFCT",
            "DEFDAT Foo PUBLIC\nENDDAT"
        )
        .unwrap();

    let expected = "<Module Foo>\n\
                    -<SourceFile Foo>\n\
                    --[&ACCESS RVP]\n\
                    --<GLOBAL DEF Foo>\n\
                    ---[bar:IN]\n\
                    ---[Bar(bar)]\n\
                    --<DEFFCT INT Baz>\n\
                    -<DataFile Foo>\n\
                    --<DEFDAT Foo PUBLIC>\n";
    assert_eq!(krl_parser::render_tree(parser.ast()), expected);
}
