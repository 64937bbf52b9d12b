use crate::krl::ast::{
    DataDefinition, FileAttribute, FileType, FunctionCall, FunctionDefinition, KrlFile, Module, Parameter,
    ParameterType, RootNode, Statement, Type
};
use crate::krl::error::ParsingError;
use crate::krl::lexer::Lexer;
use crate::krl::token::{Keywords, Symbols, Token, TokenType, TokenValue};
use crate::krl::visitor;
use crate::util::krl_log;

// Collects the parsed roots of every file handed to it, in call order
#[derive (Debug, Default)]
pub struct Parser {
    ast: Vec<RootNode>
}

impl Parser {
    // Constructor for the parser
    pub fn new() -> Self {
        return Parser {
            ast: Vec::new()
        };
    }

    pub fn ast(&self) -> &[RootNode] {
        return &self.ast;
    }

    pub fn into_ast(self) -> Vec<RootNode> {
        return self.ast;
    }

    pub fn add_source_file(&mut self, name: &str, source_code: &str) -> Result<(), ParsingError> {
        let source_file: KrlFile = parse_file(name, source_code, FileType::Source)?;
        self.push(RootNode::File(source_file));
        return Ok(());
    }

    pub fn add_data_file(&mut self, name: &str, data_code: &str) -> Result<(), ParsingError> {
        let data_file: KrlFile = parse_file(name, data_code, FileType::Data)?;
        self.push(RootNode::File(data_file));
        return Ok(());
    }

    pub fn add_submit_file(&mut self, name: &str, submit_code: &str) -> Result<(), ParsingError> {
        let submit_file: KrlFile = parse_file(name, submit_code, FileType::Submit)?;
        self.push(RootNode::File(submit_file));
        return Ok(());
    }

    // A module is the source file and the data file sharing one name
    pub fn add_module(&mut self, name: &str, source_code: &str, data_code: &str) -> Result<(), ParsingError> {
        let source_file: KrlFile = parse_file(name, source_code, FileType::Source)?;
        let data_file: KrlFile = parse_file(name, data_code, FileType::Data)?;

        self.push(RootNode::Module(Module {
            name: String::from(name),
            source_file,
            data_file
        }));
        return Ok(());
    }

    fn push(&mut self, root: RootNode) {
        // Only render when somebody reads the dump
        if krl_log::is_debug_enabled(&krl_log::LogSources::Parser) {
            krl_log::print_tree(krl_log::LogSources::Parser, visitor::render_tree(std::slice::from_ref(&root)));
        }
        self.ast.push(root);
    }
}

// Runs the lexer and the matching grammar over one file
fn parse_file(name: &str, code: &str, file_type: FileType) -> Result<KrlFile, ParsingError> {
    krl_log::log(
        krl_log::LogTypes::Info,
        krl_log::LogSources::Parser,
        format!("Parsing {} {}", file_type, name)
    );

    let token_stream: Vec<Token> = Lexer::new(code).generate_tokens();
    let mut file_parser: FileParser = FileParser::new(token_stream);

    let res: Result<KrlFile, ParsingError> = match file_type {
        FileType::Source => file_parser.parse_source_file(name),
        FileType::Data => file_parser.parse_data_file(name),
        FileType::Submit => file_parser.parse_submit_file(name)
    };

    if let Err(err) = &res {
        krl_log::log(
            krl_log::LogTypes::Error,
            krl_log::LogSources::Parser,
            format!("Parser failed for {} {}; {}", file_type, name, err)
        );
    }

    return res;
}

// Recursive descent over the tokens of a single file
pub struct FileParser {
    token_stream: Vec<Token>,
    cur_token_index: usize
}

impl FileParser {
    pub fn new(mut token_stream: Vec<Token>) -> Self {
        // The cursor relies on the stream being closed by an end of file token
        let needs_end: bool = match token_stream.last() {
            Some(token) => token.token_type != TokenType::EndOfFile,
            None => true
        };
        if needs_end {
            let end_position: (usize, usize) = token_stream.last().map(|token| token.position).unwrap_or((0, 0));
            token_stream.push(Token::new(TokenType::EndOfFile, TokenValue::Empty, end_position.0, end_position.1));
        }

        return FileParser {
            token_stream,
            cur_token_index: 0
        };
    }

    // source_file = header 1*(module_definition | function_definition)
    pub fn parse_source_file(&mut self, name: &str) -> Result<KrlFile, ParsingError> {
        self.log_rule("SourceFile");
        let file_attributes: Vec<FileAttribute> = self.parse_header()?;
        let mut statements: Vec<Statement> = Vec::new();

        loop {
            self.skip_comments_and_newlines();
            if self.at(TokenType::EndOfFile) {
                break;
            }

            if !self.at_definition_start() {
                if statements.is_empty() {
                    return Err(ParsingError::at(self.current(), "No module or function definition found"));
                }
                return Err(self.unexpected("GLOBAL, DEF or DEFFCT"));
            }

            statements.push(Statement::FunctionDefinition(self.parse_definition()?));
        }

        if statements.is_empty() {
            return Err(ParsingError::at(self.current(), "No module or function definition found"));
        }

        return Ok(KrlFile::new(FileType::Source, name, file_attributes, statements));
    }

    // data_file = header 1*data_definition, where only one definition is permitted
    pub fn parse_data_file(&mut self, name: &str) -> Result<KrlFile, ParsingError> {
        self.log_rule("DataFile");
        let file_attributes: Vec<FileAttribute> = self.parse_header()?;

        self.skip_comments_and_newlines();
        if !self.at(TokenType::Keyword(Keywords::DefDat)) {
            return Err(ParsingError::at(self.current(), "No data definition found"));
        }
        let data_definition: DataDefinition = self.parse_data_definition()?;

        self.skip_comments_and_newlines();
        if self.at(TokenType::Keyword(Keywords::DefDat)) {
            return Err(ParsingError::at(self.current(), "More than one data definition found"));
        }
        self.eat(TokenType::EndOfFile)?;

        return Ok(KrlFile::new(FileType::Data, name, file_attributes, vec![Statement::DataDefinition(data_definition)]));
    }

    // submit_file = header *(module_definition | function_definition | module_call | comment_or_newline)
    pub fn parse_submit_file(&mut self, name: &str) -> Result<KrlFile, ParsingError> {
        self.log_rule("SubmitFile");
        let file_attributes: Vec<FileAttribute> = self.parse_header()?;
        let mut statements: Vec<Statement> = Vec::new();

        loop {
            self.skip_comments_and_newlines();
            if self.at(TokenType::EndOfFile) {
                break;
            }

            if self.at_definition_start() {
                statements.push(Statement::FunctionDefinition(self.parse_definition()?));
            } else if self.at_module_call() {
                statements.push(Statement::FunctionCall(self.parse_module_call()?));
                self.parse_comment_or_newline()?;
            } else {
                return Err(self.unexpected("a definition or a module call"));
            }
        }

        if statements.is_empty() {
            return Err(ParsingError::at(self.current(), "No statement found"));
        }

        return Ok(KrlFile::new(FileType::Submit, name, file_attributes, statements));
    }

    // header = *(file_attribute 1*NEWLINE)
    fn parse_header(&mut self) -> Result<Vec<FileAttribute>, ParsingError> {
        self.log_rule("Header");
        let mut file_attributes: Vec<FileAttribute> = Vec::new();

        while self.at(TokenType::FileAttribute) {
            let attribute_token: Token = self.eat(TokenType::FileAttribute)?;
            file_attributes.push(FileAttribute {
                value: attribute_token.value.to_string(),
                position: attribute_token.position
            });

            self.eat(TokenType::Newline)?;
            while self.try_eat(TokenType::Newline) {}
        }

        return Ok(file_attributes);
    }

    // module_definition | function_definition, both may be preceded by GLOBAL
    fn parse_definition(&mut self) -> Result<FunctionDefinition, ParsingError> {
        let is_global: bool = self.try_eat(TokenType::Keyword(Keywords::Global));

        if self.try_eat(TokenType::Keyword(Keywords::Def)) {
            return self.parse_definition_rest(is_global, None, Keywords::End);
        }

        if self.try_eat(TokenType::Keyword(Keywords::DefFct)) {
            let type_token: Token = self.eat(TokenType::Name)?;
            let return_type: Type = Type {
                name: type_token.value.to_string(),
                position: type_token.position
            };
            return self.parse_definition_rest(is_global, Some(return_type), Keywords::EndFct);
        }

        return Err(self.unexpected("DEF or DEFFCT"));
    }

    // NAME "(" parameter_definitions ")" comment_or_newline statements <end> comment_or_newline
    fn parse_definition_rest(&mut self, is_global: bool, returns: Option<Type>, end_keyword: Keywords) -> Result<FunctionDefinition, ParsingError> {
        let name_token: Token = self.eat(TokenType::Name)?;
        self.log_rule(&format!("FunctionDefinition {}", name_token.value));

        self.eat(TokenType::Symbol(Symbols::LeftBrace))?;
        let parameters: Vec<Parameter> = self.parse_parameter_definitions()?;
        self.eat(TokenType::Symbol(Symbols::RightBrace))?;
        self.parse_comment_or_newline()?;

        let body: Vec<Statement> = self.parse_statements()?;

        self.eat(TokenType::Keyword(end_keyword))?;
        self.parse_comment_or_newline()?;

        return Ok(FunctionDefinition::new(
            &name_token.value.to_string(),
            parameters,
            body,
            returns,
            is_global,
            name_token.position
        ));
    }

    // data_definition = "DEFDAT" NAME ["PUBLIC"] comment_or_newline "ENDDAT" comment_or_newline
    fn parse_data_definition(&mut self) -> Result<DataDefinition, ParsingError> {
        self.eat(TokenType::Keyword(Keywords::DefDat))?;
        let name_token: Token = self.eat(TokenType::Name)?;
        self.log_rule(&format!("DataDefinition {}", name_token.value));

        let is_public: bool = self.try_eat(TokenType::Keyword(Keywords::Public));
        self.parse_comment_or_newline()?;

        self.eat(TokenType::Keyword(Keywords::EndDat))?;
        self.parse_comment_or_newline()?;

        return Ok(DataDefinition::new(&name_token.value.to_string(), Vec::new(), is_public, name_token.position));
    }

    // parameter_definitions = [parameter_definition *("," parameter_definition)]
    fn parse_parameter_definitions(&mut self) -> Result<Vec<Parameter>, ParsingError> {
        let mut parameters: Vec<Parameter> = Vec::new();

        if !self.at(TokenType::Name) {
            return Ok(parameters);
        }

        parameters.push(self.parse_parameter_definition()?);
        while self.try_eat(TokenType::Symbol(Symbols::Comma)) {
            parameters.push(self.parse_parameter_definition()?);
        }

        return Ok(parameters);
    }

    // parameter_definition = NAME ":" ("IN" | "OUT")
    fn parse_parameter_definition(&mut self) -> Result<Parameter, ParsingError> {
        let name_token: Token = self.eat(TokenType::Name)?;
        self.eat(TokenType::Symbol(Symbols::Colon))?;

        let parameter_type: ParameterType = if self.try_eat(TokenType::Keyword(Keywords::In)) {
            ParameterType::In
        } else if self.try_eat(TokenType::Keyword(Keywords::Out)) {
            ParameterType::Out
        } else {
            return Err(self.unexpected("IN or OUT"));
        };

        return Ok(Parameter::new(&name_token.value.to_string(), parameter_type, name_token.position));
    }

    // statements = *(module_call | comment_or_newline)
    fn parse_statements(&mut self) -> Result<Vec<Statement>, ParsingError> {
        let mut statements: Vec<Statement> = Vec::new();

        loop {
            if self.at_module_call() {
                statements.push(Statement::FunctionCall(self.parse_module_call()?));
            } else if self.at(TokenType::Comment) || self.at(TokenType::Newline) {
                self.parse_comment_or_newline()?;
            } else {
                // Whatever comes next belongs to the caller
                return Ok(statements);
            }
        }
    }

    // module_call = NAME "(" parameters ")"
    // parameters = [NAME *("," NAME)]
    fn parse_module_call(&mut self) -> Result<FunctionCall, ParsingError> {
        let name_token: Token = self.eat(TokenType::Name)?;
        self.log_rule(&format!("FunctionCall {}", name_token.value));
        self.eat(TokenType::Symbol(Symbols::LeftBrace))?;

        let mut parameters: Vec<String> = Vec::new();
        if self.at(TokenType::Name) {
            parameters.push(self.eat(TokenType::Name)?.value.to_string());
            while self.try_eat(TokenType::Symbol(Symbols::Comma)) {
                parameters.push(self.eat(TokenType::Name)?.value.to_string());
            }
        }

        self.eat(TokenType::Symbol(Symbols::RightBrace))?;

        return Ok(FunctionCall {
            name: name_token.value.to_string(),
            parameters,
            position: name_token.position
        });
    }

    // comment_or_newline = 1*([COMMENT] NEWLINE)
    fn parse_comment_or_newline(&mut self) -> Result<(), ParsingError> {
        let mut line_count: usize = 0;

        loop {
            let has_comment: bool = self.try_eat(TokenType::Comment);
            if has_comment || line_count == 0 {
                // A comment always has to be closed by its line end
                self.eat(TokenType::Newline)?;
            } else if !self.try_eat(TokenType::Newline) {
                return Ok(());
            }
            line_count += 1;
        }
    }

    // Skips blank lines and comment lines where they are optional
    fn skip_comments_and_newlines(&mut self) {
        while self.try_eat(TokenType::Comment) || self.try_eat(TokenType::Newline) {}
    }

    fn at_definition_start(&self) -> bool {
        return self.at(TokenType::Keyword(Keywords::Global))
            || self.at(TokenType::Keyword(Keywords::Def))
            || self.at(TokenType::Keyword(Keywords::DefFct));
    }

    // A name only starts a call when it is directly followed by "("
    fn at_module_call(&self) -> bool {
        return self.at(TokenType::Name) && self.peek().token_type == TokenType::Symbol(Symbols::LeftBrace);
    }

    fn current(&self) -> &Token {
        // new() guarantees there is at least the end of file token
        let index: usize = self.cur_token_index.min(self.token_stream.len() - 1);
        return &self.token_stream[index];
    }

    fn peek(&self) -> &Token {
        let index: usize = (self.cur_token_index + 1).min(self.token_stream.len() - 1);
        return &self.token_stream[index];
    }

    fn at(&self, token_type: TokenType) -> bool {
        return self.current().token_type == token_type;
    }

    // Function to ensure the token is correct, consuming it
    fn eat(&mut self, expected_token: TokenType) -> Result<Token, ParsingError> {
        if !self.at(expected_token) {
            return Err(self.unexpected(&expected_token.to_string()));
        }

        let cur_token: Token = self.current().to_owned();
        if self.cur_token_index < self.token_stream.len() - 1 {
            self.cur_token_index += 1;
        }
        return Ok(cur_token);
    }

    // Consumes the token only if it matches
    fn try_eat(&mut self, expected_token: TokenType) -> bool {
        return self.eat(expected_token).is_ok();
    }

    fn unexpected(&self, expected: &str) -> ParsingError {
        let cur_token: &Token = self.current();
        let found: String = match cur_token.token_type {
            // Lexical errors carry their own explanation
            TokenType::Error => format!("{} ({})", cur_token.token_type, cur_token.value),
            _ => cur_token.token_type.to_string()
        };
        return ParsingError::at(cur_token, format!("Expected {} but found {}", expected, found));
    }

    fn log_rule(&self, rule: &str) {
        krl_log::log(
            krl_log::LogTypes::Debug,
            krl_log::LogSources::Parser,
            format!("Parsing {} at {:?}", rule, self.current().position)
        );
    }
}
