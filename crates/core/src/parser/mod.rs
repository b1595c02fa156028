//! Statement parsing for Maquette source files.
//!
//! Every statement recognizes a fixed keyword-led token pattern,
//! delegates value positions to the expression parser, and recurses into
//! block parsing for nested bodies, using the same scope matcher and
//! diagnostic context discipline as expressions. Parsing is fail-fast
//! within a file: the first error aborts the file's AST construction.

mod expressions;

pub use expressions::parse_expression;

use crate::ast::{Block, Member, Modifiers, Param, Stmt};
use crate::diag::ParseContext;
use crate::error::{CompileError, ErrorKind};
use crate::lexer::{Keyword, Token};
use crate::scope;

/// Parse a whole file's token sequence into a block of statements.
pub fn parse_file(tokens: &[Token], filename: &str) -> Result<Block, CompileError> {
    let mut p = Parser::new(tokens, filename);
    let block = p.parse_statements(tokens.len())?;
    Ok(block)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    ctx: ParseContext,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], filename: &str) -> Self {
        Parser {
            tokens,
            pos: 0,
            ctx: ParseContext::new(filename),
        }
    }

    fn peek(&self, end: usize) -> Option<&Token> {
        if self.pos < end {
            Some(&self.tokens[self.pos])
        } else {
            None
        }
    }

    fn skip_newlines(&mut self, end: usize) {
        while self.pos < end && self.tokens[self.pos] == Token::Newline {
            self.ctx.bump();
            self.pos += 1;
        }
    }

    fn err(&self, kind: ErrorKind) -> CompileError {
        self.ctx.error(kind)
    }

    fn take_ident(&mut self, end: usize, what: &str) -> Result<String, CompileError> {
        match self.peek(end) {
            Some(Token::Ident(w)) => {
                let w = w.clone();
                self.pos += 1;
                Ok(w)
            }
            _ => Err(self.err(ErrorKind::MissingIdentifier(what.to_owned()))),
        }
    }

    fn expect(&mut self, end: usize, token: &Token, desc: &str) -> Result<(), CompileError> {
        if self.peek(end) == Some(token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err(ErrorKind::MissingToken(desc.to_owned())))
        }
    }

    // -- Statement dispatch -------------------------------------

    /// Parse statements up to (not including) `end`.
    fn parse_statements(&mut self, end: usize) -> Result<Block, CompileError> {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines(end);
            if self.pos >= end {
                break;
            }
            statements.push(self.parse_statement(end)?);
        }
        Ok(Block { statements })
    }

    fn parse_statement(&mut self, end: usize) -> Result<Stmt, CompileError> {
        match self.tokens[self.pos].clone() {
            Token::Keyword(Keyword::Model) => self.parse_model(end),
            Token::Keyword(Keyword::Let) => self.parse_let(end),
            Token::Keyword(Keyword::Make) => self.parse_make(end),
            Token::Keyword(Keyword::If) => self.parse_if(end),
            Token::Keyword(Keyword::While) => self.parse_while(end),
            Token::LBrace => {
                let block = self.parse_braced_block(end, "'{'")?;
                Ok(Stmt::Block(block))
            }
            Token::Keyword(k) => Err(self.err(ErrorKind::UnexpectedToken(format!(
                "keyword '{}' outside its construct",
                k.as_str()
            )))),
            _ => {
                // Bare expression statement (e.g. a function call)
                let stop = self.value_extent(end);
                let expr = parse_expression(&self.tokens[self.pos..stop], &mut self.ctx)?;
                self.pos = stop;
                Ok(Stmt::Expression(expr))
            }
        }
    }

    // -- Extent scanning ----------------------------------------

    /// End index (exclusive) of a trailing value expression: the first
    /// newline or brace at bracket depth zero, except that a line ending
    /// in an operator or `=` continues onto the next line. The token just
    /// consumed by the caller (the `=` of a declaration) seeds the
    /// continuation check, so the value may start on the following line.
    fn value_extent(&self, end: usize) -> usize {
        let mut depth = 0i32;
        let mut last_significant: Option<&Token> =
            self.pos.checked_sub(1).map(|i| &self.tokens[i]);
        let mut i = self.pos;
        while i < end {
            match &self.tokens[i] {
                t @ (Token::LParen | Token::LBracket) => {
                    depth += 1;
                    last_significant = Some(t);
                }
                t @ (Token::RParen | Token::RBracket) => {
                    depth -= 1;
                    last_significant = Some(t);
                }
                Token::LBrace | Token::RBrace if depth == 0 => break,
                Token::Newline if depth == 0 => {
                    match last_significant {
                        Some(Token::Op(_)) | Some(Token::Equals) => {}
                        _ => break,
                    }
                }
                Token::Newline => {}
                t => last_significant = Some(t),
            }
            i += 1;
        }
        i
    }

    /// Index of the `{` opening a conditional or loop body: the first
    /// brace at bracket depth zero after the condition.
    fn body_open_brace(&self, end: usize) -> Result<usize, CompileError> {
        let mut depth = 0i32;
        let mut i = self.pos;
        while i < end {
            match &self.tokens[i] {
                Token::LParen | Token::LBracket => depth += 1,
                Token::RParen | Token::RBracket => depth -= 1,
                Token::LBrace if depth == 0 => return Ok(i),
                Token::RBrace if depth == 0 => break,
                _ => {}
            }
            i += 1;
        }
        Err(self.err(ErrorKind::MissingToken("'{' after condition".to_owned())))
    }

    // -- Block parsing ------------------------------------------

    /// Parse a `{ ... }` block at the current position via the scope
    /// matcher; the missing-brace error carries the opening token's line.
    fn parse_braced_block(&mut self, end: usize, desc: &str) -> Result<Block, CompileError> {
        if self.peek(end) != Some(&Token::LBrace) {
            return Err(self.err(ErrorKind::MissingToken(desc.to_owned())));
        }
        let (open, close) =
            scope::find_scope(&self.tokens[..end], &Token::LBrace, &Token::RBrace, self.pos)
                .ok_or_else(|| self.err(ErrorKind::MissingBrace))?;
        self.pos = open + 1;
        let block = self.parse_statements(close)?;
        self.pos = close + 1;
        Ok(block)
    }

    // -- Declarations -------------------------------------------

    fn parse_model(&mut self, end: usize) -> Result<Stmt, CompileError> {
        self.pos += 1; // 'model'
        let name = self.take_ident(end, "model name")?;
        self.skip_newlines(end);
        if self.peek(end) != Some(&Token::LBrace) {
            return Err(self.err(ErrorKind::MissingToken("'{' after model name".to_owned())));
        }
        let (open, close) =
            scope::find_scope(&self.tokens[..end], &Token::LBrace, &Token::RBrace, self.pos)
                .ok_or_else(|| self.err(ErrorKind::MissingBrace))?;
        self.pos = open + 1;
        let mut members = Vec::new();
        loop {
            self.skip_newlines(close);
            if self.pos >= close {
                break;
            }
            members.push(self.parse_member(close)?);
        }
        self.pos = close + 1;
        Ok(Stmt::Model { name, members })
    }

    fn parse_member(&mut self, end: usize) -> Result<Member, CompileError> {
        let mut modifiers = Modifiers::default();
        loop {
            match self.peek(end) {
                Some(Token::Keyword(Keyword::Private)) => {
                    modifiers.is_private = true;
                    self.pos += 1;
                }
                Some(Token::Keyword(Keyword::Static)) => {
                    modifiers.is_static = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }

        if self.peek(end) == Some(&Token::Keyword(Keyword::Function)) {
            self.pos += 1;
            let name = self.take_ident(end, "function name")?;
            if self.peek(end) != Some(&Token::LParen) {
                return Err(self.err(ErrorKind::MissingToken(
                    "'(' after function name".to_owned(),
                )));
            }
            let (open, close) =
                scope::find_scope(&self.tokens[..end], &Token::LParen, &Token::RParen, self.pos)
                    .ok_or_else(|| self.err(ErrorKind::MissingParen))?;
            let params = parse_params(&self.tokens[open + 1..close], &mut self.ctx)?;
            self.pos = close + 1;
            let mut return_type = None;
            if self.peek(end) == Some(&Token::Colon) {
                self.pos += 1;
                return_type = Some(self.take_ident(end, "return type")?);
            }
            self.skip_newlines(end);
            let body = self.parse_braced_block(end, "'{' before function body")?;
            return Ok(Member::Function {
                modifiers,
                name,
                params,
                return_type,
                body,
            });
        }

        let name = self.take_ident(end, "member name")?;
        self.expect(end, &Token::Colon, "':' after property name")?;
        let type_name = self.take_ident(end, "property type")?;
        let mut default = None;
        if self.peek(end) == Some(&Token::Equals) {
            self.pos += 1;
            let stop = self.value_extent(end);
            default = Some(parse_expression(&self.tokens[self.pos..stop], &mut self.ctx)?);
            self.pos = stop;
        }
        Ok(Member::Property {
            modifiers,
            name,
            type_name,
            default,
        })
    }

    fn parse_let(&mut self, end: usize) -> Result<Stmt, CompileError> {
        self.pos += 1; // 'let'
        let name = self.take_ident(end, "variable name")?;
        let mut type_name = None;
        if self.peek(end) == Some(&Token::Colon) {
            self.pos += 1;
            type_name = Some(self.take_ident(end, "variable type")?);
        }
        self.expect(end, &Token::Equals, "'=' in variable declaration")?;
        let stop = self.value_extent(end);
        let value = parse_expression(&self.tokens[self.pos..stop], &mut self.ctx)?;
        self.pos = stop;
        Ok(Stmt::Variable {
            name,
            type_name,
            value,
        })
    }

    fn parse_make(&mut self, end: usize) -> Result<Stmt, CompileError> {
        self.pos += 1; // 'make'
        let target = self.take_ident(end, "mutation target")?;
        self.expect(end, &Token::Equals, "'=' in mutation")?;
        let stop = self.value_extent(end);
        let value = parse_expression(&self.tokens[self.pos..stop], &mut self.ctx)?;
        self.pos = stop;
        Ok(Stmt::Mutation { target, value })
    }

    // -- Control flow -------------------------------------------

    fn parse_if(&mut self, end: usize) -> Result<Stmt, CompileError> {
        self.pos += 1; // 'if'
        let brace = self.body_open_brace(end)?;
        let condition = parse_expression(&self.tokens[self.pos..brace], &mut self.ctx)?;
        self.pos = brace;
        let body = self.parse_braced_block(end, "'{' after condition")?;

        self.skip_newlines(end);
        let else_body = if self.peek(end) == Some(&Token::Keyword(Keyword::Else)) {
            self.pos += 1;
            self.skip_newlines(end);
            if self.peek(end) == Some(&Token::Keyword(Keyword::If)) {
                // `else if` chains nest as a single-statement else block
                let nested = self.parse_if(end)?;
                Some(Block {
                    statements: vec![nested],
                })
            } else {
                Some(self.parse_braced_block(end, "'{' after else")?)
            }
        } else {
            None
        };

        Ok(Stmt::Conditional {
            condition,
            body,
            else_body,
        })
    }

    fn parse_while(&mut self, end: usize) -> Result<Stmt, CompileError> {
        self.pos += 1; // 'while'
        let brace = self.body_open_brace(end)?;
        let condition = parse_expression(&self.tokens[self.pos..brace], &mut self.ctx)?;
        self.pos = brace;
        let body = self.parse_braced_block(end, "'{' after condition")?;
        Ok(Stmt::Loop { condition, body })
    }
}

/// Parse a function parameter list interior: `name: type` segments
/// separated by top-level commas.
fn parse_params(tokens: &[Token], ctx: &mut ParseContext) -> Result<Vec<Param>, CompileError> {
    if tokens.iter().all(|t| *t == Token::Newline) {
        for _ in tokens {
            ctx.bump();
        }
        return Ok(Vec::new());
    }
    let mut params = Vec::new();
    for segment in scope::split_top_level(tokens, &Token::Comma) {
        let segment = expressions::skip_newlines(segment, ctx);
        let name = match segment.first() {
            Some(Token::Ident(w)) => w.clone(),
            _ => return Err(ctx.error(ErrorKind::MissingIdentifier("parameter name".to_owned()))),
        };
        if segment.get(1) != Some(&Token::Colon) {
            return Err(ctx.error(ErrorKind::MissingToken(
                "':' after parameter name".to_owned(),
            )));
        }
        let type_name = match segment.get(2) {
            Some(Token::Ident(w)) => w.clone(),
            _ => return Err(ctx.error(ErrorKind::MissingIdentifier("parameter type".to_owned()))),
        };
        let rest = expressions::skip_newlines(&segment[3..], ctx);
        if let Some(extra) = rest.first() {
            return Err(ctx.error(ErrorKind::UnexpectedToken(extra.describe())));
        }
        params.push(Param { name, type_name });
    }
    Ok(params)
}
