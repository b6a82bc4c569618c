use std::mem;

use rill_ast::ast::{Block, Expression, Ident, InfixOp, PrefixOp, Program, Statement};

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Infix binding strength, ascending. Token kinds without an entry in
/// [`precedence_of`] sit at `Lowest` and never continue an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `<=` `>` `>=`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(..)`
    Call,
    /// `a[i]`
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::EqEq | TokenKind::BangEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn infix_op(kind: TokenKind) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Sub,
        TokenKind::Star => InfixOp::Mul,
        TokenKind::Slash => InfixOp::Div,
        TokenKind::Lt => InfixOp::Lt,
        TokenKind::Le => InfixOp::Le,
        TokenKind::Gt => InfixOp::Gt,
        TokenKind::Ge => InfixOp::Ge,
        TokenKind::EqEq => InfixOp::Eq,
        TokenKind::BangEq => InfixOp::Ne,
        _ => return None,
    };
    Some(op)
}

/// Pratt parser over two tokens of lookahead.
///
/// Parsing never aborts: a rule that cannot make progress records a message
/// and yields nothing, and the statement loop resumes at the next token.
/// Callers must consult [`Parser::errors`] before trusting the tree.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Parse errors collected so far, in source order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn bump(&mut self) {
        self.cur = mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance over an expected token, or record a diagnostic and stay put.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.bump();
            true
        } else {
            self.errors.push(format!(
                "Expected next token to be \"{}\", got \"{}\" instead",
                kind, self.peek.kind
            ));
            false
        }
    }

    // ======= statements =======

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.bump();
        }
        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::KwVar => self.parse_var_statement(),
            TokenKind::KwReturn => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `var <ident> = <expr> ;?` — the identifier and `=` are mandatory.
    fn parse_var_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Ident {
            text: self.cur.literal.clone(),
        };
        if !self.expect_peek(TokenKind::Eq) {
            return None;
        }
        self.bump();
        let value = self.parse_expression(Precedence::Lowest);
        while self.peek_is(TokenKind::Semicolon) {
            self.bump();
        }
        Some(Statement::Var {
            name,
            value: value?,
        })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.bump();
        let value = self.parse_expression(Precedence::Lowest);
        while self.peek_is(TokenKind::Semicolon) {
            self.bump();
        }
        Some(Statement::Return(value?))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek_is(TokenKind::Semicolon) {
            self.bump();
        }
        Some(Statement::Expr(value?))
    }

    // ======= expressions (Pratt loop) =======

    fn parse_expression(&mut self, min: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && min < precedence_of(self.peek.kind) {
            left = match self.peek.kind {
                TokenKind::LParen => {
                    self.bump();
                    self.parse_call_expression(left)?
                }
                TokenKind::LBracket => {
                    self.bump();
                    self.parse_index_expression(left)?
                }
                kind => match infix_op(kind) {
                    Some(op) => {
                        self.bump();
                        self.parse_infix_expression(op, left)?
                    }
                    // no infix rule for this token; the expression ends here
                    None => return Some(left),
                },
            };
        }

        Some(left)
    }

    /// Prefix dispatch on the current token kind.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Ident => Some(Expression::Ident(Ident {
                text: self.cur.literal.clone(),
            })),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Str => Some(Expression::Str(self.cur.literal.clone())),
            TokenKind::KwTrue => Some(Expression::Bool(true)),
            TokenKind::KwFalse => Some(Expression::Bool(false)),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOp::Not),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOp::Neg),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::KwIf => self.parse_if_expression(),
            TokenKind::KwFun => self.parse_function_literal(),
            kind => {
                self.errors
                    .push(format!("no prefix parse function for {kind} found"));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Int(value)),
            Err(_) => {
                self.errors.push(format!(
                    "Could not parse \"{}\" as integer",
                    self.cur.literal
                ));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self, op: PrefixOp) -> Option<Expression> {
        self.bump();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            op,
            right: Box::new(right),
        })
    }

    /// The recursive call receives the operator's own precedence, which
    /// makes every binary operator left-associative.
    fn parse_infix_expression(&mut self, op: InfixOp, left: Expression) -> Option<Expression> {
        let prec = precedence_of(self.cur.kind);
        self.bump();
        let right = self.parse_expression(prec)?;
        Some(Expression::Infix {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.bump();
        let inner = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        inner
    }

    /// `if ( <cond> ) { <block> } [ else { <block> } ]`
    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.bump();
        let cond = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block();

        let alternative = if self.peek_is(TokenKind::KwElse) {
            self.bump();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block())
        } else {
            None
        };

        Some(Expression::If {
            cond: Box::new(cond?),
            consequence,
            alternative,
        })
    }

    /// Consume statements until `}` or end of input. Entered with the
    /// current token on `{`.
    fn parse_block(&mut self) -> Block {
        let mut statements = Vec::new();
        self.bump();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.bump();
        }
        Block { statements }
    }

    /// `fun ( <params> ) { <block> }`
    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_params()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block();
        Some(Expression::Function { params, body })
    }

    fn parse_function_params(&mut self) -> Option<Vec<Ident>> {
        let mut params = Vec::new();
        self.bump();
        if self.cur_is(TokenKind::RParen) {
            return Some(params);
        }
        params.push(Ident {
            text: self.cur.literal.clone(),
        });
        while self.peek_is(TokenKind::Comma) {
            self.bump();
            self.bump();
            params.push(Ident {
                text: self.cur.literal.clone(),
            });
        }
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let args = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call {
            callee: Box::new(callee),
            args,
        })
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(elements))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.bump();
        let index = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        Some(Expression::Index {
            left: Box::new(left),
            index: Box::new(index?),
        })
    }

    /// Comma-separated, possibly empty expression list closed by `end`.
    /// Entered with the current token on the opening delimiter.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        self.bump();
        if self.cur_is(end) {
            return Some(list);
        }
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.bump();
            self.bump();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }
}
