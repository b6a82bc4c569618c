pub mod ast {
    use serde::Serialize;
    use std::fmt;

    /// A parsed program: statements in source order.
    #[derive(Debug, Clone, Serialize)]
    pub struct Program {
        pub statements: Vec<Statement>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Ident {
        pub text: String,
    }

    #[derive(Debug, Clone, Serialize)]
    pub enum Statement {
        /// Binding introduction: `var x = e;`
        Var { name: Ident, value: Expression },
        /// Non-local return: `return e;`
        Return(Expression),
        /// Expression statement: `e;`
        Expr(Expression),
    }

    /// Brace-delimited statement list, the body of `if` arms and functions.
    #[derive(Debug, Clone, Serialize)]
    pub struct Block {
        pub statements: Vec<Statement>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub enum Expression {
        Ident(Ident),
        Int(i64),
        /// String literal; carries the unescaped contents, no delimiters.
        Str(String),
        Bool(bool),
        Prefix {
            op: PrefixOp,
            right: Box<Expression>,
        },
        Infix {
            left: Box<Expression>,
            op: InfixOp,
            right: Box<Expression>,
        },
        If {
            cond: Box<Expression>,
            consequence: Block,
            alternative: Option<Block>,
        },
        /// Function literal: `fun(a, b) { ... }`
        Function {
            params: Vec<Ident>,
            body: Block,
        },
        Call {
            callee: Box<Expression>,
            args: Vec<Expression>,
        },
        Array(Vec<Expression>),
        Index {
            left: Box<Expression>,
            index: Box<Expression>,
        },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum PrefixOp {
        Not,
        Neg,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum InfixOp {
        Add,
        Sub,
        Mul,
        Div,
        Lt,
        Le,
        Gt,
        Ge,
        Eq,
        Ne,
    }

    impl fmt::Display for PrefixOp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                PrefixOp::Not => write!(f, "!"),
                PrefixOp::Neg => write!(f, "-"),
            }
        }
    }

    impl fmt::Display for InfixOp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let op = match self {
                InfixOp::Add => "+",
                InfixOp::Sub => "-",
                InfixOp::Mul => "*",
                InfixOp::Div => "/",
                InfixOp::Lt => "<",
                InfixOp::Le => "<=",
                InfixOp::Gt => ">",
                InfixOp::Ge => ">=",
                InfixOp::Eq => "==",
                InfixOp::Ne => "!=",
            };
            write!(f, "{op}")
        }
    }

    impl fmt::Display for Ident {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.text)
        }
    }

    // The Display impls below form the canonical pretty-printed shape the
    // parser tests assert against: every prefix and infix expression is
    // fully parenthesised, statements print back-to-back.

    impl fmt::Display for Program {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for stmt in &self.statements {
                write!(f, "{stmt}")?;
            }
            Ok(())
        }
    }

    impl fmt::Display for Block {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for stmt in &self.statements {
                write!(f, "{stmt}")?;
            }
            Ok(())
        }
    }

    impl fmt::Display for Statement {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Statement::Var { name, value } => write!(f, "var {name} = {value};"),
                Statement::Return(value) => write!(f, "return {value};"),
                Statement::Expr(value) => write!(f, "{value}"),
            }
        }
    }

    impl fmt::Display for Expression {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Expression::Ident(ident) => write!(f, "{ident}"),
                Expression::Int(v) => write!(f, "{v}"),
                Expression::Str(s) => write!(f, "{s}"),
                Expression::Bool(b) => write!(f, "{b}"),
                Expression::Prefix { op, right } => write!(f, "({op}{right})"),
                Expression::Infix { left, op, right } => write!(f, "({left} {op} {right})"),
                Expression::If {
                    cond,
                    consequence,
                    alternative,
                } => {
                    write!(f, "if {cond} {consequence}")?;
                    if let Some(alt) = alternative {
                        write!(f, " else {alt}")?;
                    }
                    Ok(())
                }
                Expression::Function { params, body } => {
                    write!(f, "fun(")?;
                    for (i, p) in params.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{p}")?;
                    }
                    write!(f, ") {body}")
                }
                Expression::Call { callee, args } => {
                    write!(f, "{callee}(")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{a}")?;
                    }
                    write!(f, ")")
                }
                Expression::Array(elements) => {
                    write!(f, "[")?;
                    for (i, e) in elements.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{e}")?;
                    }
                    write!(f, "]")
                }
                Expression::Index { left, index } => write!(f, "({left}[{index}])"),
            }
        }
    }
}
