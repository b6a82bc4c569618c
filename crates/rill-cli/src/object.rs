//! Runtime values and the environment chain.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use rill_ast::ast::{Block, Ident};

/// Signature of an intrinsic function.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// Runtime values.
///
/// `Error` and `Return` are propagation values: they short-circuit every
/// evaluator rule and are surfaced or unwrapped at program and function
/// boundaries, so neither is ever the observable result of a whole program.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Array(Vec<Value>),
    Null,
    Error(String),
    Return(Box<Value>),
    /// Function value closing over the environment in effect where the
    /// literal was evaluated.
    Function {
        params: Vec<Ident>,
        body: Block,
        env: Rc<Environment>,
    },
    Builtin(BuiltinFn),
}

impl Value {
    /// Stable type tag used in diagnostic messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Boolean(_) => "Boolean",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Null => "Null",
            Value::Error(_) => "Error",
            Value::Return(_) => "ReturnValue",
            Value::Function { .. } => "Function",
            Value::Builtin(_) => "Builtin",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The user-facing rendering of the value.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "]")
            }
            Value::Null => write!(f, "null"),
            Value::Error(message) => write!(f, "Error: {message}"),
            Value::Return(value) => write!(f, "{value}"),
            Value::Function { params, body, .. } => {
                write!(f, "fun (")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") {{\n{body}\n}}")
            }
            Value::Builtin(_) => write!(f, "builtin function"),
        }
    }
}

/// Name-to-value bindings with an optional link to an enclosing scope.
///
/// Lookup walks the chain outward; writes are always local, so `var` in an
/// inner scope shadows rather than mutates. Environments are shared by
/// reference: a closure and the scope it was created in see the same
/// bindings, which is what makes the persistent REPL environment and
/// recursive functions work.
#[derive(Debug, Default)]
pub struct Environment {
    store: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment::default())
    }

    /// A fresh scope whose lookups fall back to `outer`. The outer link is
    /// fixed for the lifetime of the scope, which keeps the chain acyclic.
    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.borrow().get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Bind `name` locally, overwriting any local binding of the same name.
    pub fn set(&self, name: &str, value: Value) {
        self.store.borrow_mut().insert(name.to_string(), value);
    }
}
