//! Tree-walking evaluator.
//!
//! Every node evaluates to a [`Value`]. Runtime failures are `Value::Error`
//! values that short-circuit at each recursive call site, and `return`
//! travels as a `Value::Return` wrapper until the nearest function call or
//! the program boundary unwraps it. Nothing in here panics on user input.

use std::rc::Rc;

use rill_ast::ast::{Block, Expression, Ident, InfixOp, PrefixOp, Program, Statement};

use crate::builtins;
use crate::object::{Environment, Value};

/// Evaluate a whole program against `env`.
///
/// The same environment may be passed to successive calls; bindings
/// introduced by earlier programs stay visible, which is the REPL pattern.
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::Return(value) => return *value,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Rc<Environment>) -> Value {
    match stmt {
        Statement::Expr(expr) => eval_expression(expr, env),
        Statement::Return(expr) => {
            let value = eval_expression(expr, env);
            if value.is_error() {
                value
            } else {
                Value::Return(Box::new(value))
            }
        }
        Statement::Var { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.set(&name.text, value);
            Value::Null
        }
    }
}

/// Fold a block's statements. `Return` and `Error` stop the fold WITHOUT
/// unwrapping, so the wrapper keeps propagating through enclosing blocks.
fn eval_block(block: &Block, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_expression(expr: &Expression, env: &Rc<Environment>) -> Value {
    match expr {
        Expression::Int(v) => Value::Integer(*v),
        Expression::Str(s) => Value::Str(s.clone()),
        Expression::Bool(b) => Value::Boolean(*b),
        Expression::Ident(ident) => eval_identifier(ident, env),
        Expression::Prefix { op, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix(*op, right)
        }
        Expression::Infix { left, op, right } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix(*op, left, right)
        }
        Expression::If {
            cond,
            consequence,
            alternative,
        } => eval_if(cond, consequence, alternative.as_ref(), env),
        Expression::Function { params, body } => Value::Function {
            params: params.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        },
        Expression::Call { callee, args } => {
            let callee = eval_expression(callee, env);
            if callee.is_error() {
                return callee;
            }
            let args = match eval_expressions(args, env) {
                Ok(args) => args,
                Err(error) => return error,
            };
            apply_function(callee, args)
        }
        Expression::Array(elements) => match eval_expressions(elements, env) {
            Ok(elements) => Value::Array(elements),
            Err(error) => error,
        },
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index(left, index)
        }
    }
}

/// Environment chain first, builtin table second. A `var` binding with a
/// builtin's name therefore shadows the builtin.
fn eval_identifier(ident: &Ident, env: &Rc<Environment>) -> Value {
    if let Some(value) = env.get(&ident.text) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(&ident.text) {
        return builtin;
    }
    Value::Error(format!("identifier not found: {}", ident.text))
}

/// Evaluate left to right; the first error aborts and becomes the result.
fn eval_expressions(
    exprs: &[Expression],
    env: &Rc<Environment>,
) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply_function(callee: Value, args: Vec<Value>) -> Value {
    match callee {
        Value::Function { params, body, env } => {
            if args.len() != params.len() {
                return Value::Error(format!(
                    "wrong number of arguments, got={}, want={}",
                    args.len(),
                    params.len()
                ));
            }
            // The inner scope encloses the CAPTURED environment, not the
            // caller's; that is what makes these functions closures.
            let inner = Environment::new_enclosed(env);
            for (param, arg) in params.iter().zip(args) {
                inner.set(&param.text, arg);
            }
            unwrap_return(eval_block(&body, &inner))
        }
        Value::Builtin(f) => f(&args),
        other => Value::Error(format!("not a function: {}", other.type_name())),
    }
}

/// Strip exactly one `Return` wrapper at a function boundary.
fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(inner) => *inner,
        other => other,
    }
}

fn eval_prefix(op: PrefixOp, right: Value) -> Value {
    match op {
        PrefixOp::Not => eval_bang(right),
        PrefixOp::Neg => eval_minus(right),
    }
}

/// Strict truthiness: only `true` itself is truthy, so `!5` is `true`.
fn eval_bang(right: Value) -> Value {
    match right {
        Value::Boolean(true) => Value::Boolean(false),
        _ => Value::Boolean(true),
    }
}

fn eval_minus(right: Value) -> Value {
    match right {
        Value::Integer(v) => Value::Integer(-v),
        other => Value::Error(format!(
            "invalid usage of `-` operator: -{}",
            other.type_name()
        )),
    }
}

fn eval_infix(op: InfixOp, left: Value, right: Value) -> Value {
    if left.type_name() != right.type_name() {
        return Value::Error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        ));
    }
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Value::Boolean(l), Value::Boolean(r)) => eval_boolean_infix(op, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(op, l, r),
        _ => Value::Error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        )),
    }
}

fn eval_integer_infix(op: InfixOp, l: i64, r: i64) -> Value {
    match op {
        InfixOp::Add => Value::Integer(l + r),
        InfixOp::Sub => Value::Integer(l - r),
        InfixOp::Mul => Value::Integer(l * r),
        InfixOp::Div => {
            if r == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(l / r)
            }
        }
        InfixOp::Lt => Value::Boolean(l < r),
        InfixOp::Le => Value::Boolean(l <= r),
        InfixOp::Gt => Value::Boolean(l > r),
        InfixOp::Ge => Value::Boolean(l >= r),
        InfixOp::Eq => Value::Boolean(l == r),
        InfixOp::Ne => Value::Boolean(l != r),
    }
}

fn eval_boolean_infix(op: InfixOp, l: bool, r: bool) -> Value {
    match op {
        InfixOp::Eq => Value::Boolean(l == r),
        InfixOp::Ne => Value::Boolean(l != r),
        _ => Value::Error(format!("unknown operator: Boolean {op} Boolean")),
    }
}

fn eval_string_infix(op: InfixOp, l: &str, r: &str) -> Value {
    match op {
        InfixOp::Add => Value::Str(format!("{l}{r}")),
        InfixOp::Eq => Value::Boolean(l == r),
        InfixOp::Ne => Value::Boolean(l != r),
        _ => Value::Error(format!("unknown operator: String {op} String")),
    }
}

/// The consequence runs iff the condition is exactly `true`; any other
/// value, `1` included, selects the alternative or yields `Null`.
fn eval_if(
    cond: &Expression,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Rc<Environment>,
) -> Value {
    let cond = eval_expression(cond, env);
    if cond.is_error() {
        return cond;
    }
    if matches!(cond, Value::Boolean(true)) {
        eval_block(consequence, env)
    } else if let Some(alt) = alternative {
        eval_block(alt, env)
    } else {
        Value::Null
    }
}

fn eval_index(left: Value, index: Value) -> Value {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if i < 0 || i as usize >= elements.len() {
                Value::Null
            } else {
                elements[i as usize].clone()
            }
        }
        (left, _) => Value::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}
