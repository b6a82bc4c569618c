//! Intrinsic functions over strings and arrays.
//!
//! The table is consulted only after environment lookup fails, so a `var`
//! binding with the same name shadows the intrinsic.

use crate::object::Value;

/// Look up an intrinsic by name.
pub fn lookup(name: &str) -> Option<Value> {
    let f = match name {
        "len" => builtin_len,
        "head" => builtin_head,
        "tail" => builtin_tail,
        "last" => builtin_last,
        "push" => builtin_push,
        _ => return None,
    };
    Some(Value::Builtin(f))
}

fn wrong_arity(got: usize, want: usize) -> Value {
    Value::Error(format!(
        "wrong number of arguments, got={got}, want={want}"
    ))
}

fn builtin_len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Str(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => Value::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_head(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Str(s) => match s.as_bytes().first() {
            Some(&b) => Value::Str((b as char).to_string()),
            None => Value::Null,
        },
        Value::Array(elements) => match elements.first() {
            Some(first) => first.clone(),
            None => Value::Null,
        },
        other => Value::Error(format!(
            "argument to `head` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_tail(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Str(s) => {
            if s.is_empty() {
                Value::Null
            } else {
                Value::Str(String::from_utf8_lossy(&s.as_bytes()[1..]).into_owned())
            }
        }
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(elements[1..].to_vec())
            }
        }
        other => Value::Error(format!(
            "argument to `tail` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Str(s) => match s.as_bytes().last() {
            Some(&b) => Value::Str((b as char).to_string()),
            None => Value::Null,
        },
        Value::Array(elements) => match elements.last() {
            Some(last) => last.clone(),
            None => Value::Null,
        },
        other => Value::Error(format!(
            "argument to `last` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return wrong_arity(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut out = elements.clone();
            out.push(args[1].clone());
            Value::Array(out)
        }
        other => Value::Error(format!(
            "argument to `push` must be Array, got {}",
            other.type_name()
        )),
    }
}
