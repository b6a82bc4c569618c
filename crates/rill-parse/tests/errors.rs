//! Parse errors accumulate; parsing always reaches end of input.

use rill_ast::ast::Statement;

fn errors_of(src: &str) -> Vec<String> {
    let (_, errors) = rill_parse::parse(src);
    errors
}

#[test]
fn var_without_a_name() {
    // the failed rule leaves the cursor on `=`, which then has no prefix
    // rule of its own; both messages are recorded
    assert_eq!(
        errors_of("var = 5;"),
        vec![
            "Expected next token to be \"IDENTIFIER\", got \"=\" instead".to_string(),
            "no prefix parse function for = found".to_string(),
        ]
    );
}

#[test]
fn var_without_the_assignment() {
    assert_eq!(
        errors_of("var x 5;"),
        vec!["Expected next token to be \"=\", got \"INT\" instead".to_string()]
    );
}

#[test]
fn stray_token_has_no_prefix_rule() {
    assert_eq!(
        errors_of("}"),
        vec!["no prefix parse function for } found".to_string()]
    );
}

#[test]
fn illegal_byte_surfaces_as_a_parse_error() {
    assert_eq!(
        errors_of("@"),
        vec!["no prefix parse function for ILLEGAL found".to_string()]
    );
}

#[test]
fn unclosed_group() {
    assert_eq!(
        errors_of("(1 + 2"),
        vec!["Expected next token to be \")\", got \"EOF\" instead".to_string()]
    );
}

#[test]
fn errors_accumulate_across_statements() {
    assert_eq!(
        errors_of("var = 1; var y 2;"),
        vec![
            "Expected next token to be \"IDENTIFIER\", got \"=\" instead".to_string(),
            "no prefix parse function for = found".to_string(),
            "Expected next token to be \"=\", got \"INT\" instead".to_string(),
        ]
    );
}

#[test]
fn parsing_continues_past_a_bad_statement() {
    let (program, errors) = rill_parse::parse("var = 1; var z = 3;");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
    // the good statement after the bad one still lands in the tree
    assert!(program
        .statements
        .iter()
        .any(|s| matches!(s, Statement::Var { name, .. } if name.text == "z")));
}

#[test]
fn missing_if_condition_parens() {
    let errors = errors_of("if x < y { x }");
    assert_eq!(
        errors[0],
        "Expected next token to be \"(\", got \"IDENTIFIER\" instead"
    );
}

#[test]
fn unclosed_index() {
    assert_eq!(
        errors_of("a[1"),
        vec!["Expected next token to be \"]\", got \"EOF\" instead".to_string()]
    );
}
