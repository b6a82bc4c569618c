use rill_ast::ast::{Expression, Statement};

fn val(src: &str) -> Expression {
    let (program, errors) = rill_parse::parse(src);
    assert!(errors.is_empty(), "parse errors for {src:?}: {errors:?}");
    assert_eq!(program.statements.len(), 1);
    let Statement::Expr(e) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    e.clone()
}

#[test]
fn identifier_expression() {
    assert!(matches!(val("foobar;"), Expression::Ident(id) if id.text == "foobar"));
}

#[test]
fn integer_literal() {
    assert!(matches!(val("5;"), Expression::Int(5)));
}

#[test]
fn boolean_literals() {
    assert!(matches!(val("true;"), Expression::Bool(true)));
    assert!(matches!(val("false;"), Expression::Bool(false)));
}

#[test]
fn string_literals_with_both_delimiters() {
    assert!(matches!(val("\"hello world\";"), Expression::Str(s) if s == "hello world"));
    assert!(matches!(val("`hello world`;"), Expression::Str(s) if s == "hello world"));
}

#[test]
fn string_literal_carries_unescaped_contents() {
    assert!(matches!(val(r#""a\tb\n";"#), Expression::Str(s) if s == "a\tb\n"));
}

#[test]
fn integer_literal_out_of_range_is_a_parse_error() {
    let (_, errors) = rill_parse::parse("9223372036854775808;");
    assert_eq!(
        errors,
        vec!["Could not parse \"9223372036854775808\" as integer".to_string()]
    );
}

#[test]
fn prefix_expressions() {
    let cases = [("!5;", "(!5)"), ("-15;", "(-15)"), ("!true;", "(!true)")];
    for (src, want) in cases {
        assert_eq!(val(src).to_string(), want, "input: {src:?}");
    }
}

#[test]
fn infix_expressions() {
    let cases = [
        ("5 + 5;", "(5 + 5)"),
        ("5 - 5;", "(5 - 5)"),
        ("5 * 5;", "(5 * 5)"),
        ("5 / 5;", "(5 / 5)"),
        ("5 > 5;", "(5 > 5)"),
        ("5 >= 5;", "(5 >= 5)"),
        ("5 < 5;", "(5 < 5)"),
        ("5 <= 5;", "(5 <= 5)"),
        ("5 == 5;", "(5 == 5)"),
        ("5 != 5;", "(5 != 5)"),
    ];
    for (src, want) in cases {
        assert_eq!(val(src).to_string(), want, "input: {src:?}");
    }
}
