//! Operator precedence pinned through the canonical pretty-printed form:
//! every prefix/infix node prints fully parenthesised, so the string output
//! is an exact witness of the tree shape.

fn printed(src: &str) -> String {
    let (program, errors) = rill_parse::parse(src);
    assert!(errors.is_empty(), "parse errors for {src:?}: {errors:?}");
    program.to_string()
}

#[test]
fn operator_precedence_table() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("5 >= 4 == 3 <= 4", "((5 >= 4) == (3 <= 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("false", "false"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("(5 + 5) * 2 * (5 + 5)", "(((5 + 5) * 2) * (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        (
            "add(a + b + c * d / f + g)",
            "add((((a + b) + ((c * d) / f)) + g))",
        ),
    ];
    for (src, want) in cases {
        assert_eq!(printed(src), want, "input: {src:?}");
    }
}

#[test]
fn index_binds_tighter_than_call_and_product() {
    let cases = [
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];
    for (src, want) in cases {
        assert_eq!(printed(src), want, "input: {src:?}");
    }
}

#[test]
fn equality_is_left_associative() {
    assert_eq!(printed("1 == 1 == 1"), "((1 == 1) == 1)");
}

#[test]
fn canonical_form_reparses_to_itself() {
    let sources = [
        "a + b * c + d / e - f",
        "-(5 + 5)",
        "add(a, b, 1, 2 * 3)",
        "a * [1, 2][0] * d",
    ];
    for src in sources {
        let once = printed(src);
        assert_eq!(printed(&once), once, "input: {src:?}");
    }
}
