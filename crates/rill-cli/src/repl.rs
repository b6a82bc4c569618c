//! Interactive prompt loop.

use std::io::{self, BufRead, Write};

use rill_parse::{Lexer, Parser};

use crate::eval::eval_program;
use crate::object::Environment;

const PROMPT: &str = ">> ";

/// Read lines from `input` until it closes, evaluating each against one
/// persistent environment so bindings survive from line to line.
pub fn start<R: BufRead, W: Write>(input: R, output: &mut W) -> io::Result<()> {
    let env = Environment::new();

    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            writeln!(output, "parser errors:")?;
            for message in parser.errors() {
                writeln!(output, "\t{message}")?;
            }
            continue;
        }

        let value = eval_program(&program, &env);
        writeln!(output, "- : {} = {}", value.type_name(), value)?;
    }
}
