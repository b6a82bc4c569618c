#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::Parser;

/// Parse `src` to the end of input, returning the program together with
/// every collected parse error. The tree is only meaningful when the error
/// list is empty.
pub fn parse(src: &str) -> (rill_ast::ast::Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(src));
    let program = parser.parse_program();
    let errors = parser.errors().to_vec();
    (program, errors)
}
