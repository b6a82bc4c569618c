use crate::token::{lookup_keyword, Token, TokenKind};

/// Turns source bytes into tokens on demand.
///
/// Two cursors walk the input: `position` is the index of the byte under
/// examination, `read_position` the next byte to read. The current byte is
/// `0` once the input is exhausted. The lexer itself never fails; bytes it
/// does not understand become `Illegal` tokens for the parser to reject.
pub struct Lexer<'a> {
    input: &'a [u8],
    position: usize,
    read_position: usize,
    ch: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input: input.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        if self.read_position >= self.input.len() {
            self.ch = 0;
        } else {
            self.ch = self.input[self.read_position];
        }
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    /// Skip whitespace, then produce exactly one token and leave the cursor
    /// on the byte after it. Returns `Eof` on exhaustion.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::EqEq, "==")
                } else {
                    Token::new(TokenKind::Eq, "=")
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::BangEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            b'<' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Le, "<=")
                } else {
                    Token::new(TokenKind::Lt, "<")
                }
            }
            b'>' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Ge, ">=")
                } else {
                    Token::new(TokenKind::Gt, ">")
                }
            }
            b'+' => Token::new(TokenKind::Plus, "+"),
            b'-' => Token::new(TokenKind::Minus, "-"),
            b'*' => Token::new(TokenKind::Star, "*"),
            b'/' => Token::new(TokenKind::Slash, "/"),
            b',' => Token::new(TokenKind::Comma, ","),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b'(' => Token::new(TokenKind::LParen, "("),
            b')' => Token::new(TokenKind::RParen, ")"),
            b'{' => Token::new(TokenKind::LBrace, "{"),
            b'}' => Token::new(TokenKind::RBrace, "}"),
            b'[' => Token::new(TokenKind::LBracket, "["),
            b']' => Token::new(TokenKind::RBracket, "]"),
            b'"' | b'`' => {
                let delim = self.ch;
                Token::new(TokenKind::Str, self.read_string(delim))
            }
            0 => Token::new(TokenKind::Eof, ""),
            b => {
                if is_letter(b) {
                    let literal = self.read_identifier();
                    // early return: the cursor already sits past the literal
                    return Token::new(lookup_keyword(&literal), literal);
                }
                if b.is_ascii_digit() {
                    return Token::new(TokenKind::Int, self.read_number());
                }
                Token::new(TokenKind::Illegal, (b as char).to_string())
            }
        };

        self.read_char();
        tok
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Consume letters only; digits do not continue an identifier, so
    /// `x1` lexes as the identifier `x` followed by the integer `1`.
    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    /// Scan a string body up to the matching delimiter or end of input.
    /// Recognised escapes are unescaped in place; a backslash directly
    /// before a newline is a line continuation and both bytes are dropped;
    /// any other escape keeps the escaped byte.
    fn read_string(&mut self, delim: u8) -> String {
        let mut out = String::new();
        loop {
            self.read_char();
            if self.ch == delim || self.ch == 0 {
                break;
            }
            if self.ch == b'\\' {
                if self.peek_char() == b'\n' {
                    self.read_char();
                    continue;
                }
                self.read_char();
                let unescaped = match self.ch {
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'"' => b'"',
                    b'\\' => b'\\',
                    other => other,
                };
                out.push(unescaped as char);
                continue;
            }
            out.push(self.ch as char);
        }
        out
    }
}

fn is_letter(b: u8) -> bool {
    (b as char).is_alphabetic()
}
