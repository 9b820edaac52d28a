//! The scanner: a cursor over the input text that produces a flat token
//! stream consumed by the parser. Pure function of input + offset — it
//! never looks at declared types; that happens one layer up.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Colon,
    Comma,
    Identifier(String),
    QuotedString(String),
    /// A decimal literal, with its raw source text preserved so the parser
    /// can reinterpret it at the declared width/type without going through
    /// a lossy intermediate (e.g. re-parsing `"300"` directly as `i8` to
    /// get a precise RANGE error instead of round-tripping through `i64`).
    Number { raw: String, is_float: bool },
    HexNumber(u64),
    OctNumber(u64),
    BinNumber(u64),
    True,
    False,
    Null,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let at_eof = matches!(tok.kind, TokenKind::Eof);
            tokens.push(tok);
            if at_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.pos < self.input.len() && (self.input[self.pos] as char).is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos + 1 < self.input.len() && self.input[self.pos] == b'/' && self.input[self.pos + 1] == b'/' {
                while self.pos < self.input.len() && self.input[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();
        let offset = self.pos;
        let Some(b) = self.peek_byte() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = match b {
            b'{' => {
                self.pos += 1;
                TokenKind::LBrace
            }
            b'}' => {
                self.pos += 1;
                TokenKind::RBrace
            }
            b'[' => {
                self.pos += 1;
                TokenKind::LBracket
            }
            b']' => {
                self.pos += 1;
                TokenKind::RBracket
            }
            b'<' => {
                self.pos += 1;
                TokenKind::LAngle
            }
            b'>' => {
                self.pos += 1;
                TokenKind::RAngle
            }
            b':' => {
                self.pos += 1;
                TokenKind::Colon
            }
            b',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            b'"' => self.read_quoted_string(offset)?,
            b'0'..=b'9' => self.read_number(offset)?,
            b'-' | b'+' if self.next_byte_is_digit(1) => self.read_number(offset)?,
            c if is_ident_start(c) => self.read_identifier(offset),
            other => {
                return Err(Error::parse(
                    offset,
                    format!("unexpected character '{}'", other as char),
                ))
            }
        };

        Ok(Token { kind, offset })
    }

    fn next_byte_is_digit(&self, ahead: usize) -> bool {
        self.input
            .get(self.pos + ahead)
            .map(|b| b.is_ascii_digit())
            .unwrap_or(false)
    }

    fn read_identifier(&mut self, offset: usize) -> TokenKind {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            if is_ident_continue(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .expect("identifier bytes are ASCII")
            .to_string();
        let _ = offset;
        match text.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier(text),
        }
    }

    fn read_quoted_string(&mut self, offset: usize) -> Result<TokenKind> {
        self.pos += 1; // opening quote
        let mut out = String::new();
        loop {
            match self.peek_byte() {
                None => return Err(Error::parse(offset, "unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let esc = self
                        .peek_byte()
                        .ok_or_else(|| Error::parse(self.pos, "unterminated escape sequence"))?;
                    match esc {
                        b'"' => {
                            out.push('"');
                            self.pos += 1;
                        }
                        b'\\' => {
                            out.push('\\');
                            self.pos += 1;
                        }
                        b'/' => {
                            out.push('/');
                            self.pos += 1;
                        }
                        b'n' => {
                            out.push('\n');
                            self.pos += 1;
                        }
                        b'r' => {
                            out.push('\r');
                            self.pos += 1;
                        }
                        b't' => {
                            out.push('\t');
                            self.pos += 1;
                        }
                        b'b' => {
                            out.push('\u{8}');
                            self.pos += 1;
                        }
                        b'f' => {
                            out.push('\u{c}');
                            self.pos += 1;
                        }
                        b'u' => {
                            self.pos += 1;
                            let start = self.pos;
                            if start + 4 > self.input.len() {
                                return Err(Error::parse(start, "incomplete \\u escape"));
                            }
                            let hex = std::str::from_utf8(&self.input[start..start + 4])
                                .map_err(|_| Error::parse(start, "invalid \\u escape"))?;
                            let code = u32::from_str_radix(hex, 16)
                                .map_err(|_| Error::parse(start, "invalid \\u escape"))?;
                            let ch = char::from_u32(code)
                                .ok_or_else(|| Error::parse(start, "invalid unicode code point"))?;
                            out.push(ch);
                            self.pos = start + 4;
                        }
                        other => {
                            return Err(Error::parse(
                                self.pos,
                                format!("unknown escape '\\{}'", other as char),
                            ))
                        }
                    }
                }
                Some(_) => {
                    let start = self.pos;
                    while let Some(b) = self.peek_byte() {
                        if b == b'"' || b == b'\\' {
                            break;
                        }
                        self.pos += 1;
                    }
                    let chunk = std::str::from_utf8(&self.input[start..self.pos])
                        .map_err(|_| Error::parse(start, "invalid utf-8 in string literal"))?;
                    out.push_str(chunk);
                }
            }
        }
        Ok(TokenKind::QuotedString(out))
    }

    fn read_number(&mut self, offset: usize) -> Result<TokenKind> {
        let start = self.pos;
        if self.peek_byte() == Some(b'+') || self.peek_byte() == Some(b'-') {
            self.pos += 1;
        }

        if self.peek_byte() == Some(b'0') {
            match self.input.get(self.pos + 1) {
                Some(b'x') | Some(b'X') => {
                    self.pos += 2;
                    let digit_start = self.pos;
                    while self.peek_byte().map(|b| b.is_ascii_hexdigit()).unwrap_or(false) {
                        self.pos += 1;
                    }
                    if self.pos == digit_start {
                        return Err(Error::parse(offset, "empty hex literal"));
                    }
                    let text = std::str::from_utf8(&self.input[digit_start..self.pos]).unwrap();
                    let value = u64::from_str_radix(text, 16)
                        .map_err(|_| Error::range(offset, "hex literal does not fit in u64"))?;
                    return Ok(TokenKind::HexNumber(value));
                }
                Some(b'o') | Some(b'O') => {
                    self.pos += 2;
                    let digit_start = self.pos;
                    while matches!(self.peek_byte(), Some(b'0'..=b'7')) {
                        self.pos += 1;
                    }
                    if self.pos == digit_start {
                        return Err(Error::parse(offset, "empty octal literal"));
                    }
                    let text = std::str::from_utf8(&self.input[digit_start..self.pos]).unwrap();
                    let value = u64::from_str_radix(text, 8)
                        .map_err(|_| Error::range(offset, "octal literal does not fit in u64"))?;
                    return Ok(TokenKind::OctNumber(value));
                }
                Some(b'b') | Some(b'B') => {
                    self.pos += 2;
                    let digit_start = self.pos;
                    while matches!(self.peek_byte(), Some(b'0') | Some(b'1')) {
                        self.pos += 1;
                    }
                    if self.pos == digit_start {
                        return Err(Error::parse(offset, "empty binary literal"));
                    }
                    let text = std::str::from_utf8(&self.input[digit_start..self.pos]).unwrap();
                    let value = u64::from_str_radix(text, 2)
                        .map_err(|_| Error::range(offset, "binary literal does not fit in u64"))?;
                    return Ok(TokenKind::BinNumber(value));
                }
                _ => {}
            }
        }

        while self.peek_byte().map(|b| b.is_ascii_digit()).unwrap_or(false) {
            self.pos += 1;
        }

        let mut is_float = false;
        if self.peek_byte() == Some(b'.') && self.next_byte_is_digit(1) {
            is_float = true;
            self.pos += 1;
            while self.peek_byte().map(|b| b.is_ascii_digit()).unwrap_or(false) {
                self.pos += 1;
            }
        }

        if matches!(self.peek_byte(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if self.peek_byte().map(|b| b.is_ascii_digit()).unwrap_or(false) {
                is_float = true;
                while self.peek_byte().map(|b| b.is_ascii_digit()).unwrap_or(false) {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
            }
        }

        let raw = std::str::from_utf8(&self.input[start..self.pos])
            .expect("number bytes are ASCII")
            .to_string();
        Ok(TokenKind::Number { raw, is_float })
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
