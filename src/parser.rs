//! Recursive-descent parser. Turns a token stream from [`crate::lexer`] into
//! a [`Value`] tree or an [`Error`]. See `SPEC_FULL.md` §5 for the one
//! grammar clarification this implementation makes relative to the
//! project's own informal grammar listing (array elements carry an
//! optional `type:` prefix, never a `key:` prefix).

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::{Array, ObjectMap, Tag, Value};

/// Recursion is bounded so a pathologically nested input fails with a
/// `PARSE` error rather than blowing the call stack.
const MAX_DEPTH: usize = 1024;

/// A parsed `type` production: either a scalar tag, the array-element-only
/// `mix` marker, or a (possibly nested) `array<T>`.
#[derive(Debug, Clone, PartialEq)]
enum DeclaredType {
    Scalar(Tag),
    Mix,
    Array(Box<DeclaredType>),
}

impl DeclaredType {
    fn tag(&self) -> Tag {
        match self {
            DeclaredType::Scalar(t) => *t,
            DeclaredType::Mix => Tag::Mix,
            DeclaredType::Array(_) => Tag::Array,
        }
    }
}

pub fn parse(text: &str) -> Result<Value> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser::new(&tokens);
    if parser.is_eof() {
        return Err(Error::parse(0, "empty input"));
    }
    let value = parser.parse_value(0)?;
    parser.expect_eof()?;
    Ok(value)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn is_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn offset(&self) -> usize {
        self.current().offset
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, matches_kind: impl Fn(&TokenKind) -> bool) -> bool {
        matches_kind(&self.current().kind)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > MAX_DEPTH {
            Err(Error::parse(self.offset(), "maximum nesting depth exceeded"))
        } else {
            Ok(())
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        if self.is_eof() {
            Ok(())
        } else {
            Err(Error::parse(self.offset(), "unexpected trailing input"))
        }
    }

    fn expect(&mut self, matches_kind: impl Fn(&TokenKind) -> bool, what: &str) -> Result<Token> {
        if self.check(&matches_kind) {
            Ok(self.advance())
        } else {
            Err(Error::parse(self.offset(), format!("expected {}", what)))
        }
    }

    fn expect_colon(&mut self) -> Result<()> {
        self.expect(|k| matches!(k, TokenKind::Colon), "':'").map(|_| ())
    }

    /// Parses a `key` production: identifier, quoted string, or one of the
    /// `null`/`true`/`false` keywords used literally as a key.
    fn parse_key(&mut self) -> Result<String> {
        match self.current().kind.clone() {
            TokenKind::Identifier(s) => {
                self.advance();
                Ok(s)
            }
            TokenKind::QuotedString(s) => {
                self.advance();
                Ok(s)
            }
            TokenKind::Null => {
                self.advance();
                Ok("null".to_string())
            }
            TokenKind::True => {
                self.advance();
                Ok("true".to_string())
            }
            TokenKind::False => {
                self.advance();
                Ok("false".to_string())
            }
            _ => Err(Error::parse(self.offset(), "expected key")),
        }
    }

    /// Attempts `type ':'`; on success returns the parsed type with the
    /// colon consumed. On failure (no identifier, or no colon following a
    /// syntactically valid type), restores the cursor and returns `None`
    /// so the caller can fall back to the untyped form.
    ///
    /// `array<` is the one place this lookahead is no longer speculative:
    /// once that token pair is seen there is no bare-value reading of it
    /// (`array` is not itself a legal bareword value here), so a malformed
    /// `<...>` (empty, unknown inner type, missing `>`) is a genuine TYPE
    /// error and must propagate instead of silently reinterpreting the
    /// input as untyped.
    fn try_parse_type_then_colon(&mut self) -> Result<Option<DeclaredType>> {
        let save = self.pos;
        let name = match self.current().kind.clone() {
            TokenKind::Identifier(s) => s,
            _ => return Ok(None),
        };
        let name_offset = self.offset();
        self.advance();

        if name == "array" && self.check(|k| matches!(k, TokenKind::LAngle)) {
            let decl = self.finish_type_from_name(&name, name_offset)?;
            self.expect_colon()?;
            return Ok(Some(decl));
        }

        let decl = match self.finish_type_from_name(&name, name_offset) {
            Ok(decl) => decl,
            Err(_) => {
                self.pos = save;
                return Ok(None);
            }
        };
        if self.check(|k| matches!(k, TokenKind::Colon)) {
            self.advance();
            Ok(Some(decl))
        } else {
            self.pos = save;
            Ok(None)
        }
    }

    /// Parses a `type` production where a type is known to be mandatory
    /// (inside `<...>`), so failure is a hard `TYPE` error rather than a
    /// signal to backtrack.
    fn parse_type_expr(&mut self) -> Result<DeclaredType> {
        let offset = self.offset();
        let name = match self.current().kind.clone() {
            TokenKind::Identifier(s) => {
                self.advance();
                s
            }
            _ => return Err(Error::type_error(offset, "expected a type name")),
        };
        self.finish_type_from_name(&name, offset)
    }

    fn finish_type_from_name(&mut self, name: &str, offset: usize) -> Result<DeclaredType> {
        if name == "array" {
            if self.check(|k| matches!(k, TokenKind::LAngle)) {
                self.advance();
                if self.check(|k| matches!(k, TokenKind::RAngle)) {
                    return Err(Error::type_error(offset, "array<> is missing a type argument"));
                }
                let inner = self.parse_type_expr()?;
                self.expect(|k| matches!(k, TokenKind::RAngle), "'>'")?;
                return Ok(DeclaredType::Array(Box::new(inner)));
            }
            return Ok(DeclaredType::Array(Box::new(DeclaredType::Mix)));
        }
        if name == "mix" {
            return Ok(DeclaredType::Mix);
        }
        match Tag::from_name(name) {
            Some(tag) => Ok(DeclaredType::Scalar(tag)),
            None => Err(Error::type_error(offset, format!("unknown type tag '{}'", name))),
        }
    }

    /// `value := object | array | scalar`, with the untyped numeric/string
    /// inference rules from spec §4.4's "typed form dominance" bullet.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        match self.current().kind.clone() {
            TokenKind::LBrace => self.parse_object(depth),
            TokenKind::LBracket => self.parse_array(&DeclaredType::Mix, depth),
            TokenKind::QuotedString(s) => {
                self.advance();
                Ok(Value::Cstr(s))
            }
            TokenKind::Number { raw, is_float } => {
                self.advance();
                if is_float {
                    let f: f64 = raw
                        .parse()
                        .map_err(|_| Error::parse(self.offset(), "invalid float literal"))?;
                    Ok(Value::F64(f))
                } else {
                    let n: i64 = raw
                        .parse()
                        .map_err(|_| Error::range(self.offset(), "integer literal out of i64 range"))?;
                    Ok(Value::I64(n))
                }
            }
            TokenKind::HexNumber(n) => {
                self.advance();
                Ok(Value::Hex(n))
            }
            TokenKind::OctNumber(n) => {
                self.advance();
                Ok(Value::Oct(n))
            }
            TokenKind::BinNumber(n) => {
                self.advance();
                Ok(Value::Bin(n))
            }
            TokenKind::True => {
                self.advance();
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Value::Bool(false))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::Null)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Value::Enum(name))
            }
            _ => Err(Error::parse(self.offset(), "unexpected token")),
        }
    }

    fn parse_value_with_type(&mut self, decl: &DeclaredType, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        match decl {
            DeclaredType::Mix => self.parse_value(depth),
            DeclaredType::Array(inner) => self.parse_array(inner, depth),
            DeclaredType::Scalar(tag) => self.parse_scalar_with_tag(*tag, depth),
        }
    }

    fn parse_scalar_with_tag(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        match tag {
            Tag::Null => {
                self.expect(|k| matches!(k, TokenKind::Null), "'null'")?;
                Ok(Value::Null)
            }
            Tag::Bool => match self.current().kind {
                TokenKind::True => {
                    self.advance();
                    Ok(Value::Bool(true))
                }
                TokenKind::False => {
                    self.advance();
                    Ok(Value::Bool(false))
                }
                _ => Err(Error::parse(self.offset(), "expected 'true' or 'false'")),
            },
            Tag::I8 => self.parse_signed_literal(-128, 127).map(|n| Value::I8(n as i8)),
            Tag::I16 => self
                .parse_signed_literal(i16::MIN as i128, i16::MAX as i128)
                .map(|n| Value::I16(n as i16)),
            Tag::I32 => self
                .parse_signed_literal(i32::MIN as i128, i32::MAX as i128)
                .map(|n| Value::I32(n as i32)),
            Tag::I64 => self
                .parse_signed_literal(i64::MIN as i128, i64::MAX as i128)
                .map(|n| Value::I64(n as i64)),
            Tag::U8 => self.parse_unsigned_literal(u8::MAX as u128).map(|n| Value::U8(n as u8)),
            Tag::U16 => self
                .parse_unsigned_literal(u16::MAX as u128)
                .map(|n| Value::U16(n as u16)),
            Tag::U32 => self
                .parse_unsigned_literal(u32::MAX as u128)
                .map(|n| Value::U32(n as u32)),
            Tag::U64 => self
                .parse_unsigned_literal(u64::MAX as u128)
                .map(|n| Value::U64(n as u64)),
            Tag::F32 => self.parse_float_literal().map(|f| Value::F32(f as f32)),
            Tag::F64 => self.parse_float_literal().map(Value::F64),
            Tag::Hex => self.parse_hex_literal().map(Value::Hex),
            Tag::Oct => match self.current().kind {
                TokenKind::OctNumber(n) => {
                    self.advance();
                    Ok(Value::Oct(n))
                }
                _ => Err(Error::parse(self.offset(), "expected octal literal")),
            },
            Tag::Bin => match self.current().kind {
                TokenKind::BinNumber(n) => {
                    self.advance();
                    Ok(Value::Bin(n))
                }
                _ => Err(Error::parse(self.offset(), "expected binary literal")),
            },
            Tag::Cstr => match self.current().kind.clone() {
                TokenKind::QuotedString(s) => {
                    self.advance();
                    Ok(Value::Cstr(s))
                }
                _ => Err(Error::parse(self.offset(), "expected quoted string")),
            },
            // The origin C suite writes enum values as quoted strings
            // (`level: enum: "info"`); a bareword identifier is accepted
            // too since it's the natural untyped-fallback spelling.
            Tag::Enum => match self.current().kind.clone() {
                TokenKind::Identifier(s) => {
                    self.advance();
                    Ok(Value::Enum(s))
                }
                TokenKind::QuotedString(s) => {
                    self.advance();
                    Ok(Value::Enum(s))
                }
                _ => Err(Error::parse(self.offset(), "expected an enum identifier")),
            },
            Tag::Datetime => match self.current().kind.clone() {
                TokenKind::QuotedString(s) => {
                    self.advance();
                    Ok(Value::Datetime(s))
                }
                _ => Err(Error::parse(self.offset(), "expected quoted string")),
            },
            Tag::Duration => {
                let offset = self.offset();
                match self.current().kind.clone() {
                    TokenKind::QuotedString(s) => {
                        self.advance();
                        if validate_duration(&s) {
                            Ok(Value::Duration(s))
                        } else {
                            Err(Error::parse(offset, format!("invalid duration '{}'", s)))
                        }
                    }
                    _ => Err(Error::parse(offset, "expected quoted string")),
                }
            }
            Tag::Object => self.parse_object(depth),
            Tag::Array | Tag::Mix => unreachable!("handled via DeclaredType::Array/Mix"),
        }
    }

    fn expect_number_raw(&mut self) -> Result<(String, bool)> {
        match self.current().kind.clone() {
            TokenKind::Number { raw, is_float } => {
                self.advance();
                Ok((raw, is_float))
            }
            _ => Err(Error::parse(self.offset(), "expected number literal")),
        }
    }

    fn parse_signed_literal(&mut self, min: i128, max: i128) -> Result<i128> {
        let offset = self.offset();
        let (raw, is_float) = self.expect_number_raw()?;
        if is_float {
            return Err(Error::range(offset, "expected an integer literal, found a float"));
        }
        let value: i128 = raw
            .parse()
            .map_err(|_| Error::range(offset, "integer literal is not well-formed"))?;
        if value < min || value > max {
            Err(Error::range(offset, format!("{} is out of range", value)))
        } else {
            Ok(value)
        }
    }

    fn parse_unsigned_literal(&mut self, max: u128) -> Result<u128> {
        let offset = self.offset();
        let (raw, is_float) = self.expect_number_raw()?;
        if is_float {
            return Err(Error::range(offset, "expected an integer literal, found a float"));
        }
        let value: i128 = raw
            .parse()
            .map_err(|_| Error::range(offset, "integer literal is not well-formed"))?;
        if value < 0 || value as u128 > max {
            Err(Error::range(offset, format!("{} is out of range", value)))
        } else {
            Ok(value as u128)
        }
    }

    fn parse_float_literal(&mut self) -> Result<f64> {
        let offset = self.offset();
        let (raw, _) = self.expect_number_raw()?;
        raw.parse()
            .map_err(|_| Error::range(offset, "invalid float literal"))
    }

    fn parse_hex_literal(&mut self) -> Result<u64> {
        let offset = self.offset();
        match self.current().kind.clone() {
            TokenKind::HexNumber(n) => {
                self.advance();
                Ok(n)
            }
            TokenKind::QuotedString(s) => {
                self.advance();
                decode_hex_string(&s).ok_or_else(|| Error::parse(offset, format!("invalid hex string '{}'", s)))
            }
            _ => Err(Error::parse(offset, "expected hex literal or hex string")),
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        self.expect(|k| matches!(k, TokenKind::LBrace), "'{'")?;
        if self.check(|k| matches!(k, TokenKind::RBrace)) {
            return Err(Error::parse(self.offset(), "empty object is not allowed"));
        }

        let mut map = ObjectMap::new();
        loop {
            let key_offset = self.offset();
            let key = self.parse_key()?;
            self.expect_colon()?;

            let value = if let Some(decl) = self.try_parse_type_then_colon()? {
                self.parse_value_with_type(&decl, depth + 1)?
            } else {
                self.parse_value(depth + 1)?
            };

            if map.contains_key(&key) {
                return Err(Error::parse(key_offset, format!("duplicate key '{}'", key)));
            }
            map.insert(key, value);

            if self.check(|k| matches!(k, TokenKind::Comma)) {
                self.advance();
                if self.check(|k| matches!(k, TokenKind::RBrace)) {
                    break;
                }
                continue;
            }
            break;
        }
        self.expect(|k| matches!(k, TokenKind::RBrace), "'}'")?;

        if map.len() == 1 {
            if let Some(Value::Null) = map.get("null") {
                return Ok(Value::Null);
            }
        }
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self, inner: &DeclaredType, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        self.expect(|k| matches!(k, TokenKind::LBracket), "'['")?;
        let mut items = Vec::new();
        if !self.check(|k| matches!(k, TokenKind::RBracket)) {
            loop {
                items.push(self.parse_array_element(inner, depth + 1)?);
                if self.check(|k| matches!(k, TokenKind::Comma)) {
                    self.advance();
                    if self.check(|k| matches!(k, TokenKind::RBracket)) {
                        break;
                    }
                    continue;
                }
                break;
            }
        }
        self.expect(|k| matches!(k, TokenKind::RBracket), "']'")?;
        Ok(Value::Array(Array {
            element_type: inner.tag(),
            items,
        }))
    }

    /// `elem := (type ':')? value` — see the grammar clarification at the
    /// top of this file.
    fn parse_array_element(&mut self, inner: &DeclaredType, depth: usize) -> Result<Value> {
        if let Some(explicit) = self.try_parse_type_then_colon()? {
            return self.parse_value_with_type(&explicit, depth);
        }
        match inner {
            DeclaredType::Mix => self.parse_value(depth),
            DeclaredType::Scalar(tag) => {
                let natural = self.parse_value(depth)?;
                Ok(coerce(natural, *tag))
            }
            DeclaredType::Array(nested) => self.parse_array(nested, depth),
        }
    }
}

/// Best-effort coercion of a bare literal to a homogeneous array's declared
/// element type. Per spec §4.4/§9's decided Open Question, a coercion miss
/// is never an error: the literal is kept at whatever type it naturally
/// parsed as.
fn coerce(natural: Value, target: Tag) -> Value {
    if natural.tag() == target {
        return natural;
    }
    match (natural, target) {
        (Value::I64(n), Tag::I8) => i8::try_from(n).map(Value::I8).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::I16) => i16::try_from(n).map(Value::I16).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::I32) => i32::try_from(n).map(Value::I32).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::U8) => u8::try_from(n).map(Value::U8).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::U16) => u16::try_from(n).map(Value::U16).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::U32) => u32::try_from(n).map(Value::U32).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::U64) => u64::try_from(n).map(Value::U64).unwrap_or(Value::I64(n)),
        (Value::I64(n), Tag::F32) => Value::F32(n as f32),
        (Value::I64(n), Tag::F64) => Value::F64(n as f64),
        (Value::F64(f), Tag::F32) => Value::F32(f as f32),
        (Value::Cstr(s), Tag::Hex) => match decode_hex_string(&s) {
            Some(n) => Value::Hex(n),
            None => Value::Cstr(s),
        },
        (other, _) => other,
    }
}

fn decode_hex_string(s: &str) -> Option<u64> {
    u64::from_str_radix(s, 16).ok()
}

/// `(\d+[wdhms])+`, hand-rolled rather than pulling in a regex dependency
/// for one fixed pattern.
fn validate_duration(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut saw_group = false;
    while i < bytes.len() {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return false;
        }
        if i >= bytes.len() || !matches!(bytes[i], b'w' | b'd' | b'h' | b'm' | b's') {
            return false;
        }
        i += 1;
        saw_group = true;
    }
    saw_group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_bool_entry() {
        let v = parse("{ flag: bool: true }").unwrap();
        assert_eq!(v.type_name(), "object");
        assert!(v.object_get("flag").unwrap().get_bool().unwrap());
    }

    #[test]
    fn parses_hex_oct_bin() {
        let v = parse("{ hex: hex: 0xFF, oct: oct: 0o755, bin: bin: 0b1010 }").unwrap();
        assert_eq!(v.object_get("hex").unwrap().get_hex().unwrap(), 255);
        assert_eq!(v.object_get("oct").unwrap().get_oct().unwrap(), 493);
        assert_eq!(v.object_get("bin").unwrap().get_bin().unwrap(), 10);
    }

    #[test]
    fn typed_array_elements_are_indexable() {
        let v = parse("{ arr: array<i32>: [1, 2, 3] }").unwrap();
        let arr = v.object_get("arr").unwrap();
        assert_eq!(arr.array_size(), Some(3));
        assert_eq!(arr.array_get(1).unwrap().get_i32().unwrap(), 2);
    }

    #[test]
    fn mix_array_elements_keep_their_own_type() {
        let v = parse(r#"{ mixed: array<mix>: [i32: 1, cstr: "two", bool: true] }"#).unwrap();
        let arr = v.object_get("mixed").unwrap();
        assert_eq!(arr.array_size(), Some(3));
        assert_eq!(arr.array_get(0).unwrap().type_name(), "i32");
        assert_eq!(arr.array_get(1).unwrap().type_name(), "cstr");
        assert_eq!(arr.array_get(2).unwrap().type_name(), "bool");
    }

    #[test]
    fn nested_object_access() {
        let v = parse("{ user: object: { id: i32: 42 } }").unwrap();
        let user = v.object_get("user").unwrap();
        assert_eq!(user.object_get("id").unwrap().get_i32().unwrap(), 42);
    }

    #[test]
    fn invalid_duration_is_parse_error() {
        let err = parse(r#"{ timeout: duration: "5minutes30seconds" }"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn valid_duration_parses() {
        let v = parse(r#"{ timeout: duration: "5m30s" }"#).unwrap();
        assert_eq!(v.object_get("timeout").unwrap().type_name(), "duration");
    }

    #[test]
    fn empty_object_is_rejected() {
        let err = parse("{}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn empty_array_is_accepted() {
        let v = parse("{ arr: array<i32>: [] }").unwrap();
        assert_eq!(v.object_get("arr").unwrap().array_size(), Some(0));
    }

    #[test]
    fn null_null_special_case_collapses_to_bare_null() {
        let v = parse("{ null: null }").unwrap();
        assert!(v.is_null());
    }

    #[test]
    fn trailing_commas_are_accepted() {
        let v = parse("{ arr: array<i32>: [1, 2, 3,], }").unwrap();
        assert_eq!(v.object_get("arr").unwrap().array_size(), Some(3));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = parse("{ a: i32: 1, a: i32: 2 }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn unterminated_string_is_parse_error() {
        let err = parse(r#"{ msg: cstr: "abc }"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn unknown_top_level_token_is_parse_error() {
        let err = parse("???").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn malformed_array_type_missing_close_angle_is_type_error() {
        let err = parse("{ arr: array<i32: [1,2,3] }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn array_empty_type_args_is_type_error() {
        let err = parse("{ arr: array<>: [1,2,3] }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn array_unknown_type_is_type_error() {
        let err = parse("{ arr: array<unknown>: [1,2,3] }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn i64_upper_bound_is_accepted() {
        let v = parse("{ big: i64: 9223372036854775807 }").unwrap();
        assert_eq!(v.object_get("big").unwrap().get_i64().unwrap(), i64::MAX);
    }

    #[test]
    fn out_of_range_i8_is_range_error() {
        let err = parse("{ small: i8: 300 }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Range);
    }

    #[test]
    fn array_i32_with_invalid_element_keeps_size_and_fallback_type() {
        let v = parse(r#"{ arr: array<i32>: [1, "a", 3] }"#).unwrap();
        let arr = v.object_get("arr").unwrap();
        assert_eq!(arr.array_size(), Some(3));
        assert_eq!(arr.array_get(0).unwrap().type_name(), "i32");
        assert_eq!(arr.array_get(1).unwrap().type_name(), "cstr");
        assert_eq!(arr.array_get(2).unwrap().type_name(), "i32");
    }

    #[test]
    fn array_hex_string_coercion() {
        let v = parse(r#"{ arr: array<hex>: ["DEAD", "BEEF"] }"#).unwrap();
        let arr = v.object_get("arr").unwrap();
        assert_eq!(arr.array_get(0).unwrap().get_hex().unwrap(), 0xDEAD);
        assert_eq!(arr.array_get(1).unwrap().get_hex().unwrap(), 0xBEEF);
    }

    #[test]
    fn nested_array_of_arrays() {
        let v = parse("{ arr: array<array<i32>>: [[1, 2], [3, 4]] }").unwrap();
        let arr = v.object_get("arr").unwrap();
        assert_eq!(arr.array_size(), Some(2));
        let first = arr.array_get(0).unwrap();
        assert_eq!(first.type_name(), "array");
        assert_eq!(first.array_get(1).unwrap().get_i32().unwrap(), 2);
    }

    #[test]
    fn deeply_nested_array_of_arrays() {
        let v = parse("{ arr: array<array<array<i32>>>: [ [[1],[2]], [[3],[4]] ] }").unwrap();
        let arr = v.object_get("arr").unwrap();
        assert_eq!(arr.array_size(), Some(2));
        let mid = arr.array_get(0).unwrap();
        assert_eq!(mid.array_size(), Some(2));
        let leaf = mid.array_get(0).unwrap();
        assert_eq!(leaf.array_get(0).unwrap().get_i32().unwrap(), 1);
    }

    #[test]
    fn large_flat_array() {
        let mut src = String::from("{ arr: array<i32>: [");
        for i in 0..1000 {
            if i > 0 {
                src.push(',');
            }
            src.push_str(&i.to_string());
        }
        src.push_str("] }");
        let v = parse(&src).unwrap();
        assert_eq!(v.object_get("arr").unwrap().array_size(), Some(1000));
    }

    #[test]
    fn whitespace_around_type_parameter_operator() {
        let v = parse("{ arr : array < i32 > : [1,2,3] }").unwrap();
        assert_eq!(v.object_get("arr").unwrap().array_size(), Some(3));
    }

    #[test]
    fn bare_scalar_document_roots_are_accepted() {
        assert!(parse("null").unwrap().is_null());
        assert!(parse("true").unwrap().get_bool().unwrap());
        assert_eq!(parse("123").unwrap().get_i64().unwrap(), 123);
        assert_eq!(parse(r#""abc""#).unwrap().get_cstr().unwrap(), "abc");
    }

    #[test]
    fn untyped_array_entry_uses_mix_element_type() {
        let v = parse(r#"{ arr: [1, "two", true, null] }"#).unwrap();
        let arr = v.object_get("arr").unwrap();
        assert_eq!(arr.array_size(), Some(4));
    }

    #[test]
    fn complex_nested_document() {
        let src = r#"{
            app: object: {
                name: cstr: "Fossil App",
                version: u32: 101,
                debug: bool: true,
                log: object: {
                    level: enum: info,
                    output: cstr: "/tmp/fossil.log"
                },
                features: array: [
                    feature1: bool: true,
                    feature2: bool: false,
                    max_threads: u8: 16
                ]
            },
            crypto: object: {
                enabled: bool: true,
                key: hex: "DEADBEEFCAFEBABE"
            }
        }"#;
        let v = parse(src).unwrap();
        let app = v.object_get("app").unwrap();
        assert_eq!(app.type_name(), "object");
        let features = app.object_get("features").unwrap();
        assert_eq!(features.array_size(), Some(3));
        let crypto = v.object_get("crypto").unwrap();
        assert_eq!(crypto.object_get("key").unwrap().get_hex().unwrap(), 0xDEADBEEFCAFEBABE);
    }
}
