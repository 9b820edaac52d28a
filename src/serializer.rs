//! The serializer: walks a [`Value`] tree and emits canonical FSON text
//! (spec §4.5). Pretty-printed (4-space indent) or compact; either form
//! re-parses to an equal value.

use crate::value::{Array, Tag, Value};

/// Options controlling FSON text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub pretty: bool,
}

impl FormatOptions {
    pub fn pretty() -> Self {
        FormatOptions { pretty: true }
    }

    pub fn compact() -> Self {
        FormatOptions { pretty: false }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions::compact()
    }
}

/// Serializes `value` as canonical FSON text using `opts`.
pub fn serialize(value: &Value, opts: &FormatOptions) -> String {
    let mut out = String::new();
    write_root(&mut out, value, opts);
    out
}

pub fn serialize_compact(value: &Value) -> String {
    serialize(value, &FormatOptions::compact())
}

pub fn serialize_pretty(value: &Value) -> String {
    serialize(value, &FormatOptions::pretty())
}

/// `parse(text) -> serialize -> text`. Offered as a convenience matching
/// spec §6.2's `roundtrip` entry; fails exactly when [`crate::parser::parse`]
/// would fail on `text`.
pub fn roundtrip(text: &str, opts: &FormatOptions) -> crate::error::Result<String> {
    let value = crate::parser::parse(text)?;
    Ok(serialize(&value, opts))
}

/// The document root is parsed by `value := object | array | scalar` with
/// no enclosing `key ':' type ':'` — there is no grammar position for a
/// bare (untyped) document to carry an explicit type tag (spec §4.4's
/// "document shape" bullet; `SPEC_FULL.md` §5). So a root scalar is
/// rendered the same way the bare-form inference rule reads it back:
/// `Null`/`Bool`/`I64`/`F64`/`Cstr`/`Enum` round-trip through their literal
/// spelling alone. A root value of any other scalar tag (e.g. `I8`,
/// `Hex`, `Duration`) cannot arise from `parse` in the first place — the
/// grammar has no typed root form — so it has no lossless bare rendering;
/// such a value is still emitted (typed, so the output is at least valid
/// FSON) but will not reparse to an equal tag at the document root.
fn write_root(out: &mut String, value: &Value, opts: &FormatOptions) {
    match value {
        Value::Object(_) | Value::Array(_) => write_container(out, value, 0, opts),
        Value::Null | Value::Bool(_) | Value::I64(_) | Value::F64(_) | Value::Cstr(_) | Value::Enum(_) => {
            write_literal(out, value)
        }
        other => write_typed_scalar(out, other, opts),
    }
}

fn indent(out: &mut String, depth: usize, opts: &FormatOptions) {
    if opts.pretty {
        for _ in 0..depth {
            out.push_str("    ");
        }
    }
}

fn newline(out: &mut String, opts: &FormatOptions) {
    if opts.pretty {
        out.push('\n');
    }
}

fn space(out: &mut String, opts: &FormatOptions) {
    if opts.pretty {
        out.push(' ');
    }
}

fn write_container(out: &mut String, value: &Value, depth: usize, opts: &FormatOptions) {
    match value {
        Value::Object(map) => {
            out.push('{');
            newline(out, opts);
            for (i, (key, child)) in map.iter().enumerate() {
                indent(out, depth + 1, opts);
                write_key(out, key);
                out.push(':');
                space(out, opts);
                write_typed(out, child, depth + 1, opts);
                if i + 1 < map.len() {
                    out.push(',');
                }
                newline(out, opts);
            }
            indent(out, depth, opts);
            out.push('}');
        }
        Value::Array(arr) => write_array(out, arr, depth, opts),
        other => write_typed_scalar(out, other, opts),
    }
}

/// Renders `value` the way both an object entry and a `mix` array element
/// render it: always `type: literal` (or `object: {...}` / `array<T>: [...]`
/// for containers), never a bare literal.
fn write_typed(out: &mut String, value: &Value, depth: usize, opts: &FormatOptions) {
    match value {
        Value::Object(_) => {
            out.push_str("object:");
            space(out, opts);
            write_container(out, value, depth, opts);
        }
        Value::Array(arr) => {
            out.push_str("array");
            if arr.element_type != Tag::Mix {
                out.push('<');
                out.push_str(arr.element_type.name());
                out.push('>');
            }
            out.push(':');
            space(out, opts);
            write_array(out, arr, depth, opts);
        }
        // `null` always lexes as the `TokenKind::Null` keyword, never an
        // `Identifier`, so a type-prefixed `null: null` has no grammar
        // position the type lookahead can read back. Bare is the only form
        // that reparses.
        Value::Null => write_literal(out, value),
        other => {
            out.push_str(other.type_name());
            out.push(':');
            space(out, opts);
            write_literal(out, other);
        }
    }
}

fn write_array(out: &mut String, arr: &Array, depth: usize, opts: &FormatOptions) {
    out.push('[');
    if !arr.items.is_empty() {
        newline(out, opts);
        for (i, item) in arr.items.iter().enumerate() {
            indent(out, depth + 1, opts);
            write_array_element(out, item, arr.element_type, depth + 1, opts);
            if i + 1 < arr.items.len() {
                out.push(',');
            }
            newline(out, opts);
        }
        indent(out, depth, opts);
    }
    out.push(']');
}

/// Inside a typed array whose element-type matches, an element is a bare
/// literal (spec §4.5). Inside `mix`/untyped arrays, every element carries
/// its own `type: literal`.
fn write_array_element(out: &mut String, value: &Value, element_type: Tag, depth: usize, opts: &FormatOptions) {
    if element_type != Tag::Mix && value.tag() == element_type {
        match value {
            Value::Object(_) | Value::Array(_) => write_container(out, value, depth, opts),
            other => write_literal(out, other),
        }
    } else {
        write_typed(out, value, depth, opts);
    }
}

fn write_typed_scalar(out: &mut String, value: &Value, opts: &FormatOptions) {
    out.push_str(value.type_name());
    out.push(':');
    space(out, opts);
    write_literal(out, value);
}

/// Writes a bareword key if safe, else a quoted/escaped key.
fn write_key(out: &mut String, key: &str) {
    if needs_quoting(key) {
        out.push('"');
        out.push_str(&escape_string(key));
        out.push('"');
    } else {
        out.push_str(key);
    }
}

fn needs_quoting(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return true;
    }
    !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Shortest exact decimal representation for the non-container tags.
fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::I8(n) => out.push_str(&n.to_string()),
        Value::I16(n) => out.push_str(&n.to_string()),
        Value::I32(n) => out.push_str(&n.to_string()),
        Value::I64(n) => out.push_str(&n.to_string()),
        Value::U8(n) => out.push_str(&n.to_string()),
        Value::U16(n) => out.push_str(&n.to_string()),
        Value::U32(n) => out.push_str(&n.to_string()),
        Value::U64(n) => out.push_str(&n.to_string()),
        Value::F32(f) => out.push_str(&format_float(*f as f64)),
        Value::F64(f) => out.push_str(&format_float(*f)),
        Value::Hex(n) => out.push_str(&format!("0x{:X}", n)),
        Value::Oct(n) => out.push_str(&format!("0o{:o}", n)),
        Value::Bin(n) => out.push_str(&format!("0b{:b}", n)),
        Value::Cstr(s) => write_quoted(out, s),
        Value::Enum(s) => {
            if needs_quoting(s) {
                write_quoted(out, s);
            } else {
                out.push_str(s);
            }
        }
        Value::Datetime(s) => write_quoted(out, s),
        Value::Duration(s) => write_quoted(out, s),
        Value::Array(_) | Value::Object(_) => unreachable!("containers use write_container"),
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    out.push_str(&escape_string(s));
    out.push('"');
}

/// Rust's `f64::to_string` never emits a trailing `.0` for whole numbers
/// (`1.0` becomes `"1"`), which would reparse as an integer literal. Force
/// a decimal point so the roundtrip invariant (§8 property 1) holds.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f.is_sign_positive() { "inf".to_string() } else { "-inf".to_string() };
    }
    let s = f.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn compact_roundtrips_bool_entry() {
        let v = parse("{ flag: bool: true }").unwrap();
        let text = serialize_compact(&v);
        let v2 = parse(&text).unwrap();
        assert!(v.equals(&v2));
    }

    #[test]
    fn pretty_roundtrips_nested_document() {
        let src = r#"{ user: object: { id: i32: 42, name: cstr: "ann" } }"#;
        let v = parse(src).unwrap();
        let text = serialize_pretty(&v);
        assert!(text.contains('\n'));
        let v2 = parse(&text).unwrap();
        assert!(v.equals(&v2));
    }

    #[test]
    fn typed_array_elements_render_bare() {
        let v = parse("{ arr: array<i32>: [1, 2, 3] }").unwrap();
        let text = serialize_compact(&v);
        assert!(text.contains("array<i32>:[1,2,3]"));
    }

    #[test]
    fn mix_array_elements_carry_their_own_type() {
        let v = parse(r#"{ mixed: array<mix>: [i32: 1, cstr: "two", bool: true] }"#).unwrap();
        let text = serialize_compact(&v);
        let v2 = parse(&text).unwrap();
        assert!(v.equals(&v2));
        assert!(text.contains("i32:1"));
        assert!(text.contains(r#"cstr:"two""#));
    }

    #[test]
    fn non_root_null_in_mix_array_renders_bare_and_reparses() {
        let v = parse(r#"{ mixed: array<mix>: [i32: 1, null] }"#).unwrap();
        let text = serialize_compact(&v);
        assert!(!text.contains("null:null"));
        let v2 = parse(&text).unwrap();
        assert!(v.equals(&v2));
    }

    #[test]
    fn hex_oct_bin_retain_base_prefix() {
        let v = parse("{ h: hex: 0xFF, o: oct: 0o755, b: bin: 0b1010 }").unwrap();
        let text = serialize_compact(&v);
        assert!(text.contains("0xFF"));
        assert!(text.contains("0o755"));
        assert!(text.contains("0b1010"));
    }

    #[test]
    fn whole_number_float_keeps_decimal_point() {
        let v = Value::F64(3.0);
        let text = serialize_compact(&v);
        assert_eq!(text, "3.0");
    }

    #[test]
    fn root_scalar_values_serialize_bare_and_reparse_equal() {
        for v in [Value::Null, Value::Bool(true), Value::I64(-7), Value::F64(1.5), Value::Cstr("hi".into())] {
            let text = serialize_compact(&v);
            let reparsed = parse(&text).unwrap();
            assert!(v.equals(&reparsed), "{:?} -> {:?} -> {:?}", v, text, reparsed);
        }
    }

    #[test]
    fn roundtrip_helper_reparses_to_equal_value() {
        let text = roundtrip("{ a: i32: 1 }", &FormatOptions::compact()).unwrap();
        let v1 = parse("{ a: i32: 1 }").unwrap();
        let v2 = parse(&text).unwrap();
        assert!(v1.equals(&v2));
    }

    #[test]
    fn key_needing_quotes_is_quoted() {
        let mut map = crate::value::ObjectMap::new();
        map.insert("with space".to_string(), Value::I32(1));
        let v = Value::Object(map);
        let text = serialize_compact(&v);
        assert!(text.contains(r#""with space""#));
    }

    #[test]
    fn empty_array_serializes_with_no_items() {
        let v = parse("{ arr: array<i32>: [] }").unwrap();
        let text = serialize_compact(&v);
        assert!(text.contains("array<i32>:[]"));
    }

    #[test]
    fn nested_array_of_arrays_roundtrips() {
        let v = parse("{ arr: array<array<i32>>: [[1, 2], [3, 4]] }").unwrap();
        let text = serialize_pretty(&v);
        let v2 = parse(&text).unwrap();
        assert!(v.equals(&v2));
    }
}
