//! FSON — Fossil Serialized Object Notation.
//!
//! A typed, human-readable data interchange format. Every value carries an
//! explicit type tag; containers may declare a homogeneous element type
//! (`array<i32>`) or opt into heterogeneous elements (`array<mix>`). This
//! crate is the format's core: the value model, lexer, recursive-descent
//! parser, and canonical-text serializer. See `SPEC_FULL.md` in the
//! repository root for the full specification this crate implements.
//!
//! ```
//! let doc = fson::parse(r#"{ name: cstr: "ferris", legs: u8: 4 }"#).unwrap();
//! assert_eq!(doc.object_get("name").unwrap().get_cstr().unwrap(), "ferris");
//! let text = fson::serialize(&doc, &fson::FormatOptions::compact());
//! assert!(fson::parse(&text).unwrap().equals(&doc));
//! ```

mod error;
mod lexer;
mod parser;
mod serializer;
mod value;

pub use error::{Error, ErrorKind, Result};
pub use serializer::{roundtrip, serialize, serialize_compact, serialize_pretty, FormatOptions};
pub use value::{free, Array, ObjectMap, Tag, Value};

/// Parses a complete FSON document. See the grammar in `SPEC_FULL.md` §5 /
/// spec.md §4.4.
pub fn parse(text: &str) -> Result<Value> {
    if text.is_empty() {
        return Err(Error::invalid_arg("empty input"));
    }
    parser::parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexported_api_parses_and_serializes() {
        let v = parse("{ a: i32: 1 }").unwrap();
        let text = serialize(&v, &FormatOptions::compact());
        assert_eq!(text, "{a:i32:1}");
        let v2 = parse(&text).unwrap();
        assert!(v.equals(&v2));
    }

    #[test]
    fn empty_input_is_invalid_arg() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArg);
    }

    #[test]
    fn clone_and_free_are_exposed() {
        let v = parse("{ a: i32: 1 }").unwrap();
        let cloned = v.deep_clone();
        assert!(v.equals(&cloned));
        free(Some(v));
    }
}
