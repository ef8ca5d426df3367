//! JSON encoder — emits a [`Datum`] tree as canonical minified JSON text.
//!
//! The output carries no insignificant whitespace, double-quotes every key
//! and string, and separates array/object entries with bare commas (no
//! trailing comma). String escaping is minimal by design: only `"`, `\`,
//! and the five named control characters get two-character escapes; all
//! other characters, non-ASCII included, are emitted verbatim. No `\uXXXX`
//! is ever produced.

use crate::error::{DatumError, Result};
use crate::types::{Datum, Number};

/// Encode a [`Datum`] tree into canonical JSON text.
///
/// Fails only on payloads with no JSON rendering (non-finite numbers), which
/// indicate a contract violation upstream rather than a data problem.
pub fn encode(datum: &Datum) -> Result<String> {
    let mut out = String::new();
    encode_value(datum, &mut out)?;
    Ok(out)
}

/// Depth-first emission of one value into the output buffer.
fn encode_value(datum: &Datum, out: &mut String) -> Result<()> {
    match datum {
        Datum::Null => out.push_str("null"),
        Datum::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Datum::Number(n) => out.push_str(&format_number(n)?),
        Datum::String(s) => encode_string(s, out),
        Datum::Array(elements) => {
            out.push('[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_value(element, out)?;
            }
            out.push(']');
        }
        Datum::Object(pairs) => {
            out.push('{');
            for (i, pair) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(&pair.key, out);
                out.push(':');
                encode_value(&pair.val, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Format a number locale-independently, keeping the integer/float
/// distinction observable in the text: integers never carry `.` or an
/// exponent, floats always carry one of the two (Rust's shortest round-trip
/// float formatting guarantees it). Non-finite floats have no JSON
/// rendering.
fn format_number(n: &Number) -> Result<String> {
    match *n {
        Number::Int(i) => Ok(i.to_string()),
        Number::Float(f) if f.is_finite() => Ok(format!("{f:?}")),
        Number::Float(f) => Err(DatumError::UnsupportedType(format!("non-finite number {f}"))),
    }
}

/// Emit a string literal with the minimal escape set.
fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}
