//! JSON decoder — parses JSON text into a [`Datum`] tree.
//!
//! A hand-written recursive-descent parser over a one-character-lookahead
//! cursor. Exactly one value is parsed per call; anything other than
//! whitespace after it is an error.
//!
//! # Key design decisions
//!
//! - **By-value depth counter**: `parse_value` takes its nesting depth as a
//!   plain parameter, so every exit path (success or failure) restores the
//!   caller's count with no cleanup code. The [`MAX_DEPTH`] bound caps
//!   native-stack recursion on adversarial deeply nested input.
//! - **Permissive number tokenizer**: the lexer greedily accepts any
//!   character a number could contain and defers validity to the `i64`/`f64`
//!   parse, so `1.2.3` fails there rather than in a hand-built grammar.
//!   Existing producers rely on this accepted-input behavior.
//! - **Explicit surrogate pairing**: `\uXXXX` escapes in the surrogate range
//!   must arrive as a high/low pair; Rust strings cannot hold half of one.
//! - **Byte-offset diagnostics**: the cursor tracks its position so parse
//!   errors report where they were detected.

use crate::error::{DatumError, Result};
use crate::types::{AssocPair, Datum, Number};

/// Maximum array/object nesting accepted by [`decode`].
pub const MAX_DEPTH: usize = 100;

/// Decode one JSON value into a [`Datum`] tree.
///
/// The whole input must be consumed: after the value, only whitespace may
/// remain before end of input.
pub fn decode(json: &str) -> Result<Datum> {
    let mut cur = Cursor::new(json);
    let datum = parse_value(&mut cur, 0)?;
    loop {
        match cur.next() {
            None => return Ok(datum),
            Some(' ' | '\t' | '\n' | '\r') => continue,
            Some(c) => return Err(cur.error(format!("unexpected trailing character {c:?}"))),
        }
    }
}

/// Pull-based character reader with one-character lookahead.
struct Cursor<'a> {
    chars: std::str::Chars<'a>,
    peeked: Option<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            chars: input.chars(),
            peeked: None,
            pos: 0,
        }
    }

    /// Consume and return the next character.
    fn next(&mut self) -> Option<char> {
        let c = self.peeked.take().or_else(|| self.chars.next());
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        c
    }

    /// Look at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked
    }

    /// A parse error located at the current read position.
    fn error(&self, message: impl Into<String>) -> DatumError {
        DatumError::Parse {
            at: self.pos,
            message: message.into(),
        }
    }
}

/// Skip insignificant whitespace between tokens.
fn skip_whitespace(cur: &mut Cursor<'_>) {
    while matches!(cur.peek(), Some(' ' | '\t' | '\n' | '\r')) {
        cur.next();
    }
}

/// Parse one JSON value, dispatching on its first non-whitespace character.
///
/// `depth` counts enclosing `parse_value` activations; exceeding
/// [`MAX_DEPTH`] fails before descending further.
fn parse_value(cur: &mut Cursor<'_>, depth: usize) -> Result<Datum> {
    if depth >= MAX_DEPTH {
        return Err(DatumError::NestingTooDeep);
    }
    skip_whitespace(cur);
    match cur.next() {
        None => Err(cur.error("unexpected end of input")),
        Some('n') => expect_keyword(cur, "ull", Datum::Null),
        Some('t') => expect_keyword(cur, "rue", Datum::Bool(true)),
        Some('f') => expect_keyword(cur, "alse", Datum::Bool(false)),
        Some(first @ ('0'..='9' | '-' | '.')) => parse_number(cur, first),
        Some('"') => Ok(Datum::String(parse_string(cur)?)),
        Some('[') => parse_array(cur, depth),
        Some('{') => parse_object(cur, depth),
        Some(c) => Err(cur.error(format!("unexpected character {c:?}"))),
    }
}

/// Match the remaining characters of a keyword literal (`null`, `true`,
/// `false`). Strict matching, no partial-match recovery: any mismatched or
/// missing character fails, even after a valid prefix.
fn expect_keyword(cur: &mut Cursor<'_>, rest: &str, datum: Datum) -> Result<Datum> {
    for expected in rest.chars() {
        if cur.next() != Some(expected) {
            return Err(cur.error("invalid keyword"));
        }
    }
    Ok(datum)
}

/// Lex and convert a numeric literal, `first` being its already-consumed
/// first character (a digit, `-`, or `.`).
///
/// Greedily consumes every character a number could contain; seeing `.`,
/// `e`, or `E` decides float over integer. Validity is left entirely to the
/// locale-independent `i64`/`f64` parse.
fn parse_number(cur: &mut Cursor<'_>, first: char) -> Result<Datum> {
    let mut text = String::new();
    text.push(first);
    let mut float = first == '.';
    while let Some(c) = cur.peek() {
        match c {
            '0'..='9' | '+' | '-' => {}
            '.' | 'e' | 'E' => float = true,
            _ => break,
        }
        text.push(c);
        cur.next();
    }
    let number = if float {
        text.parse::<f64>().ok().map(Number::Float)
    } else {
        text.parse::<i64>().ok().map(Number::Int)
    };
    number
        .map(Datum::Number)
        .ok_or_else(|| cur.error(format!("invalid number {text:?}")))
}

/// Lex a string literal, the opening quote already consumed. The closing
/// quote terminates it; end of input before that is an error.
fn parse_string(cur: &mut Cursor<'_>) -> Result<String> {
    let mut out = String::new();
    loop {
        match cur.next() {
            None => return Err(cur.error("unterminated string")),
            Some('"') => return Ok(out),
            Some('\\') => out.push(parse_escape(cur)?),
            Some(c) => out.push(c),
        }
    }
}

/// Decode one escape sequence, the backslash already consumed.
fn parse_escape(cur: &mut Cursor<'_>) -> Result<char> {
    match cur.next() {
        None => Err(cur.error("unterminated escape sequence")),
        Some('"') => Ok('"'),
        Some('\\') => Ok('\\'),
        Some('/') => Ok('/'),
        Some('b') => Ok('\u{0008}'),
        Some('f') => Ok('\u{000C}'),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('u') => parse_unicode_escape(cur),
        Some(c) => Err(cur.error(format!("invalid escape character {c:?}"))),
    }
}

/// Decode a `\uXXXX` escape. Supplementary-plane characters arrive as a
/// UTF-16 surrogate pair, so a high surrogate must be followed by a second
/// `\uXXXX` holding the low half.
fn parse_unicode_escape(cur: &mut Cursor<'_>) -> Result<char> {
    let high = read_hex4(cur)?;
    match high {
        0xD800..=0xDBFF => {
            if cur.next() != Some('\\') || cur.next() != Some('u') {
                return Err(cur.error("unpaired surrogate in \\u escape"));
            }
            let low = read_hex4(cur)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(cur.error("unpaired surrogate in \\u escape"));
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(code).ok_or_else(|| cur.error("invalid \\u escape"))
        }
        0xDC00..=0xDFFF => Err(cur.error("unpaired surrogate in \\u escape")),
        code => char::from_u32(code).ok_or_else(|| cur.error("invalid \\u escape")),
    }
}

/// Read exactly four hex digits, case-insensitive, each validated.
fn read_hex4(cur: &mut Cursor<'_>) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = cur
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| cur.error("invalid hex digit in \\u escape"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Parse the elements of an array, the `[` already consumed. After each
/// element a `,` continues and a `]` terminates; a `,` must be followed by
/// another element, so `[1,2,]` fails.
fn parse_array(cur: &mut Cursor<'_>, depth: usize) -> Result<Datum> {
    let mut elements = Vec::new();
    skip_whitespace(cur);
    if cur.peek() == Some(']') {
        cur.next();
        return Ok(Datum::Array(elements));
    }
    loop {
        elements.push(parse_value(cur, depth + 1)?);
        skip_whitespace(cur);
        match cur.next() {
            Some(',') => continue,
            Some(']') => return Ok(Datum::Array(elements)),
            Some(c) => return Err(cur.error(format!("expected ',' or ']', found {c:?}"))),
            None => return Err(cur.error("unterminated array")),
        }
    }
}

/// Parse the key/value pairs of an object, the `{` already consumed. Keys
/// must be string literals; pairs are appended in input order. After each
/// pair a `,` must be followed by another quoted key, so `{"a":1,}` fails.
fn parse_object(cur: &mut Cursor<'_>, depth: usize) -> Result<Datum> {
    let mut pairs = Vec::new();
    skip_whitespace(cur);
    match cur.next() {
        Some('}') => return Ok(Datum::Object(pairs)),
        Some('"') => {}
        Some(c) => return Err(cur.error(format!("expected object key, found {c:?}"))),
        None => return Err(cur.error("unterminated object")),
    }
    loop {
        // The key's opening quote is already consumed at this point.
        let key = parse_string(cur)?;
        skip_whitespace(cur);
        match cur.next() {
            Some(':') => {}
            Some(c) => return Err(cur.error(format!("expected ':' after object key, found {c:?}"))),
            None => return Err(cur.error("unterminated object")),
        }
        let val = parse_value(cur, depth + 1)?;
        pairs.push(AssocPair { key, val });
        skip_whitespace(cur);
        match cur.next() {
            Some(',') => {
                skip_whitespace(cur);
                match cur.next() {
                    Some('"') => continue,
                    Some(c) => return Err(cur.error(format!("expected object key, found {c:?}"))),
                    None => return Err(cur.error("unterminated object")),
                }
            }
            Some('}') => return Ok(Datum::Object(pairs)),
            Some(c) => return Err(cur.error(format!("expected ',' or '}}', found {c:?}"))),
            None => return Err(cur.error("unterminated object")),
        }
    }
}
