//! Round-trip adapter — bridges typed Rust values and [`Datum`] trees.
//!
//! serde_json is the generic object serializer here: a typed value travels
//! value → JSON text → Datum, and back Datum → JSON text → value. JSON text
//! is the interchange form; the hand-written codec owns the Datum side and
//! serde_json owns the typed side. Errors from either side propagate
//! unchanged, and no partial values are returned.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::Result;
use crate::types::Datum;

/// Convert a typed value into a [`Datum`] tree.
///
/// After decoding, a top-level object has its first `"id"` pair removed, if
/// any. Inserts rely on server-assigned identifiers: the generic serializer
/// emits a null/default `id` field for values that never set one, and that
/// explicit null must not reach the protocol layer. The removal is
/// deliberately narrow — first match only, top level only, whatever the
/// value.
pub fn to_datum<T: Serialize>(value: &T) -> Result<Datum> {
    let json = serde_json::to_string(value)?;
    let mut datum = decode(&json)?;
    strip_generated_id(&mut datum);
    Ok(datum)
}

/// Convert a [`Datum`] tree into a typed value.
pub fn from_datum<T: DeserializeOwned>(datum: &Datum) -> Result<T> {
    let json = encode(datum)?;
    Ok(serde_json::from_str(&json)?)
}

/// Remove the first top-level `"id"` pair of an object datum. Non-objects,
/// nested occurrences, and any second `id` pair are untouched.
fn strip_generated_id(datum: &mut Datum) {
    if let Datum::Object(pairs) = datum {
        if let Some(i) = pairs.iter().position(|pair| pair.key == "id") {
            pairs.remove(i);
        }
    }
}
