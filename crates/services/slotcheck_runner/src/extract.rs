// --- File: crates/services/slotcheck_runner/src/extract.rs ---
//! Tolerant lookups over booking API payloads.
//!
//! The backend answers in several shapes depending on the representation it
//! picks (JSON-LD envelope, bare list, plain object). Each lookup is an ordered
//! list of small strategies over a generic JSON value; the first one that
//! yields something wins.

use serde_json::Value;

/// Member array of a Hydra collection envelope.
pub const HYDRA_MEMBER: &str = "hydra:member";
pub const SLOT_ID_KEY: &str = "@id";
pub const RESERVED_KEY: &str = "reserved";
/// Top-level keys that may carry the cancellation token, in lookup order.
pub const CANCEL_TOKEN_KEYS: [&str; 3] = ["cancelToken", "cancel_token", "cancel"];
/// Key looked up inside nested objects of a creation response.
pub const NESTED_CANCEL_TOKEN_KEY: &str = "cancelToken";

type CollectionStrategy = for<'v> fn(&'v Value) -> Option<&'v [Value]>;
type TokenStrategy = fn(&Value) -> Option<String>;

const COLLECTION_STRATEGIES: [CollectionStrategy; 3] =
    [hydra_members, bare_list, first_list_field];
const TOKEN_STRATEGIES: [TokenStrategy; 2] = [top_level_token, nested_token];

/// Runs `strategies` in order and returns the first hit.
pub fn first_match<'v, T, F>(value: &'v Value, strategies: &[F]) -> Option<T>
where
    F: Fn(&'v Value) -> Option<T>,
{
    strategies.iter().find_map(|strategy| strategy(value))
}

/// Truthiness of a dynamic JSON value: `null`, `false`, `0`, `""`, `[]` and
/// `{}` are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// A slot without a `reserved` field counts as free.
pub fn is_reserved(slot: &Value) -> bool {
    slot.get(RESERVED_KEY).is_some_and(is_truthy)
}

/// The slot's non-empty `@id`.
pub fn slot_id(slot: &Value) -> Option<&str> {
    slot.get(SLOT_ID_KEY)?.as_str().filter(|id| !id.is_empty())
}

/// The list of slot objects in a collection response, whatever its envelope.
///
/// Empty when no shape matches.
pub fn slot_candidates(payload: &Value) -> &[Value] {
    first_match(payload, &COLLECTION_STRATEGIES).unwrap_or(&[])
}

/// Identifier of the first free slot among `candidates`.
pub fn first_free_slot(candidates: &[Value]) -> Option<String> {
    candidates
        .iter()
        .filter(|slot| !is_reserved(slot))
        .find_map(slot_id)
        .map(str::to_string)
}

/// The cancellation token of an appointment creation response.
pub fn cancel_token(payload: &Value) -> Option<String> {
    first_match(payload, &TOKEN_STRATEGIES)
}

fn hydra_members(payload: &Value) -> Option<&[Value]> {
    payload.get(HYDRA_MEMBER)?.as_array().map(Vec::as_slice)
}

fn bare_list(payload: &Value) -> Option<&[Value]> {
    payload.as_array().map(Vec::as_slice)
}

// Document order: serde_json is built with preserve_order.
fn first_list_field(payload: &Value) -> Option<&[Value]> {
    payload
        .as_object()?
        .values()
        .find_map(Value::as_array)
        .map(Vec::as_slice)
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn top_level_token(payload: &Value) -> Option<String> {
    CANCEL_TOKEN_KEYS
        .iter()
        .find_map(|key| non_empty_str(payload.get(*key)?))
}

fn nested_token(payload: &Value) -> Option<String> {
    payload
        .as_object()?
        .values()
        .filter(|field| field.is_object())
        .find_map(|field| non_empty_str(field.get(NESTED_CANCEL_TOKEN_KEY)?))
}
