//! Response-shape types. `meta`/`debug` are represented as JSON maps rather than rigid
//! structs: each policy populates a different subset of keys, and the
//! service's "drop keys whose value is null" rule is easiest to express by
//! simply never inserting the absent ones.

use serde::Serialize;
use serde_json::{Map, Value};

use super::codes::RationaleItem;

/// `{action, amount?}` — the policy's recommendation before/after sizing
/// and clamping.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuggestedAction {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

pub type Meta = Map<String, Value>;

/// `build_suggestion`'s return value.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub hand_id: String,
    pub actor: usize,
    pub suggested: SuggestedAction,
    pub rationale: Vec<RationaleItem>,
    pub policy: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

/// Insert `key: value` into `meta` only when `value` isn't an explicit
/// `Value::Null` — keeps the "drop null keys" rule in one place.
pub fn meta_insert(meta: &mut Meta, key: &str, value: Value) {
    if !value.is_null() {
        meta.insert(key.to_string(), value);
    }
}
