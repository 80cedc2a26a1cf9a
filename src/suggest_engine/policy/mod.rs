//! The four policy families plus the `(version, street)` registry dispatch.
//!
//! Every policy is a plain function `(&Observation, &PolicyConfig) ->
//! PolicyOutcome` — a capability, not a trait object or class hierarchy.
//! `PolicyOutcome` carries a `(suggested action, rationale, policy_name)`
//! triple, generalized with an optional `size_tag` and a `meta` map.

pub mod flop_v0;
pub mod flop_v1;
pub mod preflop_v0;
pub mod preflop_v1;

use super::codes::RationaleItem;
use super::models::{ActionKind, SizeTag};
use super::suggestion::Meta;

/// A policy's raw decision, before the service resolves sizing and clamps
/// to the legal window.
#[derive(Debug, Clone)]
pub struct PolicyOutcome {
    pub action: ActionKind,
    /// Already-resolved chip amount, when the policy computed one itself.
    pub amount: Option<i64>,
    /// A teaching size tag for the service to resolve via `sizing::*`.
    pub size_tag: Option<SizeTag>,
    pub rationale: Vec<RationaleItem>,
    pub policy: &'static str,
    pub meta: Meta,
}

impl PolicyOutcome {
    pub fn new(action: ActionKind, policy: &'static str) -> Self {
        PolicyOutcome {
            action,
            amount: None,
            size_tag: None,
            rationale: Vec::new(),
            policy,
            meta: Meta::new(),
        }
    }

    pub fn with_rationale(mut self, item: RationaleItem) -> Self {
        self.rationale.push(item);
        self
    }

    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_size_tag(mut self, tag: SizeTag) -> Self {
        self.size_tag = Some(tag);
        self
    }
}

// The actual `(version, street)` → policy-fn registry lives in
// `service::select_policy`: the four policy functions below take different
// table/config inputs (preflop needs the open/vs range tables, flop needs
// the rule tree), so the registry is expressed as a `match` rather than a
// `HashMap` of uniformly-shaped function pointers — dispatch by key, in the
// shape that actually type-checks.
