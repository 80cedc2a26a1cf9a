//! Error kinds surfaced by the suggest service. Only the
//! three kinds that can't be recovered locally become error variants;
//! `ANALYSIS_MISSING` and `CONFIG_MISSING_OR_BAD` are always absorbed into a
//! rationale code instead (`W_ANALYSIS`, `CFG_FALLBACK_USED`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestError {
    /// The caller is not the to-act seat. Surfaces as HTTP 409 at the
    /// transport boundary (out of scope here).
    #[error("actor {actor} is not to-act (to_act={to_act})")]
    NotActorsTurn { actor: usize, to_act: usize },

    /// The hand engine reported an empty legal-action set. Surfaces as 422.
    #[error("no legal actions for hand {hand_id}")]
    NoLegalActions { hand_id: String },

    /// A policy produced an action absent from the legal set — an internal
    /// bug, not a recoverable game state. Surfaces as 422 and is logged.
    #[error("policy {policy} produced illegal action {action} (legal: {legal:?})")]
    IllegalSuggestion { policy: String, action: String, legal: Vec<String> },
}
