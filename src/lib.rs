//! # suggest_engine
//!
//! The Suggest Engine of a heads-up No-Limit Hold'em teaching service:
//! given a snapshot of a hand at the moment one player must act, it returns
//! a legal action recommendation, an ordered rationale, a policy
//! identifier, a confidence score, and optional teaching metadata.
//!
//! ## Quick start
//!
//! ```rust
//! use suggest_engine::{build_suggestion, ActionEvent, GameState, LegalAction, PlayerView, Street};
//!
//! let gs = GameState {
//!     hand_id: "hand-1".into(),
//!     street: Street::Preflop,
//!     bb: 2,
//!     pot: 3,
//!     board: vec![],
//!     button: 0,
//!     players: [
//!         PlayerView { hole: vec!["Ah".into(), "Kh".into()], stack: 200, invested_street: 1 },
//!         PlayerView { hole: vec!["7c".into(), "2d".into()], stack: 200, invested_street: 2 },
//!     ],
//!     to_act: 0,
//!     last_bet: 2,
//!     events: Vec::<ActionEvent>::new(),
//! };
//! let acts = vec![LegalAction::check(), LegalAction::bet(1, 200)];
//! let suggestion = build_suggestion(&gs, 0, acts, None).expect("legal decision");
//! println!("{} -> {:?}", suggestion.policy, suggestion.suggested);
//! ```

pub mod suggest_engine;

pub use suggest_engine::{
    build_suggestion, ActionEvent, ActionKind, BoardTexture, ConfigRoot, FacingSizeTag,
    FlopHandClass, GameState, LegalAction, Modes, PlayerView, PolicyConfig, PolicyVersion,
    PotType, PreflopHandClass, RationaleCode, RationaleItem, Role, SizeBucket, SizeTag,
    SprBucket, Strategy, Street, SuggestError, Suggestion, TableMode,
};

#[cfg(test)]
mod tests;
