//! Suggest Engine — heads-up NLHE teaching action recommendations.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |----------------|---------|
//! | `models`       | Shared enums and value types: streets, actions, the legal-action window, discretizations |
//! | `cards`        | Card/rank/suit parsing |
//! | `combo`        | 169-grid starting-hand combo labels |
//! | `handeval`     | Preflop hand-strength grade, flop 6-bucket classification, draw detection |
//! | `texture`      | Board texture, SPR bucketing, position, range/nut-advantage heuristics |
//! | `sizing`       | `size_tag` → chip amount translation (bet and raise-to semantics) |
//! | `codes`        | The closed rationale-code enumeration and its default messages |
//! | `config`       | Config Loader & Table Cache: versioned JSON tables, `PolicyConfig`, `Modes` |
//! | `observation`  | Game-state snapshot → frozen `Observation` |
//! | `rollout`      | `stable_roll` — deterministic hash-based v1 rollout |
//! | `suggestion`   | `Suggestion`/`Meta`/response-shape types |
//! | `policy`       | The four policy functions (preflop v0/v1, flop v0.3/v1) + registry |
//! | `service`      | `build_suggestion` — the orchestrating entry point |
//! | `error`        | `SuggestError` — the three propagated error kinds |

pub mod cards;
pub mod codes;
pub mod combo;
pub mod config;
pub mod error;
pub mod handeval;
pub mod models;
pub mod observation;
pub mod policy;
pub mod rollout;
pub mod service;
pub mod sizing;
pub mod suggestion;
pub mod texture;

pub use codes::{rationale, RationaleCode, RationaleItem};
pub use config::{ConfigRoot, Modes, PolicyConfig};
pub use error::SuggestError;
pub use models::{
    ActionKind, BoardTexture, FacingSizeTag, FlopHandClass, LegalAction, PolicyVersion, PotType,
    PreflopHandClass, Role, SizeBucket, SizeTag, SprBucket, Strategy, Street, TableMode,
};
pub use observation::{ActionEvent, GameState, Observation, PlayerView};
pub use service::build_suggestion;
pub use suggestion::Suggestion;
