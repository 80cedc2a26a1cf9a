//! Observation Builder.
//!
//! Turns a raw game-state snapshot plus an actor index into the frozen
//! [`Observation`] every policy consumes. Pure and total: it never panics or
//! returns an error, falling back to conservative values (`W_ANALYSIS`,
//! `hand_class="unknown"`) on anything it can't classify.

use std::collections::BTreeSet;

use super::cards::parse_cards;
use super::codes::{rationale, RationaleCode, RationaleItem};
use super::combo::combo_from_hole;
use super::handeval::{classify_flop_hand, classify_hand, preflop_tags};
use super::models::{
    ActionKind, BoardTexture, FacingSizeTag, FlopHandClass, LegalAction, PotType, Role,
    SprBucket, Street, TableMode,
};
use super::texture::{
    classify_flop, derive_facing_size_tag, is_ip, nut_advantage, range_advantage, spr_bucket,
};

/// One player's view of the table, as the hand engine exposes it.
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub hole: Vec<String>,
    pub stack: i64,
    pub invested_street: i64,
}

/// A single preflop/postflop action from the hand history, used to infer
/// `pfr_seat` and the preflop raise count.
#[derive(Debug, Clone, Copy)]
pub struct ActionEvent {
    pub street: Street,
    pub actor: usize,
    pub action: ActionKind,
}

/// The raw game-state snapshot the hand engine hands to the suggest service.
#[derive(Debug, Clone)]
pub struct GameState {
    pub hand_id: String,
    pub street: Street,
    pub bb: i64,
    pub pot: i64,
    pub board: Vec<String>,
    pub button: usize,
    pub players: [PlayerView; 2],
    pub to_act: usize,
    pub last_bet: i64,
    pub events: Vec<ActionEvent>,
}

/// Frozen input to every policy. Built once per
/// decision and passed by reference.
#[derive(Debug, Clone)]
pub struct Observation {
    pub hand_id: String,
    pub actor: usize,
    pub street: Street,
    pub bb: i64,
    pub pot: i64,
    pub pot_now: i64,
    pub to_call: i64,
    pub table_mode: TableMode,
    pub ip: bool,
    pub button: usize,
    pub acts: Vec<LegalAction>,
    pub tags: Vec<String>,
    pub hand_class: String,
    pub combo: String,
    pub board_texture: BoardTexture,
    pub spr_bucket: SprBucket,
    pub pot_type: PotType,
    pub role: Role,
    pub range_adv: bool,
    pub nut_adv: bool,
    pub facing_size_tag: FacingSizeTag,
}

impl Observation {
    /// The bet/raise/allin action carrying the `to_call` figure, if facing
    /// one; `0` when `acts` offers no `call`.
    pub fn to_call_from_acts(acts: &[LegalAction]) -> i64 {
        acts.iter()
            .find(|a| a.action == ActionKind::Call)
            .and_then(|a| a.to_call)
            .unwrap_or(0)
    }

    pub fn find_action(&self, kind: ActionKind) -> Option<&LegalAction> {
        self.acts.iter().find(|a| a.action == kind)
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.find_action(kind).is_some()
    }
}

/// Most recent preflop aggressor's seat, inferred from `events`. `None` if nobody has opened (checked-through/limped so
/// far, or we're still preflop with no action yet).
fn infer_pfr_seat(events: &[ActionEvent]) -> Option<usize> {
    events
        .iter()
        .filter(|e| e.street == Street::Preflop && e.action.is_sized())
        .last()
        .map(|e| e.actor)
}

/// Number of preflop raises (bet/raise/allin actions on the preflop street)
/// seen so far, used to infer `pot_type`.
fn preflop_raise_count(events: &[ActionEvent]) -> usize {
    events.iter().filter(|e| e.street == Street::Preflop && e.action.is_sized()).count()
}

fn infer_pot_type(events: &[ActionEvent]) -> PotType {
    match preflop_raise_count(events) {
        0 => PotType::Limped,
        1 => PotType::SingleRaised,
        _ => PotType::Threebet,
    }
}

/// Build the frozen [`Observation`] for `actor` from a raw [`GameState`] and
/// its pre-computed legal-action set. `acts` is passed in
/// rather than recomputed here since the service already called the hand
/// engine for it.
pub fn build_observation(gs: &GameState, actor: usize, acts: Vec<LegalAction>) -> (Observation, Vec<RationaleItem>) {
    let mut notes = Vec::new();

    let opponent = 1 - actor;
    let pot_now = gs.pot + gs.players[0].invested_street + gs.players[1].invested_street;
    let to_call = Observation::to_call_from_acts(&acts);

    let eff_stack = gs.players[actor].stack.min(gs.players[opponent].stack);
    let spr = if pot_now > 0 { eff_stack as f64 / pot_now as f64 } else { f64::NAN };
    let spr_bkt = spr_bucket(spr);

    let board_texture = if gs.street == Street::Flop {
        match parse_cards(&gs.board) {
            Some(cards) => classify_flop(&cards),
            None => BoardTexture::Na,
        }
    } else {
        BoardTexture::Na
    };

    let pfr_seat = infer_pfr_seat(&gs.events);
    let role = match pfr_seat {
        Some(seat) if seat == actor => Role::Pfr,
        Some(_) => Role::Caller,
        None => Role::Na,
    };

    let range_adv = range_advantage(board_texture, role);
    let nut_adv = nut_advantage(board_texture, role);
    let facing_size_tag = derive_facing_size_tag(to_call, pot_now);
    let pot_type = infer_pot_type(&gs.events);
    let ip = is_ip(actor, gs.button, gs.street);

    let hole = &gs.players[actor].hole;
    let combo = combo_from_hole(hole);

    let (tags, hand_class) = match parse_cards(hole) {
        Some(cards) if cards.len() == 2 => {
            let hand = [cards[0], cards[1]];
            if gs.street == Street::Flop {
                if let Some(board) = parse_cards(&gs.board) {
                    if board.len() >= 3 {
                        let bucket = classify_flop_hand(hand, &board);
                        (preflop_tags(hand), bucket.as_str().to_string())
                    } else {
                        notes.push(rationale(RationaleCode::WAnalysis));
                        (vec!["unknown".to_string()], "unknown".to_string())
                    }
                } else {
                    notes.push(rationale(RationaleCode::WAnalysis));
                    (vec!["unknown".to_string()], "unknown".to_string())
                }
            } else {
                let grade = classify_hand(hand);
                (preflop_tags(hand), grade.as_str().to_string())
            }
        }
        _ => {
            notes.push(rationale(RationaleCode::WAnalysis));
            (vec!["unknown".to_string()], "unknown".to_string())
        }
    };

    let obs = Observation {
        hand_id: gs.hand_id.clone(),
        actor,
        street: gs.street,
        bb: gs.bb,
        pot: gs.pot,
        pot_now,
        to_call,
        table_mode: TableMode::Hu,
        ip,
        button: gs.button,
        acts,
        tags,
        hand_class,
        combo,
        board_texture,
        spr_bucket: spr_bkt,
        pot_type,
        role,
        range_adv,
        nut_adv,
        facing_size_tag,
    };
    (obs, notes)
}

/// Every coarse preflop tag the analyser knows about, used by tests/
/// fixtures that need a deduplicated scan over `Observation::tags`.
#[allow(dead_code)]
pub fn known_tags() -> BTreeSet<&'static str> {
    ["pair", "Ax_suited", "suited_broadway", "broadway_offsuit", "other", "unknown"]
        .into_iter()
        .collect()
}
