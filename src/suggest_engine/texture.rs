//! Board texture, SPR bucketing, position, and the range/nut-advantage
//! heuristics. Companion to `combo.rs` — together they are "Combo & Texture
//! Utilities".

use super::cards::Card;
use super::models::{BoardTexture, FacingSizeTag, Role, SizeBucket, SprBucket};

/// Classify a board's texture.
///
/// - Fewer than 3 cards → `na`.
/// - Paired, or three suited, or (connected ∧ two suited) → `wet`.
/// - Two suited, or connected (max adjacent gap ≤1, or one gap ≤2) → `semi`.
/// - Otherwise → `dry`.
pub fn classify_flop(board: &[Card]) -> BoardTexture {
    if board.len() < 3 {
        return BoardTexture::Na;
    }

    let paired = {
        let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
        ranks.sort_unstable();
        ranks.windows(2).any(|w| w[0] == w[1])
    };

    let suit_counts = suit_histogram(board);
    let max_suited = *suit_counts.iter().max().unwrap_or(&0);
    let three_suited = max_suited >= 3;
    let two_suited = max_suited >= 2;

    let connected = is_connected(board);

    if paired || three_suited || (connected && two_suited) {
        return BoardTexture::Wet;
    }
    if two_suited || connected {
        return BoardTexture::Semi;
    }
    BoardTexture::Dry
}

fn suit_histogram(board: &[Card]) -> [u8; 4] {
    let mut counts = [0u8; 4];
    for c in board {
        let idx = match c.suit {
            super::cards::Suit::Clubs => 0,
            super::cards::Suit::Diamonds => 1,
            super::cards::Suit::Hearts => 2,
            super::cards::Suit::Spades => 3,
        };
        counts[idx] += 1;
    }
    counts
}

/// Connected: max adjacent gap ≤1 across all ranks present, or at least one
/// pair of ranks with a gap ≤2.
fn is_connected(board: &[Card]) -> bool {
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    ranks.sort_unstable();
    ranks.dedup();
    if ranks.len() < 2 {
        return false;
    }
    let max_adjacent_gap = ranks.windows(2).map(|w| w[1] - w[0]).max().unwrap_or(u8::MAX);
    if max_adjacent_gap <= 1 {
        return true;
    }
    ranks.windows(2).any(|w| w[1] - w[0] <= 2)
}

/// Bucket a stack-to-pot ratio. Non-finite or non-positive pot → `na`.
pub fn spr_bucket(spr: f64) -> SprBucket {
    if !spr.is_finite() || spr <= 0.0 {
        return SprBucket::Na;
    }
    if spr <= 3.0 {
        SprBucket::Low
    } else if spr <= 6.0 {
        SprBucket::Mid
    } else {
        SprBucket::High
    }
}

/// Is `actor` in position? HU preflop: SB = button = OOP (acts first every
/// preflop betting round except when blinds are posted). HU postflop: button
/// = IP (acts last).
pub fn is_ip(actor: usize, button: usize, street: super::models::Street) -> bool {
    use super::models::Street;
    let is_button = actor == button;
    match street {
        Street::Preflop => !is_button,
        Street::Flop | Street::Turn | Street::River => is_button,
    }
}

/// Discretize how much of the pot hero is being asked to call.
/// ratio = to_call / pot_now; ≤1/3 → third; ≤1/2 → half; >1/2 → two_third+;
/// to_call == 0 or pot_now not positive → na.
pub fn derive_facing_size_tag(to_call: i64, pot_now: i64) -> FacingSizeTag {
    if to_call <= 0 || pot_now <= 0 {
        return FacingSizeTag::Na;
    }
    let ratio = to_call as f64 / pot_now as f64;
    if ratio <= 1.0 / 3.0 {
        FacingSizeTag::Third
    } else if ratio <= 0.5 {
        FacingSizeTag::Half
    } else {
        FacingSizeTag::TwoThirdPlus
    }
}

/// Bucket a raise size expressed in BB, used both for BB-vs-SB-open facing
/// sizes and SB-vs-BB-3bet facing sizes.
pub fn bucket_facing_size(to_call_bb: f64, small_le: f64, mid_le: f64) -> SizeBucket {
    if to_call_bb <= small_le {
        SizeBucket::Small
    } else if to_call_bb <= mid_le {
        SizeBucket::Mid
    } else {
        SizeBucket::Large
    }
}

/// Heuristic range-advantage flag: the preflop raiser's range dominates a
/// dry board (more broadway/overpair equity than a flat-calling range).
/// Deterministic lookup, no randomness.
pub fn range_advantage(texture: BoardTexture, role: Role) -> bool {
    role == Role::Pfr && texture == BoardTexture::Dry
}

/// Heuristic nut-advantage flag: the preflop raiser's range contains
/// disproportionately more of the nutted combos on textures connected to
/// broadway cards (semi/wet boards favour the range with more big pairs
/// and suited broadways — typically the raiser's).
pub fn nut_advantage(texture: BoardTexture, role: Role) -> bool {
    role == Role::Pfr && matches!(texture, BoardTexture::Semi | BoardTexture::Wet)
}
