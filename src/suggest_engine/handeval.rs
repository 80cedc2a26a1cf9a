//! Hand-strength classification: the preflop 5-tier grade (used by the v0
//! baseline and the flop-bucket fallback), coarse preflop tags, draw
//! detection, and the flop 6-bucket teaching classification
//! (`Observation.hand_class` on the flop). Reuses the same flush/straight
//! detection primitives as board-texture classification, generalized from
//! "board only" to "hero's made hand on this board".

use super::cards::{Card, Suit};
use super::models::{FlopHandClass, PreflopHandClass};

/// 5-tier preflop hand-strength grade (Premium/Strong/Playable/Marginal/Trash)
/// — used by the v0 baseline policies and as the flop fallback's "was hero
/// ever a raiser-range hand".
pub fn classify_hand(hand: [Card; 2]) -> PreflopHandClass {
    let (r1, r2) = {
        let mut ranks = [hand[0].rank.0, hand[1].rank.0];
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        (ranks[0], ranks[1])
    };
    let suited = hand[0].suit == hand[1].suit;
    let pair = r1 == r2;

    if pair {
        return match r1 {
            14 | 13 | 12 => PreflopHandClass::Premium,
            11 | 10 => PreflopHandClass::Strong,
            7..=9 => PreflopHandClass::Playable,
            _ => PreflopHandClass::Marginal,
        };
    }

    match (r1, r2, suited) {
        (14, 13, true) => PreflopHandClass::Premium,
        (14, 13, false) => PreflopHandClass::Strong,
        (14, 12, true) => PreflopHandClass::Strong,
        (14, 12, false) => PreflopHandClass::Strong,
        (14, 11, true) => PreflopHandClass::Playable,
        (14, r, true) if r >= 9 => PreflopHandClass::Playable,
        (13, 12, true) => PreflopHandClass::Playable,
        (13, 12, false) => PreflopHandClass::Marginal,
        (r1, r2, true) if r1 >= 9 && r1 - r2 == 1 => PreflopHandClass::Playable,
        (r1, _, _) if r1 <= 9 => PreflopHandClass::Trash,
        _ => PreflopHandClass::Marginal,
    }
}

/// Coarse preflop tags consumed by the v0 baseline open/call ranges.
pub fn preflop_tags(hand: [Card; 2]) -> Vec<String> {
    let mut tags = Vec::new();
    let (a, b) = (hand[0], hand[1]);
    let suited = a.suit == b.suit;
    let (hi, lo) = if a.rank.0 >= b.rank.0 { (a, b) } else { (b, a) };

    if hi.rank == lo.rank {
        tags.push("pair".to_string());
    }
    if hi.rank.0 == 14 && suited {
        tags.push("Ax_suited".to_string());
    }
    let broadway = |r: u8| r >= 10;
    if suited && broadway(hi.rank.0) && broadway(lo.rank.0) {
        tags.push("suited_broadway".to_string());
    }
    if !suited && hi.rank.0 != lo.rank.0 && broadway(hi.rank.0) && broadway(lo.rank.0) {
        tags.push("broadway_offsuit".to_string());
    }
    if tags.is_empty() {
        tags.push("other".to_string());
    }
    tags
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// True if 2+ board cards share a suit.
pub fn has_flush_draw(board: &[Card]) -> bool {
    let mut counts = [0u8; 4];
    for c in board {
        counts[suit_index(c.suit)] += 1;
        if counts[suit_index(c.suit)] >= 2 {
            return true;
        }
    }
    false
}

/// True if the board has 2+ cards within a tight rank span, indicating
/// open-ender or gutshot potential (the board-only half of `is_connected`).
pub fn has_straight_draw(board: &[Card]) -> bool {
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    ranks.sort_unstable();
    ranks.dedup();
    for w in ranks.windows(2) {
        if w[1] - w[0] == 1 {
            return true;
        }
    }
    if ranks.len() >= 3 {
        for w in ranks.windows(3) {
            if w[2] - w[0] <= 4 {
                return true;
            }
        }
    }
    false
}

/// True if hero holds a card in a suit with 2+ copies on the board.
pub fn hero_has_flush_draw(hand: [Card; 2], board: &[Card]) -> bool {
    let mut counts = [0u8; 4];
    for c in board {
        counts[suit_index(c.suit)] += 1;
    }
    hand.iter().any(|c| counts[suit_index(c.suit)] >= 2)
}

/// True if hero's hole cards participate in the board's straight draw.
pub fn hero_has_straight_draw(hand: [Card; 2], board: &[Card]) -> bool {
    if !has_straight_draw(board) {
        return false;
    }
    let board_ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    hand.iter().any(|hc| {
        board_ranks.iter().any(|&br| {
            let diff = if hc.rank.0 > br { hc.rank.0 - br } else { br - hc.rank.0 };
            diff <= 3
        })
    })
}

/// Classify hero's made hand + draw potential on the flop into the six
/// teaching buckets. No equity
/// calculator is used — this is a deterministic, coarse classification
/// consistent with §1's "no search/equity" non-goal.
pub fn classify_flop_hand(hand: [Card; 2], board: &[Card]) -> FlopHandClass {
    let board_ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    let mut sorted_board = board_ranks.clone();
    sorted_board.sort_unstable_by(|a, b| b.cmp(a));
    let top_board = sorted_board.first().copied().unwrap_or(0);
    let second_board = sorted_board.get(1).copied().unwrap_or(0);

    let (hi, lo) = if hand[0].rank.0 >= hand[1].rank.0 {
        (hand[0].rank.0, hand[1].rank.0)
    } else {
        (hand[1].rank.0, hand[0].rank.0)
    };
    let pocket_pair = hi == lo;

    let hole_board_pairs: Vec<u8> = [hi, lo]
        .into_iter()
        .filter(|r| board_ranks.contains(r))
        .collect();

    let is_two_pair_plus = {
        if hole_board_pairs.len() >= 2 {
            true // both hole cards pair the board: two pair or better
        } else if pocket_pair && hi > top_board {
            false // overpair, not two-pair — handled below
        } else if pocket_pair && board_ranks.contains(&hi) {
            true // set
        } else {
            // trips: one hole card pairs a board rank that itself appears
            // twice on the board (rare on a 3-card flop, kept for turn/river).
            hole_board_pairs
                .iter()
                .any(|r| board_ranks.iter().filter(|br| *br == r).count() >= 2)
        }
    };

    if is_two_pair_plus {
        return FlopHandClass::ValueTwoPairPlus;
    }

    let overpair = pocket_pair && hi > top_board;
    let top_pair = hole_board_pairs.contains(&top_board);
    let second_pair = hole_board_pairs.contains(&second_board) && second_board != top_board;
    let strong_kicker = |kicker: u8| kicker >= 11; // Jack or better

    if overpair {
        return FlopHandClass::OverpairOrTopPairStrongKicker;
    }
    if top_pair {
        let kicker = if hi == top_board { lo } else { hi };
        if strong_kicker(kicker) {
            return FlopHandClass::OverpairOrTopPairStrongKicker;
        }
        return FlopHandClass::TopPairWeakOrSecondPair;
    }
    if second_pair {
        return FlopHandClass::TopPairWeakOrSecondPair;
    }
    if !hole_board_pairs.is_empty() || pocket_pair {
        return FlopHandClass::MiddlePairOrThirdMinus;
    }

    if hero_has_flush_draw(hand, board) || hero_has_straight_draw(hand, board) {
        return FlopHandClass::StrongDraw;
    }

    FlopHandClass::WeakDrawOrAir
}
