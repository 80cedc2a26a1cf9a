//! 169-grid starting-hand combo labels.
//!
//! A combo is one of the 169 distinct strategic equivalence classes for a
//! two-card starting hand: 13 pocket pairs ("AA".."22"), 78 suited
//! combinations ("AKs".."32s"), and 78 offsuit combinations ("AKo".."32o").
//! Preflop tables (`configs/preflop/*.json`) are keyed by these labels.

use super::cards::Card;

/// Map a two-card hole to its 169-grid label. Returns `""` if the cards
/// can't be parsed.
pub fn combo_from_hole(hole: &[String]) -> String {
    if hole.len() != 2 {
        return String::new();
    }
    let (a, b) = match (Card::parse(&hole[0]), Card::parse(&hole[1])) {
        (Some(a), Some(b)) => (a, b),
        _ => return String::new(),
    };
    combo_label(a, b)
}

/// Same as [`combo_from_hole`] but takes already-parsed cards.
pub fn combo_label(a: Card, b: Card) -> String {
    let (hi, lo) = if a.rank >= b.rank { (a, b) } else { (b, a) };
    if hi.rank == lo.rank {
        return format!("{}{}", hi.rank, hi.rank);
    }
    let suited = hi.suit == lo.suit;
    format!("{}{}{}", hi.rank, lo.rank, if suited { "s" } else { "o" })
}

/// All 169 combo labels, high-to-low, pairs first. Used to build default
/// range tables and to drive property tests over the full grid.
pub fn all_combos() -> Vec<String> {
    const RANKS: [u8; 13] = [14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2];
    let mut out = Vec::with_capacity(169);
    for &r in RANKS.iter() {
        out.push(format!("{r}{r}", r = rank_sym(r)));
    }
    for i in 0..RANKS.len() {
        for j in (i + 1)..RANKS.len() {
            let hi = rank_sym(RANKS[i]);
            let lo = rank_sym(RANKS[j]);
            out.push(format!("{hi}{lo}s"));
            out.push(format!("{hi}{lo}o"));
        }
    }
    out
}

fn rank_sym(v: u8) -> &'static str {
    match v {
        2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
        7 => "7", 8 => "8", 9 => "9", 10 => "T",
        11 => "J", 12 => "Q", 13 => "K", 14 => "A",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suited_and_offsuit_and_pairs() {
        assert_eq!(combo_from_hole(&["Ah".into(), "Kh".into()]), "AKs");
        assert_eq!(combo_from_hole(&["Ah".into(), "Kd".into()]), "AKo");
        assert_eq!(combo_from_hole(&["Ah".into(), "Ad".into()]), "AA");
    }

    #[test]
    fn order_independent() {
        assert_eq!(
            combo_from_hole(&["Kd".into(), "Ah".into()]),
            combo_from_hole(&["Ah".into(), "Kd".into()])
        );
    }

    #[test]
    fn unknown_on_bad_input() {
        assert_eq!(combo_from_hole(&["Zz".into(), "Ah".into()]), "");
        assert_eq!(combo_from_hole(&["Ah".into()]), "");
    }

    #[test]
    fn grid_has_169_unique_labels() {
        let combos = all_combos();
        assert_eq!(combos.len(), 169);
        let unique: std::collections::HashSet<_> = combos.iter().collect();
        assert_eq!(unique.len(), 169);
    }
}
