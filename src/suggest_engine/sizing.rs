//! Sizing arithmetic: translate a teaching `size_tag` into a chip amount,
//! for both bet semantics (`size_to_amount`) and raise-to semantics
//! (`raise_to_amount`). The service clamps the result into the legal
//! `[min,max]` window afterwards — this module never clamps, it only
//! computes the target.

use super::models::SizeTag;

/// Bet semantics: `pot * {third:1/3, half:1/2, two_third:2/3, pot:1,
/// all_in:∞}`, rounded to nearest integer, floored at 1.
///
/// `all_in` has no pot-relative target; the caller is expected to use the
/// legal action's `max` directly rather than calling this for `all_in` —
/// this function returns `pot` as a conservative stand-in so it always
/// returns a positive integer when `pot > 0`.
pub fn size_to_amount(pot: i64, size_tag: SizeTag) -> i64 {
    let mult = match size_tag {
        SizeTag::Third => 1.0 / 3.0,
        SizeTag::Half => 0.5,
        SizeTag::TwoThird => 2.0 / 3.0,
        SizeTag::Pot => 1.0,
        SizeTag::AllIn => 1.0,
    };
    let raw = (pot as f64 * mult).round() as i64;
    raw.max(1)
}

/// Raise-to semantics: `target = last_bet + pot_now * mult`, capped at
/// `cap_ratio * eff_stack` when an effective stack is known. Minimum
/// re-open is enforced by the service against `raise.min`, not here.
pub fn raise_to_amount(
    pot_now: i64,
    last_bet: i64,
    size_tag: SizeTag,
    eff_stack: Option<i64>,
    cap_ratio: f64,
) -> i64 {
    let mult = match size_tag {
        SizeTag::Third => 1.0 / 3.0,
        SizeTag::Half => 0.5,
        SizeTag::TwoThird => 2.0 / 3.0,
        SizeTag::Pot => 1.0,
        SizeTag::AllIn => 1.0,
    };
    let target = last_bet as f64 + pot_now as f64 * mult;
    let target = target.round() as i64;
    let target = target.max(1);

    match eff_stack {
        Some(stack) => {
            let cap = ((stack as f64) * cap_ratio).floor() as i64;
            target.min(cap.max(1))
        }
        None => target,
    }
}
