//! Preflop v1: table-driven SB RFI, BB defend vs SB
//! open, and an optional SB 4-bet vs BB 3-bet path. Priority within each
//! branch is 3bet > call > fold.
//!
//! **Open question resolution**: the 4-bet branch additionally requires
//! `pot_type == Threebet` before it engages. Without this, "SB facing a
//! to_call>0 with no `bet` action offered" is indistinguishable from plain
//! RFI (preflop after blinds only ever offers `raise`, never `bet`), which
//! would misroute first-in opens into the 4-bet path whenever
//! `enable_4bet` is set.

use super::super::codes::{rationale, rationale_data, RationaleCode};
use super::super::config::{Modes, OpenTable, VsTable};
use super::super::models::{ActionKind, PotType};
use super::super::observation::Observation;
use super::super::suggestion::{meta_insert, Meta};
use super::super::texture::bucket_facing_size;
use super::PolicyOutcome;

const NAME: &str = "preflop_v1";

fn eff_stack_bb(obs: &Observation) -> f64 {
    obs.spr_bucket.approx_eff_stack_bb()
}

fn pick_betlike(obs: &Observation) -> Option<ActionKind> {
    if obs.has_action(ActionKind::Bet) {
        Some(ActionKind::Bet)
    } else if obs.has_action(ActionKind::Raise) {
        Some(ActionKind::Raise)
    } else {
        None
    }
}

fn lifted_to_min(target: i64, min: Option<i64>) -> (i64, bool) {
    match min {
        Some(min) if target < min => (min, true),
        _ => (target, false),
    }
}

/// Prefer cheap limp (`to_call ≤ bb`) then check then fold, tagged
/// `CFG_FALLBACK_USED` — the config-missing fallback for a bad `open` table.
fn cfg_fallback_open(obs: &Observation) -> PolicyOutcome {
    if obs.has_action(ActionKind::Call) && obs.to_call <= obs.bb {
        return PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::CfgFallbackUsed));
    }
    if obs.has_action(ActionKind::Check) {
        return PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::CfgFallbackUsed));
    }
    PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale(RationaleCode::CfgFallbackUsed))
}

/// Fold or check, tagged `CFG_FALLBACK_USED` — the config-missing fallback
/// for a bad `vs` table bucket.
fn cfg_fallback_vs(obs: &Observation) -> PolicyOutcome {
    if obs.has_action(ActionKind::Fold) {
        return PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale(RationaleCode::CfgFallbackUsed));
    }
    PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::CfgFallbackUsed))
}

/// Generic "no specific signal" fallback: prefer call, then fold, then
/// check.
fn generic_fallback(obs: &Observation) -> PolicyOutcome {
    if obs.has_action(ActionKind::Call) {
        return PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::SafeCheck));
    }
    if obs.has_action(ActionKind::Fold) {
        return PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale(RationaleCode::SafeCheck));
    }
    PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::SafeCheck))
}

/// Branch 1: SB facing BB's 3-bet, optional 4-bet attack.
fn four_bet_path(obs: &Observation, modes: &Modes, vs: &VsTable) -> PolicyOutcome {
    if vs.version == 0 {
        return cfg_fallback_vs(obs);
    }

    let i_opp = (obs.pot_now + obs.to_call) as f64 / 2.0;
    let threebet_to_bb = i_opp / obs.bb as f64;
    let bucket = bucket_facing_size(threebet_to_bb, modes.threebet_bucket_small_le, modes.threebet_bucket_mid_le);

    let node = match vs.sb_vs_bb_3bet.get(bucket.as_str()) {
        Some(n) => n,
        None => return cfg_fallback_vs(obs),
    };

    if node.reraise.contains(&obs.combo) && obs.has_action(ActionKind::Raise) {
        let raise = obs.find_action(ActionKind::Raise).unwrap();
        let cap_bb = (eff_stack_bb(obs) * modes.cap_ratio_4b).floor();
        let target_bb = (threebet_to_bb * modes.fourbet_ip_mult).round();
        let fourbet_to_bb = cap_bb.min(target_bb);
        let target_amount = (fourbet_to_bb * obs.bb as f64).round() as i64;
        let (amount, lifted) = lifted_to_min(target_amount, raise.min);
        let amount = amount.min(raise.max.unwrap_or(amount));

        let mut meta: Meta = Meta::new();
        meta_insert(&mut meta, "fourbet_to_bb", serde_json::json!(fourbet_to_bb));
        meta_insert(&mut meta, "cap_bb", serde_json::json!(cap_bb));
        meta_insert(&mut meta, "bucket", serde_json::json!(bucket.as_str()));
        meta_insert(&mut meta, "combo", serde_json::json!(obs.combo));

        let mut out = PolicyOutcome::new(ActionKind::Raise, NAME).with_amount(amount);
        out.meta = meta;
        if lifted {
            out = out.with_rationale(rationale(RationaleCode::PfAttack4betMinRaiseAdjusted));
        }
        return out.with_rationale(rationale(RationaleCode::PfAttack4bet));
    }

    if node.call.contains(&obs.combo) && obs.has_action(ActionKind::Call) {
        let mut out = PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::PfDefendPriceOk));
        meta_insert(&mut out.meta, "bucket", serde_json::json!(bucket.as_str()));
        meta_insert(&mut out.meta, "combo", serde_json::json!(obs.combo));
        return out;
    }

    generic_fallback(obs)
}

/// Branch 2: SB first-in, raise-or-fold-or-limp from the `open` table.
fn rfi(obs: &Observation, modes: &Modes, open: &OpenTable) -> PolicyOutcome {
    if open.version == 0 || open.sb.is_empty() {
        return cfg_fallback_open(obs);
    }

    if open.sb.contains(&obs.combo) {
        if let Some(kind) = pick_betlike(obs) {
            let action = obs.find_action(kind).unwrap();
            let target = (modes.open_bb * obs.bb as f64).round() as i64;
            let min = action.min.unwrap_or(target);
            let max = action.max.unwrap_or(target);
            let amount = target.clamp(min, max);
            let mut out = PolicyOutcome::new(kind, NAME).with_amount(amount);
            meta_insert(&mut out.meta, "open_bb", serde_json::json!(modes.open_bb));
            meta_insert(&mut out.meta, "combo", serde_json::json!(obs.combo));
            return out.with_rationale(rationale(RationaleCode::PfOpenRangeHit));
        }
        // In range but nothing to raise with: note it, then fall through to
        // the cheap-limp/check/fold ladder below.
        let mut notes = vec![rationale(RationaleCode::PfNoLegalRaise)];
        if obs.has_action(ActionKind::Call) && obs.to_call <= obs.bb {
            let mut out = PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::PfLimpCompleteBlind));
            out.rationale.splice(0..0, notes.drain(..));
            return out;
        }
        if obs.has_action(ActionKind::Check) {
            let mut out = PolicyOutcome::new(ActionKind::Check, NAME);
            out.rationale.append(&mut notes);
            return out;
        }
        let mut out = PolicyOutcome::new(ActionKind::Fold, NAME);
        out.rationale.append(&mut notes);
        return out;
    }

    if obs.has_action(ActionKind::Call) && obs.to_call <= obs.bb {
        return PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::PfLimpCompleteBlind));
    }
    if obs.has_action(ActionKind::Check) {
        return PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::SafeCheck));
    }
    PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale(RationaleCode::PfFold))
}

/// Branch 3: BB facing SB's open — 3bet > call > fold.
fn bb_defend(obs: &Observation, modes: &Modes, vs: &VsTable) -> PolicyOutcome {
    let to_call_bb = obs.to_call as f64 / obs.bb as f64;
    let bucket = bucket_facing_size(to_call_bb, modes.threebet_bucket_small_le, modes.threebet_bucket_mid_le);

    if vs.version == 0 {
        return cfg_fallback_vs(obs);
    }
    let node = match vs.bb_vs_sb.get(bucket.as_str()) {
        Some(n) => n,
        None => return cfg_fallback_vs(obs),
    };

    if node.reraise.contains(&obs.combo) && obs.has_action(ActionKind::Raise) {
        let raise = obs.find_action(ActionKind::Raise).unwrap();
        let open_to_bb = to_call_bb + 1.0;
        let mult = if obs.ip { modes.reraise_ip_mult } else { modes.reraise_oop_mult };
        let offset = if obs.ip { 0.0 } else { modes.reraise_oop_offset };
        let target_to_bb = (open_to_bb * mult + offset).round();
        let cap_bb = (eff_stack_bb(obs) * modes.cap_ratio).floor();
        let reraise_to_bb = cap_bb.min(target_to_bb);
        let target_amount = (reraise_to_bb * obs.bb as f64).round() as i64;
        let (amount, lifted) = lifted_to_min(target_amount, raise.min);
        let amount = amount.min(raise.max.unwrap_or(amount));

        let mut out = PolicyOutcome::new(ActionKind::Raise, NAME).with_amount(amount);
        meta_insert(&mut out.meta, "reraise_to_bb", serde_json::json!(reraise_to_bb));
        meta_insert(&mut out.meta, "cap_bb", serde_json::json!(cap_bb));
        meta_insert(&mut out.meta, "bucket", serde_json::json!(bucket.as_str()));
        meta_insert(&mut out.meta, "combo", serde_json::json!(obs.combo));
        if lifted {
            out = out.with_rationale(rationale(RationaleCode::PfDefend3betMinRaiseAdjusted));
        }
        return out.with_rationale(rationale(RationaleCode::PfDefend3bet));
    }

    let pot_odds = if obs.to_call > 0 {
        obs.to_call as f64 / (obs.pot_now + obs.to_call) as f64
    } else {
        1.0
    };

    if node.call.contains(&obs.combo) && obs.has_action(ActionKind::Call) {
        let threshold = if obs.ip { modes.defend_threshold_ip } else { modes.defend_threshold_oop };
        let mut meta = Meta::new();
        meta_insert(&mut meta, "pot_odds", serde_json::json!(round4(pot_odds)));
        meta_insert(&mut meta, "bucket", serde_json::json!(bucket.as_str()));
        meta_insert(&mut meta, "combo", serde_json::json!(obs.combo));
        if pot_odds <= threshold {
            let mut out = PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::PfDefendPriceOk));
            out.meta = meta;
            return out;
        }
        if obs.has_action(ActionKind::Fold) {
            let mut out = PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale_data(
                RationaleCode::PfDefendPriceBad,
                serde_json::json!({"pot_odds": round4(pot_odds), "threshold": threshold}),
            ));
            out.meta = meta;
            return out;
        }
        let mut out = PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::PfDefendPriceBad));
        out.meta = meta;
        return out;
    }

    // Out of range entirely.
    let mut meta = Meta::new();
    meta_insert(&mut meta, "bucket", serde_json::json!(bucket.as_str()));
    meta_insert(&mut meta, "combo", serde_json::json!(obs.combo));
    let data = serde_json::json!({"reason": "out_of_range"});
    if obs.has_action(ActionKind::Fold) {
        let mut out = PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale_data(RationaleCode::PfDefendPriceBad, data));
        out.meta = meta;
        return out;
    }
    let mut out = PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale_data(RationaleCode::PfDefendPriceBad, data));
    out.meta = meta;
    out
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

/// `(Observation, Modes, OpenTable, VsTable, enable_4bet) → PolicyOutcome`,
/// policy name `preflop_v1`.
pub fn run(obs: &Observation, modes: &Modes, open: &OpenTable, vs: &VsTable, enable_4bet: bool) -> PolicyOutcome {
    let hero_is_sb = obs.actor == obs.button;

    if enable_4bet
        && hero_is_sb
        && obs.to_call > 0
        && !obs.has_action(ActionKind::Bet)
        && obs.pot_type == PotType::Threebet
    {
        return four_bet_path(obs, modes, vs);
    }

    if hero_is_sb && (obs.to_call == 0 || pick_betlike(obs).is_some()) {
        return rfi(obs, modes, open);
    }

    bb_defend(obs, modes, vs)
}
