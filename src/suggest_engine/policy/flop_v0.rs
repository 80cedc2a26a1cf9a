//! Postflop v0.3 baseline. One policy function serves
//! flop, turn, and river — a minimum-size probe bet when unopened, a
//! pot-odds threshold call/fold otherwise.

use super::super::codes::{rationale, rationale_data, RationaleCode};
use super::super::config::PolicyConfig;
use super::super::models::ActionKind;
use super::super::observation::Observation;
use super::PolicyOutcome;

const NAME: &str = "postflop_v0_3";

const CALL_RANGE_TAGS: [&str; 2] = ["pair", "Ax_suited"];

fn in_call_range(obs: &Observation) -> bool {
    obs.tags.iter().any(|t| CALL_RANGE_TAGS.contains(&t.as_str())) || obs.hand_class == "Ax_suited"
}

/// `(Observation, PolicyConfig) → PolicyOutcome`, policy name
/// `postflop_v0_3`.
pub fn run(obs: &Observation, cfg: &PolicyConfig) -> PolicyOutcome {
    let header = rationale_data(
        RationaleCode::PlHeader,
        serde_json::json!({"street": obs.street.as_str(), "tags": obs.tags}),
    );

    if obs.to_call == 0 {
        let betlike = obs.find_action(ActionKind::Bet).or_else(|| obs.find_action(ActionKind::Raise));
        if let Some(action) = betlike {
            let is_flop = obs.street == super::super::models::Street::Flop;
            let showdown_value = obs.tags.iter().any(|t| t == "pair") || obs.hand_class == "Ax_suited";
            if is_flop || showdown_value {
                let amt = action.min.unwrap_or(1);
                let mut out = PolicyOutcome::new(action.action, NAME).with_amount(amt).with_rationale(header);
                out = out.with_rationale(rationale_data(RationaleCode::PlProbeBet, serde_json::json!({"chosen": amt})));
                return out;
            }
        }
        if obs.has_action(ActionKind::Check) {
            return PolicyOutcome::new(ActionKind::Check, NAME)
                .with_rationale(header)
                .with_rationale(rationale(RationaleCode::PlCheck));
        }
    }

    let denom = obs.pot + obs.to_call;
    let pot_odds = if denom > 0 { obs.to_call as f64 / denom as f64 } else { 1.0 };
    let threshold = if in_call_range(obs) { cfg.pot_odds_threshold_callrange } else { cfg.pot_odds_threshold };

    if obs.has_action(ActionKind::Call) && pot_odds <= threshold {
        return PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(header).with_rationale(rationale_data(
            RationaleCode::PlCall,
            serde_json::json!({"to_call": obs.to_call, "pot": obs.pot, "pot_odds": round4(pot_odds), "threshold": threshold}),
        ));
    }

    if obs.has_action(ActionKind::Fold) {
        return PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(header).with_rationale(rationale_data(
            RationaleCode::PlFold,
            serde_json::json!({"to_call": obs.to_call, "pot": obs.pot, "pot_odds": round4(pot_odds), "threshold": threshold}),
        ));
    }

    if let Some(allin) = obs.find_action(ActionKind::Allin) {
        let amt = allin.max.or(allin.min).unwrap_or(0);
        return PolicyOutcome::new(ActionKind::Allin, NAME)
            .with_amount(amt)
            .with_rationale(header)
            .with_rationale(rationale(RationaleCode::PlAllinOnly));
    }

    if obs.has_action(ActionKind::Check) {
        return PolicyOutcome::new(ActionKind::Check, NAME)
            .with_rationale(header)
            .with_rationale(rationale(RationaleCode::WAnalysis));
    }

    let fallback = obs.acts.first().expect("non-empty legal actions");
    PolicyOutcome::new(fallback.action, NAME).with_rationale(header)
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}
