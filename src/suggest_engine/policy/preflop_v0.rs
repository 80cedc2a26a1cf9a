//! Preflop v0 baseline. Tag-range check plus a flat
//! 2.5bb open / 3bb call threshold — no tables, no buckets.

use super::super::codes::{rationale_data, RationaleCode};
use super::super::config::PolicyConfig;
use super::super::models::ActionKind;
use super::super::observation::Observation;
use super::PolicyOutcome;

const OPEN_TAGS: [&str; 4] = ["pair", "suited_broadway", "Ax_suited", "broadway_offsuit"];

fn in_open_range(obs: &Observation) -> bool {
    obs.tags.iter().any(|t| OPEN_TAGS.contains(&t.as_str()))
}

/// `(Observation, PolicyConfig) → PolicyOutcome`, policy name `preflop_v0`.
pub fn run(obs: &Observation, cfg: &PolicyConfig) -> PolicyOutcome {
    const NAME: &str = "preflop_v0";

    if obs.to_call == 0 {
        if in_open_range(obs) {
            let target = (cfg.open_size_bb * obs.bb as f64).round() as i64;
            if let Some(bet) = obs.find_action(ActionKind::Bet) {
                let (min, max) = (bet.min.unwrap_or(target), bet.max.unwrap_or(target));
                let amt = target.clamp(min, max);
                return PolicyOutcome::new(ActionKind::Bet, NAME)
                    .with_amount(amt)
                    .with_rationale(rationale_data(RationaleCode::PfOpenBet, serde_json::json!({"bb": obs.bb, "chosen": amt})));
            }
            if let Some(raise) = obs.find_action(ActionKind::Raise) {
                let (min, max) = (raise.min.unwrap_or(target), raise.max.unwrap_or(target));
                let amt = target.clamp(min, max);
                return PolicyOutcome::new(ActionKind::Raise, NAME)
                    .with_amount(amt)
                    .with_rationale(rationale_data(RationaleCode::PfOpenRaise, serde_json::json!({"bb": obs.bb, "chosen": amt})));
            }
        }
        if obs.has_action(ActionKind::Check) {
            return PolicyOutcome::new(ActionKind::Check, NAME)
                .with_rationale(super::super::codes::rationale(RationaleCode::PfCheck));
        }
        if obs.has_action(ActionKind::Fold) {
            return PolicyOutcome::new(ActionKind::Fold, NAME)
                .with_rationale(super::super::codes::rationale(RationaleCode::PfFold));
        }
    }

    let threshold = (cfg.call_threshold_bb * obs.bb as f64).round() as i64;
    if in_open_range(obs) && obs.has_action(ActionKind::Call) && obs.to_call <= threshold {
        return PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale_data(
            RationaleCode::PfCall,
            serde_json::json!({"to_call": obs.to_call, "threshold": threshold}),
        ));
    }

    if obs.has_action(ActionKind::Fold) {
        return PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale_data(
            RationaleCode::PfFoldExpensive,
            serde_json::json!({"to_call": obs.to_call, "threshold": threshold}),
        ));
    }
    if obs.has_action(ActionKind::Check) {
        return PolicyOutcome::new(ActionKind::Check, NAME)
            .with_rationale(super::super::codes::rationale(RationaleCode::SafeCheck));
    }

    // No safe action at all: the hand engine guarantees at least one legal
    // action exists, so fall back to whatever
    // is first in `acts` rather than panicking.
    let fallback = obs.acts.first().expect("non-empty legal actions");
    PolicyOutcome::new(fallback.action, NAME).with_rationale(super::super::codes::rationale(RationaleCode::SafeCheck))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::models::{LegalAction, Street, TableMode, BoardTexture, SprBucket, PotType, Role, FacingSizeTag};

    fn obs(to_call: i64, tags: Vec<&str>, acts: Vec<LegalAction>) -> Observation {
        Observation {
            hand_id: "h".into(),
            actor: 0,
            street: Street::Preflop,
            bb: 2,
            pot: 3,
            pot_now: 3,
            to_call,
            table_mode: TableMode::Hu,
            ip: false,
            button: 0,
            acts,
            tags: tags.into_iter().map(String::from).collect(),
            hand_class: "strong".into(),
            combo: "AKs".into(),
            board_texture: BoardTexture::Na,
            spr_bucket: SprBucket::Na,
            pot_type: PotType::Limped,
            role: Role::Na,
            range_adv: false,
            nut_adv: false,
            facing_size_tag: FacingSizeTag::Na,
        }
    }

    #[test]
    fn opens_to_2_5bb_when_unopened_and_in_range() {
        let o = obs(0, vec!["suited_broadway"], vec![LegalAction::check(), LegalAction::bet(1, 200)]);
        let out = run(&o, &PolicyConfig::default());
        assert_eq!(out.action, ActionKind::Bet);
        assert_eq!(out.amount, Some(5));
    }

    #[test]
    fn checks_when_out_of_range_and_unopened() {
        let o = obs(0, vec!["other"], vec![LegalAction::check(), LegalAction::bet(1, 200)]);
        let out = run(&o, &PolicyConfig::default());
        assert_eq!(out.action, ActionKind::Check);
    }

    #[test]
    fn calls_cheap_bet_in_range() {
        let o = obs(4, vec!["pair"], vec![LegalAction::fold(), LegalAction::call(4)]);
        let out = run(&o, &PolicyConfig::default());
        assert_eq!(out.action, ActionKind::Call);
    }

    #[test]
    fn folds_expensive_bet_out_of_range() {
        let o = obs(40, vec!["other"], vec![LegalAction::fold(), LegalAction::call(40)]);
        let out = run(&o, &PolicyConfig::default());
        assert_eq!(out.action, ActionKind::Fold);
    }
}
