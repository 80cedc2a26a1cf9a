//! Flop v1: rule-tree lookup with `defaults` fallback,
//! a JSON-driven value raise for made two-pair-plus hands, and an MDF-based
//! defend ladder with threebet-pot refinements otherwise.

use serde_json::Value;

use super::super::codes::{rationale, RationaleCode};
use super::super::config::FlopRules;
use super::super::models::{ActionKind, BoardTexture, FacingSizeTag, PotType, Role, SizeTag, SprBucket};
use super::super::observation::Observation;
use super::super::suggestion::{meta_insert, Meta};
use super::PolicyOutcome;

const NAME: &str = "flop_v1";

/// Per-level descent: if `key` is present, descend into it; else if
/// `defaults` is present at *this* level, descend into that instead; else
/// the whole lookup is a miss. No backtracking across levels.
fn descend<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(node);
    }
    let child = node.get(path[0]).or_else(|| node.get("defaults"))?;
    descend(child, &path[1..])
}

/// Strict descent with no `defaults` fallback at any level — used only by
/// the JSON-driven value-raise lookup, which must match exactly or not at
/// all.
fn descend_strict<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(node);
    }
    let child = node.get(path[0])?;
    descend_strict(child, &path[1..])
}

fn role_for_lookup(obs: &Observation) -> Role {
    if obs.pot_type == PotType::Limped {
        Role::Na
    } else {
        obs.role
    }
}

fn match_rule<'a>(rules: &'a Value, obs: &Observation) -> Option<&'a Value> {
    let role = role_for_lookup(obs);
    let path = [
        obs.pot_type.as_str(),
        "role",
        role.as_str(),
        if obs.ip { "ip" } else { "oop" },
        obs.board_texture.as_str(),
        obs.spr_bucket.as_str(),
        obs.hand_class.as_str(),
    ];
    descend(rules, &path)
}

fn match_value_raise_leaf<'a>(rules: &'a Value, obs: &Observation) -> Option<&'a Value> {
    let role = role_for_lookup(obs);
    let path = [
        obs.pot_type.as_str(),
        "role",
        role.as_str(),
        if obs.ip { "ip" } else { "oop" },
        obs.board_texture.as_str(),
        obs.spr_bucket.as_str(),
        "value_two_pair_plus",
        "facing",
        obs.facing_size_tag.facing_key(),
    ];
    descend_strict(rules, &path)
}

fn leaf_size_tag(leaf: &Value, default: SizeTag) -> SizeTag {
    leaf.get("size_tag").and_then(Value::as_str).and_then(SizeTag::parse).unwrap_or(default)
}

fn leaf_plan(leaf: &Value) -> Option<String> {
    leaf.get("plan").and_then(Value::as_str).map(String::from)
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

/// No bet yet this street (`to_call == 0`): bet/raise/check off the rule
/// tree, with a PFR-on-dry / check-range fallback when no leaf matches.
fn no_bet_yet(obs: &Observation, rules: &FlopRules) -> PolicyOutcome {
    let leaf = match_rule(&rules.data, obs);
    let action_str = leaf.and_then(|l| l.get("action")).and_then(Value::as_str);

    match action_str {
        Some("bet") | Some("raise") => {
            let leaf = leaf.unwrap();
            let kind = if obs.has_action(ActionKind::Bet) {
                ActionKind::Bet
            } else if obs.has_action(ActionKind::Raise) {
                ActionKind::Raise
            } else {
                return fallback_no_bet(obs);
            };
            let size_tag = leaf_size_tag(leaf, SizeTag::Third);
            let plan = leaf_plan(leaf);

            let code = if obs.range_adv && size_tag == SizeTag::Third {
                RationaleCode::FlRangeAdvSmallBet
            } else if obs.nut_adv && matches!(size_tag, SizeTag::TwoThird | SizeTag::Pot) {
                RationaleCode::FlNutAdvPolar
            } else {
                RationaleCode::FlDryCbetThird
            };

            let mut out = PolicyOutcome::new(kind, NAME).with_size_tag(size_tag).with_rationale(rationale(code));
            if obs.spr_bucket == SprBucket::Low
                && matches!(size_tag, SizeTag::TwoThird | SizeTag::Pot)
                && matches!(obs.hand_class.as_str(), "value_two_pair_plus" | "overpair_or_top_pair_strong_kicker")
            {
                out = out.with_rationale(rationale(RationaleCode::FlLowSprValueUp));
            }
            if let Some(plan) = plan {
                meta_insert(&mut out.meta, "plan", serde_json::json!(plan));
            }
            out
        }
        Some("check") => {
            let leaf = leaf.unwrap();
            let mut out = PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::FlDelayedCbetPlan));
            if obs.spr_bucket == SprBucket::High
                && matches!(obs.hand_class.as_str(), "middle_pair_or_third_minus" | "weak_draw_or_air")
            {
                out = out.with_rationale(rationale(RationaleCode::FlHighSprCtrl));
            }
            if let Some(plan) = leaf_plan(leaf) {
                meta_insert(&mut out.meta, "plan", serde_json::json!(plan));
            }
            out
        }
        _ => fallback_no_bet(obs),
    }
}

fn fallback_no_bet(obs: &Observation) -> PolicyOutcome {
    if obs.role == Role::Pfr && obs.board_texture == BoardTexture::Dry {
        let kind = if obs.has_action(ActionKind::Bet) {
            Some(ActionKind::Bet)
        } else if obs.has_action(ActionKind::Raise) {
            Some(ActionKind::Raise)
        } else {
            None
        };
        if let Some(kind) = kind {
            return PolicyOutcome::new(kind, NAME)
                .with_size_tag(SizeTag::Third)
                .with_rationale(rationale(RationaleCode::FlDryCbetThird));
        }
    }
    if obs.has_action(ActionKind::Check) {
        return PolicyOutcome::new(ActionKind::Check, NAME).with_rationale(rationale(RationaleCode::FlCheckRange));
    }
    let fallback = obs.acts.first().expect("non-empty legal actions");
    PolicyOutcome::new(fallback.action, NAME).with_rationale(rationale(RationaleCode::FlCheckRange))
}

/// Facing a bet (`to_call > 0`): the JSON-driven value raise takes
/// priority for made two-pair-plus hands, then the MDF defend ladder.
fn facing_bet(obs: &Observation, rules: &FlopRules, value_raise_enabled: bool) -> PolicyOutcome {
    if value_raise_enabled
        && obs.hand_class == "value_two_pair_plus"
        && matches!(obs.facing_size_tag, FacingSizeTag::Third | FacingSizeTag::Half | FacingSizeTag::TwoThirdPlus)
    {
        if let Some(leaf) = match_value_raise_leaf(&rules.data, obs) {
            match leaf.get("action").and_then(Value::as_str) {
                Some("raise") if obs.has_action(ActionKind::Raise) => {
                    let size_tag = leaf_size_tag(leaf, SizeTag::Half);
                    return PolicyOutcome::new(ActionKind::Raise, NAME)
                        .with_size_tag(size_tag)
                        .with_rationale(rationale(RationaleCode::FlRaiseValue));
                }
                Some("call") if obs.has_action(ActionKind::Call) => {
                    return PolicyOutcome::new(ActionKind::Call, NAME).with_rationale(rationale(RationaleCode::FlMdfDefend));
                }
                Some("fold") if obs.has_action(ActionKind::Fold) => {
                    return PolicyOutcome::new(ActionKind::Fold, NAME).with_rationale(rationale(RationaleCode::FlMdfDefend));
                }
                _ => {}
            }
        }
    }
    mdf_defend(obs)
}

fn mdf_meta(obs: &Observation) -> (f64, Meta) {
    let pot_odds = if obs.to_call > 0 {
        obs.to_call as f64 / (obs.pot_now + obs.to_call) as f64
    } else {
        1.0
    };
    let mdf = 1.0 - pot_odds;
    let mut meta = Meta::new();
    meta_insert(&mut meta, "mdf", serde_json::json!(round4(mdf)));
    meta_insert(&mut meta, "pot_odds", serde_json::json!(round4(pot_odds)));
    meta_insert(&mut meta, "facing_size_tag", serde_json::json!(obs.facing_size_tag.as_str()));
    (pot_odds, meta)
}

/// `FL_MDF_DEFEND` is always emitted as the base rationale here; the
/// threebet-pot / nut-advantage refinements below may append a second code
/// and swap the chosen action to a raise.
fn mdf_defend(obs: &Observation) -> PolicyOutcome {
    let (_pot_odds, meta) = mdf_meta(obs);
    let base = rationale(RationaleCode::FlMdfDefend);

    if obs.pot_type == PotType::Threebet {
        if matches!(obs.facing_size_tag, FacingSizeTag::Third | FacingSizeTag::Half)
            && obs.hand_class == "value_two_pair_plus"
            && obs.has_action(ActionKind::Raise)
        {
            let mut out = PolicyOutcome::new(ActionKind::Raise, NAME).with_size_tag(SizeTag::TwoThird);
            out.rationale = vec![base, rationale(RationaleCode::FlRaiseValue)];
            out.meta = meta;
            return out;
        }
        if obs.facing_size_tag == FacingSizeTag::Third
            && obs.hand_class == "strong_draw"
            && obs.has_action(ActionKind::Raise)
        {
            let mut out = PolicyOutcome::new(ActionKind::Raise, NAME).with_size_tag(SizeTag::Half);
            out.rationale = vec![base, rationale(RationaleCode::FlRaiseSemiBluff)];
            out.meta = meta;
            return out;
        }
    }

    if matches!(obs.facing_size_tag, FacingSizeTag::Third | FacingSizeTag::Half) && obs.has_action(ActionKind::Call) {
        let mut out = PolicyOutcome::new(ActionKind::Call, NAME);
        out.rationale = vec![base];
        out.meta = meta;
        return out;
    }

    if obs.facing_size_tag == FacingSizeTag::TwoThirdPlus && obs.nut_adv && obs.has_action(ActionKind::Raise) {
        let mut out = PolicyOutcome::new(ActionKind::Raise, NAME).with_size_tag(SizeTag::TwoThird);
        out.rationale = vec![base, rationale(RationaleCode::FlRaiseSemiBluff)];
        let mut meta = meta;
        meta_insert(&mut meta, "plan", serde_json::json!("vs small/half \u{2192} call; vs two_third+ \u{2192} raise"));
        out.meta = meta;
        return out;
    }

    let action = if obs.has_action(ActionKind::Call) {
        ActionKind::Call
    } else if obs.has_action(ActionKind::Fold) {
        ActionKind::Fold
    } else {
        ActionKind::Check
    };
    let mut out = PolicyOutcome::new(action, NAME);
    out.rationale = vec![base];
    out.meta = meta;
    out
}

/// `(Observation, FlopRules, value_raise_enabled) → PolicyOutcome`, policy
/// name `flop_v1`.
pub fn run(obs: &Observation, rules: &FlopRules, value_raise_enabled: bool) -> PolicyOutcome {
    if obs.to_call == 0 {
        no_bet_yet(obs, rules)
    } else {
        facing_bet(obs, rules, value_raise_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::models::{LegalAction, Street, TableMode};
    use serde_json::json;

    fn rules_with(tree: Value) -> FlopRules {
        FlopRules { data: tree, version: 1, strategy: super::super::super::models::Strategy::Medium }
    }

    fn base_obs() -> Observation {
        Observation {
            hand_id: "h".into(),
            actor: 0,
            street: Street::Flop,
            bb: 2,
            pot: 10,
            pot_now: 10,
            to_call: 0,
            table_mode: TableMode::Hu,
            ip: true,
            button: 0,
            acts: vec![LegalAction::check(), LegalAction::bet(3, 30)],
            tags: vec![],
            hand_class: "weak_draw_or_air".into(),
            combo: "".into(),
            board_texture: BoardTexture::Dry,
            spr_bucket: SprBucket::Mid,
            pot_type: PotType::SingleRaised,
            role: Role::Pfr,
            range_adv: true,
            nut_adv: false,
            facing_size_tag: FacingSizeTag::Na,
        }
    }

    #[test]
    fn s4_pfr_dry_range_adv_small_bet() {
        let tree = json!({
            "single_raised": {
                "role": {
                    "pfr": {
                        "ip": {
                            "dry": {
                                "mid": {
                                    "weak_draw_or_air": {"action": "bet", "size_tag": "third"}
                                }
                            }
                        }
                    }
                }
            }
        });
        let rules = rules_with(tree);
        let obs = base_obs();
        let out = run(&obs, &rules, true);
        assert_eq!(out.action, ActionKind::Bet);
        assert_eq!(out.size_tag, Some(SizeTag::Third));
        assert!(out.rationale.iter().any(|r| r.code == "FL_RANGE_ADV_SMALL_BET"));
    }

    #[test]
    fn defaults_fallback_matches_explicit_key() {
        let explicit = json!({
            "single_raised": {"role": {"pfr": {"ip": {"dry": {"mid": {"weak_draw_or_air": {"action":"bet","size_tag":"third"}}}}}}}
        });
        let via_defaults = json!({
            "single_raised": {"role": {"pfr": {"ip": {"dry": {"defaults": {"weak_draw_or_air": {"action":"bet","size_tag":"third"}}}}}}}
        });
        let obs = base_obs();
        let a = run(&obs, &rules_with(explicit), true);
        let b = run(&obs, &rules_with(via_defaults), true);
        assert_eq!(a.action, b.action);
        assert_eq!(a.size_tag, b.size_tag);
    }

    #[test]
    fn s5_threebet_strong_draw_raises_half() {
        let mut obs = base_obs();
        obs.to_call = 10;
        obs.pot = 20;
        obs.pot_now = 30;
        obs.board_texture = BoardTexture::Wet;
        obs.hand_class = "strong_draw".into();
        obs.pot_type = PotType::Threebet;
        obs.role = Role::Caller;
        obs.ip = false;
        obs.facing_size_tag = FacingSizeTag::Third;
        obs.acts = vec![LegalAction::fold(), LegalAction::call(10), LegalAction::raise(20, 200)];

        let rules = rules_with(json!({}));
        let out = run(&obs, &rules, true);
        assert_eq!(out.action, ActionKind::Raise);
        assert_eq!(out.size_tag, Some(SizeTag::Half));
        let codes: Vec<_> = out.rationale.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["FL_MDF_DEFEND", "FL_RAISE_SEMI_BLUFF"]);
    }

    #[test]
    fn no_leaf_and_no_pfr_dry_checks_range() {
        let mut obs = base_obs();
        obs.role = Role::Caller;
        obs.board_texture = BoardTexture::Semi;
        let rules = rules_with(json!({}));
        let out = run(&obs, &rules, true);
        assert_eq!(out.action, ActionKind::Check);
        assert!(out.rationale.iter().any(|r| r.code == "FL_CHECK_RANGE"));
    }
}
