// Crate-level end-to-end scenarios and property-style invariants, written
// as ordinary `#[test]` functions over hand-built fixtures — cross-module
// scenario checks, distinct from what each module's own `#[cfg(test)]`
// block already covers.

use crate::suggest_engine::config::{Modes, OpenTable, VsBucket, VsTable};
use crate::suggest_engine::observation::{build_observation, ActionEvent};
use crate::suggest_engine::policy::{flop_v1, preflop_v1};
use crate::suggest_engine::service::{build_suggestion_with, SuggestEnv};
use crate::suggest_engine::{
    ActionKind, BoardTexture, ConfigRoot, FacingSizeTag, GameState, LegalAction, PlayerView,
    PolicyVersion, PotType, Role, SprBucket, Street, TableMode,
};
use std::collections::{HashMap, HashSet};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn missing_root() -> ConfigRoot {
    ConfigRoot::new("/nonexistent/suggest-engine-tests")
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn s1_sb_opens_aks_2_5bb() {
    init_logging();
    let open = OpenTable { sb: set(&["AKs"]), version: 1 };
    let vs = VsTable::default();
    let obs = preflop_obs_sb("AKs", 1, 3, vec![LegalAction::fold(), LegalAction::call(1), LegalAction::raise(4, 200)]);
    let out = preflop_v1::run(&obs, &Modes::default(), &open, &vs, false);
    assert_eq!(out.action, ActionKind::Raise);
    assert_eq!(out.amount, Some(5));
    assert!(out.rationale.iter().any(|r| r.code == "PF_OPEN_RANGE_HIT"));
    assert_eq!(out.meta.get("open_bb").and_then(|v| v.as_f64()), Some(2.5));
}

#[test]
fn s2_bb_folds_72o_out_of_range() {
    let vs = vs_table_fixture();
    let obs = preflop_obs_bb("72o", 4, 5, vec![LegalAction::fold(), LegalAction::call(4), LegalAction::raise(12, 200)]);
    let out = preflop_v1::run(&obs, &Modes::default(), &OpenTable::default(), &vs, false);
    assert_eq!(out.action, ActionKind::Fold);
    assert!(out.rationale.iter().any(|r| r.code == "PF_DEFEND_PRICE_BAD"));
    assert_eq!(out.meta.get("bucket").and_then(|v| v.as_str()), Some("small"));
}

#[test]
fn s3_bb_3bets_qq_vs_sb_open() {
    let vs = vs_table_fixture();
    let obs = preflop_obs_bb("QQ", 3, 5, vec![LegalAction::fold(), LegalAction::call(3), LegalAction::raise(12, 200)]);
    let out = preflop_v1::run(&obs, &Modes::default(), &OpenTable::default(), &vs, false);
    assert_eq!(out.action, ActionKind::Raise);
    assert!(out.amount.unwrap() >= 12);
    assert!(out.rationale.iter().any(|r| r.code == "PF_DEFEND_3BET"));
}

#[test]
fn s4_pfr_dry_board_range_adv_small_bet() {
    let rules = flop_rules_fixture(serde_json::json!({
        "single_raised": {"role": {"pfr": {"ip": {"dry": {"mid": {
            "weak_draw_or_air": {"action": "bet", "size_tag": "third"}
        }}}}}}
    }));
    let obs = flop_obs(
        "weak_draw_or_air",
        BoardTexture::Dry,
        SprBucket::Mid,
        Role::Pfr,
        true,
        true,
        false,
        0,
        10,
        FacingSizeTag::Na,
        PotType::SingleRaised,
        vec![LegalAction::check(), LegalAction::bet(3, 30)],
    );
    let out = flop_v1::run(&obs, &rules, true);
    assert_eq!(out.action, ActionKind::Bet);
    assert_eq!(out.size_tag, Some(crate::suggest_engine::SizeTag::Third));
    assert!(out.rationale.iter().any(|r| r.code == "FL_RANGE_ADV_SMALL_BET"));
}

#[test]
fn s5_caller_oop_wet_strong_draw_threebet_pot_raises_half() {
    let rules = flop_rules_fixture(serde_json::json!({}));
    let obs = flop_obs(
        "strong_draw",
        BoardTexture::Wet,
        SprBucket::Mid,
        Role::Caller,
        false,
        false,
        false,
        10,
        30,
        FacingSizeTag::Third,
        PotType::Threebet,
        vec![LegalAction::fold(), LegalAction::call(10), LegalAction::raise(20, 200)],
    );
    let out = flop_v1::run(&obs, &rules, true);
    assert_eq!(out.action, ActionKind::Raise);
    assert_eq!(out.size_tag, Some(crate::suggest_engine::SizeTag::Half));
    let codes: Vec<_> = out.rationale.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["FL_MDF_DEFEND", "FL_RAISE_SEMI_BLUFF"]);
}

#[test]
fn s6_oversized_bet_is_clamped_to_max() {
    // flop_v1's no-config fallback (PFR on a dry board with no rule-tree
    // match) hands off a bare size_tag with no amount, so the service is
    // the only thing that computes and clamps the chip target here — unlike
    // preflop_v0/flop_v0, which clamp their own `amount` before returning.
    let gs = pfr_dry_flop_gs(300);
    let acts = vec![LegalAction::check(), LegalAction::bet(1, 30)];
    let mut env = SuggestEnv::default();
    env.policy_version = PolicyVersion::V1;
    let s = build_suggestion_with(&gs, 0, acts, None, &missing_root(), &env).unwrap();
    assert_eq!(s.suggested.action, "bet");
    assert_eq!(s.suggested.amount, Some(30));
    let clamp = s.rationale.iter().find(|r| r.code == "WARN_CLAMPED").expect("clamp reported");
    let data = clamp.data.as_ref().unwrap();
    assert_eq!(data["min"], 1);
    assert_eq!(data["max"], 30);
    assert_eq!(data["given"], 100);
    assert_eq!(data["chosen"], 30);
}

// ---------------------------------------------------------------------------
// Property-style invariants
// ---------------------------------------------------------------------------

#[test]
fn invariant_legality_across_fixtures() {
    let fixtures: Vec<(GameState, usize, Vec<LegalAction>)> = vec![
        (base_gs(), 0, vec![LegalAction::fold(), LegalAction::call(1), LegalAction::raise(4, 200)]),
        (base_gs(), 0, vec![LegalAction::check(), LegalAction::bet(1, 200)]),
        (base_gs(), 0, vec![LegalAction::fold(), LegalAction::check()]),
    ];
    for (gs, actor, acts) in fixtures {
        let s = build_suggestion_with(&gs, actor, acts.clone(), None, &missing_root(), &SuggestEnv::default()).unwrap();
        let legal = acts.iter().find(|a| a.action.as_str() == s.suggested.action).unwrap();
        if let Some(amount) = s.suggested.amount {
            let min = legal.min.unwrap_or(amount);
            let max = legal.max.unwrap_or(amount);
            assert!(amount >= min && amount <= max, "amount {amount} outside [{min},{max}]");
        }
    }
}

#[test]
fn invariant_pot_odds_identity() {
    let gs = base_gs();
    let acts = vec![LegalAction::fold(), LegalAction::call(4), LegalAction::raise(12, 200)];
    let (obs, _) = build_observation(&gs, 1, acts);
    let pot_odds = obs.to_call as f64 / (obs.pot_now + obs.to_call) as f64;
    assert!((pot_odds - (obs.to_call as f64 / (obs.pot_now + obs.to_call) as f64)).abs() < 1e-9);
}

#[test]
fn invariant_min_reopen_lifts_below_minimum_raise() {
    let vs = vs_table_fixture();
    // QQ's reraise target would compute well below raise.min=40; verify the
    // policy itself lifts it and tags the adjustment.
    let obs = preflop_obs_bb("QQ", 3, 5, vec![LegalAction::fold(), LegalAction::call(3), LegalAction::raise(40, 200)]);
    let out = preflop_v1::run(&obs, &Modes::default(), &OpenTable::default(), &vs, false);
    assert_eq!(out.action, ActionKind::Raise);
    assert_eq!(out.amount, Some(40));
    assert!(out.rationale.iter().any(|r| r.code == "PF_DEFEND_3BET_MIN_RAISE_ADJUSTED"));
}

#[test]
fn invariant_clamp_reports_accurate_bounds() {
    let mut env = SuggestEnv::default();
    env.policy_version = PolicyVersion::V1;
    for pot_now in [120, 300, 900] {
        let gs = pfr_dry_flop_gs(pot_now);
        let acts = vec![LegalAction::check(), LegalAction::bet(50, 60)];
        let s = build_suggestion_with(&gs, 0, acts, None, &missing_root(), &env).unwrap();
        let clamp = s.rationale.iter().find(|r| r.code == "WARN_CLAMPED");
        if let Some(clamp) = clamp {
            let data = clamp.data.as_ref().unwrap();
            let amount = s.suggested.amount.unwrap();
            assert_eq!(data["chosen"], amount);
            assert!(amount >= 50 && amount <= 60);
        }
    }
}

#[test]
fn invariant_confidence_bounds_hold_broadly() {
    let fixtures: Vec<(GameState, usize, Vec<LegalAction>)> = vec![
        (base_gs(), 0, vec![LegalAction::fold(), LegalAction::call(1), LegalAction::raise(4, 200)]),
        (base_gs(), 0, vec![LegalAction::check(), LegalAction::bet(1, 200)]),
    ];
    for (gs, actor, acts) in fixtures {
        let s = build_suggestion_with(&gs, actor, acts, None, &missing_root(), &SuggestEnv::default()).unwrap();
        assert!(s.confidence >= 0.5 && s.confidence <= 0.9);
    }
}

#[test]
fn invariant_rollout_stability() {
    use crate::suggest_engine::rollout::stable_roll;
    for pct in [0u32, 20, 50, 100] {
        assert_eq!(stable_roll("hand-xyz", pct), stable_roll("hand-xyz", pct));
    }
    let hits = (0..10_000).filter(|i| stable_roll(&format!("hand-{i}"), 20)).count();
    let rate = hits as f64 / 10_000.0;
    assert!((0.17..=0.23).contains(&rate), "rate {rate} outside [0.17, 0.23]");
}

#[test]
fn invariant_priority_raise_over_call_when_combo_in_both_buckets() {
    let mut bb_vs_sb = HashMap::new();
    bb_vs_sb.insert("small".to_string(), VsBucket { call: set(&["QQ"]), reraise: set(&["QQ"]) });
    let vs = VsTable { bb_vs_sb, sb_vs_bb_3bet: HashMap::new(), version: 1 };
    let obs = preflop_obs_bb("QQ", 3, 5, vec![LegalAction::fold(), LegalAction::call(3), LegalAction::raise(12, 200)]);
    let out = preflop_v1::run(&obs, &Modes::default(), &OpenTable::default(), &vs, false);
    assert_eq!(out.action, ActionKind::Raise);
}

#[test]
fn invariant_defaults_fallback_matches_explicit_key() {
    let explicit = flop_rules_fixture(serde_json::json!({
        "single_raised": {"role": {"pfr": {"ip": {"dry": {"mid": {
            "weak_draw_or_air": {"action": "bet", "size_tag": "third"}
        }}}}}}
    }));
    let via_defaults = flop_rules_fixture(serde_json::json!({
        "single_raised": {"role": {"pfr": {"ip": {"dry": {"defaults": {
            "weak_draw_or_air": {"action": "bet", "size_tag": "third"}
        }}}}}}
    }));
    let obs = flop_obs(
        "weak_draw_or_air",
        BoardTexture::Dry,
        SprBucket::Mid,
        Role::Pfr,
        true,
        true,
        false,
        0,
        10,
        FacingSizeTag::Na,
        PotType::SingleRaised,
        vec![LegalAction::check(), LegalAction::bet(3, 30)],
    );
    let a = flop_v1::run(&obs, &explicit, true);
    let b = flop_v1::run(&obs, &via_defaults, true);
    assert_eq!(a.action, b.action);
    assert_eq!(a.size_tag, b.size_tag);
}

#[test]
fn invariant_sb_cheap_limp_always_carries_limp_code() {
    let mut gs = base_gs();
    gs.players[0].invested_street = 1;
    gs.players[1].invested_street = 2;
    let acts = vec![LegalAction::fold(), LegalAction::call(1), LegalAction::check()];
    let s = build_suggestion_with(&gs, 0, acts, None, &missing_root(), &SuggestEnv::default()).unwrap();
    if s.suggested.action == "call" {
        assert!(s.rationale.iter().any(|r| r.code == "PF_LIMP_COMPLETE_BLIND"));
    }
}

// ---------------------------------------------------------------------------
// Service-level wiring: auto rollout parity at pct=0
// ---------------------------------------------------------------------------

#[test]
fn auto_rollout_at_zero_percent_matches_forced_v0() {
    let gs = base_gs();
    let acts = vec![LegalAction::fold(), LegalAction::call(1), LegalAction::raise(4, 200)];

    let mut v0_env = SuggestEnv::default();
    v0_env.policy_version = PolicyVersion::V0;
    let v0 = build_suggestion_with(&gs, 0, acts.clone(), None, &missing_root(), &v0_env).unwrap();

    let mut auto_env = SuggestEnv::default();
    auto_env.policy_version = PolicyVersion::Auto;
    auto_env.rollout_pct = 0;
    let auto = build_suggestion_with(&gs, 0, acts, None, &missing_root(), &auto_env).unwrap();

    assert_eq!(v0.policy, auto.policy);
    assert_eq!(v0.suggested.action, auto.suggested.action);
    assert_eq!(v0.suggested.amount, auto.suggested.amount);
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

fn base_gs() -> GameState {
    GameState {
        hand_id: "hand-fixture".into(),
        street: Street::Preflop,
        bb: 2,
        pot: 3,
        board: vec![],
        button: 0,
        players: [
            PlayerView { hole: vec!["Ah".into(), "Kh".into()], stack: 200, invested_street: 1 },
            PlayerView { hole: vec!["7c".into(), "2d".into()], stack: 200, invested_street: 2 },
        ],
        to_act: 0,
        last_bet: 2,
        events: Vec::<ActionEvent>::new(),
    }
}

/// A flop `GameState` where the lone preflop raiser (seat 0) is still to
/// act, facing nothing, on a rainbow disconnected dry board, with
/// `gs.pot` set to `pot_now` so `flop_v1`'s no-config fallback (PFR+dry)
/// and the service's `size_to_amount` sizing are both exercised end to end.
fn pfr_dry_flop_gs(pot_now: i64) -> GameState {
    GameState {
        hand_id: "pfr-dry-flop".into(),
        street: Street::Flop,
        bb: 2,
        pot: pot_now,
        board: vec!["2h".into(), "7d".into(), "Qc".into()],
        button: 0,
        players: [
            PlayerView { hole: vec!["Ah".into(), "Kh".into()], stack: 200, invested_street: 0 },
            PlayerView { hole: vec!["7c".into(), "2d".into()], stack: 200, invested_street: 0 },
        ],
        to_act: 0,
        last_bet: 0,
        events: vec![ActionEvent { street: Street::Preflop, actor: 0, action: ActionKind::Raise }],
    }
}

fn preflop_obs_sb(combo: &str, to_call: i64, pot_now: i64, acts: Vec<LegalAction>) -> crate::suggest_engine::Observation {
    use crate::suggest_engine::observation::Observation;
    Observation {
        hand_id: "s1".into(),
        actor: 0,
        street: Street::Preflop,
        bb: 2,
        pot: pot_now - 3,
        pot_now,
        to_call,
        table_mode: TableMode::Hu,
        ip: false,
        button: 0,
        acts,
        tags: vec!["suited_broadway".into()],
        hand_class: "strong".into(),
        combo: combo.into(),
        board_texture: BoardTexture::Na,
        spr_bucket: SprBucket::Mid,
        pot_type: PotType::Limped,
        role: Role::Na,
        range_adv: false,
        nut_adv: false,
        facing_size_tag: FacingSizeTag::Na,
    }
}

fn preflop_obs_bb(combo: &str, to_call: i64, pot_now: i64, acts: Vec<LegalAction>) -> crate::suggest_engine::Observation {
    use crate::suggest_engine::observation::Observation;
    Observation {
        hand_id: "s2".into(),
        actor: 1,
        street: Street::Preflop,
        bb: 2,
        pot: 0,
        pot_now,
        to_call,
        table_mode: TableMode::Hu,
        ip: true,
        button: 0,
        acts,
        tags: vec![],
        hand_class: "unknown".into(),
        combo: combo.into(),
        board_texture: BoardTexture::Na,
        spr_bucket: SprBucket::Mid,
        pot_type: PotType::SingleRaised,
        role: Role::Na,
        range_adv: false,
        nut_adv: false,
        facing_size_tag: FacingSizeTag::Na,
    }
}

#[allow(clippy::too_many_arguments)]
fn flop_obs(
    hand_class: &str,
    texture: BoardTexture,
    spr: SprBucket,
    role: Role,
    ip: bool,
    range_adv: bool,
    nut_adv: bool,
    to_call: i64,
    pot_now: i64,
    facing: FacingSizeTag,
    pot_type: PotType,
    acts: Vec<LegalAction>,
) -> crate::suggest_engine::Observation {
    use crate::suggest_engine::observation::Observation;
    Observation {
        hand_id: "flop-fixture".into(),
        actor: 0,
        street: Street::Flop,
        bb: 2,
        pot: pot_now - to_call,
        pot_now,
        to_call,
        table_mode: TableMode::Hu,
        ip,
        button: 0,
        acts,
        tags: vec![],
        hand_class: hand_class.into(),
        combo: "".into(),
        board_texture: texture,
        spr_bucket: spr,
        pot_type,
        role,
        range_adv,
        nut_adv,
        facing_size_tag: facing,
    }
}

fn vs_table_fixture() -> VsTable {
    let mut bb_vs_sb = HashMap::new();
    bb_vs_sb.insert(
        "small".to_string(),
        VsBucket { call: set(&["JTs", "KQo"]), reraise: set(&["QQ", "KK", "AA", "AKs"]) },
    );
    VsTable { bb_vs_sb, sb_vs_bb_3bet: HashMap::new(), version: 1 }
}

fn flop_rules_fixture(tree: serde_json::Value) -> crate::suggest_engine::config::FlopRules {
    crate::suggest_engine::config::FlopRules {
        data: tree,
        version: 1,
        strategy: crate::suggest_engine::Strategy::Medium,
    }
}
