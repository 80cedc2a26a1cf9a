//! Suggest Service — the orchestrating entry point.
//!
//! Builds the `Observation`, picks a policy by `(version, street)`
//! (with the `auto` rollout resolved via [`super::rollout::stable_roll`]),
//! invokes it, resolves any `size_tag` into a chip amount, enforces
//! minimum re-open and the legal `[min,max]` window, computes confidence,
//! and assembles the response.

use serde_json::{json, Value};

use super::codes::{rationale, rationale_data, RationaleCode};
use super::config::{load_flop_rules, load_modes, load_open_table, load_vs_table, ConfigRoot, PolicyConfig};
use super::error::SuggestError;
use super::models::{ActionKind, PolicyVersion, Strategy, Street, TableMode};
use super::observation::{build_observation, GameState};
use super::policy::{flop_v0, flop_v1, preflop_v0, preflop_v1, PolicyOutcome};
use super::rollout::stable_roll;
use super::suggestion::{meta_insert, Meta, Suggestion, SuggestedAction};

/// Process-scoped knobs read from the environment. Exposed as a plain struct (rather than read
/// inline) so tests can construct one directly instead of mutating
/// `std::env` from parallel test threads.
#[derive(Debug, Clone)]
pub struct SuggestEnv {
    pub policy_version: PolicyVersion,
    pub rollout_pct: u32,
    pub table_mode: TableMode,
    pub strategy: Strategy,
    pub debug: bool,
    pub enable_4bet: bool,
    pub flop_value_raise: bool,
}

impl Default for SuggestEnv {
    fn default() -> Self {
        SuggestEnv {
            policy_version: PolicyVersion::V0,
            rollout_pct: 0,
            table_mode: TableMode::Hu,
            strategy: Strategy::Medium,
            debug: false,
            enable_4bet: false,
            flop_value_raise: true,
        }
    }
}

impl SuggestEnv {
    /// Read `SUGGEST_*` from the process environment, falling back to the
    /// documented defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = SuggestEnv::default();
        let policy_version = std::env::var("SUGGEST_POLICY_VERSION")
            .map(|s| PolicyVersion::parse(&s))
            .unwrap_or(defaults.policy_version);
        let rollout_pct = std::env::var("SUGGEST_V1_ROLLOUT_PCT")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .map(|v| v.clamp(0, 100) as u32)
            .unwrap_or(defaults.rollout_pct);
        let strategy = std::env::var("SUGGEST_STRATEGY")
            .map(|s| Strategy::parse_or_default(&s))
            .unwrap_or(defaults.strategy);
        let debug = std::env::var("SUGGEST_DEBUG").map(|s| s == "1").unwrap_or(defaults.debug);
        let enable_4bet =
            std::env::var("SUGGEST_PREFLOP_ENABLE_4BET").map(|s| s == "1").unwrap_or(defaults.enable_4bet);
        let flop_value_raise =
            std::env::var("SUGGEST_FLOP_VALUE_RAISE").map(|s| s != "0").unwrap_or(defaults.flop_value_raise);
        SuggestEnv {
            policy_version,
            rollout_pct,
            table_mode: defaults.table_mode,
            strategy,
            debug,
            enable_4bet,
            flop_value_raise,
        }
    }
}

/// Which generation actually ran for this decision, after resolving `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effective {
    V0,
    V1,
    V1Preflop,
}

fn resolve_effective(hand_id: &str, env: &SuggestEnv) -> (Effective, Option<bool>) {
    match env.policy_version {
        PolicyVersion::V0 => (Effective::V0, None),
        PolicyVersion::V1 => (Effective::V1, None),
        PolicyVersion::V1Preflop => (Effective::V1Preflop, None),
        PolicyVersion::Auto => {
            let rolled = stable_roll(hand_id, env.rollout_pct);
            (if rolled { Effective::V1 } else { Effective::V0 }, Some(rolled))
        }
    }
}

/// Rationale codes that indicate the policy found a direct range/rule
/// "hit" — a documented table/rule match, not a fallback guess.
const RANGE_OR_PRICE_HIT_CODES: [&str; 7] = [
    "PF_OPEN_RANGE_HIT",
    "PF_DEFEND_3BET",
    "PF_ATTACK_4BET",
    "FL_RANGE_ADV_SMALL_BET",
    "FL_NUT_ADV_POLAR",
    "FL_RAISE_VALUE",
    "FL_RAISE_SEMI_BLUFF",
];

/// Rationale codes indicating a price/size check came back favourable.
const PRICE_OR_SIZE_OK_CODES: [&str; 4] = ["PF_DEFEND_PRICE_OK", "PF_CALL", "FL_MDF_DEFEND", "PL_CALL"];

/// Codes that mark a conservative, not-table-driven fallback was taken.
const FALLBACK_CODES: [&str; 2] = ["CFG_FALLBACK_USED", "SAFE_CHECK"];

fn has_code(rationale: &[super::codes::RationaleItem], codes: &[&str]) -> bool {
    rationale.iter().any(|r| codes.contains(&r.code.as_str()))
}

fn clamp_into_window(
    action: ActionKind,
    amount: Option<i64>,
    acts: &[super::models::LegalAction],
) -> (Option<i64>, Option<Value>) {
    if !action.is_sized() {
        return (amount, None);
    }
    let amount = match amount {
        Some(a) => a,
        None => return (None, None),
    };
    let spec = match acts.iter().find(|a| a.action == action) {
        Some(s) => s,
        None => return (Some(amount), None),
    };
    let lo = spec.min.unwrap_or(amount);
    let hi = spec.max.unwrap_or(amount);
    if lo > hi {
        let data = json!({"min": lo, "max": hi, "given": amount, "chosen": hi});
        return (Some(hi), Some(data));
    }
    let chosen = amount.clamp(lo, hi);
    if chosen != amount {
        let data = json!({"min": lo, "max": hi, "given": amount, "chosen": chosen});
        (Some(chosen), Some(data))
    } else {
        (Some(chosen), None)
    }
}

/// Resolve a policy's `size_tag` (if it didn't already compute a concrete
/// `amount` itself) into chips, using bet semantics for `bet` and raise-to
/// semantics for `raise`/`allin`.
fn resolve_size_tag(
    outcome: &PolicyOutcome,
    obs: &super::observation::Observation,
    gs: &GameState,
    postflop_cap_ratio: f64,
) -> Option<i64> {
    if outcome.amount.is_some() {
        return outcome.amount;
    }
    let size_tag = outcome.size_tag?;
    match outcome.action {
        ActionKind::Bet => Some(super::sizing::size_to_amount(obs.pot_now, size_tag)),
        ActionKind::Raise | ActionKind::Allin => {
            let eff_stack = gs.players[obs.actor].stack.min(gs.players[1 - obs.actor].stack);
            Some(super::sizing::raise_to_amount(obs.pot_now, gs.last_bet, size_tag, Some(eff_stack), postflop_cap_ratio))
        }
        _ => None,
    }
}

/// The orchestrating entry point, with the config root and environment
/// knobs injected explicitly for testability. [`build_suggestion`] is the
/// convenience wrapper that reads both from their process-wide defaults.
pub fn build_suggestion_with(
    gs: &GameState,
    actor: usize,
    acts: Vec<super::models::LegalAction>,
    cfg: Option<PolicyConfig>,
    root: &ConfigRoot,
    env: &SuggestEnv,
) -> Result<Suggestion, SuggestError> {
    if gs.to_act != actor {
        return Err(SuggestError::NotActorsTurn { actor, to_act: gs.to_act });
    }
    if acts.is_empty() {
        return Err(SuggestError::NoLegalActions { hand_id: gs.hand_id.clone() });
    }

    let cfg = cfg.unwrap_or_default();
    let (obs, mut notes) = build_observation(gs, actor, acts.clone());

    let (effective, rolled_to_v1) = resolve_effective(&gs.hand_id, env);

    let modes = load_modes(root);
    let mut rules_ver: Option<i64> = None;
    let mut outcome = match (effective, obs.street) {
        (Effective::V0, Street::Preflop) => preflop_v0::run(&obs, &cfg),
        (Effective::V0, _) => flop_v0::run(&obs, &cfg),
        (Effective::V1Preflop, Street::Preflop) | (Effective::V1, Street::Preflop) => {
            let open = load_open_table(root);
            let vs = load_vs_table(root);
            if open.version == 0 || vs.version == 0 {
                notes.push(rationale(RationaleCode::CfgFallbackUsed));
            }
            rules_ver = Some(open.version.min(vs.version));
            preflop_v1::run(&obs, &modes, &open, &vs, env.enable_4bet)
        }
        (Effective::V1Preflop, _) => flop_v0::run(&obs, &cfg),
        (Effective::V1, Street::Flop) => {
            let rules = load_flop_rules(root, env.strategy);
            if rules.version == 0 {
                notes.push(rationale(RationaleCode::CfgFallbackUsed));
            }
            rules_ver = Some(rules.version);
            flop_v1::run(&obs, &rules, env.flop_value_raise)
        }
        (Effective::V1, Street::Turn) | (Effective::V1, Street::River) => flop_v0::run(&obs, &cfg),
    };

    outcome.rationale.splice(0..0, notes);

    // Step 3: resolve any size_tag the policy handed off.
    let amount = resolve_size_tag(&outcome, &obs, gs, modes.postflop_cap_ratio);

    // Step 4: minimum re-open.
    let (amount, min_reopen_adjusted) = if outcome.action == ActionKind::Raise {
        if let (Some(a), Some(raise)) = (amount, obs.find_action(ActionKind::Raise)) {
            if let Some(min) = raise.min {
                if a < min {
                    (Some(min), true)
                } else {
                    (Some(a), false)
                }
            } else {
                (Some(a), false)
            }
        } else {
            (amount, false)
        }
    } else {
        (amount, false)
    };
    if min_reopen_adjusted {
        outcome.rationale.push(rationale(RationaleCode::FlMinReopenAdjusted));
    }

    // Step 5: clamp to the legal window.
    let (amount, clamp_data) = clamp_into_window(outcome.action, amount, &obs.acts);
    if let Some(data) = clamp_data.clone() {
        outcome.rationale.push(rationale_data(RationaleCode::WarnClamped, data));
    }

    // Step 6: limp rationale.
    let hero_is_sb = obs.actor == obs.button;
    if obs.street == Street::Preflop
        && outcome.action == ActionKind::Call
        && hero_is_sb
        && obs.to_call <= obs.bb
        && !has_code(&outcome.rationale, &["PF_LIMP_COMPLETE_BLIND"])
    {
        outcome.rationale.push(rationale(RationaleCode::PfLimpCompleteBlind));
    }

    // Step 7: legality check.
    if !obs.acts.iter().any(|a| a.action == outcome.action) {
        return Err(SuggestError::IllegalSuggestion {
            policy: outcome.policy.to_string(),
            action: outcome.action.as_str().to_string(),
            legal: obs.acts.iter().map(|a| a.action.as_str().to_string()).collect(),
        });
    }

    // Step 8: confidence.
    let mut confidence = 0.5;
    if has_code(&outcome.rationale, &RANGE_OR_PRICE_HIT_CODES) {
        confidence += 0.30;
    }
    if has_code(&outcome.rationale, &PRICE_OR_SIZE_OK_CODES) {
        confidence += 0.20;
    }
    if outcome.policy == "flop_v1" && outcome.size_tag.is_some() && obs.to_call == 0 {
        confidence += 0.05;
    }
    let plan = outcome.meta.get("plan").and_then(Value::as_str).filter(|p| !p.is_empty());
    if plan.is_some() {
        confidence += 0.05;
    }
    if clamp_data.is_some() {
        confidence -= 0.10;
    }
    if has_code(&outcome.rationale, &FALLBACK_CODES) {
        confidence -= 0.10;
    }
    let confidence = confidence.clamp(0.5, 0.9);

    // Step 9: assemble response.
    let mut meta: Meta = outcome.meta.clone();
    meta_insert(&mut meta, "role", json!(obs.role.as_str()));
    if obs.board_texture != super::models::BoardTexture::Na {
        meta_insert(&mut meta, "texture", json!(obs.board_texture.as_str()));
    }
    if obs.spr_bucket != super::models::SprBucket::Na {
        meta_insert(&mut meta, "spr_bucket", json!(obs.spr_bucket.as_str()));
    }
    if obs.to_call > 0 {
        let pot_odds = obs.to_call as f64 / (obs.pot_now + obs.to_call) as f64;
        meta_insert(&mut meta, "pot_odds", json!(round4(pot_odds)));
        meta_insert(&mut meta, "mdf", json!(round4(1.0 - pot_odds)));
        meta_insert(&mut meta, "facing_size_tag", json!(obs.facing_size_tag.as_str()));
    }
    if obs.street == Street::Flop && matches!(effective, Effective::V1) {
        meta_insert(&mut meta, "range_adv", json!(obs.range_adv));
        meta_insert(&mut meta, "nut_adv", json!(obs.nut_adv));
    }
    if let Some(tag) = outcome.size_tag {
        meta_insert(&mut meta, "size_tag", json!(tag.as_str()));
    }
    if let Some(v) = rules_ver {
        meta_insert(&mut meta, "rules_ver", json!(v));
    }

    let debug = if env.debug || matches!(effective, Effective::V1 | Effective::V1Preflop) {
        Some(build_debug(gs, &obs, env, effective, rolled_to_v1, &modes))
    } else {
        None
    };

    if env.debug || matches!(effective, Effective::V1 | Effective::V1Preflop) {
        log::info!(
            target: "suggest_v1",
            "hand_id={} actor={} street={} policy={} action={} amount={:?} confidence={:.2}",
            gs.hand_id,
            actor,
            obs.street.as_str(),
            outcome.policy,
            outcome.action.as_str(),
            amount,
            confidence
        );
    }

    Ok(Suggestion {
        hand_id: gs.hand_id.clone(),
        actor,
        suggested: SuggestedAction { action: outcome.action.as_str().to_string(), amount },
        rationale: outcome.rationale,
        policy: outcome.policy.to_string(),
        confidence,
        meta: if meta.is_empty() { None } else { Some(meta) },
        debug,
    })
}

fn build_debug(
    gs: &GameState,
    obs: &super::observation::Observation,
    env: &SuggestEnv,
    effective: Effective,
    rolled_to_v1: Option<bool>,
    modes: &super::config::Modes,
) -> Value {
    let policy_version_str = match env.policy_version {
        PolicyVersion::V0 => "v0",
        PolicyVersion::V1 => "v1",
        PolicyVersion::V1Preflop => "v1_preflop",
        PolicyVersion::Auto => "auto",
    };
    let mut dbg = serde_json::Map::new();
    dbg.insert("policy_version".into(), json!(policy_version_str));
    dbg.insert("effective_version".into(), json!(match effective {
        Effective::V0 => "v0",
        Effective::V1 => "v1",
        Effective::V1Preflop => "v1_preflop",
    }));
    dbg.insert("table_mode".into(), json!(env.table_mode.as_str()));
    dbg.insert("spr_bucket".into(), json!(obs.spr_bucket.as_str()));
    dbg.insert("board_texture".into(), json!(obs.board_texture.as_str()));
    dbg.insert("pot_type".into(), json!(obs.pot_type.as_str()));
    dbg.insert("rollout_pct".into(), json!(env.rollout_pct));
    if let Some(rolled) = rolled_to_v1 {
        dbg.insert("rolled_to_v1".into(), json!(rolled));
    }
    dbg.insert("strategy".into(), json!(env.strategy.as_str()));
    dbg.insert("modes_version".into(), json!(modes.version));
    dbg.insert("role".into(), json!(obs.role.as_str()));
    dbg.insert("range_adv".into(), json!(obs.range_adv));
    dbg.insert("nut_adv".into(), json!(obs.nut_adv));
    dbg.insert("facing_size_tag".into(), json!(obs.facing_size_tag.as_str()));
    dbg.insert("to_call_bb".into(), json!(round4(obs.to_call as f64 / gs.bb as f64)));
    if obs.to_call > 0 {
        dbg.insert("open_to_bb".into(), json!(round4(obs.to_call as f64 / gs.bb as f64 + 1.0)));
        dbg.insert("pot_odds".into(), json!(round4(obs.to_call as f64 / (obs.pot_now + obs.to_call) as f64)));
    }
    Value::Object(dbg)
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

/// Convenience wrapper reading config/env from their process-wide defaults
/// (`configs/` relative to the current directory, `std::env`).
pub fn build_suggestion(
    gs: &GameState,
    actor: usize,
    acts: Vec<super::models::LegalAction>,
    cfg: Option<PolicyConfig>,
) -> Result<Suggestion, SuggestError> {
    build_suggestion_with(gs, actor, acts, cfg, &ConfigRoot::default(), &SuggestEnv::from_env())
}
