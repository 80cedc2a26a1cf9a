//! Rationale code catalogue.
//!
//! A closed enumeration of every explanation code a policy may emit, each
//! with a default message. `rationale(code, override_msg, data)` builds the
//! `{code, msg, data?}` item the service attaches to a `Suggestion`.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RationaleCode {
    // --- analysis notes ---
    AnWeak,
    AnVeryWeak,
    AnSuitedBroadway,
    AnPremiumPair,

    // --- preflop v0 ---
    PfOpenBet,
    PfOpenRaise,
    PfCheck,
    PfFold,
    PfCall,
    PfFoldExpensive,

    // --- preflop v1 ---
    PfOpenRangeHit,
    PfDefend3bet,
    PfDefend3betMinRaiseAdjusted,
    PfDefendPriceOk,
    PfDefendPriceBad,
    PfLimpCompleteBlind,
    PfNoLegalRaise,
    PfAttack4bet,
    PfAttack4betMinRaiseAdjusted,

    // --- postflop v0.3 ---
    PlHeader,
    PlProbeBet,
    PlCheck,
    PlCall,
    PlFold,
    PlAllinOnly,

    // --- flop v1 ---
    FlRangeAdvSmallBet,
    FlNutAdvPolar,
    FlDryCbetThird,
    FlDelayedCbetPlan,
    FlCheckRange,
    FlLowSprValueUp,
    FlHighSprCtrl,
    FlMdfDefend,
    FlRaiseValue,
    FlRaiseSemiBluff,
    FlMinReopenAdjusted,

    // --- warnings ---
    CfgFallbackUsed,
    SafeCheck,
    WarnClamped,
    WAnalysis,
}

impl RationaleCode {
    pub fn code(self) -> &'static str {
        use RationaleCode::*;
        match self {
            AnWeak => "E001",
            AnVeryWeak => "E002",
            AnSuitedBroadway => "N101",
            AnPremiumPair => "N102",

            PfOpenBet => "PF_OPEN_BET",
            PfOpenRaise => "PF_OPEN_RAISE",
            PfCheck => "PF_CHECK",
            PfFold => "PF_FOLD",
            PfCall => "PF_CALL",
            PfFoldExpensive => "PF_FOLD_EXPENSIVE",

            PfOpenRangeHit => "PF_OPEN_RANGE_HIT",
            PfDefend3bet => "PF_DEFEND_3BET",
            PfDefend3betMinRaiseAdjusted => "PF_DEFEND_3BET_MIN_RAISE_ADJUSTED",
            PfDefendPriceOk => "PF_DEFEND_PRICE_OK",
            PfDefendPriceBad => "PF_DEFEND_PRICE_BAD",
            PfLimpCompleteBlind => "PF_LIMP_COMPLETE_BLIND",
            PfNoLegalRaise => "PF_NO_LEGAL_RAISE",
            PfAttack4bet => "PF_ATTACK_4BET",
            PfAttack4betMinRaiseAdjusted => "PF_ATTACK_4BET_MIN_RAISE_ADJUSTED",

            PlHeader => "PL_HEADER",
            PlProbeBet => "PL_PROBE_BET",
            PlCheck => "PL_CHECK",
            PlCall => "PL_CALL",
            PlFold => "PL_FOLD",
            PlAllinOnly => "PL_ALLIN_ONLY",

            FlRangeAdvSmallBet => "FL_RANGE_ADV_SMALL_BET",
            FlNutAdvPolar => "FL_NUT_ADV_POLAR",
            FlDryCbetThird => "FL_DRY_CBET_THIRD",
            FlDelayedCbetPlan => "FL_DELAYED_CBET_PLAN",
            FlCheckRange => "FL_CHECK_RANGE",
            FlLowSprValueUp => "FL_LOW_SPR_VALUE_UP",
            FlHighSprCtrl => "FL_HIGH_SPR_CTRL",
            FlMdfDefend => "FL_MDF_DEFEND",
            FlRaiseValue => "FL_RAISE_VALUE",
            FlRaiseSemiBluff => "FL_RAISE_SEMI_BLUFF",
            FlMinReopenAdjusted => "FL_MIN_REOPEN_ADJUSTED",

            CfgFallbackUsed => "CFG_FALLBACK_USED",
            SafeCheck => "SAFE_CHECK",
            WarnClamped => "WARN_CLAMPED",
            WAnalysis => "W_ANALYSIS",
        }
    }

    pub fn default_msg(self) -> &'static str {
        use RationaleCode::*;
        match self {
            AnWeak => "Weak hand: consider folding in many preflop spots.",
            AnVeryWeak => "Very weak offsuit/unconnected. Often a fold preflop.",
            AnSuitedBroadway => "Suited broadway: good equity/realization potential.",
            AnPremiumPair => "Premium pair: raise or 3-bet in many spots.",

            PfOpenBet => "Unopened pot: open-size bet.",
            PfOpenRaise => "Unopened pot: open-size raise.",
            PfCheck => "Not in the open-raise range: checking.",
            PfFold => "No better action available: folding.",
            PfCall => "Facing a bet: in range and cheap enough to call.",
            PfFoldExpensive => "Facing a bet: out of range or too expensive, folding.",

            PfOpenRangeHit => "Combo is in the SB open range.",
            PfDefend3bet => "Combo is in the 3-bet range: re-raising.",
            PfDefend3betMinRaiseAdjusted => "3-bet size lifted to the minimum legal re-open.",
            PfDefendPriceOk => "Price is acceptable: calling.",
            PfDefendPriceBad => "Price is unfavourable: folding.",
            PfLimpCompleteBlind => "Completing the blind cheaply.",
            PfNoLegalRaise => "Combo is in range but no bet/raise is legal here.",
            PfAttack4bet => "Combo is in the 4-bet range: re-raising.",
            PfAttack4betMinRaiseAdjusted => "4-bet size lifted to the minimum legal re-open.",

            PlHeader => "Postflop v0.3: hand tags + pot-odds threshold + minimum bet.",
            PlProbeBet => "No bet yet this street: probing with a minimum-size bet.",
            PlCheck => "Betting isn't appropriate here: checking.",
            PlCall => "Pot odds are acceptable: calling.",
            PlFold => "Pot odds are unfavourable: folding.",
            PlAllinOnly => "Only all-in is legal.",

            FlRangeAdvSmallBet => "Hero's range is ahead here: a small bet applies pressure cheaply.",
            FlNutAdvPolar => "Hero holds more of the nutted combos: betting polarized and big.",
            FlDryCbetThird => "Dry board, PFR: a small continuation bet.",
            FlDelayedCbetPlan => "Checking back, planning a delayed continuation bet.",
            FlCheckRange => "Checking the range back.",
            FlLowSprValueUp => "Low SPR: betting bigger to get value in before the stacks shrink further.",
            FlHighSprCtrl => "High SPR: checking to control the size of the pot.",
            FlMdfDefend => "Defending at the minimum frequency the pot odds require.",
            FlRaiseValue => "Raising for value.",
            FlRaiseSemiBluff => "Raising as a semi-bluff with outs to improve.",
            FlMinReopenAdjusted => "Raise size lifted to the minimum legal re-open.",

            CfgFallbackUsed => "Configuration table unavailable or invalid: using a conservative fallback.",
            SafeCheck => "Unusual situation: falling back to check.",
            WarnClamped => "Suggested amount was out of bounds and has been clamped.",
            WAnalysis => "Unable to analyse the hand; using a conservative line.",
        }
    }
}

impl fmt::Display for RationaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One rationale entry attached to a `Suggestion`: `{code, msg, data?}`.
#[derive(Debug, Clone, Serialize)]
pub struct RationaleItem {
    pub code: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Build a rationale item, defaulting to the code's canned message.
pub fn rationale(code: RationaleCode) -> RationaleItem {
    RationaleItem { code: code.code().to_string(), msg: code.default_msg().to_string(), data: None }
}

pub fn rationale_msg(code: RationaleCode, msg: impl Into<String>) -> RationaleItem {
    RationaleItem { code: code.code().to_string(), msg: msg.into(), data: None }
}

pub fn rationale_data(code: RationaleCode, data: Value) -> RationaleItem {
    RationaleItem { code: code.code().to_string(), msg: code.default_msg().to_string(), data: Some(data) }
}

pub fn rationale_full(code: RationaleCode, msg: impl Into<String>, data: Value) -> RationaleItem {
    RationaleItem { code: code.code().to_string(), msg: msg.into(), data: Some(data) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_catalogue_spelling() {
        assert_eq!(RationaleCode::PfOpenRangeHit.code(), "PF_OPEN_RANGE_HIT");
        assert_eq!(RationaleCode::FlMdfDefend.code(), "FL_MDF_DEFEND");
        assert_eq!(RationaleCode::WarnClamped.code(), "WARN_CLAMPED");
    }

    #[test]
    fn rationale_builder_defaults_message() {
        let item = rationale(RationaleCode::PfFold);
        assert_eq!(item.code, "PF_FOLD");
        assert!(item.data.is_none());
    }
}
