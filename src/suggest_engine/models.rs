//! Shared enums and value types used across the engine: streets, actions,
//! the legal-action window, and the small vocabulary of discretizations
//! (board texture, SPR bucket, facing-size tag, ...) that the policies key
//! their lookups on.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HU is currently the only supported table mode (`SUGGEST_TABLE_MODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    Hu,
}

impl TableMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TableMode::Hu => "HU",
        }
    }
}

/// One action an actor may take. `Draw` is the hand engine's own bookkeeping
/// action (dealing) and never appears as a `LegalAction` or a `Suggestion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Allin,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::Allin => "allin",
        }
    }

    /// Does this action carry a chip amount that needs sizing/clamping?
    pub fn is_sized(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::Allin)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One action offered by the hand engine for the current decision. `min`/
/// `max` are inclusive chip bounds, present only for bet/raise/allin; for
/// `raise`, `min` is the minimum *to-amount*, not an increment. `to_call` is
/// present on `call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalAction {
    pub action: ActionKind,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub to_call: Option<i64>,
}

impl LegalAction {
    pub fn fold() -> Self {
        LegalAction { action: ActionKind::Fold, min: None, max: None, to_call: None }
    }
    pub fn check() -> Self {
        LegalAction { action: ActionKind::Check, min: None, max: None, to_call: None }
    }
    pub fn call(to_call: i64) -> Self {
        LegalAction { action: ActionKind::Call, min: None, max: None, to_call: Some(to_call) }
    }
    pub fn bet(min: i64, max: i64) -> Self {
        LegalAction { action: ActionKind::Bet, min: Some(min), max: Some(max), to_call: None }
    }
    pub fn raise(min: i64, max: i64) -> Self {
        LegalAction { action: ActionKind::Raise, min: Some(min), max: Some(max), to_call: None }
    }
    pub fn allin(amount: i64) -> Self {
        LegalAction { action: ActionKind::Allin, min: Some(amount), max: Some(amount), to_call: None }
    }
}

/// Board texture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTexture {
    Dry,
    Semi,
    Wet,
    /// Fewer than 3 board cards, or not applicable to the street.
    Na,
}

impl BoardTexture {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardTexture::Dry => "dry",
            BoardTexture::Semi => "semi",
            BoardTexture::Wet => "wet",
            BoardTexture::Na => "na",
        }
    }
}

impl fmt::Display for BoardTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stack-to-pot ratio discretization. `low` ≤3, `mid` (3,6], `high` >6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprBucket {
    Low,
    Mid,
    High,
    Na,
}

impl SprBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            SprBucket::Low => "low",
            SprBucket::Mid => "mid",
            SprBucket::High => "high",
            SprBucket::Na => "na",
        }
    }

    /// Effective-stack-in-BB approximation used only when the hand engine
    /// doesn't expose exact stacks.
    pub fn approx_eff_stack_bb(self) -> f64 {
        match self {
            SprBucket::Low => 10.0,
            SprBucket::Mid => 20.0,
            SprBucket::High => 40.0,
            SprBucket::Na => 20.0,
        }
    }
}

impl fmt::Display for SprBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discretized size of the bet/raise hero is facing, as a fraction of pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingSizeTag {
    Third,
    Half,
    TwoThirdPlus,
    Na,
}

impl FacingSizeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FacingSizeTag::Third => "third",
            FacingSizeTag::Half => "half",
            FacingSizeTag::TwoThirdPlus => "two_third+",
            FacingSizeTag::Na => "na",
        }
    }

    /// The key used to descend into a flop-rule leaf's `facing` sub-tree,
    /// where `two_third+` becomes `two_third_plus` (JSON object keys can't
    /// carry a literal `+`).
    pub fn facing_key(self) -> &'static str {
        match self {
            FacingSizeTag::Third => "third",
            FacingSizeTag::Half => "half",
            FacingSizeTag::TwoThirdPlus => "two_third_plus",
            FacingSizeTag::Na => "na",
        }
    }
}

impl fmt::Display for FacingSizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discretization of a raise size in BB, used both for BB-vs-SB-open and
/// SB-vs-BB-3bet bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBucket {
    Small,
    Mid,
    Large,
}

impl SizeBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeBucket::Small => "small",
            SizeBucket::Mid => "mid",
            SizeBucket::Large => "large",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotType {
    Limped,
    SingleRaised,
    Threebet,
}

impl PotType {
    pub fn as_str(self) -> &'static str {
        match self {
            PotType::Limped => "limped",
            PotType::SingleRaised => "single_raised",
            PotType::Threebet => "threebet",
        }
    }
}

impl fmt::Display for PotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Pfr,
    Caller,
    Na,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Pfr => "pfr",
            Role::Caller => "caller",
            Role::Na => "na",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The six flop teaching buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlopHandClass {
    ValueTwoPairPlus,
    OverpairOrTopPairStrongKicker,
    TopPairWeakOrSecondPair,
    MiddlePairOrThirdMinus,
    StrongDraw,
    WeakDrawOrAir,
}

impl FlopHandClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FlopHandClass::ValueTwoPairPlus => "value_two_pair_plus",
            FlopHandClass::OverpairOrTopPairStrongKicker => "overpair_or_top_pair_strong_kicker",
            FlopHandClass::TopPairWeakOrSecondPair => "top_pair_weak_or_second_pair",
            FlopHandClass::MiddlePairOrThirdMinus => "middle_pair_or_third_minus",
            FlopHandClass::StrongDraw => "strong_draw",
            FlopHandClass::WeakDrawOrAir => "weak_draw_or_air",
        }
    }
}

impl fmt::Display for FlopHandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preflop analyser class (5-tier hand-strength grading), used for
/// `hand_class` preflop and by the v0 baseline's open/call ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflopHandClass {
    Premium,
    Strong,
    Playable,
    Marginal,
    Trash,
    Unknown,
}

impl PreflopHandClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PreflopHandClass::Premium => "premium",
            PreflopHandClass::Strong => "strong",
            PreflopHandClass::Playable => "playable",
            PreflopHandClass::Marginal => "marginal",
            PreflopHandClass::Trash => "trash",
            PreflopHandClass::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PreflopHandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `size_tag` ∈ {third, half, two_third, pot, all_in} — the teaching-facing
/// size a policy picks; `sizing::size_to_amount`/`raise_to_amount` translate
/// it into chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTag {
    Third,
    Half,
    TwoThird,
    Pot,
    AllIn,
}

impl SizeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeTag::Third => "third",
            SizeTag::Half => "half",
            SizeTag::TwoThird => "two_third",
            SizeTag::Pot => "pot",
            SizeTag::AllIn => "all_in",
        }
    }

    pub fn parse(s: &str) -> Option<SizeTag> {
        match s {
            "third" => Some(SizeTag::Third),
            "half" => Some(SizeTag::Half),
            "two_third" => Some(SizeTag::TwoThird),
            "pot" => Some(SizeTag::Pot),
            "all_in" => Some(SizeTag::AllIn),
            _ => None,
        }
    }
}

impl fmt::Display for SizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `SUGGEST_POLICY_VERSION` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyVersion {
    V0,
    V1,
    V1Preflop,
    Auto,
}

impl PolicyVersion {
    pub fn parse(s: &str) -> PolicyVersion {
        match s {
            "v1" => PolicyVersion::V1,
            "v1_preflop" => PolicyVersion::V1Preflop,
            "auto" => PolicyVersion::Auto,
            _ => PolicyVersion::V0,
        }
    }
}

/// Strategy profile selecting which flop-rule document to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Loose,
    Medium,
    Tight,
}

impl Strategy {
    pub fn parse_or_default(s: &str) -> Strategy {
        match s {
            "loose" => Strategy::Loose,
            "tight" => Strategy::Tight,
            _ => Strategy::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Loose => "loose",
            Strategy::Medium => "medium",
            Strategy::Tight => "tight",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
