//! Config Loader & Table Cache.
//!
//! Loads JSON documents under a configurable `configs/` root, memoized by
//! `(strategy, path)`. Version `0` is the sentinel for "bad config" — callers
//! treat it as a signal (`CFG_FALLBACK_USED`), never as "absent". Reads never
//! rescan the file; [`reload_table`] performs the explicit rescan a hot
//! reload would use.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use serde_json::Value;

use super::models::Strategy;

/// Root directory `configs/` assets are loaded from. Overridable for tests.
#[derive(Debug, Clone)]
pub struct ConfigRoot(pub PathBuf);

impl Default for ConfigRoot {
    fn default() -> Self {
        ConfigRoot(PathBuf::from("configs"))
    }
}

impl ConfigRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigRoot(path.into())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    version: i64,
}

#[derive(Default)]
struct TableCacheInner {
    entries: HashMap<(String, PathBuf), CacheEntry>,
    // Insertion order, oldest first, for the 8-entry eviction bound.
    order: Vec<(String, PathBuf)>,
}

const MAX_CACHE_ENTRIES: usize = 8;

struct TableCache {
    inner: RwLock<TableCacheInner>,
}

static TABLE_CACHE: OnceLock<TableCache> = OnceLock::new();

fn cache() -> &'static TableCache {
    TABLE_CACHE.get_or_init(|| TableCache { inner: RwLock::new(TableCacheInner::default()) })
}

fn load_from_disk(path: &Path) -> (Value, i64) {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("suggest_engine: failed to read config {}: {}", path.display(), e);
            return (Value::Null, 0);
        }
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(v) => {
            let version = v.get("version").and_then(Value::as_i64).unwrap_or(0);
            (v, version)
        }
        Err(e) => {
            log::warn!("suggest_engine: failed to parse config {}: {}", path.display(), e);
            (Value::Null, 0)
        }
    }
}

/// Load a JSON table, memoized by `(strategy, path)`. A cache hit returns
/// without touching the filesystem — reads do not rescan.
pub fn load_table(root: &ConfigRoot, strategy: &str, rel_path: &str) -> (Value, i64) {
    let key = (strategy.to_string(), PathBuf::from(rel_path));
    {
        let guard = cache().inner.read().unwrap();
        if let Some(entry) = guard.entries.get(&key) {
            return (entry.data.clone(), entry.version);
        }
    }
    let full_path = root.0.join(rel_path);
    let (data, version) = load_from_disk(&full_path);
    insert(key, data.clone(), version);
    (data, version)
}

/// Force a rescan of `(strategy, path)` and publish the fresh result,
/// evicting the stale entry first. Used by hot-reload callers; ordinary
/// reads never call this.
pub fn reload_table(root: &ConfigRoot, strategy: &str, rel_path: &str) -> (Value, i64) {
    let key = (strategy.to_string(), PathBuf::from(rel_path));
    let full_path = root.0.join(rel_path);
    let (data, version) = load_from_disk(&full_path);
    insert(key, data.clone(), version);
    (data, version)
}

fn insert(key: (String, PathBuf), data: Value, version: i64) {
    let mut guard = cache().inner.write().unwrap();
    if !guard.entries.contains_key(&key) {
        guard.order.push(key.clone());
        while guard.order.len() > MAX_CACHE_ENTRIES {
            let oldest = guard.order.remove(0);
            guard.entries.remove(&oldest);
        }
    }
    guard.entries.insert(key, CacheEntry { data, version });
}

/// Strategy-selected flop-rules path: invalid strategy
/// strings are coerced to `medium` by [`Strategy::parse_or_default`] before
/// this is ever called.
pub fn flop_rules_path(strategy: Strategy) -> String {
    format!("postflop/flop_rules_HU_{}.json", strategy.as_str())
}

/// Tunable policy thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    pub open_size_bb: f64,
    pub call_threshold_bb: f64,
    pub pot_odds_threshold: f64,
    pub pot_odds_threshold_callrange: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            open_size_bb: 2.5,
            call_threshold_bb: 3.0,
            pot_odds_threshold: 0.33,
            pot_odds_threshold_callrange: 0.40,
        }
    }
}

/// Per-table-mode numeric knobs loaded from `configs/preflop/modes.json`.
/// Falls back to the documented defaults (with `version: 0`) when the
/// table is missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modes {
    pub open_bb: f64,
    pub defend_threshold_ip: f64,
    pub defend_threshold_oop: f64,
    pub reraise_ip_mult: f64,
    pub reraise_oop_mult: f64,
    pub reraise_oop_offset: f64,
    pub cap_ratio: f64,
    pub fourbet_ip_mult: f64,
    pub cap_ratio_4b: f64,
    pub threebet_bucket_small_le: f64,
    pub threebet_bucket_mid_le: f64,
    pub postflop_cap_ratio: f64,
    pub version: i64,
}

impl Default for Modes {
    fn default() -> Self {
        Modes {
            open_bb: 2.5,
            defend_threshold_ip: 0.42,
            defend_threshold_oop: 0.38,
            reraise_ip_mult: 3.0,
            reraise_oop_mult: 3.5,
            reraise_oop_offset: 0.5,
            cap_ratio: 0.9,
            fourbet_ip_mult: 2.2,
            cap_ratio_4b: 0.9,
            threebet_bucket_small_le: 9.0,
            threebet_bucket_mid_le: 11.0,
            postflop_cap_ratio: 0.85,
            version: 0,
        }
    }
}

fn f64_field(v: &Value, key: &str, default: f64) -> f64 {
    v.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Load `configs/preflop/modes.json`'s `"HU"` block, merging missing keys
/// from [`Modes::default`]. `version: 0` (missing file, bad JSON, or no
/// declared version) signals "bad config" to the caller.
pub fn load_modes(root: &ConfigRoot) -> Modes {
    let (data, version) = load_table(root, "HU", "preflop/modes.json");
    let hu = data.get("HU");
    let defaults = Modes::default();
    match hu {
        Some(hu) => Modes {
            open_bb: f64_field(hu, "open_bb", defaults.open_bb),
            defend_threshold_ip: f64_field(hu, "defend_threshold_ip", defaults.defend_threshold_ip),
            defend_threshold_oop: f64_field(hu, "defend_threshold_oop", defaults.defend_threshold_oop),
            reraise_ip_mult: f64_field(hu, "reraise_ip_mult", defaults.reraise_ip_mult),
            reraise_oop_mult: f64_field(hu, "reraise_oop_mult", defaults.reraise_oop_mult),
            reraise_oop_offset: f64_field(hu, "reraise_oop_offset", defaults.reraise_oop_offset),
            cap_ratio: f64_field(hu, "cap_ratio", defaults.cap_ratio),
            fourbet_ip_mult: f64_field(hu, "fourbet_ip_mult", defaults.fourbet_ip_mult),
            cap_ratio_4b: f64_field(hu, "cap_ratio_4b", defaults.cap_ratio_4b),
            threebet_bucket_small_le: f64_field(hu, "threebet_bucket_small_le", defaults.threebet_bucket_small_le),
            threebet_bucket_mid_le: f64_field(hu, "threebet_bucket_mid_le", defaults.threebet_bucket_mid_le),
            postflop_cap_ratio: f64_field(hu, "postflop_cap_ratio", defaults.postflop_cap_ratio),
            version,
        },
        None => Modes { version: 0, ..defaults },
    }
}

/// A preflop open-range table: `position → set of 169-combos`.
#[derive(Debug, Clone, Default)]
pub struct OpenTable {
    pub sb: std::collections::HashSet<String>,
    pub version: i64,
}

pub fn load_open_table(root: &ConfigRoot) -> OpenTable {
    let (data, version) = load_table(root, "HU", "preflop/open_HU.json");
    let sb = data
        .get("SB")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default();
    OpenTable { sb, version }
}

/// One `{call, reraise|fourbet}` bucket leaf of the vs-raise table.
#[derive(Debug, Clone, Default)]
pub struct VsBucket {
    pub call: std::collections::HashSet<String>,
    pub reraise: std::collections::HashSet<String>,
}

impl VsBucket {
    fn from_json(v: &Value, reraise_key_primary: &str, reraise_key_alias: Option<&str>) -> Self {
        let combo_set = |key: &str| -> std::collections::HashSet<String> {
            v.get(key)
                .and_then(Value::as_array)
                .map(|arr| arr.iter().filter_map(|x| x.as_str().map(String::from)).collect())
                .unwrap_or_default()
        };
        let mut reraise = combo_set(reraise_key_primary);
        if reraise.is_empty() {
            if let Some(alias) = reraise_key_alias {
                reraise = combo_set(alias);
            }
        }
        VsBucket { call: combo_set("call"), reraise }
    }
}

/// The vs-raise table: `BB_vs_SB` and `SB_vs_BB_3bet`, each bucketed
/// `small`/`mid`/`large`. The `SB_vs_BB_3bet` node's `reraise` field
/// tolerates `fourbet` as its primary key with `reraise` as an accepted
/// alias.
#[derive(Debug, Clone, Default)]
pub struct VsTable {
    pub bb_vs_sb: HashMap<String, VsBucket>,
    pub sb_vs_bb_3bet: HashMap<String, VsBucket>,
    pub version: i64,
}

pub fn load_vs_table(root: &ConfigRoot) -> VsTable {
    let (data, version) = load_table(root, "HU", "preflop/vs_HU.json");
    let mut bb_vs_sb = HashMap::new();
    if let Some(node) = data.get("BB_vs_SB").and_then(Value::as_object) {
        for (bucket, leaf) in node {
            bb_vs_sb.insert(bucket.clone(), VsBucket::from_json(leaf, "reraise", None));
        }
    }
    let mut sb_vs_bb_3bet = HashMap::new();
    if let Some(node) = data.get("SB_vs_BB_3bet").and_then(Value::as_object) {
        for (bucket, leaf) in node {
            sb_vs_bb_3bet.insert(bucket.clone(), VsBucket::from_json(leaf, "fourbet", Some("reraise")));
        }
    }
    VsTable { bb_vs_sb, sb_vs_bb_3bet, version }
}

/// Flop rules document for one strategy profile: a raw `serde_json::Value`
/// tree.
#[derive(Debug, Clone)]
pub struct FlopRules {
    pub data: Value,
    pub version: i64,
    pub strategy: Strategy,
}

pub fn load_flop_rules(root: &ConfigRoot, strategy: Strategy) -> FlopRules {
    let path = flop_rules_path(strategy);
    let (data, version) = load_table(root, strategy.as_str(), &path);
    FlopRules { data, version, strategy }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_yields_version_zero() {
        let root = ConfigRoot::new("/nonexistent/does/not/exist");
        let (_, version) = load_table(&root, "HU", "preflop/open_HU.json");
        assert_eq!(version, 0);
    }

    #[test]
    fn modes_defaults_applied_when_missing() {
        let root = ConfigRoot::new("/nonexistent/does/not/exist-modes");
        let modes = load_modes(&root);
        assert_eq!(modes.version, 0);
        assert_eq!(modes.open_bb, Modes::default().open_bb);
    }
}
