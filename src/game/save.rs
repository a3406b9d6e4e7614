//! Save/load for Case Clicker.
//!
//! The save is a full-state JSON overwrite under a fixed localStorage key,
//! written after every mutation. Loading is a lenient per-field merge: a
//! missing key, malformed JSON, or a single wrong-typed field all fall back
//! to that field's default instead of failing. Corrupt data is never
//! surfaced as an error to the player.

use serde::Serialize;
use serde_json::Value;

use super::state::GameState;

/// localStorage key.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "case_clicker_save";

/// Serialization shape of a save. Transient UI state (pending reveals,
/// notices, flash timers) is deliberately not part of it.
#[derive(Serialize, Debug, PartialEq)]
pub struct SaveData {
    pub balance: u64,
    pub level: u32,
    pub click_power: u64,
    pub auto_collect: bool,
    pub total_clicks: u64,
    pub rng_state: u32,
    /// Purchase state per upgrade slot, in `GameState::new()` order.
    pub upgrade_purchased: Vec<bool>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            balance: 100,
            level: 1,
            click_power: 1,
            auto_collect: false,
            total_clicks: 0,
            rng_state: 42,
            upgrade_purchased: Vec::new(),
        }
    }
}

/// Extract the persistent fields of the state.
pub fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        balance: state.balance,
        level: state.level,
        click_power: state.click_power,
        auto_collect: state.auto_collect,
        total_clicks: state.total_clicks,
        rng_state: state.rng_state,
        upgrade_purchased: state.upgrades.iter().map(|u| u.purchased).collect(),
    }
}

/// Apply a save on top of a freshly constructed state.
/// Slots beyond the current upgrade catalog are ignored.
pub fn apply_save(state: &mut GameState, save: &SaveData) {
    state.balance = save.balance;
    state.level = save.level;
    state.click_power = save.click_power;
    state.auto_collect = save.auto_collect;
    state.total_clicks = save.total_clicks;
    state.rng_state = save.rng_state;
    for (i, &purchased) in save.upgrade_purchased.iter().enumerate() {
        if let Some(u) = state.upgrades.get_mut(i) {
            u.purchased = purchased;
        }
    }
}

/// Parse a save leniently: each field is read independently and falls back
/// to its default when absent or of the wrong type. `"{}"` therefore yields
/// exactly the default state, and one corrupt field never poisons the rest.
pub fn parse_save(json: &str) -> SaveData {
    let value: Value = serde_json::from_str(json).unwrap_or(Value::Null);
    let defaults = SaveData::default();
    SaveData {
        balance: value
            .get("balance")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.balance),
        level: value
            .get("level")
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(defaults.level),
        click_power: value
            .get("click_power")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.click_power),
        auto_collect: value
            .get("auto_collect")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.auto_collect),
        total_clicks: value
            .get("total_clicks")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.total_clicks),
        rng_state: value
            .get("rng_state")
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(defaults.rng_state),
        upgrade_purchased: value
            .get("upgrade_purchased")
            .and_then(Value::as_array)
            .map(|a| a.iter().map(|v| v.as_bool().unwrap_or(false)).collect())
            .unwrap_or(defaults.upgrade_purchased),
    }
}

/// localStorage handle. WASM only.
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Write the save to localStorage. Failures are logged and swallowed; a
/// missed save only costs progress since the last successful one.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &GameState) {
    let json = match serde_json::to_string(&extract_save(state)) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("case-clicker: save serialization failed: {e}").into());
            return;
        }
    };
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(&format!("case-clicker: localStorage write failed: {e:?}").into());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_game(_state: &GameState) {}

/// Restore the save from localStorage, if any. Returns whether a record was
/// found; its contents are merged leniently either way.
#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut GameState) -> bool {
    let storage = match get_storage() {
        Some(s) => s,
        None => return false,
    };
    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return false,
    };
    apply_save(state, &parse_save(&json));
    true
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_game(_state: &mut GameState) -> bool {
    false
}
