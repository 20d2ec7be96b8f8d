use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::fetch::{FetchError, Upstream};
use crate::probe::int_of;

/// A named extraction strategy: raw payload in, full-window shot history out.
/// Upstream payload shape drifts, so each known shape gets its own entry and
/// the list is tried in priority order.
pub type Strategy = fn(&Value, usize) -> Option<Vec<u32>>;

pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("game-log", from_game_log),
    ("landing-last-five", from_landing_last_five),
];

pub fn fetch_recent_shots(
    upstream: &dyn Upstream,
    cfg: &Config,
    player_id: i64,
) -> Result<Option<Vec<u32>>, FetchError> {
    let url = format!(
        "{}/player/{}/game-log/{}/{}",
        cfg.api_base, player_id, cfg.season, cfg.game_type
    );
    let body = upstream.get_json(&url)?;
    Ok(extract_recent_shots(&body, cfg.n_games))
}

/// The `window` most recent per-game shot counts, most-recent-first, from the
/// first strategy that yields a full window. `None` means insufficient data
/// and drops the player from ranking.
pub fn extract_recent_shots(value: &Value, window: usize) -> Option<Vec<u32>> {
    for (name, strategy) in STRATEGIES {
        if let Some(shots) = strategy(value, window) {
            debug!(strategy = *name, "extracted recent shot history");
            return Some(shots);
        }
    }
    None
}

fn from_game_log(value: &Value, window: usize) -> Option<Vec<u32>> {
    shots_from_entries(value.get("gameLog"), window)
}

fn from_landing_last_five(value: &Value, window: usize) -> Option<Vec<u32>> {
    shots_from_entries(value.get("last5Games"), window)
}

/// Probes `shots` first, then the nested `skaterStats.shots` fallback.
/// Only genuinely integer, non-negative values count; anything else is
/// skipped, never coerced to zero.
fn shots_from_entries(list: Option<&Value>, window: usize) -> Option<Vec<u32>> {
    let entries = list?.as_array()?;
    let mut shots = Vec::with_capacity(window);

    for entry in entries {
        let raw = entry.get("shots").and_then(int_of).or_else(|| {
            entry
                .get("skaterStats")
                .and_then(|s| s.get("shots"))
                .and_then(int_of)
        });
        if let Some(count) = raw {
            if count >= 0 {
                shots.push(count as u32);
            }
        }
        if shots.len() >= window {
            break;
        }
    }

    if shots.len() < window {
        return None;
    }
    Some(shots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn game_log(shots: &[Value]) -> Value {
        let entries: Vec<Value> = shots.iter().map(|s| json!({"shots": s})).collect();
        json!({"gameLog": entries})
    }

    #[test]
    fn collects_window_and_stops() {
        let payload = game_log(&[json!(1), json!(2), json!(0), json!(3), json!(4), json!(5)]);
        assert_eq!(extract_recent_shots(&payload, 5), Some(vec![1, 2, 0, 3, 4]));
    }

    #[test]
    fn invalid_values_are_skipped_not_coerced() {
        let payload = game_log(&[
            json!(2),
            json!(null),
            json!(1.5),
            json!(true),
            json!(-1),
            json!(3),
            json!(0),
        ]);
        assert_eq!(extract_recent_shots(&payload, 3), Some(vec![2, 3, 0]));
    }

    #[test]
    fn nested_skater_stats_fallback_is_probed() {
        let payload = json!({
            "gameLog": [
                {"skaterStats": {"shots": 4}},
                {"shots": 2},
                {"skaterStats": {"shots": 1}}
            ]
        });
        assert_eq!(extract_recent_shots(&payload, 3), Some(vec![4, 2, 1]));
    }

    #[test]
    fn short_history_is_insufficient() {
        let payload = game_log(&[json!(1), json!(2), json!(null), json!(3), json!(2)]);
        assert_eq!(extract_recent_shots(&payload, 5), None);
    }

    #[test]
    fn landing_shape_backs_up_a_short_game_log() {
        let payload = json!({
            "gameLog": [{"shots": 1}, {"shots": 2}],
            "last5Games": [
                {"shots": 3}, {"shots": 0}, {"shots": 2}, {"shots": 1}, {"shots": 4}
            ]
        });
        assert_eq!(extract_recent_shots(&payload, 5), Some(vec![3, 0, 2, 1, 4]));
    }

    #[test]
    fn full_game_log_wins_over_landing_shape() {
        let payload = json!({
            "gameLog": [{"shots": 9}, {"shots": 8}],
            "last5Games": [{"shots": 1}, {"shots": 1}]
        });
        assert_eq!(extract_recent_shots(&payload, 2), Some(vec![9, 8]));
    }
}
