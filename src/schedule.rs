use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::config::Config;
use crate::fetch::{FetchError, Upstream};
use crate::probe::pick_str;

/// Symmetric team -> opponent mapping for one date. BTreeMap keeps iteration
/// in alphabetical team order, which fixes the pipeline's processing order.
pub type Matchups = BTreeMap<String, String>;

/// Resolves "today" once per run: UTC shifted by the configured fixed offset,
/// so the board date does not depend on the host clock's zone.
pub fn run_date(cfg: &Config) -> String {
    let shifted = Utc::now() + Duration::hours(cfg.schedule_utc_offset_hours);
    shifted.format("%Y-%m-%d").to_string()
}

pub fn fetch_matchups(
    upstream: &dyn Upstream,
    cfg: &Config,
    date: &str,
) -> Result<Matchups, FetchError> {
    let url = format!("{}/score/{}", cfg.api_base, date);
    let body = upstream.get_json(&url)?;
    Ok(matchups_from_value(&body))
}

/// Scans `games[]` for home/away abbrevs. Games missing either side are
/// skipped; an empty mapping means no games today and is a valid result.
pub fn matchups_from_value(value: &Value) -> Matchups {
    let mut matchups = Matchups::new();
    let Some(games) = value.get("games").and_then(|v| v.as_array()) else {
        return matchups;
    };

    for game in games {
        let home = game.get("homeTeam").and_then(|t| pick_str(t, &["abbrev"]));
        let away = game.get("awayTeam").and_then(|t| pick_str(t, &["abbrev"]));
        if let (Some(home), Some(away)) = (home, away) {
            matchups.insert(home.clone(), away.clone());
            matchups.insert(away, home);
        }
    }

    matchups
}
