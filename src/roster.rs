use serde_json::Value;

use crate::config::Config;
use crate::fetch::{FetchError, Upstream};
use crate::probe::{int_of, str_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Forward,
    Defenseman,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Forward => "F",
            Position::Defenseman => "D",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Skater {
    pub id: i64,
    pub name: String,
    pub position: Position,
}

pub fn fetch_roster(
    upstream: &dyn Upstream,
    cfg: &Config,
    team: &str,
) -> Result<Vec<Skater>, FetchError> {
    let url = format!("{}/roster/{}/current", cfg.api_base, team);
    let body = upstream.get_json(&url)?;
    Ok(skaters_from_value(&body))
}

/// Scans only the forward and defenseman groups, so goaltenders are excluded
/// by construction. Entries without an integer id are skipped.
pub fn skaters_from_value(value: &Value) -> Vec<Skater> {
    let mut out = Vec::new();
    for (group, position) in [
        ("forwards", Position::Forward),
        ("defensemen", Position::Defenseman),
    ] {
        let Some(entries) = value.get(group).and_then(|v| v.as_array()) else {
            continue;
        };
        for entry in entries {
            let Some(id) = entry.get("id").and_then(int_of) else {
                continue;
            };
            out.push(Skater {
                id,
                name: display_name(entry),
                position,
            });
        }
    }
    out
}

/// First + last name, joined and trimmed; falls back to `fullName`, then a
/// literal "Unknown". Name fields may be plain strings or translation objects.
fn display_name(entry: &Value) -> String {
    let first = entry.get("firstName").and_then(str_of);
    let last = entry.get("lastName").and_then(str_of);

    let joined = [first, last]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !joined.is_empty() {
        return joined;
    }

    entry
        .get("fullName")
        .and_then(str_of)
        .unwrap_or_else(|| "Unknown".to_string())
}
