use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::board::{DailyBoard, ScoreRecord};
use crate::config::Config;

/// Presentation shape of one emitted row. Numeric fields are rounded here,
/// at the boundary, and nowhere earlier.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SinkRow {
    pub player: String,
    pub player_id: i64,
    pub team: String,
    pub opponent: String,
    pub pos: &'static str,
    pub sog_avg: f64,
    pub hit2: f64,
    pub hit3: f64,
    pub opp_sa: f64,
    pub boost: f64,
    pub adj_sog: f64,
    pub score2: f64,
    pub score3: f64,
    pub date: String,
}

#[derive(Debug, Serialize)]
struct SinkPayload<'a> {
    secret: &'a str,
    rows: &'a [SinkRow],
}

pub fn sink_rows(board: &DailyBoard) -> Vec<SinkRow> {
    board.rows().map(sink_row).collect()
}

fn sink_row(record: &ScoreRecord) -> SinkRow {
    SinkRow {
        player: record.player.clone(),
        player_id: record.player_id,
        team: record.team.clone(),
        opponent: record.opponent.clone(),
        pos: record.position.label(),
        sog_avg: round_to(record.mean, 4),
        hit2: round_to(record.hit_rate_2, 4),
        hit3: round_to(record.hit_rate_3, 4),
        opp_sa: round_to(record.opponent_sa, 4),
        boost: round_to(record.boost, 6),
        adj_sog: round_to(record.adjusted_mean, 4),
        score2: round_to(record.score2, 4),
        score3: round_to(record.score3, 4),
        date: record.date.clone(),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Delivers the board to the webhook, if one is configured. Failure is
/// logged and swallowed: delivery problems never change the run's outcome,
/// and there is no retry.
pub fn deliver(cfg: &Config, board: &DailyBoard) {
    let (Some(url), Some(secret)) = (cfg.webhook_url.as_deref(), cfg.webhook_secret.as_deref())
    else {
        info!("webhook not configured, skipping post");
        return;
    };

    let rows = sink_rows(board);
    if rows.is_empty() {
        info!("no rows to deliver, skipping post");
        return;
    }

    match post_rows(url, secret, &rows, cfg.request_timeout_secs) {
        Ok(()) => info!(rows = rows.len(), "posted board to webhook"),
        Err(err) => warn!(error = %err, "webhook post failed"),
    }
}

fn post_rows(url: &str, secret: &str, rows: &[SinkRow], timeout_secs: u64) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build webhook client")?;

    let payload = SinkPayload { secret, rows };
    let resp = client
        .post(url)
        .json(&payload)
        .send()
        .context("webhook request failed")?;

    let status = resp.status();
    if !status.is_success() {
        bail!("webhook returned http {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Position;

    #[test]
    fn rows_are_rounded_at_the_boundary() {
        let board = DailyBoard {
            date: "2026-01-15".to_string(),
            teams: vec![crate::board::TeamBoard {
                team: "VAN".to_string(),
                opponent: "SEA".to_string(),
                opponent_sa: 29.333333333333332,
                boost: 1.0476190476190477,
                forwards: vec![ScoreRecord {
                    player_id: 8480012,
                    player: "Elias Pettersson".to_string(),
                    team: "VAN".to_string(),
                    opponent: "SEA".to_string(),
                    position: Position::Forward,
                    mean: 2.7,
                    hit_rate_2: 0.6,
                    hit_rate_3: 0.3,
                    stddev: 1.2489995996796797,
                    opponent_sa: 29.333333333333332,
                    boost: 1.0476190476190477,
                    adjusted_mean: 2.8285714285714287,
                    score2: 3.001214342726,
                    score3: 2.758742342726,
                    date: "2026-01-15".to_string(),
                }],
                defensemen: Vec::new(),
            }],
        };

        let rows = sink_rows(&board);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.pos, "F");
        assert_eq!(row.opp_sa, 29.3333);
        assert_eq!(row.boost, 1.047619);
        assert_eq!(row.adj_sog, 2.8286);
        assert_eq!(row.score2, 3.0012);
        assert_eq!(row.date, "2026-01-15");

        let json = serde_json::to_value(row).expect("row serializes");
        assert!(json.get("playerId").is_some());
        assert!(json.get("sogAvg").is_some());
        assert!(json.get("oppSa").is_some());
    }
}
