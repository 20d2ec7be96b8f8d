use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::board::{DailyBoard, ScoreRecord, TeamBoard, rank_team};
use crate::club_stats::StrengthCache;
use crate::config::Config;
use crate::fetch::Upstream;
use crate::game_log::fetch_recent_shots;
use crate::roster::fetch_roster;
use crate::schedule::fetch_matchups;
use crate::stats::{boost_factor, composite_scores, form_stats};

/// Runs the whole board for one date:
/// matchups -> per team (alphabetical): opponent strength (cached) -> roster
/// -> per skater: recent form -> score -> rank.
///
/// A player with insufficient history is dropped and a team whose club stats
/// are unavailable gets the baseline; neither aborts the run. Any fetch-level
/// failure is fatal for the whole run, so nothing partial ever reaches the
/// sink.
pub fn run(cfg: &Config, upstream: &dyn Upstream, date: &str) -> Result<DailyBoard> {
    let matchups = fetch_matchups(upstream, cfg, date)
        .with_context(|| format!("resolving matchups for {date}"))?;
    if matchups.is_empty() {
        info!(date, "no games scheduled");
        return Ok(DailyBoard {
            date: date.to_string(),
            teams: Vec::new(),
        });
    }
    info!(date, teams = matchups.len(), "resolved matchups");

    let mut strengths = StrengthCache::new();
    let mut teams = Vec::new();

    for (team, opponent) in &matchups {
        let opponent_sa = strengths
            .resolve(upstream, cfg, opponent)
            .with_context(|| format!("fetching club stats for {opponent}"))?;
        let boost = boost_factor(opponent_sa, cfg.league_avg_sa);

        let skaters = fetch_roster(upstream, cfg, team)
            .with_context(|| format!("fetching roster for {team}"))?;

        let mut records = Vec::new();
        for skater in skaters {
            let shots = fetch_recent_shots(upstream, cfg, skater.id)
                .with_context(|| format!("fetching game log for {} ({})", skater.name, skater.id))?;
            let Some(shots) = shots else {
                debug!(player = %skater.name, team = %team, "insufficient recent games, skipping");
                continue;
            };

            let form = form_stats(&shots);
            let scores = composite_scores(&form, boost);
            records.push(ScoreRecord {
                player_id: skater.id,
                player: skater.name,
                team: team.clone(),
                opponent: opponent.clone(),
                position: skater.position,
                mean: form.mean,
                hit_rate_2: form.hit_rate_2,
                hit_rate_3: form.hit_rate_3,
                stddev: form.stddev,
                opponent_sa,
                boost,
                adjusted_mean: scores.adjusted_mean,
                score2: scores.score2,
                score3: scores.score3,
                date: date.to_string(),
            });
        }

        let (forwards, defensemen) = rank_team(records);
        if forwards.is_empty() && defensemen.is_empty() {
            debug!(team = %team, "no qualifying skaters");
            continue;
        }
        teams.push(TeamBoard {
            team: team.clone(),
            opponent: opponent.clone(),
            opponent_sa,
            boost,
            forwards,
            defensemen,
        });
    }

    Ok(DailyBoard {
        date: date.to_string(),
        teams,
    })
}
