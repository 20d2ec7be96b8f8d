use std::cmp::Ordering;

use crate::roster::Position;

pub const MAX_FORWARDS: usize = 4;
pub const MAX_DEFENSEMEN: usize = 1;

/// Immutable per-player snapshot produced once per qualifying player per run.
/// Values are unrounded; presentation rounding happens at the report/sink
/// boundary only.
#[derive(Debug, Clone)]
pub struct ScoreRecord {
    pub player_id: i64,
    pub player: String,
    pub team: String,
    pub opponent: String,
    pub position: Position,
    pub mean: f64,
    pub hit_rate_2: f64,
    pub hit_rate_3: f64,
    pub stddev: f64,
    pub opponent_sa: f64,
    pub boost: f64,
    pub adjusted_mean: f64,
    pub score2: f64,
    pub score3: f64,
    pub date: String,
}

/// One team's shortlist for the day.
#[derive(Debug, Clone)]
pub struct TeamBoard {
    pub team: String,
    pub opponent: String,
    pub opponent_sa: f64,
    pub boost: f64,
    pub forwards: Vec<ScoreRecord>,
    pub defensemen: Vec<ScoreRecord>,
}

#[derive(Debug, Clone)]
pub struct DailyBoard {
    pub date: String,
    pub teams: Vec<TeamBoard>,
}

impl DailyBoard {
    pub fn rows(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.teams
            .iter()
            .flat_map(|t| t.forwards.iter().chain(t.defensemen.iter()))
    }
}

/// Splits one team's records by position group, sorts each group descending
/// by score2 (stable, so ties keep input order) and truncates to the
/// shortlist caps. Thin groups come back short, never padded.
pub fn rank_team(records: Vec<ScoreRecord>) -> (Vec<ScoreRecord>, Vec<ScoreRecord>) {
    let (mut forwards, mut defensemen): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| r.position == Position::Forward);

    for group in [&mut forwards, &mut defensemen] {
        group.sort_by(|a, b| b.score2.partial_cmp(&a.score2).unwrap_or(Ordering::Equal));
    }

    forwards.truncate(MAX_FORWARDS);
    defensemen.truncate(MAX_DEFENSEMEN);
    (forwards, defensemen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player: &str, position: Position, score2: f64) -> ScoreRecord {
        ScoreRecord {
            player_id: 0,
            player: player.to_string(),
            team: "VAN".to_string(),
            opponent: "SEA".to_string(),
            position,
            mean: 0.0,
            hit_rate_2: 0.0,
            hit_rate_3: 0.0,
            stddev: 0.0,
            opponent_sa: 28.0,
            boost: 1.0,
            adjusted_mean: 0.0,
            score2,
            score3: 0.0,
            date: "2026-01-15".to_string(),
        }
    }

    #[test]
    fn caps_forwards_at_four_and_defensemen_at_one() {
        let records = vec![
            record("F1", Position::Forward, 2.1),
            record("F2", Position::Forward, 1.7),
            record("F3", Position::Forward, 2.5),
            record("F4", Position::Forward, 1.9),
            record("F5", Position::Forward, 2.3),
            record("D1", Position::Defenseman, 1.4),
            record("D2", Position::Defenseman, 1.8),
        ];
        let (forwards, defensemen) = rank_team(records);
        assert_eq!(forwards.len(), 4);
        assert_eq!(defensemen.len(), 1);
        let names: Vec<&str> = forwards.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["F3", "F5", "F1", "F4"]);
        assert_eq!(defensemen[0].player, "D2");
    }

    #[test]
    fn thin_groups_come_back_short() {
        let records = vec![
            record("F1", Position::Forward, 1.0),
            record("F2", Position::Forward, 2.0),
        ];
        let (forwards, defensemen) = rank_team(records);
        assert_eq!(forwards.len(), 2);
        assert!(defensemen.is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            record("first", Position::Forward, 1.5),
            record("second", Position::Forward, 1.5),
            record("third", Position::Forward, 1.5),
        ];
        let (forwards, _) = rank_team(records);
        let names: Vec<&str> = forwards.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
