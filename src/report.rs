use crate::board::{DailyBoard, ScoreRecord};
use crate::config::Config;
use crate::roster::Position;

/// Prints the daily board to stdout. This is the presentation boundary: all
/// rounding happens in the format strings, never in the core values.
pub fn print_board(board: &DailyBoard, cfg: &Config) {
    println!(
        "NHL Shot Board - last {} SOG - {}",
        cfg.n_games, board.date
    );
    println!("Boost baseline (league SA): {:.1}", cfg.league_avg_sa);
    println!();

    if board.teams.is_empty() {
        println!("No games scheduled today.");
        return;
    }

    for team in &board.teams {
        println!(
            "{} vs {} | opp SA/G: {:.1} | boost: {:.2}",
            team.team, team.opponent, team.opponent_sa, team.boost
        );
        for record in team.forwards.iter().chain(team.defensemen.iter()) {
            println!("  {}", format_row(record, cfg.n_games));
        }
        println!();
    }
}

fn format_row(record: &ScoreRecord, window: usize) -> String {
    let suffix = match record.position {
        Position::Forward => "",
        Position::Defenseman => " (D)",
    };
    format!(
        "{}{}  S{}:{:.2}  H2:{:.2}  H3:{:.2}  Adj:{:.2}  Sc2:{:.2}  Sc3:{:.2}",
        record.player,
        suffix,
        window,
        record.mean,
        record.hit_rate_2,
        record.hit_rate_3,
        record.adjusted_mean,
        record.score2,
        record.score3
    )
}
