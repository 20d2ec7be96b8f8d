use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use sog_board::config::Config;
use sog_board::game_log::extract_recent_shots;
use sog_board::stats::{boost_factor, composite_scores, form_stats};

// This binary is intentionally simple: it loads one saved game-log payload and
// prints the form/score breakdown the pipeline would compute for it. It avoids
// network calls and is meant for quick manual checks of the scoring path.
//
// Usage: score_gamelog <gamelog.json> [opponent-sa]
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .context("usage: score_gamelog <gamelog.json> [opponent-sa]")?;
    let opponent_sa: Option<f64> = match args.next() {
        Some(raw) => Some(raw.parse().context("opponent-sa must be a number")?),
        None => None,
    };

    let cfg = Config::from_env();
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let payload: Value = serde_json::from_str(&raw).context("payload is not valid json")?;

    let Some(shots) = extract_recent_shots(&payload, cfg.n_games) else {
        bail!(
            "insufficient data: fewer than {} valid shot values in payload",
            cfg.n_games
        );
    };

    let form = form_stats(&shots);
    let opponent_sa = opponent_sa.unwrap_or(cfg.league_avg_sa);
    let boost = boost_factor(opponent_sa, cfg.league_avg_sa);
    let scores = composite_scores(&form, boost);

    println!("Shots (last {}): {:?}", cfg.n_games, shots);
    println!("Mean: {:.4}", form.mean);
    println!("Hit2: {:.4}", form.hit_rate_2);
    println!("Hit3: {:.4}", form.hit_rate_3);
    println!("Stddev: {:.4}", form.stddev);
    println!("Opp SA/G: {:.4} (baseline {:.1})", opponent_sa, cfg.league_avg_sa);
    println!("Boost: {:.6}", boost);
    println!("Adj SOG: {:.4}", scores.adjusted_mean);
    println!("Score2: {:.4}", scores.score2);
    println!("Score3: {:.4}", scores.score3);

    Ok(())
}
