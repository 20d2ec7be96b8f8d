use anyhow::Result;
use tracing_subscriber::EnvFilter;

use sog_board::config::Config;
use sog_board::fetch::NhlClient;
use sog_board::{pipeline, report, schedule, sink};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::from_env();
    let client = NhlClient::new(&cfg)?;
    let date = schedule::run_date(&cfg);

    let board = pipeline::run(&cfg, &client, &date)?;
    report::print_board(&board, &cfg);
    sink::deliver(&cfg, &board);

    Ok(())
}
