use std::env;

const DEFAULT_API_BASE: &str = "https://api-web.nhle.com/v1";
const DEFAULT_SEASON: &str = "20252026";
const DEFAULT_GAME_TYPE: &str = "2"; // regular season
const DEFAULT_N_GAMES: usize = 10;
const DEFAULT_LEAGUE_AVG_SA: f64 = 28.0;
const DEFAULT_CALL_DELAY_MS: u64 = 180;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
const DEFAULT_SCHEDULE_UTC_OFFSET_HOURS: i64 = -5;

/// Run configuration, built once in `main` and passed by reference into every
/// component. Nothing reads process environment after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub season: String,
    pub game_type: String,
    /// Rolling window W: how many recent games feed each player's form.
    pub n_games: usize,
    /// League-average shots against per game, the neutral boost baseline.
    pub league_avg_sa: f64,
    /// Politeness delay before every outbound request.
    pub call_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Fixed offset from UTC used to resolve "today" for the schedule.
    pub schedule_utc_offset_hours: i64,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            season: DEFAULT_SEASON.to_string(),
            game_type: DEFAULT_GAME_TYPE.to_string(),
            n_games: DEFAULT_N_GAMES,
            league_avg_sa: DEFAULT_LEAGUE_AVG_SA,
            call_delay_ms: DEFAULT_CALL_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            schedule_utc_offset_hours: DEFAULT_SCHEDULE_UTC_OFFSET_HOURS,
            webhook_url: None,
            webhook_secret: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: env_str("NHL_API_BASE").unwrap_or(defaults.api_base),
            season: env_str("SEASON").unwrap_or(defaults.season),
            game_type: env_str("GAME_TYPE").unwrap_or(defaults.game_type),
            n_games: env_parse("N_GAMES").unwrap_or(defaults.n_games),
            league_avg_sa: env_parse("LEAGUE_AVG_SA").unwrap_or(defaults.league_avg_sa),
            call_delay_ms: env_parse("CALL_DELAY_MS").unwrap_or(defaults.call_delay_ms),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            schedule_utc_offset_hours: env_parse("SCHEDULE_UTC_OFFSET_HOURS")
                .unwrap_or(defaults.schedule_utc_offset_hours),
            webhook_url: env_str("WEBHOOK_URL"),
            webhook_secret: env_str("WEBHOOK_SECRET"),
        }
    }

    pub fn webhook_configured(&self) -> bool {
        self.webhook_url.is_some() && self.webhook_secret.is_some()
    }
}

fn env_str(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}
