pub mod board;
pub mod club_stats;
pub mod config;
pub mod fetch;
pub mod game_log;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod sink;
pub mod stats;
