//! Season tiebreaker resolution: head-to-head, division, common-games and
//! conference criteria applied to a season's completed games.

pub mod config;
pub mod error;
pub mod standings;
pub mod telemetry;
