mod builder;
pub mod views;

pub use builder::{
    CommonGamesLine, GameLine, GameResult, GroupComparison, HeadToHeadLine, OpponentBreakdown,
    ReportOptions, ScenarioReport, TiebreakerEdge,
};
