//! Tiebreaker resolution over a season's results.
//!
//! Data flows one way: a [`Schedule`] is aggregated into [`SeasonRecords`],
//! the comparator helpers tally filtered records, the cascade applies the
//! criteria in order, the clinch module reports series and catch-up state,
//! and [`ScenarioReport`] assembles all of it for one team.

pub mod alignment;
pub mod cascade;
pub mod clinch;
pub mod comparators;
pub mod records;
pub mod report;
pub mod router;
pub mod schedule;
pub mod service;

#[cfg(test)]
mod tests;

pub use alignment::{AlignmentError, LeagueAlignment, Membership, MembershipLookup};
pub use cascade::{
    compare, compare_division, compare_wildcard, division_cascade, run_cascade, wildcard_cascade,
    CascadeStep, CascadeTrace, Criterion, Scenario, StepOutcome, StepRecords,
};
pub use clinch::{
    can_still_finish_above, elimination_check, head_to_head_status, EliminationCheck,
    HeadToHeadStatus,
};
pub use comparators::{common_opponents, record_against, CommonGames, Wlt, MIN_COMMON_OPPONENTS};
pub use records::{SeasonRecords, TeamGameRecord, TiebreakError};
pub use report::views::{OpponentSummaryView, ScenarioReportSummary};
pub use report::{OpponentBreakdown, ReportOptions, ScenarioReport};
pub use router::tiebreak_router;
pub use schedule::{Game, GameStatus, Schedule, ScheduleError, SeasonPhase};
pub use service::{
    CompareOutcome, CompareRequest, ReportRequest, ReportResponse, TiebreakService,
    TiebreakServiceError,
};
