//! Ordered tiebreaker criteria applied to a pair of teams.
//!
//! Criteria are evaluated in scenario order and evaluation stops at the first
//! step that separates the teams. Steps after the decisive one are never
//! computed, so the trace ends with the deciding criterion. When no step
//! decides, the trace is undecided; strength-of-victory and later rules are
//! not modelled.

use super::alignment::MembershipLookup;
use super::comparators::{
    common_opponents, compare_percentages, exactly, record_against, same_conference,
    same_division, PercentageEdge, Wlt,
};
use super::records::{SeasonRecords, TiebreakError};
use super::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Both teams compete for the same division title.
    Division,
    /// Conference rivals from different divisions competing for a wild card.
    Wildcard,
}

impl Scenario {
    pub const fn criteria(self) -> &'static [Criterion] {
        match self {
            Self::Division => &[
                Criterion::HeadToHead,
                Criterion::DivisionRecord,
                Criterion::CommonGames,
                Criterion::ConferenceRecord,
            ],
            Self::Wildcard => &[
                Criterion::HeadToHead,
                Criterion::ConferenceRecord,
                Criterion::CommonGames,
            ],
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Division => "Division",
            Self::Wildcard => "Wild Card",
        }
    }

    /// Division rivals use the division cascade, other conference rivals the
    /// wild-card one. Teams in different conferences have no shared scenario.
    pub fn for_pair<L>(lookup: &L, a: &str, b: &str) -> Option<Self>
    where
        L: MembershipLookup + ?Sized,
    {
        if lookup.same_division(a, b) {
            Some(Self::Division)
        } else if lookup.same_conference(a, b) {
            Some(Self::Wildcard)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    HeadToHead,
    DivisionRecord,
    CommonGames,
    ConferenceRecord,
}

impl Criterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeadToHead => "Head-to-head",
            Self::DivisionRecord => "Division record",
            Self::CommonGames => "Common games",
            Self::ConferenceRecord => "Conference record",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    A,
    B,
    Tie,
    NotApplicable,
}

impl StepOutcome {
    pub const fn is_decisive(self) -> bool {
        matches!(self, Self::A | Self::B)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Tie => "Tie",
            Self::NotApplicable => "N/A",
        }
    }

    fn from_edge(edge: PercentageEdge) -> Self {
        match edge {
            PercentageEdge::A => Self::A,
            PercentageEdge::B => Self::B,
            PercentageEdge::Level => Self::Tie,
        }
    }
}

/// Records that produced a step's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepRecords {
    /// A's record against B.
    HeadToHead { record: Wlt },
    Compared { a: Wlt, b: Wlt },
    CommonGames { opponents: usize, a: Wlt, b: Wlt },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeStep {
    pub criterion: Criterion,
    pub outcome: StepOutcome,
    pub records: StepRecords,
}

impl CascadeStep {
    pub fn label(&self) -> String {
        match self.records {
            StepRecords::CommonGames { opponents, .. } => {
                format!("{} (n={})", self.criterion.label(), opponents)
            }
            _ => self.criterion.label().to_string(),
        }
    }
}

/// Audit trail of one pairwise comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeTrace {
    pub scenario: Scenario,
    pub team_a: String,
    pub team_b: String,
    pub steps: Vec<CascadeStep>,
}

impl CascadeTrace {
    pub fn decisive(&self) -> Option<&CascadeStep> {
        self.steps.iter().find(|step| step.outcome.is_decisive())
    }

    pub fn winner(&self) -> Option<&str> {
        match self.decisive()?.outcome {
            StepOutcome::A => Some(self.team_a.as_str()),
            StepOutcome::B => Some(self.team_b.as_str()),
            _ => None,
        }
    }

    pub fn is_undecided(&self) -> bool {
        self.decisive().is_none()
    }
}

pub fn division_cascade<L>(
    records: &SeasonRecords,
    lookup: &L,
    a: &str,
    b: &str,
) -> Result<CascadeTrace, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    run_cascade(Scenario::Division, records, lookup, a, b)
}

pub fn wildcard_cascade<L>(
    records: &SeasonRecords,
    lookup: &L,
    a: &str,
    b: &str,
) -> Result<CascadeTrace, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    run_cascade(Scenario::Wildcard, records, lookup, a, b)
}

/// Aggregates the schedule afresh and runs the division cascade.
pub fn compare_division<L>(
    schedule: &Schedule,
    lookup: &L,
    a: &str,
    b: &str,
) -> Result<CascadeTrace, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    compare(schedule, lookup, Scenario::Division, a, b)
}

/// Aggregates the schedule afresh and runs the wild-card cascade.
pub fn compare_wildcard<L>(
    schedule: &Schedule,
    lookup: &L,
    a: &str,
    b: &str,
) -> Result<CascadeTrace, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    compare(schedule, lookup, Scenario::Wildcard, a, b)
}

pub fn compare<L>(
    schedule: &Schedule,
    lookup: &L,
    scenario: Scenario,
    a: &str,
    b: &str,
) -> Result<CascadeTrace, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    let records = SeasonRecords::aggregate(schedule);
    run_cascade(scenario, &records, lookup, a, b)
}

pub fn run_cascade<L>(
    scenario: Scenario,
    records: &SeasonRecords,
    lookup: &L,
    a: &str,
    b: &str,
) -> Result<CascadeTrace, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    records.games(a)?;
    records.games(b)?;

    let mut steps = Vec::new();
    for criterion in scenario.criteria() {
        let step = evaluate(*criterion, records, lookup, a, b)?;
        let decisive = step.outcome.is_decisive();
        steps.push(step);
        if decisive {
            debug!(
                scenario = scenario.label(),
                team_a = a,
                team_b = b,
                criterion = criterion.label(),
                "tiebreaker decided"
            );
            break;
        }
    }

    Ok(CascadeTrace {
        scenario,
        team_a: a.to_string(),
        team_b: b.to_string(),
        steps,
    })
}

fn evaluate<L>(
    criterion: Criterion,
    records: &SeasonRecords,
    lookup: &L,
    a: &str,
    b: &str,
) -> Result<CascadeStep, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    let (outcome, step_records) = match criterion {
        Criterion::HeadToHead => {
            let record = record_against(records, a, exactly(b))?;
            let outcome = if record.is_empty() {
                StepOutcome::NotApplicable
            } else {
                match record.wins.cmp(&record.losses) {
                    Ordering::Greater => StepOutcome::A,
                    Ordering::Less => StepOutcome::B,
                    Ordering::Equal => StepOutcome::Tie,
                }
            };
            (outcome, StepRecords::HeadToHead { record })
        }
        Criterion::DivisionRecord => {
            let record_a = record_against(records, a, same_division(lookup, a))?;
            let record_b = record_against(records, b, same_division(lookup, b))?;
            compared(record_a, record_b)
        }
        Criterion::ConferenceRecord => {
            let record_a = record_against(records, a, same_conference(lookup, a))?;
            let record_b = record_against(records, b, same_conference(lookup, b))?;
            compared(record_a, record_b)
        }
        Criterion::CommonGames => {
            let common = common_opponents(records, a, b)?;
            let outcome = if common.is_sufficient() {
                StepOutcome::from_edge(compare_percentages(&common.a, &common.b))
            } else {
                StepOutcome::NotApplicable
            };
            (
                outcome,
                StepRecords::CommonGames {
                    opponents: common.len(),
                    a: common.a,
                    b: common.b,
                },
            )
        }
    };

    Ok(CascadeStep {
        criterion,
        outcome,
        records: step_records,
    })
}

fn compared(a: Wlt, b: Wlt) -> (StepOutcome, StepRecords) {
    let outcome = StepOutcome::from_edge(compare_percentages(&a, &b));
    (outcome, StepRecords::Compared { a, b })
}
