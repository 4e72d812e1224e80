use super::super::alignment::{Membership, MembershipLookup};
use super::super::cascade::{run_cascade, CascadeTrace, Criterion, Scenario};
use super::super::clinch::{elimination_check, head_to_head_status, EliminationCheck, HeadToHeadStatus};
use super::super::comparators::{
    common_opponents, record_against, same_conference, same_division, Wlt,
};
use super::super::records::{SeasonRecords, TeamGameRecord, TiebreakError};
use super::super::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// Which opponent groups a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub include_division: bool,
    pub include_wildcard: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_division: true,
            include_wildcard: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

impl GameResult {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Win => "W",
            Self::Loss => "L",
            Self::Tie => "T",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLine {
    pub result: GameResult,
    pub points_for: u32,
    pub points_against: u32,
}

impl GameLine {
    fn from_record(record: &TeamGameRecord) -> Self {
        let result = match record.points_for.cmp(&record.points_against) {
            Ordering::Greater => GameResult::Win,
            Ordering::Less => GameResult::Loss,
            Ordering::Equal => GameResult::Tie,
        };
        Self {
            result,
            points_for: record.points_for,
            points_against: record.points_against,
        }
    }
}

impl fmt::Display for GameLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.result.tag(),
            self.points_for,
            self.points_against
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadToHeadLine {
    pub record: Wlt,
    pub games: Vec<GameLine>,
    pub status: HeadToHeadStatus,
    pub edge_summary: String,
}

impl fmt::Display for HeadToHeadLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record)?;
        if !self.games.is_empty() {
            let games: Vec<String> = self.games.iter().map(GameLine::to_string).collect();
            write!(f, " ({})", games.join(", "))?;
        }
        Ok(())
    }
}

/// Division record for division rivals, conference record otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupComparison {
    pub criterion: Criterion,
    pub subject: Wlt,
    pub opponent: Wlt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonGamesLine {
    pub opponents: usize,
    pub subject: Wlt,
    pub opponent: Wlt,
    pub sufficient: bool,
}

impl CommonGamesLine {
    pub fn label(&self) -> String {
        if self.sufficient {
            format!("Common games (n={})", self.opponents)
        } else {
            format!("Common opponents insufficient (n={})", self.opponents)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TiebreakerEdge {
    pub criterion: Criterion,
    pub label: String,
    pub winner: String,
}

/// Everything the report says about one opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpponentBreakdown {
    pub opponent: String,
    pub scenario: Scenario,
    pub head_to_head: HeadToHeadLine,
    pub group_record: GroupComparison,
    pub common_games: CommonGamesLine,
    pub tiebreaker: Option<TiebreakerEdge>,
    pub remaining_path: String,
    pub elimination: EliminationCheck,
    pub trace: CascadeTrace,
}

/// Per-opponent tiebreaker picture for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub team: String,
    pub alignment: Option<Membership>,
    pub division_rivals: Vec<OpponentBreakdown>,
    pub wildcard_opponents: Vec<OpponentBreakdown>,
}

impl ScenarioReport {
    /// Division rivals share conference and division with `team`; wild-card
    /// opponents share only the conference. Opponents come out sorted by name.
    pub fn build<L>(
        schedule: &Schedule,
        lookup: &L,
        team: &str,
        options: ReportOptions,
    ) -> Result<Self, TiebreakError>
    where
        L: MembershipLookup + ?Sized,
    {
        let records = SeasonRecords::aggregate(schedule);
        records.games(team)?;

        let mut report = Self {
            team: team.to_string(),
            alignment: None,
            division_rivals: Vec::new(),
            wildcard_opponents: Vec::new(),
        };

        let Some(membership) = lookup.membership(team) else {
            warn!(team, "team has no league alignment; scenario report left empty");
            return Ok(report);
        };
        report.alignment = Some(membership.clone());

        for opponent in records.teams() {
            if opponent == team {
                continue;
            }
            let Some(other) = lookup.membership(opponent) else {
                continue;
            };

            if other == membership {
                if options.include_division {
                    report.division_rivals.push(breakdown(
                        Scenario::Division,
                        schedule,
                        &records,
                        lookup,
                        team,
                        opponent,
                    )?);
                }
            } else if other.conference == membership.conference && options.include_wildcard {
                report.wildcard_opponents.push(breakdown(
                    Scenario::Wildcard,
                    schedule,
                    &records,
                    lookup,
                    team,
                    opponent,
                )?);
            }
        }

        Ok(report)
    }

    pub fn opponents(&self) -> impl Iterator<Item = &OpponentBreakdown> {
        self.division_rivals
            .iter()
            .chain(self.wildcard_opponents.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.division_rivals.is_empty() && self.wildcard_opponents.is_empty()
    }
}

fn breakdown<L>(
    scenario: Scenario,
    schedule: &Schedule,
    records: &SeasonRecords,
    lookup: &L,
    team: &str,
    opponent: &str,
) -> Result<OpponentBreakdown, TiebreakError>
where
    L: MembershipLookup + ?Sized,
{
    let meetings: Vec<&TeamGameRecord> = records
        .games(team)?
        .iter()
        .filter(|record| record.opponent == opponent)
        .collect();
    let status = head_to_head_status(schedule, team, opponent)?;
    let head_to_head = HeadToHeadLine {
        record: Wlt::from_records(meetings.iter().copied()),
        games: meetings.iter().map(|record| GameLine::from_record(record)).collect(),
        edge_summary: status.edge_summary(team, opponent),
        status,
    };

    let group_record = match scenario {
        Scenario::Division => GroupComparison {
            criterion: Criterion::DivisionRecord,
            subject: record_against(records, team, same_division(lookup, team))?,
            opponent: record_against(records, opponent, same_division(lookup, opponent))?,
        },
        Scenario::Wildcard => GroupComparison {
            criterion: Criterion::ConferenceRecord,
            subject: record_against(records, team, same_conference(lookup, team))?,
            opponent: record_against(records, opponent, same_conference(lookup, opponent))?,
        },
    };

    let common = common_opponents(records, team, opponent)?;
    let common_games = CommonGamesLine {
        opponents: common.len(),
        subject: common.a,
        opponent: common.b,
        sufficient: common.is_sufficient(),
    };

    let trace = run_cascade(scenario, records, lookup, team, opponent)?;
    let tiebreaker = match (trace.decisive(), trace.winner()) {
        (Some(step), Some(winner)) => Some(TiebreakerEdge {
            criterion: step.criterion,
            label: step.label(),
            winner: winner.to_string(),
        }),
        _ => None,
    };
    let remaining_path = remaining_path(scenario, team, opponent, tiebreaker.as_ref());
    let elimination = elimination_check(schedule, records, team, opponent)?;

    Ok(OpponentBreakdown {
        opponent: opponent.to_string(),
        scenario,
        head_to_head,
        group_record,
        common_games,
        tiebreaker,
        remaining_path,
        elimination,
        trace,
    })
}

fn remaining_path(
    scenario: Scenario,
    team: &str,
    opponent: &str,
    edge: Option<&TiebreakerEdge>,
) -> String {
    match edge {
        Some(edge) if edge.winner == team => {
            "Maintain the edge; later criteria are not needed while it holds.".to_string()
        }
        Some(_) => format!(
            "{team} must outperform {opponent} on the remaining criteria or finish with a better overall record."
        ),
        None => match scenario {
            Scenario::Division => {
                "Next rules would be common games (min 4) then conference record.".to_string()
            }
            Scenario::Wildcard => {
                "Next rules would be strength of victory and strength of schedule, which are not evaluated."
                    .to_string()
            }
        },
    }
}
