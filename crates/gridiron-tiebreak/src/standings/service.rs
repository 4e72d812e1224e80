use super::alignment::MembershipLookup;
use super::cascade::{run_cascade, CascadeTrace, Scenario};
use super::clinch::{head_to_head_status, HeadToHeadStatus};
use super::records::{SeasonRecords, TiebreakError};
use super::report::views::ScenarioReportSummary;
use super::report::{ReportOptions, ScenarioReport};
use super::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_true() -> bool {
    true
}

/// Report request carrying the normalized schedule inline.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    pub schedule: serde_json::Value,
    pub team: String,
    #[serde(default = "default_true")]
    pub include_division: bool,
    #[serde(default = "default_true")]
    pub include_wildcard: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    pub schedule: serde_json::Value,
    pub team_a: String,
    pub team_b: String,
    /// Inferred from the alignment when omitted.
    #[serde(default)]
    pub scenario: Option<Scenario>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub summary: ScenarioReportSummary,
    pub report: ScenarioReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareOutcome {
    pub scenario: Scenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decisive_criterion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub head_to_head: HeadToHeadStatus,
    pub trace: CascadeTrace,
}

#[derive(Debug, thiserror::Error)]
pub enum TiebreakServiceError {
    #[error(transparent)]
    Tiebreak(#[from] TiebreakError),
    #[error("{team_a} and {team_b} do not share a conference; no tiebreaker scenario applies")]
    NoSharedScenario { team_a: String, team_b: String },
}

/// Stateless entry point binding the engine to one league alignment.
pub struct TiebreakService<L> {
    alignment: Arc<L>,
}

impl<L> TiebreakService<L>
where
    L: MembershipLookup,
{
    pub fn new(alignment: Arc<L>) -> Self {
        Self { alignment }
    }

    pub fn alignment(&self) -> &L {
        &self.alignment
    }

    pub fn report(&self, request: ReportRequest) -> Result<ReportResponse, TiebreakServiceError> {
        let schedule = Schedule::from_value(&request.schedule);
        let options = ReportOptions {
            include_division: request.include_division,
            include_wildcard: request.include_wildcard,
        };
        let report = self.build_report(&schedule, &request.team, options)?;
        Ok(ReportResponse {
            summary: report.summary(),
            report,
        })
    }

    pub fn build_report(
        &self,
        schedule: &Schedule,
        team: &str,
        options: ReportOptions,
    ) -> Result<ScenarioReport, TiebreakServiceError> {
        Ok(ScenarioReport::build(
            schedule,
            &*self.alignment,
            team,
            options,
        )?)
    }

    pub fn compare(&self, request: CompareRequest) -> Result<CompareOutcome, TiebreakServiceError> {
        let schedule = Schedule::from_value(&request.schedule);
        self.compare_schedule(
            &schedule,
            &request.team_a,
            &request.team_b,
            request.scenario,
        )
    }

    pub fn compare_schedule(
        &self,
        schedule: &Schedule,
        team_a: &str,
        team_b: &str,
        scenario: Option<Scenario>,
    ) -> Result<CompareOutcome, TiebreakServiceError> {
        let records = SeasonRecords::aggregate(schedule);
        records.games(team_a)?;
        records.games(team_b)?;

        let scenario = match scenario {
            Some(scenario) => scenario,
            None => Scenario::for_pair(&*self.alignment, team_a, team_b).ok_or_else(
                || TiebreakServiceError::NoSharedScenario {
                    team_a: team_a.to_string(),
                    team_b: team_b.to_string(),
                },
            )?,
        };

        let trace = run_cascade(scenario, &records, &*self.alignment, team_a, team_b)?;
        let head_to_head = head_to_head_status(schedule, team_a, team_b)?;

        Ok(CompareOutcome {
            scenario,
            decisive_criterion: trace.decisive().map(|step| step.label()),
            winner: trace.winner().map(str::to_string),
            head_to_head,
            trace,
        })
    }
}
