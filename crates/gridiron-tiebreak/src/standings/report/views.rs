use super::builder::{OpponentBreakdown, ScenarioReport};
use serde::Serialize;

/// Flattened, display-ready line items for one opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpponentSummaryView {
    pub opponent: String,
    pub scenario_label: &'static str,
    pub head_to_head: String,
    pub head_to_head_edge: String,
    pub group_label: &'static str,
    pub subject_record: String,
    pub opponent_record: String,
    pub common_games: String,
    pub current_edge: String,
    pub remaining_path: String,
    pub tiebreaker: String,
    pub can_finish_above: bool,
    pub can_finish_above_label: &'static str,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReportSummary {
    pub team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    pub division_rivals: Vec<OpponentSummaryView>,
    pub wildcard_opponents: Vec<OpponentSummaryView>,
}

impl ScenarioReport {
    pub fn summary(&self) -> ScenarioReportSummary {
        ScenarioReportSummary {
            team: self.team.clone(),
            conference: self
                .alignment
                .as_ref()
                .map(|membership| membership.conference.clone()),
            division: self
                .alignment
                .as_ref()
                .map(|membership| membership.division.clone()),
            division_rivals: self
                .division_rivals
                .iter()
                .map(|breakdown| breakdown.to_view(&self.team))
                .collect(),
            wildcard_opponents: self
                .wildcard_opponents
                .iter()
                .map(|breakdown| breakdown.to_view(&self.team))
                .collect(),
        }
    }
}

impl OpponentBreakdown {
    pub fn to_view(&self, team: &str) -> OpponentSummaryView {
        let common_games = if self.common_games.opponents == 0 {
            "Common opponents: none".to_string()
        } else {
            format!(
                "{}: {} {} vs {} {}",
                self.common_games.label(),
                team,
                self.common_games.subject,
                self.opponent,
                self.common_games.opponent
            )
        };

        let (current_edge, tiebreaker) = match &self.tiebreaker {
            Some(edge) => (
                format!("{} (via {})", edge.winner, edge.label),
                format!("{} wins via {}", edge.winner, edge.label),
            ),
            None => (
                "Even/Undecided on early criteria".to_string(),
                "No decisive rule yet".to_string(),
            ),
        };

        OpponentSummaryView {
            opponent: self.opponent.clone(),
            scenario_label: self.scenario.label(),
            head_to_head: self.head_to_head.to_string(),
            head_to_head_edge: self.head_to_head.edge_summary.clone(),
            group_label: self.group_record.criterion.label(),
            subject_record: self.group_record.subject.to_string(),
            opponent_record: self.group_record.opponent.to_string(),
            common_games,
            current_edge,
            remaining_path: self.remaining_path.clone(),
            tiebreaker,
            can_finish_above: self.elimination.can_finish_above,
            can_finish_above_label: if self.elimination.can_finish_above {
                "Yes"
            } else {
                "No"
            },
            justification: self.elimination.justification.clone(),
        }
    }
}
