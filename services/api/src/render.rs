use crate::infra::{load_alignment, load_schedule};
use chrono::{Local, NaiveDate};
use clap::Args;
use gridiron_tiebreak::error::AppError;
use gridiron_tiebreak::standings::{
    head_to_head_status, CompareOutcome, HeadToHeadStatus, OpponentSummaryView, ReportOptions,
    ReportResponse, Scenario, ScenarioReportSummary, TiebreakService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Normalized season schedule (JSON)
    #[arg(long)]
    pub(crate) schedule: PathBuf,
    /// Team to build the report for
    #[arg(long)]
    pub(crate) team: String,
    /// Optional alignment CSV (team,conference,division)
    #[arg(long)]
    pub(crate) alignment: Option<PathBuf>,
    /// Skip the division rivalry section
    #[arg(long)]
    pub(crate) no_division: bool,
    /// Skip the wild-card section
    #[arg(long)]
    pub(crate) no_wildcard: bool,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Normalized season schedule (JSON)
    #[arg(long)]
    pub(crate) schedule: PathBuf,
    #[arg(long)]
    pub(crate) team_a: String,
    #[arg(long)]
    pub(crate) team_b: String,
    /// Force a cascade instead of inferring it from the alignment
    #[arg(long, value_parser = crate::infra::parse_scenario)]
    pub(crate) scenario: Option<Scenario>,
    /// Optional alignment CSV (team,conference,division)
    #[arg(long)]
    pub(crate) alignment: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// Normalized season schedule (JSON)
    #[arg(long)]
    pub(crate) schedule: PathBuf,
    #[arg(long)]
    pub(crate) team_a: String,
    #[arg(long)]
    pub(crate) team_b: String,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        schedule,
        team,
        alignment,
        no_division,
        no_wildcard,
        json,
    } = args;

    let schedule = load_schedule(&schedule)?;
    let service = TiebreakService::new(Arc::new(load_alignment(alignment.as_deref())?));
    let options = ReportOptions {
        include_division: !no_division,
        include_wildcard: !no_wildcard,
    };
    let report = service.build_report(&schedule, &team, options)?;

    if json {
        let response = ReportResponse {
            summary: report.summary(),
            report,
        };
        println!("{}", to_pretty_json(&response)?);
    } else {
        let today = Local::now().date_naive();
        print!("{}", render_report(&report.summary(), options, today));
    }

    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        schedule,
        team_a,
        team_b,
        scenario,
        alignment,
    } = args;

    let schedule = load_schedule(&schedule)?;
    let service = TiebreakService::new(Arc::new(load_alignment(alignment.as_deref())?));
    let outcome = service.compare_schedule(&schedule, &team_a, &team_b, scenario)?;
    print!("{}", render_compare(&outcome));
    Ok(())
}

pub(crate) fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let schedule = load_schedule(&args.schedule)?;
    let status = head_to_head_status(&schedule, &args.team_a, &args.team_b)?;
    print!("{}", render_status(&status, &args.team_a, &args.team_b));
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

pub(crate) fn render_report(
    summary: &ScenarioReportSummary,
    options: ReportOptions,
    generated: NaiveDate,
) -> String {
    let mut out = String::new();
    let placement = match (&summary.conference, &summary.division) {
        (Some(conference), Some(division)) => format!(" ({conference} {division})"),
        _ => String::new(),
    };
    out.push_str(&format!(
        "Tiebreaker scenarios for {}{placement}\n",
        summary.team
    ));
    out.push_str(&format!("Generated {}\n", generated.format("%Y-%m-%d")));

    if summary.conference.is_none() {
        out.push_str("\nTeam is not in the league alignment; no scenarios to report.\n");
        return out;
    }

    if options.include_division {
        out.push_str("\nDivision Rivalry Breakdown\n");
        if summary.division_rivals.is_empty() {
            out.push_str("No division rivals on the schedule.\n");
        }
        for view in &summary.division_rivals {
            out.push_str(&render_division_block(&summary.team, view));
        }
    }

    if options.include_wildcard {
        out.push_str("\nWild Card Scenarios\n");
        if summary.wildcard_opponents.is_empty() {
            out.push_str("No wild-card opponents on the schedule.\n");
        }
        for view in &summary.wildcard_opponents {
            out.push_str(&render_wildcard_block(&summary.team, view));
        }
    }

    out
}

fn render_division_block(team: &str, view: &OpponentSummaryView) -> String {
    let mut block = format!("\nvs {}\n", view.opponent);
    block.push_str(&format!("- Head-to-head record: {}.\n", view.head_to_head));
    block.push_str(&format!("  {}\n", view.head_to_head_edge));
    block.push_str(&format!(
        "- {} comparison: {team} {} vs {} {}.\n",
        view.group_label, view.subject_record, view.opponent, view.opponent_record
    ));
    block.push_str(&format!("- {}.\n", view.common_games));
    block.push_str(&format!("- Current edge: {}.\n", view.current_edge));
    block.push_str(&format!("- Remaining path: {}\n", view.remaining_path));
    block.push_str(&format!("  - Tiebreaker: {}.\n", view.tiebreaker));
    block.push_str(&format!(
        "  - Can still win by record? {}. {}\n",
        view.can_finish_above_label, view.justification
    ));
    block
}

fn render_wildcard_block(team: &str, view: &OpponentSummaryView) -> String {
    let mut block = format!("- vs {}\n", view.opponent);
    block.push_str(&format!("  - Head-to-head: {}.\n", view.head_to_head));
    block.push_str(&format!(
        "  - {}: {team} {} vs {} {}.\n",
        view.group_label, view.subject_record, view.opponent, view.opponent_record
    ));
    block.push_str(&format!("  - {}.\n", view.common_games));
    block.push_str(&format!("  - Tiebreaker: {}.\n", view.tiebreaker));
    block.push_str(&format!(
        "  - Can still win by record? {}. {}\n",
        view.can_finish_above_label, view.justification
    ));
    block
}

pub(crate) fn render_compare(outcome: &CompareOutcome) -> String {
    let trace = &outcome.trace;
    let mut out = format!(
        "{} tiebreaker: {} vs {}\n",
        outcome.scenario.label(),
        trace.team_a,
        trace.team_b
    );
    for (index, step) in trace.steps.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}: {}\n",
            index + 1,
            step.label(),
            step.outcome.label()
        ));
    }
    match (&outcome.winner, &outcome.decisive_criterion) {
        (Some(winner), Some(criterion)) => {
            out.push_str(&format!("Result: {winner} wins via {criterion}.\n"));
        }
        _ => out.push_str("Result: undecided on the modelled criteria.\n"),
    }
    out.push_str(&format!(
        "{}\n",
        outcome
            .head_to_head
            .edge_summary(&trace.team_a, &trace.team_b)
    ));
    out
}

pub(crate) fn render_status(status: &HeadToHeadStatus, team_a: &str, team_b: &str) -> String {
    format!(
        "{team_a} vs {team_b}: {} with {} played, {} pending\n{}\n",
        status.record(),
        status.games_played,
        status.games_pending,
        status.edge_summary(team_a, team_b)
    )
}
