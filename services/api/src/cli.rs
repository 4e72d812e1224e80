use crate::render::{run_compare, run_report, run_status, CompareArgs, ReportArgs, StatusArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gridiron_tiebreak::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Gridiron Tiebreak",
    about = "Explain division and wild-card tiebreakers from a season schedule",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the division and wild-card breakdown for one team
    Report(ReportArgs),
    /// Run the tiebreaker cascade for a single pair of teams
    Compare(CompareArgs),
    /// Show the head-to-head series state between two teams
    Status(StatusArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Compare(args) => run_compare(args),
        Command::Status(args) => run_status(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_tiebreak::standings::Scenario;

    #[test]
    fn compare_accepts_scenario_override() {
        let cli = Cli::try_parse_from([
            "gridiron-tiebreak",
            "compare",
            "--schedule",
            "season.json",
            "--team-a",
            "Detroit Lions",
            "--team-b",
            "Green Bay Packers",
            "--scenario",
            "wildcard",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Compare(args)) => {
                assert_eq!(args.scenario, Some(Scenario::Wildcard));
                assert_eq!(args.team_b, "Green Bay Packers");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn report_flags_toggle_sections() {
        let cli = Cli::try_parse_from([
            "gridiron-tiebreak",
            "report",
            "--schedule",
            "season.json",
            "--team",
            "Detroit Lions",
            "--no-wildcard",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Report(args)) => {
                assert!(!args.no_division);
                assert!(args.no_wildcard);
                assert!(args.json);
                assert!(args.alignment.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_command_defaults_to_serve() {
        let cli = Cli::try_parse_from(["gridiron-tiebreak"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
