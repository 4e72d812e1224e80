use gridiron_tiebreak::error::AppError;
use gridiron_tiebreak::standings::{LeagueAlignment, Scenario, Schedule};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Custom alignment from CSV when a path is given, the standard league otherwise.
pub(crate) fn load_alignment(path: Option<&Path>) -> Result<LeagueAlignment, AppError> {
    match path {
        Some(path) => {
            let alignment = LeagueAlignment::from_csv_path(path)?;
            info!(path = %path.display(), teams = alignment.len(), "loaded custom alignment");
            Ok(alignment)
        }
        None => Ok(LeagueAlignment::standard()),
    }
}

pub(crate) fn load_schedule(path: &Path) -> Result<Schedule, AppError> {
    Ok(Schedule::from_path(path)?)
}

pub(crate) fn parse_scenario(raw: &str) -> Result<Scenario, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "division" | "div" => Ok(Scenario::Division),
        "wildcard" | "wild-card" | "wc" => Ok(Scenario::Wildcard),
        other => Err(format!(
            "unknown scenario '{other}' (expected 'division' or 'wildcard')"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scenario_accepts_aliases() {
        assert_eq!(parse_scenario("Division"), Ok(Scenario::Division));
        assert_eq!(parse_scenario(" wild-card "), Ok(Scenario::Wildcard));
        assert!(parse_scenario("playoff").is_err());
    }

    #[test]
    fn missing_alignment_path_uses_standard_league() {
        let alignment = load_alignment(None).expect("standard alignment");
        assert_eq!(alignment.len(), 32);
    }

    #[test]
    fn unreadable_alignment_path_is_an_error() {
        let err = load_alignment(Some(Path::new("/nonexistent/alignment.csv")))
            .expect_err("missing file fails");
        assert!(matches!(err, AppError::Alignment(_)));
    }
}
