use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Upstream status codes that mark a game as played to completion.
pub const COMPLETED_STATUS_CODES: [i64; 2] = [2, 3];

const SCORE_SUFFIX: &str = " Score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    Preseason,
    Regular,
}

impl SeasonPhase {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Preseason => "pre",
            Self::Regular => "reg",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Preseason => "Preseason",
            Self::Regular => "Regular Season",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "pre" => Some(Self::Preseason),
            "reg" => Some(Self::Regular),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Final,
    FinalOvertime,
}

impl GameStatus {
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::InProgress,
            2 => Self::Final,
            3 => Self::FinalOvertime,
            _ => Self::Scheduled,
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::Scheduled => 0,
            Self::InProgress => 1,
            Self::Final => 2,
            Self::FinalOvertime => 3,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Final | Self::FinalOvertime)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Final => "Final",
            Self::FinalOvertime => "Final (OT)",
        }
    }
}

/// One scheduled contest, as delivered by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub phase: SeasonPhase,
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: GameStatus,
}

impl Game {
    /// A game counts toward tiebreakers only once it is final with both
    /// scores present. A 0-0 "final" is an unplayed placeholder.
    pub fn is_completed(&self) -> bool {
        if !self.status.is_final() {
            return false;
        }

        match (self.home_score, self.away_score) {
            (Some(0), Some(0)) => false,
            (Some(_), Some(_)) => true,
            _ => false,
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home_team == a && self.away_team == b) || (self.home_team == b && self.away_team == a)
    }

    pub fn score_for(&self, team: &str) -> Option<u32> {
        if self.home_team == team {
            self.home_score
        } else if self.away_team == team {
            self.away_score
        } else {
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("failed to read schedule: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable snapshot of a season's games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    games: Vec<Game>,
}

impl Schedule {
    pub fn from_games(games: Vec<Game>) -> Self {
        Self { games }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScheduleError> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ScheduleError> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }

    /// Walks the `phase -> week -> matchup` structure. Entries that do not
    /// have the expected shape are skipped rather than rejected.
    pub fn from_value(value: &Value) -> Self {
        let Some(phases) = value.as_object() else {
            debug!("schedule root is not an object; treating as empty");
            return Self::default();
        };

        let mut games = Vec::new();
        for (phase_key, weeks) in phases {
            let Some(phase) = SeasonPhase::from_key(phase_key) else {
                debug!(phase = %phase_key, "skipping unknown season phase");
                continue;
            };
            let Some(weeks) = weeks.as_object() else {
                continue;
            };

            for (week_key, matchups) in weeks {
                let Some(matchups) = matchups.as_object() else {
                    continue;
                };
                let week = parse_week(week_key);

                for (matchup_key, matchup) in matchups {
                    match parse_matchup(phase, week, matchup) {
                        Some(game) => games.push(game),
                        None => debug!(
                            phase = phase.key(),
                            week = %week_key,
                            matchup = %matchup_key,
                            "skipping malformed matchup"
                        ),
                    }
                }
            }
        }

        // Map keys iterate lexicographically ("10" before "2").
        games.sort_by_key(|game| (game.phase, game.week));
        Self { games }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn regular_season(&self) -> impl Iterator<Item = &Game> {
        self.games
            .iter()
            .filter(|game| game.phase == SeasonPhase::Regular)
    }

    /// Every team that appears in a regular-season game, whatever its status.
    pub fn teams(&self) -> BTreeSet<&str> {
        self.regular_season()
            .flat_map(|game| [game.home_team.as_str(), game.away_team.as_str()])
            .collect()
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.regular_season().any(|game| game.involves(team))
    }

    /// Regular-season meetings between two teams, played or not.
    pub fn meetings<'a>(&'a self, a: &'a str, b: &'a str) -> impl Iterator<Item = &'a Game> {
        self.regular_season().filter(move |game| game.is_between(a, b))
    }

    /// Regular-season games for `team` that have not been completed. Placeholder
    /// finals count as remaining since they never reach the aggregator.
    pub fn remaining_games(&self, team: &str) -> u32 {
        let remaining = self
            .regular_season()
            .filter(|game| game.involves(team) && !game.is_completed())
            .count();
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Deserialize)]
struct RawMatchup {
    #[serde(rename = "homeTeamName", default)]
    home_team_name: Option<String>,
    #[serde(rename = "awayTeamName", default)]
    away_team_name: Option<String>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

fn parse_matchup(phase: SeasonPhase, week: u32, value: &Value) -> Option<Game> {
    if !value.is_object() {
        return None;
    }

    let raw: RawMatchup = serde_json::from_value(value.clone()).ok()?;
    let home_team = team_name(raw.home_team_name)?;
    let away_team = team_name(raw.away_team_name)?;
    let status = raw
        .status
        .as_ref()
        .and_then(status_code)
        .map(GameStatus::from_code)
        .unwrap_or(GameStatus::Scheduled);

    Some(Game {
        phase,
        week,
        home_score: score_for(&raw.fields, &home_team),
        away_score: score_for(&raw.fields, &away_team),
        home_team,
        away_team,
        status,
    })
}

/// Names are stored trimmed; score keys are matched on the trimmed prefix.
fn team_name(raw: Option<String>) -> Option<String> {
    let name = raw?.trim().to_string();
    (!name.is_empty()).then_some(name)
}

fn status_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|code| code.fract() == 0.0)
                .map(|code| code as i64)
        }),
        Value::String(raw) => {
            let raw = raw.trim();
            raw.parse().ok().or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|code| code.fract() == 0.0)
                    .map(|code| code as i64)
            })
        }
        _ => None,
    }
}

fn score_for(fields: &Map<String, Value>, team: &str) -> Option<u32> {
    fields.iter().find_map(|(key, value)| {
        let name = key.strip_suffix(SCORE_SUFFIX)?;
        if name.trim() != team {
            return None;
        }
        let points = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|points| *points >= 0.0 && points.fract() == 0.0)
                .map(|points| points as u64)
        })?;
        u32::try_from(points).ok()
    })
}

/// First run of digits in the key: `"Week 3"` and `"3"` are week 3,
/// `"Week 1 of 18"` is week 1. Keys without digits map to 0.
fn parse_week(key: &str) -> u32 {
    key.chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
