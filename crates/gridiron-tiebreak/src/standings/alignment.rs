use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// A team's place in the league structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    pub conference: String,
    pub division: String,
}

impl Membership {
    pub fn new(conference: impl Into<String>, division: impl Into<String>) -> Self {
        Self {
            conference: conference.into(),
            division: division.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.conference, self.division)
    }
}

/// Resolves a team identifier to its conference and division.
///
/// Teams that do not resolve are left out of every division and conference
/// comparison instead of failing the request.
pub trait MembershipLookup: Send + Sync {
    fn membership(&self, team: &str) -> Option<&Membership>;

    fn same_division(&self, team: &str, other: &str) -> bool {
        match (self.membership(team), self.membership(other)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    fn same_conference(&self, team: &str, other: &str) -> bool {
        match (self.membership(team), self.membership(other)) {
            (Some(left), Some(right)) => left.conference == right.conference,
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    #[error("failed to read alignment: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid alignment CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("alignment row {row} is missing a {field}")]
    MissingField { row: usize, field: &'static str },
}

/// Table-backed membership lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueAlignment {
    teams: HashMap<String, Membership>,
}

const STANDARD_ALIGNMENT: [(&str, &str, [&str; 4]); 8] = [
    (
        "NFC",
        "West",
        [
            "Arizona Cardinals",
            "Los Angeles Rams",
            "San Francisco 49ers",
            "Seattle Seahawks",
        ],
    ),
    (
        "NFC",
        "East",
        [
            "Dallas Cowboys",
            "New York Giants",
            "Philadelphia Eagles",
            "Washington Commanders",
        ],
    ),
    (
        "NFC",
        "North",
        [
            "Chicago Bears",
            "Detroit Lions",
            "Green Bay Packers",
            "Minnesota Vikings",
        ],
    ),
    (
        "NFC",
        "South",
        [
            "Atlanta Falcons",
            "Carolina Panthers",
            "New Orleans Saints",
            "Tampa Bay Buccaneers",
        ],
    ),
    (
        "AFC",
        "West",
        [
            "Denver Broncos",
            "Kansas City Chiefs",
            "Las Vegas Raiders",
            "Los Angeles Chargers",
        ],
    ),
    (
        "AFC",
        "East",
        [
            "Buffalo Bills",
            "Miami Dolphins",
            "New England Patriots",
            "New York Jets",
        ],
    ),
    (
        "AFC",
        "North",
        [
            "Baltimore Ravens",
            "Cincinnati Bengals",
            "Cleveland Browns",
            "Pittsburgh Steelers",
        ],
    ),
    (
        "AFC",
        "South",
        [
            "Houston Texans",
            "Indianapolis Colts",
            "Jacksonville Jaguars",
            "Tennessee Titans",
        ],
    ),
];

impl LeagueAlignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current two-conference, eight-division professional alignment.
    pub fn standard() -> Self {
        let mut alignment = Self::new();
        for (conference, division, teams) in STANDARD_ALIGNMENT {
            for team in teams {
                alignment.insert(team, Membership::new(conference, division));
            }
        }
        alignment
    }

    pub fn insert(&mut self, team: impl Into<String>, membership: Membership) {
        self.teams.insert(team.into(), membership);
    }

    pub fn with_division<I, S>(mut self, conference: &str, division: &str, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for team in teams {
            self.insert(team, Membership::new(conference, division));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, AlignmentError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Reads `team,conference,division` rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AlignmentError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut alignment = Self::new();

        for (index, record) in csv_reader.deserialize::<AlignmentRow>().enumerate() {
            let row = record?;
            let line = index + 1;
            let team = required(row.team, line, "team")?;
            let conference = required(row.conference, line, "conference")?;
            let division = required(row.division, line, "division")?;
            alignment.insert(team, Membership::new(conference, division));
        }

        Ok(alignment)
    }
}

impl MembershipLookup for LeagueAlignment {
    fn membership(&self, team: &str) -> Option<&Membership> {
        self.teams.get(team)
    }
}

#[derive(Debug, Deserialize)]
struct AlignmentRow {
    #[serde(default)]
    team: String,
    #[serde(default)]
    conference: String,
    #[serde(default)]
    division: String,
}

fn required(value: String, row: usize, field: &'static str) -> Result<String, AlignmentError> {
    if value.is_empty() {
        Err(AlignmentError::MissingField { row, field })
    } else {
        Ok(value)
    }
}
