use super::schedule::Schedule;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TiebreakError {
    #[error("team {0} does not appear in the regular-season schedule")]
    TeamNotFound(String),
}

/// One team's view of one completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamGameRecord {
    pub opponent: String,
    pub points_for: u32,
    pub points_against: u32,
}

/// Completed regular-season results keyed by team, in encounter order.
#[derive(Debug, Clone, Default)]
pub struct SeasonRecords {
    games: HashMap<String, Vec<TeamGameRecord>>,
    known: BTreeSet<String>,
}

impl SeasonRecords {
    pub fn aggregate(schedule: &Schedule) -> Self {
        let mut games: HashMap<String, Vec<TeamGameRecord>> = HashMap::new();
        let mut known = BTreeSet::new();

        for game in schedule.regular_season() {
            known.insert(game.home_team.clone());
            known.insert(game.away_team.clone());

            if !game.is_completed() {
                continue;
            }
            let (Some(home_score), Some(away_score)) = (game.home_score, game.away_score) else {
                continue;
            };

            games
                .entry(game.home_team.clone())
                .or_default()
                .push(TeamGameRecord {
                    opponent: game.away_team.clone(),
                    points_for: home_score,
                    points_against: away_score,
                });
            games
                .entry(game.away_team.clone())
                .or_default()
                .push(TeamGameRecord {
                    opponent: game.home_team.clone(),
                    points_for: away_score,
                    points_against: home_score,
                });
        }

        Self { games, known }
    }

    /// Completed games for `team`. A scheduled team with nothing played yet
    /// yields an empty slice; a name never seen in the schedule is an error.
    pub fn games(&self, team: &str) -> Result<&[TeamGameRecord], TiebreakError> {
        if !self.known.contains(team) {
            return Err(TiebreakError::TeamNotFound(team.to_string()));
        }
        Ok(self.games.get(team).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn contains(&self, team: &str) -> bool {
        self.known.contains(team)
    }

    /// Every team seen in the regular-season schedule, sorted.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn opponents(&self, team: &str) -> Result<BTreeSet<&str>, TiebreakError> {
        Ok(self
            .games(team)?
            .iter()
            .map(|record| record.opponent.as_str())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::schedule::{Game, GameStatus, SeasonPhase};

    fn game(home: &str, away: &str, score: Option<(u32, u32)>, status: GameStatus) -> Game {
        Game {
            phase: SeasonPhase::Regular,
            week: 1,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: score.map(|(home, _)| home),
            away_score: score.map(|(_, away)| away),
            status,
        }
    }

    #[test]
    fn records_both_perspectives_of_completed_games() {
        let schedule = Schedule::from_games(vec![
            game("A", "B", Some((24, 17)), GameStatus::Final),
            game("B", "C", Some((20, 23)), GameStatus::FinalOvertime),
        ]);
        let records = SeasonRecords::aggregate(&schedule);

        let a = records.games("A").expect("A known");
        assert_eq!(
            a,
            &[TeamGameRecord {
                opponent: "B".to_string(),
                points_for: 24,
                points_against: 17,
            }]
        );

        let b = records.games("B").expect("B known");
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].opponent, "A");
        assert_eq!((b[0].points_for, b[0].points_against), (17, 24));
        assert_eq!(b[1].opponent, "C");
    }

    #[test]
    fn skips_unplayed_placeholder_and_preseason_games() {
        let mut preseason = game("A", "B", Some((3, 0)), GameStatus::Final);
        preseason.phase = SeasonPhase::Preseason;
        let schedule = Schedule::from_games(vec![
            preseason,
            game("A", "B", Some((0, 0)), GameStatus::Final),
            game("A", "C", None, GameStatus::Final),
            game("A", "D", Some((14, 7)), GameStatus::InProgress),
            game("A", "E", None, GameStatus::Scheduled),
        ]);
        let records = SeasonRecords::aggregate(&schedule);

        assert!(records.games("A").expect("A known").is_empty());
        assert!(records.games("E").expect("E scheduled").is_empty());
    }

    #[test]
    fn unknown_team_is_not_found_rather_than_empty() {
        let schedule = Schedule::from_games(vec![game("A", "B", None, GameStatus::Scheduled)]);
        let records = SeasonRecords::aggregate(&schedule);

        assert_eq!(
            records.games("Z"),
            Err(TiebreakError::TeamNotFound("Z".to_string()))
        );
        assert_eq!(records.teams().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
