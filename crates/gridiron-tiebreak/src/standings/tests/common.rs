use crate::standings::alignment::LeagueAlignment;
use crate::standings::schedule::{Game, GameStatus, Schedule, SeasonPhase};

/// Two conferences. East has divisions One and Two, West has Three and Four.
pub(super) fn league() -> LeagueAlignment {
    LeagueAlignment::new()
        .with_division("East", "One", ["A", "B", "C", "D"])
        .with_division("East", "Two", ["E", "F", "G", "H"])
        .with_division("West", "Three", ["W", "X", "Y", "Z"])
        .with_division("West", "Four", ["P", "Q", "R", "S"])
}

#[derive(Default)]
pub(super) struct SeasonBuilder {
    games: Vec<Game>,
}

impl SeasonBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn final_game(mut self, home: &str, away: &str, home_score: u32, away_score: u32) -> Self {
        let week = self.next_week();
        self.games.push(Game {
            phase: SeasonPhase::Regular,
            week,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: Some(home_score),
            away_score: Some(away_score),
            status: GameStatus::Final,
        });
        self
    }

    /// Home team wins 20-10.
    pub(super) fn win(self, winner: &str, loser: &str) -> Self {
        self.final_game(winner, loser, 20, 10)
    }

    pub(super) fn scheduled(mut self, home: &str, away: &str) -> Self {
        let week = self.next_week();
        self.games.push(Game {
            phase: SeasonPhase::Regular,
            week,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: None,
            away_score: None,
            status: GameStatus::Scheduled,
        });
        self
    }

    pub(super) fn build(self) -> Schedule {
        Schedule::from_games(self.games)
    }

    fn next_week(&self) -> u32 {
        self.games.len() as u32 + 1
    }
}
