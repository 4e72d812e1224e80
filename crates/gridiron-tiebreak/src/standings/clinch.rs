use super::comparators::Wlt;
use super::records::{SeasonRecords, TiebreakError};
use super::schedule::Schedule;
use serde::Serialize;
use std::cmp::Ordering;

/// Season-series state between two teams, from the first team's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadToHeadStatus {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_played: u32,
    pub games_pending: u32,
    /// No meetings remain and the series is not level.
    pub clinched: bool,
}

impl HeadToHeadStatus {
    pub const fn record(&self) -> Wlt {
        Wlt::new(self.wins, self.losses, self.ties)
    }

    /// One-line description of who holds the head-to-head edge.
    pub fn edge_summary(&self, team: &str, opponent: &str) -> String {
        let record = self.record();
        if self.clinched {
            let leader = if self.wins > self.losses {
                team
            } else {
                opponent
            };
            return format!("{leader} clinches the head-to-head ({record}).");
        }

        let leader = match self.wins.cmp(&self.losses) {
            Ordering::Greater => team,
            Ordering::Less => opponent,
            Ordering::Equal => {
                return format!(
                    "Head-to-head even ({record}). Proceed to division record, then common games (min 4), then conference record."
                );
            }
        };

        format!(
            "Current edge: {leader} via head-to-head ({record}). {} head-to-head game(s) pending; a split would move to division record next.",
            self.games_pending
        )
    }
}

/// Regular-season series between `a` and `b`. Meetings that are not yet
/// completed (including placeholder finals) count as pending.
pub fn head_to_head_status(
    schedule: &Schedule,
    a: &str,
    b: &str,
) -> Result<HeadToHeadStatus, TiebreakError> {
    for team in [a, b] {
        if !schedule.contains_team(team) {
            return Err(TiebreakError::TeamNotFound(team.to_string()));
        }
    }

    let mut total = 0;
    let mut record = Wlt::default();
    for game in schedule.meetings(a, b) {
        total += 1;
        if !game.is_completed() {
            continue;
        }
        let (Some(points_a), Some(points_b)) = (game.score_for(a), game.score_for(b)) else {
            continue;
        };
        match points_a.cmp(&points_b) {
            Ordering::Greater => record.wins += 1,
            Ordering::Less => record.losses += 1,
            Ordering::Equal => record.ties += 1,
        }
    }

    let games_played = record.games();
    let games_pending = total - games_played;

    Ok(HeadToHeadStatus {
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        games_played,
        games_pending,
        clinched: games_pending == 0 && record.wins != record.losses,
    })
}

/// Outcome of the overall-record catch-up check.
///
/// This is an approximation: the subject is assumed to win every remaining
/// game and the rival to lose every remaining game, ties are ignored, and the
/// remaining schedule is never simulated. A `true` verdict means "not ruled
/// out", not "achievable".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliminationCheck {
    pub subject_wins: u32,
    pub subject_remaining: u32,
    pub subject_ceiling: u32,
    pub rival_floor: u32,
    pub can_finish_above: bool,
    pub justification: String,
}

pub fn elimination_check(
    schedule: &Schedule,
    records: &SeasonRecords,
    subject: &str,
    rival: &str,
) -> Result<EliminationCheck, TiebreakError> {
    let subject_wins = Wlt::from_records(records.games(subject)?).wins;
    let rival_floor = Wlt::from_records(records.games(rival)?).wins;
    let subject_remaining = schedule.remaining_games(subject);
    let subject_ceiling = subject_wins.saturating_add(subject_remaining);
    let can_finish_above = subject_ceiling > rival_floor;

    let justification = if can_finish_above {
        format!("{subject} can still finish with a better overall record.")
    } else {
        format!(
            "{subject} cannot finish above {rival} on overall record ({subject_ceiling} possible wins vs {rival_floor}); only later criteria such as strength of victory could help."
        )
    };

    Ok(EliminationCheck {
        subject_wins,
        subject_remaining,
        subject_ceiling,
        rival_floor,
        can_finish_above,
        justification,
    })
}

/// Whether `subject`'s best case still beats `rival`'s worst case in wins.
pub fn can_still_finish_above(
    schedule: &Schedule,
    records: &SeasonRecords,
    subject: &str,
    rival: &str,
) -> Result<bool, TiebreakError> {
    Ok(elimination_check(schedule, records, subject, rival)?.can_finish_above)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::schedule::{Game, GameStatus, SeasonPhase};

    fn meeting(home: &str, away: &str, score: Option<(u32, u32)>) -> Game {
        Game {
            phase: SeasonPhase::Regular,
            week: 1,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: score.map(|(home, _)| home),
            away_score: score.map(|(_, away)| away),
            status: if score.is_some() {
                GameStatus::Final
            } else {
                GameStatus::Scheduled
            },
        }
    }

    fn series(first: Option<(u32, u32)>, second: Option<(u32, u32)>) -> HeadToHeadStatus {
        let schedule = Schedule::from_games(vec![meeting("A", "B", first), meeting("B", "A", second)]);
        head_to_head_status(&schedule, "A", "B").expect("both teams scheduled")
    }

    #[test]
    fn two_game_series_clinch_states() {
        let none_played = series(None, None);
        assert_eq!((none_played.games_played, none_played.games_pending), (0, 2));
        assert!(!none_played.clinched);

        let one_split = series(Some((10, 10)), None);
        assert_eq!(one_split.record(), Wlt::new(0, 0, 1));
        assert!(!one_split.clinched);

        let one_win = series(Some((24, 17)), None);
        assert_eq!(one_win.record(), Wlt::new(1, 0, 0));
        assert_eq!(one_win.games_pending, 1);
        assert!(!one_win.clinched, "one game remains");

        let two_split = series(Some((24, 17)), Some((21, 3)));
        assert_eq!(two_split.record(), Wlt::new(1, 1, 0));
        assert_eq!(two_split.games_pending, 0);
        assert!(!two_split.clinched, "a level series never clinches");

        let sweep = series(Some((24, 17)), Some((10, 20)));
        assert_eq!(sweep.record(), Wlt::new(2, 0, 0));
        assert_eq!(sweep.games_played, 2);
        assert!(sweep.clinched);

        let swept = series(Some((7, 17)), Some((20, 10)));
        assert_eq!(swept.record(), Wlt::new(0, 2, 0));
        assert!(swept.clinched);
    }

    #[test]
    fn placeholder_final_counts_as_pending() {
        let mut placeholder = meeting("A", "B", Some((0, 0)));
        placeholder.status = GameStatus::Final;
        let schedule = Schedule::from_games(vec![placeholder, meeting("B", "A", Some((3, 6)))]);

        let status = head_to_head_status(&schedule, "A", "B").expect("scheduled");
        assert_eq!(status.games_played, 1);
        assert_eq!(status.games_pending, 1);
        assert!(!status.clinched);
    }

    #[test]
    fn edge_summary_describes_the_series() {
        let sweep = series(Some((24, 17)), Some((10, 20)));
        assert_eq!(
            sweep.edge_summary("A", "B"),
            "A clinches the head-to-head (2-0)."
        );

        let leading = series(None, Some((3, 10)));
        assert!(leading
            .edge_summary("A", "B")
            .starts_with("Current edge: A via head-to-head (1-0). 1 head-to-head game(s) pending"));

        let split = series(Some((24, 17)), Some((21, 3)));
        assert!(split.edge_summary("A", "B").starts_with("Head-to-head even (1-1)."));
    }

    #[test]
    fn unknown_team_is_rejected() {
        let schedule = Schedule::from_games(vec![meeting("A", "B", None)]);
        assert_eq!(
            head_to_head_status(&schedule, "A", "Nobody"),
            Err(TiebreakError::TeamNotFound("Nobody".to_string()))
        );
    }

    #[test]
    fn catch_up_bound_uses_subject_ceiling_and_rival_floor() {
        // A: 1 win, 2 games left. B: 3 wins, nothing left.
        let schedule = Schedule::from_games(vec![
            meeting("A", "C", Some((10, 3))),
            meeting("B", "C", Some((10, 3))),
            meeting("B", "D", Some((10, 3))),
            meeting("B", "E", Some((10, 3))),
            meeting("A", "D", None),
            meeting("A", "E", None),
        ]);
        let records = SeasonRecords::aggregate(&schedule);

        let check = elimination_check(&schedule, &records, "A", "B").expect("known teams");
        assert_eq!(check.subject_ceiling, 3);
        assert_eq!(check.rival_floor, 3);
        assert!(!check.can_finish_above, "equal is not strictly above");
        assert!(check.justification.contains("cannot finish above B"));

        assert!(can_still_finish_above(&schedule, &records, "B", "A").expect("known teams"));
    }

    #[test]
    fn catch_up_bound_ignores_ties() {
        // A tied twice; ties never move the win count.
        let schedule = Schedule::from_games(vec![
            meeting("A", "C", Some((10, 10))),
            meeting("A", "D", Some((7, 7))),
            meeting("B", "C", Some((10, 3))),
        ]);
        let records = SeasonRecords::aggregate(&schedule);

        assert!(!can_still_finish_above(&schedule, &records, "A", "B").expect("known teams"));
    }
}
