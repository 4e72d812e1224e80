//! Win/loss/tie tallies over filtered slices of a team's season.

use super::alignment::MembershipLookup;
use super::records::{SeasonRecords, TeamGameRecord, TiebreakError};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Minimum number of common opponents before common games may decide a tie.
pub const MIN_COMMON_OPPONENTS: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Wlt {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Wlt {
    pub const fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TeamGameRecord>,
    {
        records.into_iter().fold(Self::default(), |mut wlt, record| {
            match record.points_for.cmp(&record.points_against) {
                Ordering::Greater => wlt.wins += 1,
                Ordering::Less => wlt.losses += 1,
                Ordering::Equal => wlt.ties += 1,
            }
            wlt
        })
    }

    pub const fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub const fn is_empty(&self) -> bool {
        self.games() == 0
    }

    /// Ties count as half a win. An empty record is 0.0.
    pub fn win_percentage(&self) -> f64 {
        let played = self.games();
        if played == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + 0.5 * f64::from(self.ties)) / f64::from(played)
    }

    /// The same games seen from the other side.
    pub const fn flipped(&self) -> Self {
        Self::new(self.losses, self.wins, self.ties)
    }
}

impl fmt::Display for Wlt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ties > 0 {
            write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            write!(f, "{}-{}", self.wins, self.losses)
        }
    }
}

pub fn record_against<P>(
    records: &SeasonRecords,
    team: &str,
    predicate: P,
) -> Result<Wlt, TiebreakError>
where
    P: Fn(&str) -> bool,
{
    let games = records.games(team)?;
    Ok(Wlt::from_records(
        games.iter().filter(|record| predicate(record.opponent.as_str())),
    ))
}

pub fn same_division<'a, L>(lookup: &'a L, team: &'a str) -> impl Fn(&str) -> bool + 'a
where
    L: MembershipLookup + ?Sized,
{
    move |opponent| lookup.same_division(team, opponent)
}

pub fn same_conference<'a, L>(lookup: &'a L, team: &'a str) -> impl Fn(&str) -> bool + 'a
where
    L: MembershipLookup + ?Sized,
{
    move |opponent| lookup.same_conference(team, opponent)
}

pub fn member_of<'a>(set: &'a BTreeSet<String>) -> impl Fn(&str) -> bool + 'a {
    move |opponent| set.contains(opponent)
}

pub fn exactly(target: &str) -> impl Fn(&str) -> bool + '_ {
    move |opponent| opponent == target
}

/// Strictly higher percentage wins; anything else is level.
pub fn compare_percentages(a: &Wlt, b: &Wlt) -> PercentageEdge {
    let (a_pct, b_pct) = (a.win_percentage(), b.win_percentage());
    if a_pct > b_pct {
        PercentageEdge::A
    } else if b_pct > a_pct {
        PercentageEdge::B
    } else {
        PercentageEdge::Level
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentageEdge {
    A,
    B,
    Level,
}

/// Records of two teams against the opponents both have played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonGames {
    pub opponents: BTreeSet<String>,
    pub a: Wlt,
    pub b: Wlt,
}

impl CommonGames {
    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    /// Below the threshold the comparison is reported, never decided.
    pub fn is_sufficient(&self) -> bool {
        self.len() >= MIN_COMMON_OPPONENTS
    }
}

pub fn common_opponents(
    records: &SeasonRecords,
    a: &str,
    b: &str,
) -> Result<CommonGames, TiebreakError> {
    let opponents_a = records.opponents(a)?;
    let opponents_b = records.opponents(b)?;

    let opponents: BTreeSet<String> = opponents_a
        .intersection(&opponents_b)
        .filter(|opponent| **opponent != a && **opponent != b)
        .map(|opponent| opponent.to_string())
        .collect();

    let record_a = record_against(records, a, member_of(&opponents))?;
    let record_b = record_against(records, b, member_of(&opponents))?;

    Ok(CommonGames {
        opponents,
        a: record_a,
        b: record_b,
    })
}
