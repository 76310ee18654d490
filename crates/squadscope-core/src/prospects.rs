// Cross-league prospect search.
//
// Given the position group a squad is oldest in, look through every other
// league for young players in that group and rank them by minutes played.

use serde::Serialize;

use crate::cohort::PositionCohort;
use crate::pipeline::AnnotatedPlayer;
use crate::roster::PlayerRecord;

/// Search limits for the prospect shortlist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProspectQuery {
    /// Oldest age (inclusive) that still counts as a prospect.
    pub max_age: f64,
    /// Maximum number of players returned.
    pub limit: usize,
}

impl Default for ProspectQuery {
    fn default() -> Self {
        ProspectQuery {
            max_age: 21.0,
            limit: 10,
        }
    }
}

/// The columns shown for each prospect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prospect {
    pub name: String,
    pub age: f64,
    pub minutes_played: u32,
    pub team: String,
    pub league: String,
}

impl From<&PlayerRecord> for Prospect {
    fn from(record: &PlayerRecord) -> Self {
        Prospect {
            name: record.name.clone(),
            age: record.age,
            minutes_played: record.minutes_played,
            team: record.team.clone(),
            league: record.league.clone(),
        }
    }
}

/// Players in `position` aged at most `query.max_age` whose league is not
/// `exclude_league`, most minutes first.
///
/// The sort is stable, so players with equal minutes keep their roster order.
/// At most `query.limit` records are returned; an empty list is a valid answer.
pub fn find_prospects<'a>(
    full_roster: &'a [AnnotatedPlayer],
    position: PositionCohort,
    exclude_league: &str,
    query: &ProspectQuery,
) -> Vec<&'a PlayerRecord> {
    let mut matches: Vec<&PlayerRecord> = full_roster
        .iter()
        .filter(|p| p.position == position)
        .filter(|p| p.record.age <= query.max_age)
        .filter(|p| p.record.league != exclude_league)
        .map(|p| &p.record)
        .collect();

    matches.sort_by(|a, b| b.minutes_played.cmp(&a.minutes_played));
    matches.truncate(query.limit);
    matches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
