// Cohort-level statistics over one team's roster.
//
// Mode queries answer "which position group has the most players matching X",
// and the weighted average gives each position group's age weighted by
// minutes played.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::cohort::PositionCohort;
use crate::pipeline::AnnotatedPlayer;

// ---------------------------------------------------------------------------
// Position counts
// ---------------------------------------------------------------------------

/// How many players fall into one position cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionCount {
    pub position: PositionCohort,
    pub count: usize,
    /// Index of the first player seen in this cohort.
    #[serde(skip)]
    first_seen: usize,
}

/// Count players per position cohort, most frequent first.
///
/// Ties are broken by first occurrence in the input, so the result is fully
/// determined by input order.
pub fn position_counts<'a, I>(players: I) -> Vec<PositionCount>
where
    I: IntoIterator<Item = &'a AnnotatedPlayer>,
{
    let mut counts: Vec<PositionCount> = Vec::new();
    for (idx, player) in players.into_iter().enumerate() {
        match counts.iter_mut().find(|c| c.position == player.position) {
            Some(entry) => entry.count += 1,
            None => counts.push(PositionCount {
                position: player.position,
                count: 1,
                first_seen: idx,
            }),
        }
    }

    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });
    counts
}

/// The most common position cohort, or `None` for an empty input.
pub fn mode_position<'a, I>(players: I) -> Option<PositionCohort>
where
    I: IntoIterator<Item = &'a AnnotatedPlayer>,
{
    position_counts(players).first().map(|c| c.position)
}

// ---------------------------------------------------------------------------
// Mode queries
// ---------------------------------------------------------------------------

/// Most common position among players strictly older than `threshold_age`.
pub fn mode_position_over_age<'a, I>(players: I, threshold_age: f64) -> Option<PositionCohort>
where
    I: IntoIterator<Item = &'a AnnotatedPlayer>,
{
    mode_position(
        players
            .into_iter()
            .filter(|p| p.record.age > threshold_age),
    )
}

/// Most common position among players whose contract string contains `year`.
///
/// This is a plain substring test on the raw contract text, not a parsed
/// year comparison. Players with no contract on file never match.
pub fn mode_position_by_contract_year<'a, I>(players: I, year: &str) -> Option<PositionCohort>
where
    I: IntoIterator<Item = &'a AnnotatedPlayer>,
{
    mode_position(players.into_iter().filter(|p| {
        p.record
            .contract_until
            .as_deref()
            .is_some_and(|c| c.contains(year))
    }))
}

// ---------------------------------------------------------------------------
// Weighted ages
// ---------------------------------------------------------------------------

/// Minutes-weighted average age per position cohort, rounded to one decimal.
///
/// Cohorts whose players have zero total minutes have no defined average and
/// are left out of the map.
pub fn weighted_average_age_by_position<'a, I>(players: I) -> BTreeMap<PositionCohort, f64>
where
    I: IntoIterator<Item = &'a AnnotatedPlayer>,
{
    // (sum of age * minutes, sum of minutes)
    let mut sums: BTreeMap<PositionCohort, (f64, f64)> = BTreeMap::new();
    for player in players {
        let minutes = f64::from(player.record.minutes_played);
        let entry = sums.entry(player.position).or_insert((0.0, 0.0));
        entry.0 += player.record.age * minutes;
        entry.1 += minutes;
    }

    sums.into_iter()
        .filter_map(|(position, (weighted, minutes))| {
            if minutes > 0.0 {
                Some((position, round_one_decimal(weighted / minutes)))
            } else {
                debug!("no minutes recorded for {}, omitting weighted age", position);
                None
            }
        })
        .collect()
}

/// Halves go to the even digit, so 27.25 becomes 27.2 and 26.75 becomes 26.8.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
