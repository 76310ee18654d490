// Squad analysis pipeline.
//
// A `Dataset` is built once from the loaded roster: duplicate rows are
// dropped and every player is tagged with its age and position cohort.
// `analyze_team` then derives everything shown for one team (squad grid,
// insights, prospect shortlist) from that immutable dataset. Nothing is
// cached between runs; analyzing the same team twice gives the same report.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate;
use crate::cohort::{classify_age, classify_position, AgeCohort, PositionCohort};
use crate::contract::{classify_contract, ContractTier};
use crate::prospects::{find_prospects, Prospect, ProspectQuery};
use crate::roster::{dedup_records, PlayerRecord};

// ---------------------------------------------------------------------------
// Annotated players
// ---------------------------------------------------------------------------

/// A player record tagged with both of its cohorts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPlayer {
    pub record: PlayerRecord,
    pub age_cohort: AgeCohort,
    pub position: PositionCohort,
}

impl AnnotatedPlayer {
    pub fn new(record: PlayerRecord) -> Self {
        let age_cohort = classify_age(record.age);
        let position = classify_position(&record.position);
        AnnotatedPlayer {
            record,
            age_cohort,
            position,
        }
    }

    /// Contract tier, with malformed dates treated as `Neutral`.
    pub fn contract_tier(&self) -> ContractTier {
        match classify_contract(self.record.contract_until.as_deref()) {
            Ok(tier) => tier,
            Err(e) => {
                debug!("{}: {}; treating as neutral", self.record.name, e);
                ContractTier::Neutral
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The full multi-league roster, deduplicated and annotated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    players: Vec<AnnotatedPlayer>,
}

impl Dataset {
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let players: Vec<AnnotatedPlayer> = dedup_records(records)
            .into_iter()
            .map(AnnotatedPlayer::new)
            .collect();
        info!("Dataset ready: {} unique players", players.len());
        Dataset { players }
    }

    pub fn players(&self) -> &[AnnotatedPlayer] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sorted, unique names of the teams playing in `league`.
    pub fn teams_in_league(&self, league: &str) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.record.league == league)
            .map(|p| p.record.team.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every player of `team`, in dataset order.
    pub fn team_roster(&self, team: &str) -> Vec<&AnnotatedPlayer> {
        self.players
            .iter()
            .filter(|p| p.record.team == team)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Squad grid
// ---------------------------------------------------------------------------

/// One player as shown in a grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridEntry {
    /// `"{name} ({age})"`.
    pub label: String,
    pub tier: ContractTier,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub age: AgeCohort,
    pub players: Vec<GridEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub position: PositionCohort,
    pub cells: Vec<GridCell>,
}

/// Position x age grid. Every one of the 7 x 4 cells is always present.
///
/// Rows follow `PositionCohort::ALL` and cells follow `AgeCohort::ALL`; the
/// field stays private so that layout cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadGrid {
    rows: Vec<GridRow>,
}

impl SquadGrid {
    /// A grid with every cell present and empty.
    pub fn empty() -> Self {
        let rows = PositionCohort::ALL
            .iter()
            .map(|&position| GridRow {
                position,
                cells: AgeCohort::ALL
                    .iter()
                    .map(|&age| GridCell {
                        age,
                        players: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        SquadGrid { rows }
    }

    /// Rows in grid order, one per position cohort.
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Players in the cell at (`position`, `age`).
    pub fn cell(&self, position: PositionCohort, age: AgeCohort) -> &[GridEntry] {
        &self.rows[position as usize].cells[age as usize].players
    }

    fn push(&mut self, position: PositionCohort, age: AgeCohort, entry: GridEntry) {
        self.rows[position as usize].cells[age as usize]
            .players
            .push(entry);
    }

    /// Total number of players placed in the grid.
    pub fn player_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.players.len())
            .sum()
    }
}

/// Place every player into its (position, age) cell, preserving input order
/// within each cell.
pub fn build_grid<'a, I>(players: I) -> SquadGrid
where
    I: IntoIterator<Item = &'a AnnotatedPlayer>,
{
    let mut grid = SquadGrid::empty();
    for player in players {
        let tier = player.contract_tier();
        grid.push(
            player.position,
            player.age_cohort,
            GridEntry {
                label: player.record.label(),
                tier,
                color: tier.color(),
            },
        );
    }
    grid
}

// ---------------------------------------------------------------------------
// Team report
// ---------------------------------------------------------------------------

/// Knobs for a team analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// League whose teams are offered for selection.
    pub reference_league: String,
    /// Players strictly older than this count as aging.
    pub veteran_age_threshold: f64,
    /// Substring searched for in contract dates, e.g. "2025".
    pub expiring_contract_year: String,
    pub prospects: ProspectQuery,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            reference_league: "PKO BP Ekstraklasa".into(),
            veteran_age_threshold: 30.0,
            expiring_contract_year: "2025".into(),
            prospects: ProspectQuery::default(),
        }
    }
}

/// Scalar insights about one squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamInsights {
    pub veteran_age_threshold: f64,
    /// Position group with the most players over the threshold.
    pub oldest_position: Option<PositionCohort>,
    pub expiring_contract_year: String,
    /// Position group with the most contracts mentioning the expiring year.
    pub expiring_position: Option<PositionCohort>,
    pub weighted_ages: BTreeMap<PositionCohort, f64>,
}

impl TeamInsights {
    pub fn oldest_position_text(&self) -> String {
        match self.oldest_position {
            Some(pos) => pos.label().to_string(),
            None => format!("No players over {}", self.veteran_age_threshold),
        }
    }

    pub fn expiring_position_text(&self) -> String {
        match self.expiring_position {
            Some(pos) => pos.label().to_string(),
            None => format!("No contracts ending in {}", self.expiring_contract_year),
        }
    }
}

/// Young players from other leagues who could cover the squad's oldest area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProspectList {
    /// The position searched for; `None` when nobody is over the threshold.
    pub target: Option<PositionCohort>,
    pub excluded_league: String,
    pub max_age: f64,
    pub players: Vec<Prospect>,
}

/// Everything produced for one selected team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub team: String,
    pub league: String,
    pub squad_size: usize,
    pub grid: SquadGrid,
    pub insights: TeamInsights,
    pub prospects: ProspectList,
}

/// Run the full analysis for `team`.
///
/// Returns `None` if the dataset has no players for that team.
pub fn analyze_team(
    dataset: &Dataset,
    team: &str,
    settings: &AnalysisSettings,
) -> Option<TeamReport> {
    let roster = dataset.team_roster(team);
    let league = roster.first()?.record.league.clone();

    let grid = build_grid(roster.iter().copied());

    let oldest_position =
        aggregate::mode_position_over_age(roster.iter().copied(), settings.veteran_age_threshold);
    let insights = TeamInsights {
        veteran_age_threshold: settings.veteran_age_threshold,
        oldest_position,
        expiring_contract_year: settings.expiring_contract_year.clone(),
        expiring_position: aggregate::mode_position_by_contract_year(
            roster.iter().copied(),
            &settings.expiring_contract_year,
        ),
        weighted_ages: aggregate::weighted_average_age_by_position(roster.iter().copied()),
    };

    let prospect_players = match oldest_position {
        Some(target) => find_prospects(dataset.players(), target, &league, &settings.prospects)
            .into_iter()
            .map(Prospect::from)
            .collect(),
        None => Vec::new(),
    };

    info!(
        "Analyzed {}: {} players, {} prospects",
        team,
        roster.len(),
        prospect_players.len()
    );

    Some(TeamReport {
        team: team.to_string(),
        league: league.clone(),
        squad_size: roster.len(),
        grid,
        insights,
        prospects: ProspectList {
            target: oldest_position,
            excluded_league: league,
            max_age: settings.prospects.max_age,
            players: prospect_players,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
