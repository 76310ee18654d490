// Player roster loading and deduplication.
//
// Reads the scraped players CSV (one row per player per team) and turns it
// into `PlayerRecord`s. Bad rows are logged and skipped, never fatal.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One player row as it appears in the source data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub age: f64,
    /// Free-text position, e.g. "Defender - Centre-Back".
    pub position: String,
    pub team: String,
    pub league: String,
    pub minutes_played: u32,
    /// `D.M.YYYY` expiry date. `None` when the source cell was empty.
    pub contract_until: Option<String>,
}

impl PlayerRecord {
    /// Age as shown to users: whole ages without a trailing `.0`.
    pub fn display_age(&self) -> String {
        if self.age.is_finite() && self.age.fract() == 0.0 {
            format!("{}", self.age as i64)
        } else {
            format!("{}", self.age)
        }
    }

    /// `"{name} ({age})"` label used in the squad grid.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.display_age())
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw players CSV row. Columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    player_name: String,
    player_age: Option<f64>,
    #[serde(default)]
    player_pos: Option<String>,
    team_name: String,
    league: String,
    #[serde(default)]
    minutes_played: Option<f64>,
    #[serde(default)]
    contract_until: Option<String>,
}

fn record_from_raw(raw: RawPlayerRow) -> Option<PlayerRecord> {
    let name = raw.player_name.trim().to_string();

    let age = match raw.player_age {
        Some(age) if age.is_finite() => age,
        _ => {
            warn!("skipping player '{}': missing or non-finite age", name);
            return None;
        }
    };

    let minutes_played = match raw.minutes_played {
        None => 0,
        Some(m) if m.is_finite() && m >= 0.0 => m.round() as u32,
        Some(m) => {
            warn!("skipping player '{}': invalid minutes_played {}", name, m);
            return None;
        }
    };

    let contract_until = raw
        .contract_until
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Some(PlayerRecord {
        name,
        age,
        position: raw.player_pos.unwrap_or_default().trim().to_string(),
        team: raw.team_name.trim().to_string(),
        league: raw.league.trim().to_string(),
        minutes_played,
        contract_until,
    })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                if let Some(record) = record_from_raw(raw) {
                    players.push(record);
                }
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load every player row from a CSV file.
///
/// Returns `RosterError::Validation` if the file contains no usable rows.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file).map_err(|e| RosterError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;

    if players.is_empty() {
        return Err(RosterError::Validation(format!(
            "{} produced zero valid player rows",
            path.display()
        )));
    }

    info!("Loaded {} player rows from {}", players.len(), path.display());
    Ok(players)
}

/// Drop rows identical across every column, keeping the first occurrence.
pub fn dedup_records(records: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    let before = records.len();
    let mut seen = HashSet::new();
    let unique: Vec<PlayerRecord> = records
        .into_iter()
        .filter(|r| {
            seen.insert((
                r.name.clone(),
                r.age.to_bits(),
                r.position.clone(),
                r.team.clone(),
                r.league.clone(),
                r.minutes_played,
                r.contract_until.clone(),
            ))
        })
        .collect();

    if unique.len() < before {
        info!("Removed {} duplicate player rows", before - unique.len());
    }
    unique
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
