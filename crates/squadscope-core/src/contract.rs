// Contract-expiry risk tiers and their display colors.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value the source data uses for "no contract on file".
pub const NO_CONTRACT_SENTINEL: &str = "-";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("contract date `{raw}` has no valid year token")]
    ParseError { raw: String },
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// How soon a player's contract runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractTier {
    /// No contract on file, unparseable, or expired before 2025.
    Neutral,
    Expiring2025,
    Expiring2026,
    /// Runs until 2027 or later.
    Safe2027Plus,
}

impl ContractTier {
    /// Map an expiry year to a tier.
    pub fn from_year(year: i64) -> Self {
        match year {
            2025 => ContractTier::Expiring2025,
            2026 => ContractTier::Expiring2026,
            y if y >= 2027 => ContractTier::Safe2027Plus,
            _ => ContractTier::Neutral,
        }
    }

    /// CSS color the presentation layer tags a player label with.
    pub fn color(&self) -> &'static str {
        match self {
            ContractTier::Expiring2025 => "red",
            ContractTier::Expiring2026 => "#ffc733",
            ContractTier::Safe2027Plus => "green",
            ContractTier::Neutral => "white",
        }
    }
}

/// Classify a raw `D.M.YYYY` contract string.
///
/// Missing, blank and sentinel values are `Neutral`. Otherwise the token after
/// the last `.` must parse as an integer year; if it does not, this returns
/// `ContractError::ParseError` and the caller decides how to degrade. Years too
/// large for `i64` still count as integers and land in the far future tier.
pub fn classify_contract(raw: Option<&str>) -> Result<ContractTier, ContractError> {
    let raw = match raw.map(str::trim) {
        None => return Ok(ContractTier::Neutral),
        Some(s) if s.is_empty() || s == NO_CONTRACT_SENTINEL => {
            return Ok(ContractTier::Neutral)
        }
        Some(s) => s,
    };

    let year_token = raw.rsplit('.').next().unwrap_or(raw).trim();
    match year_token.parse::<i64>() {
        Ok(year) => Ok(ContractTier::from_year(year)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(ContractTier::Safe2027Plus),
            IntErrorKind::NegOverflow => Ok(ContractTier::Neutral),
            _ => Err(ContractError::ParseError {
                raw: raw.to_string(),
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

/// One row of the contract color legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub tier: ContractTier,
    pub color: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The legend shown beneath the squad grid. Neutral has no entry.
pub fn legend() -> [LegendEntry; 3] {
    [
        LegendEntry {
            tier: ContractTier::Expiring2025,
            color: ContractTier::Expiring2025.color(),
            name: "Red",
            description: "Contract ending in 2025",
        },
        LegendEntry {
            tier: ContractTier::Expiring2026,
            color: ContractTier::Expiring2026.color(),
            name: "Yellow",
            description: "Contract ending in 2026",
        },
        LegendEntry {
            tier: ContractTier::Safe2027Plus,
            color: ContractTier::Safe2027Plus.color(),
            name: "Green",
            description: "Contract ending in 2027 or later",
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_missing_are_neutral() {
        assert_eq!(classify_contract(Some("-")), Ok(ContractTier::Neutral));
        assert_eq!(classify_contract(None), Ok(ContractTier::Neutral));
        assert_eq!(classify_contract(Some("")), Ok(ContractTier::Neutral));
        assert_eq!(classify_contract(Some("  ")), Ok(ContractTier::Neutral));
    }

    #[test]
    fn year_to_tier() {
        assert_eq!(classify_contract(Some("30.6.2025")), Ok(ContractTier::Expiring2025));
        assert_eq!(classify_contract(Some("1.1.2026")), Ok(ContractTier::Expiring2026));
        assert_eq!(classify_contract(Some("1.1.2027")), Ok(ContractTier::Safe2027Plus));
        assert_eq!(classify_contract(Some("1.1.2030")), Ok(ContractTier::Safe2027Plus));
        assert_eq!(classify_contract(Some("30.6.2024")), Ok(ContractTier::Neutral));
    }

    #[test]
    fn bare_year_is_accepted() {
        // No dots at all: the whole string is the trailing token.
        assert_eq!(classify_contract(Some("2026")), Ok(ContractTier::Expiring2026));
    }

    #[test]
    fn malformed_year_is_parse_error() {
        assert_eq!(
            classify_contract(Some("abc.def.xyz")),
            Err(ContractError::ParseError {
                raw: "abc.def.xyz".into()
            })
        );
        assert!(classify_contract(Some("30.6.")).is_err());
        assert!(classify_contract(Some("June 2025")).is_err());
    }

    #[test]
    fn oversized_year_is_still_a_year() {
        assert_eq!(
            classify_contract(Some("1.1.3000000000")),
            Ok(ContractTier::Safe2027Plus)
        );
        assert_eq!(
            classify_contract(Some("1.1.99999999999999999999999")),
            Ok(ContractTier::Safe2027Plus)
        );
        assert_eq!(
            classify_contract(Some("1.1.-99999999999999999999999")),
            Ok(ContractTier::Neutral)
        );
    }

    #[test]
    fn color_table() {
        assert_eq!(ContractTier::Expiring2025.color(), "red");
        assert_eq!(ContractTier::Expiring2026.color(), "#ffc733");
        assert_eq!(ContractTier::Safe2027Plus.color(), "green");
        assert_eq!(ContractTier::Neutral.color(), "white");
    }

    #[test]
    fn legend_skips_neutral() {
        let legend = legend();
        assert!(legend.iter().all(|e| e.tier != ContractTier::Neutral));
        assert_eq!(legend[1].color, "#ffc733");
        assert_eq!(legend[2].description, "Contract ending in 2027 or later");
    }
}
