// Plain-text rendering of team lists and team reports.

use std::fmt::Write;

use squadscope_core::contract::{legend, ContractTier};
use squadscope_core::pipeline::{GridEntry, TeamReport};

/// Numbered list of the teams available for selection.
pub fn team_list(league: &str, teams: &[String]) -> String {
    let mut out = String::new();
    if teams.is_empty() {
        let _ = writeln!(out, "No teams found in {league}.");
        return out;
    }
    let _ = writeln!(out, "Teams in {league}:");
    for (i, team) in teams.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, team);
    }
    out
}

fn entry_text(entry: &GridEntry) -> String {
    match entry.tier {
        ContractTier::Neutral => entry.label.clone(),
        _ => format!("{} [{}]", entry.label, entry.color),
    }
}

/// Full report: squad grid, legend, insights and prospects.
pub fn report_text(report: &TeamReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} - Player Analysis ({}, {} players)",
        report.team, report.league, report.squad_size
    );
    let _ = writeln!(out);

    // Squad grid, one block per position row.
    for row in report.grid.rows() {
        let _ = writeln!(out, "{}", row.position);
        for cell in &row.cells {
            let players: Vec<String> = cell.players.iter().map(entry_text).collect();
            let _ = writeln!(out, "  {:<18} {}", format!("{}:", cell.age), players.join(", "));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Contract Legend:");
    for entry in legend() {
        let _ = writeln!(out, "  [{}] {}: {}", entry.color, entry.name, entry.description);
    }

    let insights = &report.insights;
    let _ = writeln!(out);
    let _ = writeln!(out, "Team Insights");
    let _ = writeln!(
        out,
        "  Position with most players over {}: {}",
        insights.veteran_age_threshold,
        insights.oldest_position_text()
    );
    let _ = writeln!(
        out,
        "  Position with most contracts ending in {}: {}",
        insights.expiring_contract_year,
        insights.expiring_position_text()
    );
    let _ = writeln!(out, "  Average age by position (minutes-weighted):");
    for (position, age) in &insights.weighted_ages {
        let _ = writeln!(out, "    {:<10} {:.1}", position.label(), age);
    }

    let prospects = &report.prospects;
    let _ = writeln!(out);
    match prospects.target {
        None => {
            let _ = writeln!(
                out,
                "Prospects: no target position (no players over {}).",
                insights.veteran_age_threshold
            );
        }
        Some(target) => {
            let _ = writeln!(
                out,
                "Players in the {} position with the most minutes played, aged {} or under, outside {}:",
                target, prospects.max_age, prospects.excluded_league
            );
            if prospects.players.is_empty() {
                let _ = writeln!(out, "  (none)");
            }
            for p in &prospects.players {
                let _ = writeln!(
                    out,
                    "  {:<24} {:>4} {:>6}  {:<24} {}",
                    p.name, p.age, p.minutes_played, p.team, p.league
                );
            }
        }
    }

    out
}
