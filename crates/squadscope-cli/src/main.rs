// SquadScope entry point.
//
// Startup sequence:
// 0. Parse the command line (clap handles --help and rejects unknown flags)
// 1. Initialize tracing (log to file, stdout is reserved for the report)
// 2. Load config
// 3. Load the players CSV and build the dataset
// 4. With no team argument, list the reference league's teams
// 5. Otherwise analyze the team and print the report (text or JSON)

mod render;

use squadscope_core::config;
use squadscope_core::pipeline::{analyze_team, Dataset};
use squadscope_core::roster;

use anyhow::{bail, Context};
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "squadscope")]
#[command(about = "Squad age, position and contract analysis for a football roster", long_about = None)]
struct Args {
    /// Print the team report as JSON
    #[arg(long)]
    json: bool,

    /// Team to analyze; lists the reference league's teams when omitted
    team: Vec<String>,
}

impl Args {
    /// Team name with the words joined back together, if one was given.
    fn team_name(&self) -> Option<String> {
        (!self.team.is_empty()).then(|| self.team.join(" "))
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Parse the command line
    let args = Args::parse();

    // 1. Initialize tracing
    init_tracing()?;
    info!("SquadScope starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    let settings = config.analysis_settings();
    info!(
        "Config loaded: reference league={}, players={}",
        settings.reference_league, config.data.players_csv
    );

    // 3. Load players and build the dataset
    let records = roster::load_players(Path::new(&config.data.players_csv))
        .context("failed to load players")?;
    let dataset = Dataset::from_records(records);

    // 4. Team list
    let Some(team) = args.team_name() else {
        let teams = dataset.teams_in_league(&settings.reference_league);
        print!("{}", render::team_list(&settings.reference_league, &teams));
        return Ok(());
    };

    // 5. Team report
    let Some(report) = analyze_team(&dataset, &team, &settings) else {
        bail!("no players found for team `{team}`; run without arguments to list teams");
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{}", render::report_text(&report));
    }

    info!("SquadScope finished");
    Ok(())
}

/// Initialize tracing to log to a file so the report on stdout stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("squadscope.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("squadscope=info,squadscope_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn team_words_are_joined() {
        let args = Args::try_parse_from(["squadscope", "--json", "Lech", "Poznan"]).unwrap();
        assert!(args.json);
        assert_eq!(args.team_name().as_deref(), Some("Lech Poznan"));

        let args = Args::try_parse_from(["squadscope", "Legia", "Warszawa"]).unwrap();
        assert!(!args.json);
        assert_eq!(args.team_name().as_deref(), Some("Legia Warszawa"));
    }

    #[test]
    fn no_team_lists_teams() {
        let args = Args::try_parse_from(["squadscope"]).unwrap();
        assert_eq!(args.team_name(), None);
    }

    #[test]
    fn flags_never_become_team_names() {
        let err = Args::try_parse_from(["squadscope", "--jsn", "Lech", "Poznan"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["squadscope", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
