//! `firehose-state` command line

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use firehose_state::{import_state, Migrator, CURRENT_SCHEMA_VERSION};
use tracing::info;

mod logging;
mod state_io;

fn cli() -> Command {
    Command::new("firehose-state")
        .version(firehose_state::VERSION)
        .about("Migrate persisted delivery stream state between schema versions")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level, including attribute dumps"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Bring a state document up to the current schema version")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("State document (JSON, or YAML by extension); '-' for stdin"),
                )
                .arg(
                    Arg::new("from-version")
                        .long("from-version")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Override the schema version recorded in the document"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the migrated document here instead of stdout"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML migration config"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Build the initial state for a delivery stream ARN")
                .arg(Arg::new("arn").required(true).help("Delivery stream ARN")),
        )
        .subcommand(Command::new("version").about("Print the current schema version"))
}

fn run_migrate(args: &ArgMatches) -> Result<()> {
    let input = args
        .get_one::<PathBuf>("input")
        .context("missing input path")?;
    let config = state_io::read_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let mut state = state_io::read_state(input)?;
    if let Some(version) = args.get_one::<i64>("from-version") {
        state.schema_version = *version;
    }
    let from = state.schema_version;

    let migrator = Migrator::with_config(config);
    let migrated = migrator
        .migrate_state(Some(state))
        .with_context(|| format!("failed to migrate {} from v{from}", input.display()))?
        .context("migration dropped the state")?;
    info!(
        id = %migrated.id,
        from,
        to = migrated.schema_version,
        attributes = migrated.attributes.len(),
        "state migrated"
    );

    let text = state_io::render_state(&migrated)?;
    state_io::write_output(args.get_one::<PathBuf>("output").map(PathBuf::as_path), &text)
}

fn run_import(args: &ArgMatches) -> Result<()> {
    let arn = args.get_one::<String>("arn").context("missing ARN")?;
    let state = import_state(arn)?;
    info!(id = %state.id, "imported delivery stream");
    state_io::write_output(None, &state_io::render_state(&state)?)
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("migrate", args)) => run_migrate(args),
        Some(("import", args)) => run_import(args),
        Some(("version", _)) => {
            println!("{CURRENT_SCHEMA_VERSION}");
            Ok(())
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    if let Err(err) = logging::init(matches.get_flag("verbose"), matches.get_flag("log-json")) {
        eprintln!("warning: failed to install log subscriber: {err}");
    }

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
