use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use habitflow::cli::args::{Cli, Commands, StatsCommands};
use habitflow::cli::commands;
use habitflow::config::{ColorSetting, Config, Paths};
use habitflow::core::{Clock, FixedClock, SystemClock};
use habitflow::error::HabitError;
use habitflow::logging;
use habitflow::storage::{Database, HabitStore, LedgerStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        let code = e.downcast_ref::<HabitError>().map_or(1, HabitError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor database
    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.home.clone())?;
    let config = Config::load_from_path(&paths.config_file)?;
    logging::init(cli.verbose, &config.log)?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let clock: Box<dyn Clock> = match &cli.today {
        Some(input) => Box::new(FixedClock(commands::resolve_date(input, SystemClock.today())?)),
        None => Box::new(SystemClock),
    };
    let today = clock.today();
    let format = cli.output.unwrap_or(config.general.default_output);

    let db = Database::open(&paths)?;
    let habits = HabitStore::new(&db);
    let ledger = LedgerStore::new(&db);

    tracing::debug!(home = %paths.root.display(), %today, "starting");

    let output = match cli.command {
        Commands::Add(args) => commands::add(&habits, args, &config.habits, today, format)?,
        Commands::List { archived } => commands::list(&habits, &ledger, archived, today, format)?,
        Commands::Show { id } => commands::show(&habits, &ledger, id, today, format)?,
        Commands::Edit(args) => commands::edit(&habits, args, format)?,
        Commands::Archive { id } => commands::archive(&habits, id, format)?,
        Commands::Restore { id } => commands::restore(&habits, id, format)?,
        Commands::Delete { id } => commands::delete(&habits, id, format)?,
        Commands::Toggle { id, date } => {
            commands::toggle(&habits, &ledger, id, &date, today, format)?
        }
        Commands::Calendar { id, month } => {
            commands::calendar(&habits, &ledger, id, month.as_deref(), today, format)?
        }
        Commands::Stats(args) => match args.command {
            Some(StatsCommands::Watch {
                id,
                interval,
                count,
            }) => {
                commands::watch(
                    &habits,
                    &ledger,
                    clock.as_ref(),
                    id,
                    Duration::from_secs(interval),
                    count,
                    format,
                    &mut std::io::stdout().lock(),
                )?;
                String::new()
            }
            cmd => commands::stats(&habits, &ledger, cmd.as_ref(), today, format)?,
        },
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
