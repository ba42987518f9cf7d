//! CALOR-IA terminal front end.
//!
//! # Responsibility
//! - Compose storage, clock and store for one process run.
//! - Render today's header and list, and drive the create-entry form.
//!
//! Usage: caloria [OPTIONS] [COMMAND]
//!
//! Commands:
//!   show     Show today's total and entries (default)
//!   add      Add a food entry
//!   remove   Remove an entry by id
//!   list     List entries with their ids
//!   clear    Delete every stored entry
//!   version  Print the core version

mod prompt;

use anyhow::{bail, Context, Result};
use caloria_core::{
    core_version, default_log_level, init_logging, render_header, render_list, Clock,
    FoodListView, FoodStore, HeaderView, KeyValueStorage, NumberFormat, SqliteKeyValueStorage,
    SystemClock,
};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use is_terminal::IsTerminal;
use log::info;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "caloria";
const DB_FILE_NAME: &str = "caloria.sqlite3";
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// CALOR-IA - daily calorie log
#[derive(Parser, Debug)]
#[command(name = "caloria")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the database and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Locale used for number formatting (e.g. es_ES, en-US)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show today's total and entries
    Show,

    /// Add a food entry
    Add(AddArgs),

    /// Remove an entry by id
    Remove {
        /// Entry id as printed by `list`
        id: String,
    },

    /// List entries with their ids
    List {
        /// Include entries from previous days
        #[arg(long)]
        all: bool,
    },

    /// Delete every stored entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the core version
    Version,
}

#[derive(clap::Args, Debug, Default)]
pub(crate) struct AddArgs {
    /// Food name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Free-form quantity (e.g. 200g, 1 taza)
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// Calories (positive integer)
    #[arg(short, long)]
    pub calories: Option<String>,

    /// Time as HH:MM (defaults to now)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Save without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show);

    if let Commands::Version = command {
        println!("caloria {}", core_version());
        return Ok(());
    }

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, data_dir.join("logs")) {
        eprintln!("warning: logging disabled: {err}");
    }

    let number_format = resolve_number_format(cli.locale.as_deref());
    let db_path = data_dir.join(DB_FILE_NAME);
    let storage = SqliteKeyValueStorage::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let clock = SystemClock;
    let mut store = FoodStore::open(storage, clock);

    match command {
        Commands::Show => print_today(&store, &number_format),
        Commands::Add(args) => {
            let interactive = std::io::stdin().is_terminal();
            if prompt::run_add_form(&mut store, clock, &args, interactive)? {
                print_today(&store, &number_format);
            }
        }
        Commands::Remove { id } => {
            if store.remove_food(id.trim()) {
                println!("Eliminado {}", id.trim());
            } else {
                println!("No existe un registro con id {}", id.trim());
            }
        }
        Commands::List { all } => print_ids(&store, all),
        Commands::Clear { yes } => {
            let interactive = std::io::stdin().is_terminal();
            if confirm_clear(store.foods().len(), yes, interactive)? {
                println!("Eliminados {} registros", store.clear());
            } else {
                println!("Cancelado");
            }
        }
        Commands::Version => {}
    }

    info!("event=app_exit module=cli status=ok");
    Ok(())
}

/// Clearing needs `--yes` or an explicit answer on a terminal.
fn confirm_clear(records: usize, yes: bool, interactive: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !interactive {
        bail!("refusing to clear {records} entries without --yes");
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("¿Eliminar {records} registros?"))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn print_today<S: KeyValueStorage, C: Clock>(store: &FoodStore<S, C>, format: &NumberFormat) {
    print!("{}", render_header(&HeaderView::from_store(store, format)));
    println!();
    print!("{}", render_list(&FoodListView::from_store(store)));
}

fn print_ids<S: KeyValueStorage, C: Clock>(store: &FoodStore<S, C>, all: bool) {
    let records = if all {
        store.foods().iter().collect::<Vec<_>>()
    } else {
        store.today_foods()
    };
    if records.is_empty() {
        println!("Sin registros");
        return;
    }
    let clock = store.clock();
    for record in records {
        println!(
            "{}  {} {}  {} kcal  {}",
            record.id,
            clock.local_date_of(record.created_at),
            record.time,
            record.calories,
            record.name
        );
    }
}

fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(path) => path.to_path_buf(),
        None => dirs::data_local_dir()
            .context("no local data directory on this platform; pass --data-dir")?
            .join(APP_DIR_NAME),
    };
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(dir))
}

fn resolve_number_format(explicit: Option<&str>) -> NumberFormat {
    if let Some(tag) = explicit {
        return NumberFormat::from_locale_tag(tag);
    }
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .map(|tag| NumberFormat::from_locale_tag(&tag))
        .unwrap_or_default()
}
