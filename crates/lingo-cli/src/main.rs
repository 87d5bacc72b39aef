//! CLI entry point for Lingo: the interactive trainer plus a few maintenance commands.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use lingo_core::{
    add_category, app_data_dir, get_db_path, list_categories, load_config, run_session, set_db_path,
    Console, StaticCredentials, Store,
};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Lingo: Spanish/English vocabulary trainer")]
struct Cli {
    /// Word database to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and add, view and quiz words (default).
    Session,
    /// Show where Lingo stores its config and database (app data directory).
    DataDir,
    /// List the categories words can be filed under.
    Categories {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add a category. Does nothing if one with that name exists.
    AddCategory {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remember a database path in the config file.
    SetDb {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let store = open_store(cli.db.as_deref())?;
            let credentials = StaticCredentials::from_config(&load_config());
            let mut console = Console::stdio();
            run_session(&store, &mut console, &credentials, &mut rand::thread_rng())?;
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => println!("{}", p.display()),
            None => eprintln!("Could not determine app data directory."),
        },
        Commands::Categories { json } => {
            let store = open_store(cli.db.as_deref())?;
            let categories = list_categories(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for c in categories {
                    println!("{}. {}", c.id, c.name);
                }
            }
        }
        Commands::AddCategory { name } => {
            let store = open_store(cli.db.as_deref())?;
            let category = add_category(&store, &name)?;
            println!("{}. {}", category.id, category.name);
        }
        Commands::SetDb { path } => {
            set_db_path(&path)?;
            println!("Database path set to {}", path.display());
        }
    }
    Ok(())
}

/// `--db` wins over the config file, which wins over the app data default.
fn open_store(flag: Option<&Path>) -> Result<Store, Box<dyn std::error::Error>> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(get_db_path)
        .ok_or("could not determine where to keep the word database; pass --db")?;
    log::debug!("using database {}", path.display());
    Ok(Store::open(&path)?)
}
