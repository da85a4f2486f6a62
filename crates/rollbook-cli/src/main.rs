//! rollbook - print a school's people directory from a DBI snapshot.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollbook_core::utils::{format_date, format_optional, format_optional_number, truncate_string};
use rollbook_core::{Config, DbiSnapshot, People, Person, PersonSortColumn, Session};

/// Environment variable naming the snapshot file
const SNAPSHOT_ENV: &str = "ROLLBOOK_SNAPSHOT";

/// Width of the name column in table output
const NAME_WIDTH: usize = 28;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(name = "rollbook")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// DBI snapshot file (defaults to $ROLLBOOK_SNAPSHOT, then the config file)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Sort listed people by this column
    #[arg(long, global = true, value_enum)]
    sort: Option<SortArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Name,
    Id,
    Since,
}

impl From<SortArg> for PersonSortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => PersonSortColumn::Name,
            SortArg::Id => PersonSortColumn::Id,
            SortArg::Since => PersonSortColumn::Since,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// List all students
    Students,
    /// List all teachers
    Teachers,
    /// List all parents
    Parents,
    /// List students, teachers and parents together
    People,
    /// Show one student
    Student {
        /// Student id
        id: i64,
    },
    /// Show one teacher
    Teacher {
        /// Teacher id
        id: i64,
    },
    /// Show one parent
    Parent {
        /// Parent id
        id: i64,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Snapshot path: flag, then environment, then config file
fn resolve_snapshot_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    flag.or_else(|| std::env::var_os(SNAPSHOT_ENV).map(PathBuf::from))
        .or_else(|| config.snapshot_path.clone())
        .with_context(|| {
            format!(
                "No snapshot given. Pass --snapshot, set {}, \
                 or add snapshot_path to the config file.",
                SNAPSHOT_ENV
            )
        })
}

fn print_table(people: &[Person]) {
    println!(
        "{:<12} {:<width$} {:<6} {:<10} {}",
        "ID",
        "NAME",
        "GENDER",
        "SINCE",
        "DETAILS",
        width = NAME_WIDTH
    );
    for person in people {
        let account = person.account();
        let details = match person {
            Person::Student(s) => format!(
                "class {} no. {}",
                format_optional_number(s.class_id()),
                format_optional_number(s.number_in_class())
            ),
            Person::Teacher(t) => {
                format!("classroom {}", format_optional(Some(t.classroom_name()), "-"))
            }
            Person::Parent(_) => String::new(),
        };
        println!(
            "{:<12} {:<width$} {:<6} {:<10} {}",
            account.get_id(),
            truncate_string(account.name(), NAME_WIDTH),
            account.gender().map(|g| g.code()).unwrap_or("-"),
            format_date(account.in_school_since()),
            details,
            width = NAME_WIDTH
        );
    }
}

fn print_people(mut people: Vec<Person>, cli: &Cli) -> Result<()> {
    if let Some(column) = cli.sort {
        PersonSortColumn::from(column).sort(&mut people);
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&people)?);
    } else {
        print_table(&people);
    }
    Ok(())
}

fn print_list<T: Into<Person>>(list: Option<Vec<T>>, what: &str, cli: &Cli) -> Result<()> {
    match list {
        Some(list) => print_people(list.into_iter().map(Into::into).collect(), cli),
        None => {
            warn!(what, "List unavailable");
            println!("{} list unavailable", what);
            Ok(())
        }
    }
}

fn print_one<T: Into<Person>>(found: Option<T>, what: &str, id: i64, cli: &Cli) -> Result<()> {
    match found {
        Some(person) => print_people(vec![person.into()], cli),
        None => {
            println!("{} {} not found", what, id);
            Ok(())
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    debug!(?config, "Config loaded");

    let path = resolve_snapshot_path(cli.snapshot.clone(), &config)?;
    let snapshot = DbiSnapshot::load(&path)?;
    let session = Session::from(snapshot.session.clone());

    if let Some(data) = session.data.as_ref() {
        info!(
            username = %data.username,
            subdomain = %data.subdomain,
            minutes_left = ?data.minutes_until_expiry(),
            "Using snapshot session"
        );
        if config.remember_session(data) {
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to save config");
            }
        }
    }

    let people = People::new(&session, &snapshot);
    match &cli.command {
        Commands::Students => print_list(people.get_students()?, "student", cli),
        Commands::Teachers => print_list(people.get_teachers()?, "teacher", cli),
        Commands::Parents => print_list(people.get_parents()?, "parent", cli),
        Commands::People => match people.get_people()? {
            Some(everyone) => print_people(everyone, cli),
            None => {
                println!("people list unavailable");
                Ok(())
            }
        },
        Commands::Student { id } => print_one(people.get_student(*id)?, "student", *id, cli),
        Commands::Teacher { id } => print_one(people.get_teacher(*id)?, "teacher", *id, cli),
        Commands::Parent { id } => print_one(people.get_parent(*id)?, "parent", *id, cli),
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    run(&cli)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rollbook").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_commands() {
        let cli = parse(&["--json", "students"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.command, Commands::Students);
        assert_eq!(parse(&["people"]).unwrap().command, Commands::People);
    }

    #[test]
    fn test_parse_single_lookup() {
        let cli = parse(&["--snapshot", "/tmp/dbi.json", "teacher", "42"]).unwrap();
        assert_eq!(cli.snapshot, Some(PathBuf::from("/tmp/dbi.json")));
        assert_eq!(cli.command, Commands::Teacher { id: 42 });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["parent", "3", "--snapshot=/p.json", "--json"]).unwrap();
        assert_eq!(cli.snapshot, Some(PathBuf::from("/p.json")));
        assert!(cli.json);
        assert_eq!(cli.command, Commands::Parent { id: 3 });
    }

    #[test]
    fn test_parse_sort_column() {
        let cli = parse(&["--sort", "since", "parents"]).unwrap();
        assert_eq!(cli.sort, Some(SortArg::Since));
        assert_eq!(PersonSortColumn::from(SortArg::Since), PersonSortColumn::Since);

        let err = parse(&["--sort", "rank", "parents"]).err().expect("unknown column");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse(&["student"]).is_err());
        assert!(parse(&["student", "abc"]).is_err());
        assert!(parse(&["--snapshot"]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = parse(&["--help"]).err().expect("help short-circuits parsing");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_snapshot_flag_wins_over_config() {
        let config = Config {
            snapshot_path: Some(PathBuf::from("/from/config.json")),
            ..Config::default()
        };
        let path = resolve_snapshot_path(Some(PathBuf::from("/from/flag.json")), &config).unwrap();
        assert_eq!(path, PathBuf::from("/from/flag.json"));
    }
}
