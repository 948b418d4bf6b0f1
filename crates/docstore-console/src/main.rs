use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use docstore_core::api::Database;
use docstore_core::error::Error;
use docstore_core::storage::{FileProvider, MemoryProvider, PersistenceProvider};
use rustyline::DefaultEditor;

mod commands;
mod display;
mod executor;
mod parser;

use display::OutputMode;

/// docstore Console: interactive and scriptable CLI for docstore databases.
#[derive(Parser, Debug)]
#[command(name = "docstore-console", version)]
struct Cli {
    /// Name of the database to operate on.
    database: String,

    /// Directory holding one JSON document per database.
    #[arg(long, env = "DOCSTORE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk. Overrides --data-dir.
    #[arg(long)]
    memory: bool,

    /// Execute a command non-interactively (can be repeated).
    #[arg(short, long = "exec")]
    exec: Vec<String>,

    /// Output results as machine-parseable JSON.
    #[arg(short, long)]
    json: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docstore")
}

/// Build the database handle the CLI flags describe.
fn open_database(cli: &Cli) -> Result<Database, Error> {
    let provider: Arc<dyn PersistenceProvider> = if cli.memory {
        Arc::new(MemoryProvider::new())
    } else {
        let dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        Arc::new(FileProvider::open(dir)?)
    };
    Database::new(&cli.database, provider)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db = match open_database(&cli) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database: {e}");
            process::exit(1);
        }
    };
    tracing::debug!(database = db.name(), memory = cli.memory, "console opened");

    if !cli.exec.is_empty() {
        let code = run_exec_mode(&db, &cli.exec, cli.json);
        process::exit(code);
    } else if !std::io::stdin().is_terminal() {
        let code = run_pipe_mode(&db, cli.json);
        process::exit(code);
    } else {
        run_repl(&db);
    }
}

/// Execute one or more commands non-interactively (--exec mode).
///
/// Returns exit code: 0 = all succeeded, 1 = first error stops execution.
fn run_exec_mode(db: &Database, commands: &[String], json_mode: bool) -> i32 {
    let mode = OutputMode::from_flag(json_mode);

    for cmd_str in commands {
        let cmd = match parser::parse(cmd_str) {
            Ok(cmd) => cmd,
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        };

        match executor::execute(db, cmd) {
            Ok(result) => {
                if !display::render(&result, &mode) {
                    return 0;
                }
            }
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        }
    }

    0
}

/// Read commands from stdin (pipe mode).
///
/// Returns exit code: 0 = all succeeded, 1 = first error.
fn run_pipe_mode(db: &Database, json_mode: bool) -> i32 {
    let mode = OutputMode::from_flag(json_mode);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cmd = match parser::parse(trimmed) {
            Ok(cmd) => cmd,
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        };

        match executor::execute(db, cmd) {
            Ok(result) => {
                if !display::render(&result, &mode) {
                    return 0; // EXIT command
                }
            }
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        }
    }

    0
}

/// Interactive REPL mode.
fn run_repl(db: &Database) {
    println!("docstore Console v{}", env!("CARGO_PKG_VERSION"));
    println!("Database: {}", db.name());
    println!("Type HELP for available commands.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline("docstore> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let cmd = match parser::parse(trimmed) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        display::print_error(&e);
                        continue;
                    }
                };

                match executor::execute(db, cmd) {
                    Ok(result) => {
                        if !display::render(&result, &OutputMode::Pretty) {
                            break; // EXIT command
                        }
                    }
                    Err(e) => display::print_error(&e),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!();
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(e) => {
                eprintln!("Readline error: {e}");
                break;
            }
        }
    }
}
