//! `lexiload` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and environment configuration.
//! - Initialize logging, open the database and run one full load.
//! - Own the only process-exit decision.
//!
//! Environment:
//!   LEXILOAD_DB=dictionary.sqlite3
//!   LEXILOAD_ENTRY_COMMIT=transactional|per-statement
//!   LEXILOAD_LOG=info
//!   LEXILOAD_LOG_DIR=/var/log/lexiload

use clap::Parser;
use lexiload_core::db::open_db;
use lexiload_core::{
    default_log_level, export_files, init_logging, load_files, EntryCommitPolicy, LoadSources,
    LogTarget,
};
use log::{error, info};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "lexiload")]
#[command(about = "Load a bilingual lexicon and a nested entry dump into SQLite")]
#[command(version)]
struct Cli {
    /// Line-oriented lexicon (`TRAD SIMP [ROMANIZATION] /GLOSS/`)
    lexicon: PathBuf,

    /// JSON entry dump (entries -> heteronyms -> definitions)
    entry_dump: PathBuf,

    /// SQLite database file; created when missing
    #[arg(long, env = "LEXILOAD_DB", required_unless_present = "emit_sql")]
    db: Option<PathBuf>,

    /// Transaction boundary for the entry dump
    #[arg(long, env = "LEXILOAD_ENTRY_COMMIT", default_value_t = EntryCommitPolicy::Transactional)]
    entry_commit: EntryCommitPolicy,

    /// Write the load as a SQL script instead of touching a database
    #[arg(long)]
    emit_sql: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "LEXILOAD_LOG")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset
    #[arg(long, env = "LEXILOAD_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let target = cli
        .log_dir
        .clone()
        .map_or(LogTarget::Stderr, LogTarget::Directory);
    if let Err(message) = init_logging(&level, &target) {
        eprintln!("lexiload: {message}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=run module=cli status=error error={err}");
            eprintln!("lexiload: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let sources = LoadSources {
        lexicon: cli.lexicon.clone(),
        entry_dump: cli.entry_dump.clone(),
    };

    if let Some(script_path) = &cli.emit_sql {
        let out = BufWriter::new(File::create(script_path)?);
        let report = export_files(&sources, out, cli.entry_commit)?;
        info!(
            "event=run module=cli status=ok mode=script path={} statements={}",
            script_path.display(),
            report.statements
        );
        return Ok(());
    }

    let db_path = cli
        .db
        .as_ref()
        .ok_or("missing database path: pass --db or set LEXILOAD_DB")?;
    let mut conn = open_db(db_path)?;
    let report = load_files(&mut conn, &sources, cli.entry_commit)?;
    info!(
        "event=run module=cli status=ok mode=database lexicon={} entries={} variants={} senses={}",
        report.lexicon.records,
        report.entries.rows.entries,
        report.entries.rows.variants,
        report.entries.rows.senses
    );
    Ok(())
}
