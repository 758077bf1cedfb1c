//! SQLite load paths for the lexicon and the entry dump.
//!
//! # Responsibility
//! - Run the lexicon through one transaction and one prepared insert.
//! - Run the flattened entry dump under the configured commit policy.
//! - Create lookup indices once both paths succeed.
//!
//! # Invariants
//! - A lexicon failure rolls back every lexicon row of the run.
//! - Under [`EntryCommitPolicy::PerStatement`] rows written before a
//!   failure stay durable; under `Transactional` none do.

use super::{
    open_input, read_input, stream_lexicon, EntryCommitPolicy, LoadError, LoadResult, LoadSources,
};
use crate::db::create_indexes;
use crate::dump::{decode_entries, FlattenSummary, Flattener};
use crate::model::entry::EntryNode;
use crate::repo::{RepoError, SqliteEntryWriter, SqliteLexiconWriter};
use log::{error, info};
use rusqlite::Connection;
use std::io::BufRead;
use std::time::{Duration, Instant};

/// Outcome of the lexicon path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconLoadReport {
    /// Rows committed to `lexicon`.
    pub records: usize,
    /// Physical lines consumed, comments and blanks included.
    pub lines_read: usize,
    pub elapsed: Duration,
}

/// Outcome of the entry-dump path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLoadReport {
    pub rows: FlattenSummary,
    pub policy: EntryCommitPolicy,
    pub elapsed: Duration,
}

/// Outcome of a full two-source run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub lexicon: LexiconLoadReport,
    pub entries: EntryLoadReport,
}

/// Loader bound to one exclusively borrowed connection.
///
/// The `&mut` borrow serializes the two paths: one must return before the
/// other can start.
pub struct LoadService<'conn> {
    conn: &'conn mut Connection,
    policy: EntryCommitPolicy,
}

impl<'conn> LoadService<'conn> {
    /// Creates a loader using the default transactional entry policy.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self {
            conn,
            policy: EntryCommitPolicy::default(),
        }
    }

    /// Overrides the entry-dump commit policy.
    pub fn with_policy(mut self, policy: EntryCommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parses, validates and inserts every lexicon line in one transaction.
    ///
    /// # Errors
    /// - [`LoadError::Lexicon`] for the first malformed or inconsistent line.
    /// - [`LoadError::Repo`] for storage failures, including a non-empty
    ///   `lexicon` table.
    pub fn load_lexicon<R: BufRead>(&mut self, reader: R) -> LoadResult<LexiconLoadReport> {
        let started_at = Instant::now();
        info!("event=lexicon_load module=service status=start");

        let result = self.lexicon_in_transaction(reader, started_at);
        match &result {
            Ok(report) => info!(
                "event=lexicon_load module=service status=ok records={} lines={} duration_ms={}",
                report.records,
                report.lines_read,
                report.elapsed.as_millis()
            ),
            Err(err) => error!(
                "event=lexicon_load module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn lexicon_in_transaction<R: BufRead>(
        &mut self,
        reader: R,
        started_at: Instant,
    ) -> LoadResult<LexiconLoadReport> {
        let tx = self.conn.transaction()?;
        let counts = {
            let mut writer = SqliteLexiconWriter::try_new(&tx)?;
            stream_lexicon(reader, &mut writer)?
        };
        tx.commit()?;

        Ok(LexiconLoadReport {
            records: counts.records,
            lines_read: counts.lines_read,
            elapsed: started_at.elapsed(),
        })
    }

    /// Flattens `entries` and inserts one row per statement.
    ///
    /// # Errors
    /// - [`LoadError::Repo`] on the first failing insert (for example a
    ///   duplicate title) or when the target tables are not empty.
    pub fn load_entries(&mut self, entries: &[EntryNode]) -> LoadResult<EntryLoadReport> {
        let started_at = Instant::now();
        info!(
            "event=entry_load module=service status=start entries={} policy={}",
            entries.len(),
            self.policy
        );

        let result = match self.policy {
            EntryCommitPolicy::Transactional => self.entries_in_transaction(entries),
            EntryCommitPolicy::PerStatement => self.entries_per_statement(entries),
        };

        match result {
            Ok(rows) => {
                let report = EntryLoadReport {
                    rows,
                    policy: self.policy,
                    elapsed: started_at.elapsed(),
                };
                info!(
                    "event=entry_load module=service status=ok entries={} variants={} senses={} policy={} duration_ms={}",
                    rows.entries,
                    rows.variants,
                    rows.senses,
                    self.policy,
                    report.elapsed.as_millis()
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "event=entry_load module=service status=error policy={} duration_ms={} error={}",
                    self.policy,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn entries_in_transaction(&mut self, entries: &[EntryNode]) -> LoadResult<FlattenSummary> {
        let tx = self.conn.transaction()?;
        let rows = {
            let mut writer = SqliteEntryWriter::try_new(&tx)?;
            Flattener::new().run(entries, &mut writer)?
        };
        tx.commit()?;
        Ok(rows)
    }

    fn entries_per_statement(&mut self, entries: &[EntryNode]) -> LoadResult<FlattenSummary> {
        let mut writer = SqliteEntryWriter::try_new(self.conn)?;
        Ok(Flattener::new().run(entries, &mut writer)?)
    }

    /// Creates lookup indices over all loaded relations.
    pub fn create_indexes(&self) -> LoadResult<()> {
        create_indexes(self.conn).map_err(RepoError::from)?;
        Ok(())
    }
}

/// Loads both sources into `conn`, then creates indices.
///
/// The entry dump is decoded first, so a malformed dump fails the run
/// before any row is written.
pub fn load_files(
    conn: &mut Connection,
    sources: &LoadSources,
    policy: EntryCommitPolicy,
) -> LoadResult<LoadReport> {
    info!(
        "event=entry_decode module=service status=start path={}",
        sources.entry_dump.display()
    );
    let entries = decode_entries(&read_input(&sources.entry_dump)?).map_err(|err| {
        error!("event=entry_decode module=service status=error error={err}");
        LoadError::from(err)
    })?;
    info!(
        "event=entry_decode module=service status=ok entries={}",
        entries.len()
    );

    let lexicon = open_input(&sources.lexicon)?;
    let mut service = LoadService::new(conn).with_policy(policy);
    let lexicon_report = service.load_lexicon(lexicon)?;
    let entry_report = service.load_entries(&entries)?;
    service.create_indexes()?;

    Ok(LoadReport {
        lexicon: lexicon_report,
        entries: entry_report,
    })
}
