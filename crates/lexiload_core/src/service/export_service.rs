//! Script export path: the load rendered as literal SQL text.

use super::{open_input, read_input, stream_lexicon, EntryCommitPolicy, LoadResult, LoadSources};
use crate::dump::{decode_entries, FlattenSummary, Flattener};
use crate::export::SqlScriptWriter;
use log::{error, info};
use std::io::Write;
use std::time::Instant;

/// Outcome of a script export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub lexicon_records: usize,
    pub rows: FlattenSummary,
    /// Statements written, including transaction markers.
    pub statements: usize,
}

/// Writes both sources to `out` as one replayable SQL script.
///
/// The lexicon block is always wrapped in `BEGIN`/`COMMIT`; the entry
/// block only under [`EntryCommitPolicy::Transactional`]. The script
/// expects the dictionary schema to exist already.
pub fn export_files<W: Write>(
    sources: &LoadSources,
    out: W,
    policy: EntryCommitPolicy,
) -> LoadResult<ExportReport> {
    let started_at = Instant::now();
    info!("event=sql_export module=service status=start policy={policy}");

    let result = export_inner(sources, out, policy);
    match &result {
        Ok(report) => info!(
            "event=sql_export module=service status=ok records={} entries={} variants={} senses={} statements={} duration_ms={}",
            report.lexicon_records,
            report.rows.entries,
            report.rows.variants,
            report.rows.senses,
            report.statements,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=sql_export module=service status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn export_inner<W: Write>(
    sources: &LoadSources,
    out: W,
    policy: EntryCommitPolicy,
) -> LoadResult<ExportReport> {
    let entries = decode_entries(&read_input(&sources.entry_dump)?)?;
    let lexicon = open_input(&sources.lexicon)?;
    let mut script = SqlScriptWriter::new(out);

    script.begin()?;
    let counts = stream_lexicon(lexicon, &mut script)?;
    script.commit()?;

    let transactional = policy == EntryCommitPolicy::Transactional;
    if transactional {
        script.begin()?;
    }
    let rows = Flattener::new().run(&entries, &mut script)?;
    if transactional {
        script.commit()?;
    }

    let statements = script.statements();
    script.into_inner()?;

    Ok(ExportReport {
        lexicon_records: counts.records,
        rows,
        statements,
    })
}
