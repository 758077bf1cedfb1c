//! Load orchestration.
//!
//! # Responsibility
//! - Drive lexicon records and flattened rows into a sink under the
//!   configured transaction boundaries.
//! - Surface every failure as one [`LoadError`] for the process boundary.
//!
//! # Invariants
//! - The lexicon path commits once, after its last record.
//! - The entry path never starts before the lexicon path has finished.
//! - Nothing here terminates the process.

use crate::dump::DecodeError;
use crate::lexicon::{LexiconError, LexiconReader, LexiconSink};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod export_service;
pub mod load_service;

pub use export_service::{export_files, ExportReport};
pub use load_service::{load_files, EntryLoadReport, LexiconLoadReport, LoadReport, LoadService};

pub type LoadResult<T> = Result<T, LoadError>;

/// Terminal failure of a load or export run.
#[derive(Debug)]
pub enum LoadError {
    /// An input file cannot be opened.
    Io { path: PathBuf, source: io::Error },
    /// Lexicon read, grammar or consistency failure.
    Lexicon(LexiconError),
    /// Entry dump is not valid JSON of the expected shape.
    Decode(DecodeError),
    /// Storage failure.
    Repo(RepoError),
    /// Script output cannot be written.
    Output(io::Error),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Lexicon(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write SQL script: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Lexicon(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<LexiconError> for LoadError {
    fn from(value: LexiconError) -> Self {
        Self::Lexicon(value)
    }
}

impl From<DecodeError> for LoadError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<RepoError> for LoadError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Transaction boundary of the entry-dump path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryCommitPolicy {
    /// All entry, variant and sense rows commit together.
    #[default]
    Transactional,
    /// Every insert autocommits; a failure leaves the rows before it.
    PerStatement,
}

impl EntryCommitPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transactional => "transactional",
            Self::PerStatement => "per-statement",
        }
    }
}

impl Display for EntryCommitPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryCommitPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transactional" | "tx" => Ok(Self::Transactional),
            "per-statement" | "per_statement" | "autocommit" => Ok(Self::PerStatement),
            other => Err(format!(
                "unsupported entry commit policy `{other}`; expected transactional|per-statement"
            )),
        }
    }
}

/// Input files of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSources {
    pub lexicon: PathBuf,
    pub entry_dump: PathBuf,
}

/// Record and line counts of one lexicon pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconCounts {
    pub records: usize,
    pub lines_read: usize,
}

/// Feeds every validated lexicon record into `sink`, in input order.
///
/// Returns at the first grammar, consistency, read or sink failure; lines
/// after the failing one are never read.
pub fn stream_lexicon<R, S>(reader: R, sink: &mut S) -> LoadResult<LexiconCounts>
where
    R: BufRead,
    S: LexiconSink,
    LoadError: From<S::Error>,
{
    let mut records = LexiconReader::new(reader);
    let mut written = 0;
    for record in records.by_ref() {
        sink.write_record(&record?)?;
        written += 1;
    }
    Ok(LexiconCounts {
        records: written,
        lines_read: records.lines_read(),
    })
}

fn open_input(path: &Path) -> LoadResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn read_input(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
