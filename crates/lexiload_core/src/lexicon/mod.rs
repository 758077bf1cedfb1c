//! Line-oriented bilingual lexicon input.
//!
//! # Responsibility
//! - Parse the `TRAD SIMP [ROMANIZATION] /GLOSS/` line grammar.
//! - Enforce equal headword lengths before a record leaves this module.
//!
//! # Invariants
//! - Every yielded record passed both grammar and consistency checks.
//! - The first failing line ends the stream.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod consistency;
pub mod grammar;
mod reader;

pub use consistency::{validate, ConsistencyError};
pub use grammar::{parse_line, LineKind, MalformedLineError, ParsedLine};
pub use reader::LexiconReader;

use crate::model::lexicon::LexiconRecord;

/// Consumer of validated lexicon records, called in input order.
pub trait LexiconSink {
    type Error;

    fn write_record(&mut self, record: &LexiconRecord) -> Result<(), Self::Error>;
}

/// Failure while reading lexicon records.
#[derive(Debug)]
pub enum LexiconError {
    /// Underlying reader failed (including invalid UTF-8).
    Io(std::io::Error),
    /// Line does not match the grammar.
    Malformed(MalformedLineError),
    /// Headword forms differ in length.
    Inconsistent(ConsistencyError),
}

impl Display for LexiconError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read lexicon: {err}"),
            Self::Malformed(err) => write!(f, "{err}"),
            Self::Inconsistent(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LexiconError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::Inconsistent(err) => Some(err),
        }
    }
}

impl From<MalformedLineError> for LexiconError {
    fn from(value: MalformedLineError) -> Self {
        Self::Malformed(value)
    }
}

impl From<ConsistencyError> for LexiconError {
    fn from(value: ConsistencyError) -> Self {
        Self::Inconsistent(value)
    }
}
