//! Cross-field consistency of lexicon headwords.
//!
//! # Invariants
//! - Accepted records have equal code-point counts for both forms.
//! - Counts are Unicode scalar values, never bytes.

use super::grammar::ParsedLine;
use crate::model::lexicon::LexiconRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Traditional and simplified forms disagree in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyError {
    pub line_number: usize,
    pub traditional: String,
    pub simplified: String,
    pub traditional_count: usize,
    pub simplified_count: usize,
}

impl Display for ConsistencyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "character count of {:?} ({}) and {:?} ({}) unequal at lexicon line {}",
            self.traditional,
            self.traditional_count,
            self.simplified,
            self.simplified_count,
            self.line_number
        )
    }
}

impl Error for ConsistencyError {}

/// Promotes a parsed line to a [`LexiconRecord`] once its forms agree.
///
/// # Errors
/// - Returns [`ConsistencyError`] when the forms differ in code-point count.
pub fn validate(parsed: ParsedLine) -> Result<LexiconRecord, ConsistencyError> {
    let traditional_count = parsed.traditional.chars().count();
    let simplified_count = parsed.simplified.chars().count();

    if traditional_count != simplified_count {
        return Err(ConsistencyError {
            line_number: parsed.line_number,
            traditional: parsed.traditional,
            simplified: parsed.simplified,
            traditional_count,
            simplified_count,
        });
    }

    Ok(LexiconRecord {
        line_number: parsed.line_number,
        traditional: parsed.traditional,
        simplified: parsed.simplified,
        romanization: parsed.romanization,
        gloss: parsed.gloss,
        char_count: traditional_count,
    })
}
