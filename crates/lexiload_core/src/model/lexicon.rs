//! Lexicon record model.

/// One validated headword pair from the line-oriented lexicon.
///
/// # Invariants
/// - `traditional` and `simplified` have the same number of code points.
/// - `char_count` equals that shared count.
///
/// Built by [`crate::lexicon::consistency::validate`], which is the only
/// place the count invariant is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconRecord {
    /// 1-based source line, kept for diagnostics only. Not persisted.
    pub line_number: usize,
    pub traditional: String,
    pub simplified: String,
    /// Romanization with `u:` already folded to `v`.
    pub romanization: String,
    /// Gloss with senses separated by ` / `.
    pub gloss: String,
    pub char_count: usize,
}
