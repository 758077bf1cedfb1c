//! Line grammar of the bilingual lexicon.
//!
//! # Responsibility
//! - Classify one physical line as blank, comment or headword record.
//! - Extract the four fields of a record and normalize them.
//!
//! # Invariants
//! - A non-matching line is a [`MalformedLineError`]; no field of it leaks out.
//! - Romanization never contains `u:` after normalization.
//!
//! Grammar: `TRADITIONAL SIMPLIFIED [ROMANIZATION] /GLOSS/`. Romanization and
//! gloss may be empty; anything after the last `/` is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const COMMENT_MARKER: char = '#';
const MAX_REPORTED_LINE_CHARS: usize = 120;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+) (\S+) \[([^\]]*)\] /(.*)/").expect("valid lexicon line regex")
});

/// Fields of one matched lexicon line, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line_number: usize,
    pub traditional: String,
    pub simplified: String,
    pub romanization: String,
    pub gloss: String,
}

/// Outcome of classifying a line that is not malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line.
    Blank,
    /// Line starting with `#`.
    Comment,
    /// Headword record.
    Record(ParsedLine),
}

/// A line that is neither blank, comment nor a valid record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLineError {
    /// 1-based position in the input.
    pub line_number: usize,
    pub line: String,
}

impl Display for MalformedLineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut shown: String = self.line.chars().take(MAX_REPORTED_LINE_CHARS).collect();
        if self.line.chars().count() > MAX_REPORTED_LINE_CHARS {
            shown.push_str("...");
        }
        write!(
            f,
            "malformed lexicon line {}: `{shown}` does not match `TRAD SIMP [ROMANIZATION] /GLOSS/`",
            self.line_number
        )
    }
}

impl Error for MalformedLineError {}

/// Parses one line of the lexicon.
///
/// `line_number` is 1-based and only used for diagnostics. Trailing
/// whitespace (including a stray `\r`) is ignored.
///
/// # Errors
/// - Returns [`MalformedLineError`] when the line is not blank, not a comment
///   and does not match the grammar.
pub fn parse_line(line_number: usize, line: &str) -> Result<LineKind, MalformedLineError> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return Ok(LineKind::Blank);
    }
    if line.starts_with(COMMENT_MARKER) {
        return Ok(LineKind::Comment);
    }

    let Some(captures) = LINE_RE.captures(line) else {
        return Err(MalformedLineError {
            line_number,
            line: line.to_string(),
        });
    };

    Ok(LineKind::Record(ParsedLine {
        line_number,
        traditional: captures[1].to_string(),
        simplified: captures[2].to_string(),
        romanization: normalize_romanization(&captures[3]),
        gloss: space_gloss(&captures[4]),
    }))
}

/// Folds the `u:` umlaut spelling into `v`.
pub fn normalize_romanization(romanization: &str) -> String {
    romanization.replace("u:", "v")
}

/// Pads every internal sense separator with spaces.
pub fn space_gloss(gloss: &str) -> String {
    gloss.replace('/', " / ")
}

#[cfg(test)]
mod tests {
    use super::{normalize_romanization, parse_line, space_gloss, LineKind, ParsedLine};

    fn record(line: &str) -> ParsedLine {
        match parse_line(1, line).expect("line should parse") {
            LineKind::Record(parsed) => parsed,
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn parses_single_character_headword() {
        let parsed = record("好 好 [hao3] /good/well/");
        assert_eq!(parsed.traditional, "好");
        assert_eq!(parsed.simplified, "好");
        assert_eq!(parsed.romanization, "hao3");
        assert_eq!(parsed.gloss, "good / well");
    }

    #[test]
    fn parses_multi_syllable_romanization_with_umlaut() {
        let parsed = record("綠色 绿色 [lu:4 se4] /green/");
        assert_eq!(parsed.traditional, "綠色");
        assert_eq!(parsed.simplified, "绿色");
        assert_eq!(parsed.romanization, "lv4 se4");
        assert_eq!(parsed.gloss, "green");
    }

    #[test]
    fn tolerates_trailing_carriage_return() {
        let parsed = record("吃 吃 [chi1] /to eat/\r");
        assert_eq!(parsed.gloss, "to eat");
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_line(1, "").unwrap(), LineKind::Blank);
        assert_eq!(parse_line(2, "   ").unwrap(), LineKind::Blank);
        assert_eq!(parse_line(3, "# comment").unwrap(), LineKind::Comment);
        assert_eq!(
            parse_line(4, "#! version=1").unwrap(),
            LineKind::Comment
        );
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = parse_line(42, "好 好 hao3 /good/").unwrap_err();
        assert_eq!(err.line_number, 42);
        assert_eq!(err.line, "好 好 hao3 /good/");
        assert!(err.to_string().contains("line 42"));
    }

    #[test]
    fn missing_gloss_slashes_is_malformed() {
        assert!(parse_line(1, "好 好 [hao3] good").is_err());
        assert!(parse_line(1, "好 好 [hao3] /good").is_err());
        assert!(parse_line(1, "好 [hao3] /good/").is_err());
    }

    #[test]
    fn empty_romanization_and_gloss_are_accepted() {
        let parsed = record("好 好 [] /good/");
        assert_eq!(parsed.romanization, "");
        assert_eq!(parsed.gloss, "good");

        let parsed = record("A A [a] //");
        assert_eq!(parsed.romanization, "a");
        assert_eq!(parsed.gloss, "");
    }

    #[test]
    fn text_after_last_slash_is_ignored() {
        let parsed = record("好 好 [hao3] /good/ # trailing");
        assert_eq!(parsed.gloss, "good");

        let parsed = record("好 好 [hao3] /good/well/ extra");
        assert_eq!(parsed.gloss, "good / well");
    }

    #[test]
    fn romanization_normalization_is_idempotent() {
        for sample in ["nu:3", "lu:e4 u:", "hao3", "u:u:", ""] {
            let once = normalize_romanization(sample);
            assert!(!once.contains("u:"));
            assert_eq!(normalize_romanization(&once), once);
        }
    }

    #[test]
    fn gloss_slashes_are_spaced() {
        assert_eq!(space_gloss("to eat/to consume"), "to eat / to consume");
        assert_eq!(space_gloss("single"), "single");
    }
}
