//! Streaming record reader over lexicon text.

use super::consistency::validate;
use super::grammar::{parse_line, LineKind};
use super::LexiconError;
use crate::model::lexicon::LexiconRecord;
use std::io::{BufRead, Lines};

/// Iterator of validated records from a line-oriented lexicon.
///
/// Blank and comment lines are skipped. Iteration stops for good after the
/// first error so no line past a failure is ever read.
pub struct LexiconReader<R> {
    lines: Lines<R>,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> LexiconReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            failed: false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for LexiconReader<R> {
    type Item = Result<LexiconRecord, LexiconError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(LexiconError::Io(err)));
                }
            };
            self.line_number += 1;

            let outcome = parse_line(self.line_number, &line)
                .map_err(LexiconError::from)
                .and_then(|kind| match kind {
                    LineKind::Blank | LineKind::Comment => Ok(None),
                    LineKind::Record(parsed) => validate(parsed).map(Some).map_err(Into::into),
                });

            match outcome {
                Ok(None) => continue,
                Ok(Some(record)) => return Some(Ok(record)),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LexiconReader;
    use crate::lexicon::LexiconError;

    #[test]
    fn skips_comments_and_blank_lines() {
        let input = "# CC-CEDICT\n\n好 好 [hao3] /good/well/\n\n# trailer\n";
        let mut reader = LexiconReader::new(input.as_bytes());

        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.traditional, "好");
        assert_eq!(record.line_number, 3);
        assert!(reader.next().is_none());
        assert_eq!(reader.lines_read(), 5);
    }

    #[test]
    fn stops_after_first_error() {
        let input = "好 好 [hao3] /good/\n你 你们 [ni3] /you/\n吃 吃 [chi1] /to eat/\n";
        let mut reader = LexiconReader::new(input.as_bytes());

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, LexiconError::Inconsistent(ref e) if e.line_number == 2));
        assert!(reader.next().is_none());
        assert_eq!(reader.lines_read(), 2);
    }

    #[test]
    fn malformed_line_is_typed() {
        let mut reader = LexiconReader::new("not a record\n".as_bytes());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, LexiconError::Malformed(ref e) if e.line_number == 1));
    }
}
