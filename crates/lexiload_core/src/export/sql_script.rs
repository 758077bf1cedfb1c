//! Literal `INSERT` script writer.

use crate::dump::RowSink;
use crate::encode::{encode_literal, quote_text};
use crate::lexicon::LexiconSink;
use crate::model::entry::{EntryRow, SenseRow, VariantRow};
use crate::model::lexicon::LexiconRecord;
use std::io::{self, Write};

/// Writes one SQL statement per line to `out`.
pub struct SqlScriptWriter<W: Write> {
    out: W,
    statements: usize,
}

impl<W: Write> SqlScriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, statements: 0 }
    }

    /// Opens a transaction block in the script.
    pub fn begin(&mut self) -> io::Result<()> {
        self.statement(format_args!("BEGIN;"))
    }

    /// Closes the transaction block opened by [`SqlScriptWriter::begin`].
    pub fn commit(&mut self) -> io::Result<()> {
        self.statement(format_args!("COMMIT;"))
    }

    /// Statements written so far, including `BEGIN`/`COMMIT`.
    pub fn statements(&self) -> usize {
        self.statements
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn statement(&mut self, text: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(text)?;
        self.out.write_all(b"\n")?;
        self.statements += 1;
        Ok(())
    }
}

fn optional(value: &Option<String>) -> String {
    encode_literal(value.as_deref())
}

impl<W: Write> LexiconSink for SqlScriptWriter<W> {
    type Error = io::Error;

    fn write_record(&mut self, record: &LexiconRecord) -> io::Result<()> {
        self.statement(format_args!(
            "INSERT INTO lexicon(traditional, simplified, romanization, gloss, char_count) VALUES({}, {}, {}, {}, {});",
            quote_text(&record.traditional),
            quote_text(&record.simplified),
            quote_text(&record.romanization),
            quote_text(&record.gloss),
            record.char_count
        ))
    }
}

impl<W: Write> RowSink for SqlScriptWriter<W> {
    type Error = io::Error;

    fn write_entry(&mut self, row: &EntryRow) -> io::Result<()> {
        self.statement(format_args!(
            "INSERT INTO entries(id, title, radical, stroke_count, non_radical_stroke_count) VALUES({}, {}, {}, {}, {});",
            row.id,
            quote_text(&row.title),
            optional(&row.radical),
            row.stroke_count,
            row.non_radical_stroke_count
        ))
    }

    fn write_variant(&mut self, row: &VariantRow) -> io::Result<()> {
        self.statement(format_args!(
            "INSERT INTO variants(id, entry_id, idx, pinyin, bopomofo, bopomofo2) VALUES({}, {}, {}, {}, {}, {});",
            row.id,
            row.entry_id,
            row.idx,
            optional(&row.pinyin),
            optional(&row.bopomofo),
            optional(&row.bopomofo2)
        ))
    }

    fn write_sense(&mut self, row: &SenseRow) -> io::Result<()> {
        self.statement(format_args!(
            "INSERT INTO senses(id, variant_id, idx, definition, quotes, examples, type, links, synonyms, antonyms) VALUES({}, {}, {}, {}, {}, {}, {}, {}, {}, {});",
            row.id,
            row.variant_id,
            row.idx,
            optional(&row.definition),
            optional(&row.quotes),
            optional(&row.examples),
            optional(&row.kind),
            optional(&row.links),
            optional(&row.synonyms),
            optional(&row.antonyms)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::SqlScriptWriter;
    use crate::dump::RowSink;
    use crate::lexicon::LexiconSink;
    use crate::model::entry::{EntryRow, SenseRow};
    use crate::model::lexicon::LexiconRecord;

    fn script(writer: SqlScriptWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn lexicon_record_renders_quoted_values() {
        let mut writer = SqlScriptWriter::new(Vec::new());
        writer.begin().unwrap();
        writer
            .write_record(&LexiconRecord {
                line_number: 1,
                traditional: "好".to_string(),
                simplified: "好".to_string(),
                romanization: "hao3".to_string(),
                gloss: "good / well".to_string(),
                char_count: 1,
            })
            .unwrap();
        writer.commit().unwrap();
        assert_eq!(writer.statements(), 3);

        assert_eq!(
            script(writer),
            "BEGIN;\n\
             INSERT INTO lexicon(traditional, simplified, romanization, gloss, char_count) VALUES('好', '好', 'hao3', 'good / well', 1);\n\
             COMMIT;\n"
        );
    }

    #[test]
    fn absent_fields_render_as_null_and_quotes_are_doubled() {
        let mut writer = SqlScriptWriter::new(Vec::new());
        writer
            .write_entry(&EntryRow {
                id: 3,
                title: "O'Neil".to_string(),
                radical: None,
                stroke_count: 0,
                non_radical_stroke_count: 0,
            })
            .unwrap();
        writer
            .write_sense(&SenseRow {
                id: 9,
                variant_id: 4,
                idx: 1,
                definition: Some("it's".to_string()),
                quotes: Some("a|||b".to_string()),
                examples: None,
                kind: None,
                links: None,
                synonyms: None,
                antonyms: None,
            })
            .unwrap();

        let text = script(writer);
        assert!(text.contains("VALUES(3, 'O''Neil', NULL, 0, 0);"));
        assert!(text.contains("VALUES(9, 4, 1, 'it''s', 'a|||b', NULL, NULL, NULL, NULL, NULL);"));
    }

    #[test]
    fn empty_lexicon_fields_stay_empty_text() {
        let mut writer = SqlScriptWriter::new(Vec::new());
        writer
            .write_record(&LexiconRecord {
                line_number: 1,
                traditional: "A".to_string(),
                simplified: "A".to_string(),
                romanization: String::new(),
                gloss: String::new(),
                char_count: 1,
            })
            .unwrap();

        assert!(script(writer).ends_with("VALUES('A', 'A', '', '', 1);\n"));
    }
}
