//! JSON decoding of the nested entry dump.

use crate::model::entry::EntryNode;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The dump is not a JSON array of entry objects.
#[derive(Debug)]
pub struct DecodeError(serde_json::Error);

impl DecodeError {
    /// 1-based line of the offending token, `0` when unknown.
    pub fn line(&self) -> usize {
        self.0.line()
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed entry dump: {}", self.0)
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Decodes a complete entry dump held in memory.
///
/// The whole document is decoded before returning, so a syntax error near
/// the end still fails before any row is written.
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<EntryNode>, DecodeError> {
    serde_json::from_slice(bytes).map_err(DecodeError)
}

#[cfg(test)]
mod tests {
    use super::decode_entries;

    #[test]
    fn decodes_dump_field_names() {
        let json = r#"[{
            "title": "愛",
            "radical": "心",
            "stroke_count": 13,
            "non_radical_stroke_count": 9,
            "heteronyms": [{
                "pinyin": "ài",
                "bopomofo": "ㄞˋ",
                "bopomofo2": "ài",
                "definitions": [{
                    "def": "喜好。",
                    "quote": ["《論語》"],
                    "example": ["如：「愛唱歌」"],
                    "type": "動",
                    "link": ["見「愛好」條"],
                    "synonyms": "好",
                    "antonyms": "恨"
                }]
            }]
        }]"#;

        let entries = decode_entries(json.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.title, "愛");
        assert_eq!(entry.radical.as_deref(), Some("心"));
        assert_eq!(entry.stroke_count, 13);
        let variant = &entry.variants[0];
        assert_eq!(variant.bopomofo.as_deref(), Some("ㄞˋ"));
        let sense = &variant.senses[0];
        assert_eq!(sense.definition.as_deref(), Some("喜好。"));
        assert_eq!(sense.kind.as_deref(), Some("動"));
        assert_eq!(sense.links, vec!["見「愛好」條".to_string()]);
        assert_eq!(sense.antonyms.as_deref(), Some("恨"));
    }

    #[test]
    fn missing_optional_fields_decode_as_absent() {
        let entries = decode_entries(r#"[{"title": "一丁點兒", "heteronyms": [{}]}]"#.as_bytes()).unwrap();
        let entry = &entries[0];
        assert_eq!(entry.radical, None);
        assert_eq!(entry.stroke_count, 0);
        assert_eq!(entry.variants[0].pinyin, None);
        assert!(entry.variants[0].senses.is_empty());
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let entries = decode_entries(
            br#"[
                {"title": "x", "heteronyms": [{"definitions": [
                    {"def": "a", "quote": null, "example": null, "link": null}
                ]}]},
                {"title": "y", "heteronyms": null},
                {"title": "z", "heteronyms": [{"pinyin": null, "definitions": null}]}
            ]"#,
        )
        .unwrap();

        let sense = &entries[0].variants[0].senses[0];
        assert_eq!(sense.definition.as_deref(), Some("a"));
        assert!(sense.quotes.is_empty());
        assert!(sense.examples.is_empty());
        assert!(sense.links.is_empty());
        assert!(entries[1].variants.is_empty());
        assert_eq!(entries[2].variants[0].pinyin, None);
        assert!(entries[2].variants[0].senses.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let entries =
            decode_entries(br#"[{"title": "x", "translation": {"English": ["y"]}}]"#).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = decode_entries(b"[{\"title\": \"x\"},\n").unwrap_err();
        assert!(err.to_string().starts_with("malformed entry dump"));
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn entry_without_title_is_rejected() {
        assert!(decode_entries(br#"[{"radical": "x"}]"#).is_err());
    }
}
