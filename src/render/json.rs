//! JSON output formatting.

use crate::enrich::Enriched;
use crate::error::{Error, Result};

/// Format an enriched datum as pretty JSON with the type wrappers removed.
pub fn render_json(enriched: &Enriched) -> Result<String> {
    serde_json::to_string_pretty(&enriched.to_plain_json()).map_err(|e| Error::FormatError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::RawDatum;
    use crate::enrich::{EnrichedData, TypeName};
    use indoc::indoc;

    fn int(n: i64) -> Enriched {
        Enriched::new(EnrichedData::Integer(n.into()), TypeName::Integer)
    }

    #[test]
    fn test_format_string() {
        let value = Enriched::new(EnrichedData::Text("cafe".into()), TypeName::String);
        assert_eq!(render_json(&value).unwrap(), "\"cafe\"");
    }

    #[test]
    fn test_format_constructor() {
        let value = Enriched::new(
            EnrichedData::Constructor {
                tag: 1,
                fields: vec![int(7)],
            },
            TypeName::Constructor,
        );
        assert_eq!(
            render_json(&value).unwrap(),
            indoc! {r#"
                {
                  "tag": 1,
                  "fields": [
                    7
                  ]
                }"#}
        );
    }

    #[test]
    fn test_ratio_keeps_both_fields() {
        let value = Enriched::new(
            EnrichedData::Record(vec![("numerator".into(), int(1)), ("denominator".into(), int(3))]),
            TypeName::List,
        );
        let output = render_json(&value).unwrap();
        assert!(output.contains("\"numerator\": 1"));
        assert!(output.contains("\"denominator\": 3"));
        assert!(!output.contains("typeName"));
    }

    #[test]
    fn test_raw_list_passes_through() {
        let value = Enriched::new(
            EnrichedData::Raw(RawDatum::List(vec![RawDatum::integer(1), RawDatum::bytes("ff")])),
            TypeName::List,
        );
        let parsed: serde_json::Value = serde_json::from_str(&render_json(&value).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!([1, "ff"]));
    }
}
