//! Wire shapes for the two catalog endpoints. Every field is optional because
//! the catalog omits keys freely; the normalizer decides what "missing" means.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Option<Vec<RawDoc>>,
}

/// One entry of the search response `docs` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDoc {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub first_publish_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub subject: Option<Vec<String>>,
}

/// Body of `/works/{id}.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWork {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<RawDescription>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub excerpts: Option<Vec<RawExcerpt>>,
}

/// Work descriptions come either as a bare string or as a typed text object
/// (`{"type": "/type/text", "value": "..."}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDescription {
    Text(String),
    Typed {
        #[serde(default)]
        value: Option<String>,
    },
    Other(Value),
}

impl RawDescription {
    pub fn text(&self) -> Option<&str> {
        match self {
            RawDescription::Text(text) => Some(text),
            RawDescription::Typed { value } => value.as_deref(),
            RawDescription::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExcerpt {
    #[serde(default)]
    pub excerpt: Option<RawDescription>,
}

/// Accept integers (or integral floats) and treat anything else as absent
/// instead of failing the whole response.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_years_deserialize_as_absent() {
        let doc: RawDoc = serde_json::from_str(
            r#"{"key": "/works/OL1W", "first_publish_year": "circa 1900", "cover_i": null}"#,
        )
        .unwrap();
        assert_eq!(doc.first_publish_year, None);
        assert_eq!(doc.cover_i, None);
    }

    #[test]
    fn description_accepts_string_or_object() {
        let plain: RawWork = serde_json::from_str(r#"{"description": "plain"}"#).unwrap();
        assert_eq!(plain.description.unwrap().text(), Some("plain"));

        let typed: RawWork = serde_json::from_str(
            r#"{"description": {"type": "/type/text", "value": "nested"}}"#,
        )
        .unwrap();
        assert_eq!(typed.description.unwrap().text(), Some("nested"));
    }

    #[test]
    fn missing_docs_field_is_tolerated() {
        let response: SearchResponse = serde_json::from_str(r#"{"numFound": 0}"#).unwrap();
        assert!(response.docs.is_none());
    }
}
