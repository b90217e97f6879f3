use serde::{Deserialize, Deserializer};

pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()))
}

/// Trims and lowercases an email so lookups are case-insensitive.
pub fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        note: Option<String>,
        #[serde(deserialize_with = "deserialize_email")]
        email: String,
    }

    #[test]
    fn test_normalizes_fields() {
        let sample: Sample = serde_json::from_str(
            r#"{"name":"  alice ","note":" hi ","email":" Alice@Example.COM "}"#,
        )
        .unwrap();
        assert_eq!(sample.name, "alice");
        assert_eq!(sample.note.as_deref(), Some("hi"));
        assert_eq!(sample.email, "alice@example.com");
    }

    #[test]
    fn test_optional_missing_and_null() {
        let missing: Sample =
            serde_json::from_str(r#"{"name":"a","email":"a@b.co"}"#).unwrap();
        assert!(missing.note.is_none());

        let null: Sample =
            serde_json::from_str(r#"{"name":"a","note":null,"email":"a@b.co"}"#).unwrap();
        assert!(null.note.is_none());
    }
}
