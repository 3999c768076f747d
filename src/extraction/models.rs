// Extracted claim record: the structured fields the model reads off a bill.
//
// The model is asked for strings but routinely returns numbers for age and
// amount, nulls for fields it can't see, and occasionally extra keys. All of
// that is tolerated here: numbers are rendered to strings, nulls become None,
// and unknown keys are carried through in `extra` so the response can echo
// them back to the client.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields extracted from a hospital bill, plus the model's quality notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClaim {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Treatment or diagnosis
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    /// Total bill amount as the model wrote it. Use `amount_value()` to read it.
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_quality: Option<DocumentQuality>,
    #[serde(default, deserialize_with = "string_list")]
    pub suspicious_patterns: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub missing_info: Vec<String>,
    /// Any other keys in the model output (e.g. `raw` when no JSON was found)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Why an amount string could not be used for scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("amount {0:?} is not a number")]
    NotNumeric(String),
    #[error("amount {0} is negative")]
    Negative(f64),
    #[error("amount {0:?} is not a finite number")]
    NotFinite(String),
}

impl ExtractedClaim {
    /// A record holding only the model's raw text, used when the reply
    /// contained no JSON object at all.
    pub fn raw(text: &str) -> Self {
        let mut extra = Map::new();
        extra.insert("raw".to_string(), Value::String(text.trim().to_string()));
        Self {
            extra,
            ..Self::default()
        }
    }

    /// Parse the claimed amount.
    ///
    /// Absent or blank amounts are `Ok(None)`. Anything present must be a
    /// finite, non-negative real number; otherwise the caller gets an error
    /// and decides how to degrade.
    pub fn amount_value(&self) -> Result<Option<f64>, AmountError> {
        let raw = match self.amount.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };

        let value: f64 = raw
            .parse()
            .map_err(|_| AmountError::NotNumeric(raw.to_string()))?;

        if !value.is_finite() {
            return Err(AmountError::NotFinite(raw.to_string()));
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value));
        }
        Ok(Some(value))
    }
}

/// The model's own assessment of the scanned document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentQuality {
    Good,
    Medium,
    Poor,
    /// Anything else the model wrote, preserved verbatim
    Other(String),
}

impl DocumentQuality {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentQuality::Good => "good",
            DocumentQuality::Medium => "medium",
            DocumentQuality::Poor => "poor",
            DocumentQuality::Other(s) => s,
        }
    }
}

impl From<String> for DocumentQuality {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "good" => DocumentQuality::Good,
            "medium" => DocumentQuality::Medium,
            "poor" => DocumentQuality::Poor,
            _ => DocumentQuality::Other(s),
        }
    }
}

impl From<DocumentQuality> for String {
    fn from(q: DocumentQuality) -> Self {
        q.as_str().to_string()
    }
}

impl std::fmt::Display for DocumentQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accept a string, number or bool and render it as a string. Null is None.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept a list of strings, a single string, or null.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(other) => vec![other.to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_amount(amount: &str) -> ExtractedClaim {
        ExtractedClaim {
            amount: Some(amount.to_string()),
            ..ExtractedClaim::default()
        }
    }

    #[test]
    fn test_amount_plain_integer() {
        assert_eq!(with_amount("60000").amount_value(), Ok(Some(60000.0)));
    }

    #[test]
    fn test_amount_with_surrounding_whitespace() {
        assert_eq!(with_amount("  1250.50 ").amount_value(), Ok(Some(1250.5)));
    }

    #[test]
    fn test_amount_blank_is_absent() {
        assert_eq!(with_amount("   ").amount_value(), Ok(None));
        assert_eq!(ExtractedClaim::default().amount_value(), Ok(None));
    }

    #[test]
    fn test_amount_not_numeric() {
        assert!(matches!(
            with_amount("N/A").amount_value(),
            Err(AmountError::NotNumeric(_))
        ));
        // Thousands separators are not part of the requested format
        assert!(matches!(
            with_amount("50,000").amount_value(),
            Err(AmountError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_amount_negative_rejected() {
        assert_eq!(
            with_amount("-10").amount_value(),
            Err(AmountError::Negative(-10.0))
        );
    }

    #[test]
    fn test_amount_non_finite_rejected() {
        assert!(matches!(
            with_amount("inf").amount_value(),
            Err(AmountError::NotFinite(_))
        ));
        assert!(matches!(
            with_amount("NaN").amount_value(),
            Err(AmountError::NotFinite(_))
        ));
    }

    #[test]
    fn test_numeric_fields_rendered_as_strings() {
        let json = r#"{"name": "Vandan Dalvi", "age": 26, "amount": 45000.5}"#;
        let claim: ExtractedClaim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.age.as_deref(), Some("26"));
        assert_eq!(claim.amount.as_deref(), Some("45000.5"));
    }

    #[test]
    fn test_unknown_quality_preserved() {
        let json = r#"{"document_quality": "Blurry"}"#;
        let claim: ExtractedClaim = serde_json::from_str(json).unwrap();
        assert_eq!(
            claim.document_quality,
            Some(DocumentQuality::Other("Blurry".to_string()))
        );

        let json = r#"{"document_quality": "GOOD"}"#;
        let claim: ExtractedClaim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.document_quality, Some(DocumentQuality::Good));
    }

    #[test]
    fn test_extra_keys_kept() {
        let json = r#"{"name": "A", "policy_number": "POL123456"}"#;
        let claim: ExtractedClaim = serde_json::from_str(json).unwrap();
        assert_eq!(
            claim.extra.get("policy_number"),
            Some(&Value::String("POL123456".to_string()))
        );
    }
}
