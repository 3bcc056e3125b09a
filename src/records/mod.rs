//! Prediction and gold record documents
//!
//! ## Document Format (JSON)
//!
//! Gold and predicted files share one shape:
//!
//! ```json
//! {
//!   "results": [
//!     {
//!       "event_type": "earnings",
//!       "sentiment": "pos",
//!       "ticker": "NVDA",
//!       "evidence": "Nvidia beat estimates..."
//!     },
//!     { "event_type": null, "sentiment": "neu", "ticker": null }
//!   ]
//! }
//! ```
//!
//! Any field may be missing or `null`, and unknown fields are ignored. The
//! document itself must be an object with a `results` list; anything else is
//! rejected before scoring starts.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// One scored item
///
/// Values are kept raw; normalization happens later, per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_text")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ticker: Option<String>,
    /// Carried through for inspection, never scored
    #[serde(default, deserialize_with = "lenient_text")]
    pub evidence: Option<String>,
}

impl Record {
    pub fn new(
        event_type: Option<&str>,
        sentiment: Option<&str>,
        ticker: Option<&str>,
    ) -> Self {
        Self {
            event_type: event_type.map(str::to_string),
            sentiment: sentiment.map(str::to_string),
            ticker: ticker.map(str::to_string),
            evidence: None,
        }
    }
}

/// Accept any JSON scalar as label text: `null` is absent, strings are
/// taken as-is, numbers/booleans/containers become their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

/// A loaded `{"results": [...]}` document
#[derive(Debug, Clone)]
pub struct ResultsFile {
    /// Where the document came from (path or caller-supplied name)
    pub source: String,
    /// SHA-256 of the raw document bytes (hex)
    pub fingerprint: String,
    pub records: Vec<Record>,
}

impl ResultsFile {
    /// Load and validate a results document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
        let file = Self::from_json_str(&content, &path.display().to_string())?;
        tracing::info!("Loaded {} records from {}", file.len(), file.source);
        Ok(file)
    }

    /// Parse and validate a results document from a JSON string
    pub fn from_json_str(content: &str, source_name: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| EvalError::Json {
            source_name: source_name.to_string(),
            source: e,
        })?;
        let records = parse_results(value, source_name)?;

        Ok(Self {
            source: source_name.to_string(),
            fingerprint: fingerprint(content.as_bytes()),
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check document shape and pull out the records
fn parse_results(value: Value, source_name: &str) -> Result<Vec<Record>> {
    let Value::Object(mut doc) = value else {
        return Err(EvalError::malformed(
            source_name,
            "must be a JSON object with a 'results' list",
        ));
    };
    let results = match doc.remove("results") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(EvalError::malformed(source_name, "'results' must be a list")),
        None => return Err(EvalError::malformed(source_name, "missing 'results' key")),
    };

    results
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(EvalError::malformed(
                    source_name,
                    format!("results[{}] is not an object", i),
                ));
            }
            serde_json::from_value(item).map_err(|e| EvalError::Json {
                source_name: format!("{}: results[{}]", source_name, i),
                source: e,
            })
        })
        .collect()
}

/// Hex SHA-256 of a document, recorded in reports for provenance
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Outcome of aligning gold and predicted records by position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub gold_len: usize,
    pub pred_len: usize,
    /// Positions actually scored: `min(gold_len, pred_len)`
    pub scored: usize,
}

impl Alignment {
    pub fn is_truncated(&self) -> bool {
        self.gold_len != self.pred_len
    }

    /// Records dropped from the longer side
    pub fn dropped(&self) -> usize {
        self.gold_len.max(self.pred_len) - self.scored
    }
}

/// Align two record lists by index, dropping the excess of the longer one
///
/// A length difference is not an error; it is logged and reported through
/// the returned [`Alignment`].
pub fn align<'a>(gold: &'a [Record], pred: &'a [Record]) -> (&'a [Record], &'a [Record], Alignment) {
    let scored = gold.len().min(pred.len());
    let alignment = Alignment {
        gold_len: gold.len(),
        pred_len: pred.len(),
        scored,
    };
    if alignment.is_truncated() {
        tracing::warn!(
            "Different lengths: gold={} pred={}. Aligning by index; {} extra items ignored.",
            gold.len(),
            pred.len(),
            alignment.dropped()
        );
    }
    (&gold[..scored], &pred[..scored], alignment)
}
