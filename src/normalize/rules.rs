//! Normalization rules: alias tables plus one fallback per field
//!
//! Every function here is total. Garbage input is absorbed by the field's
//! default (`other`, `neu`, or the null ticker), never rejected.

use super::labels::{EventType, Sentiment, Ticker};
use serde::{Deserialize, Serialize};

/// How a raw value was mapped onto its canonical label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Already a canonical spelling (after trim/case folding)
    Canonical,
    /// Known synonym mapped onto a canonical label
    Alias,
    /// Missing, null or blank; the field default was applied
    Absent,
    /// Present but unrecognized; the field default was applied
    Fallback,
}

/// Resolve a raw event type, reporting how it was resolved
pub fn resolve_event_type(raw: Option<&str>) -> (EventType, Resolution) {
    let Some(raw) = raw else {
        return (EventType::Other, Resolution::Absent);
    };
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return (EventType::Other, Resolution::Absent);
    }

    let alias = match s.as_str() {
        "m&a" | "m_and_a" | "ma_deal" => Some(EventType::MergerAcquisition),
        "ipo" => Some(EventType::IpoListing),
        "regulatory" | "policy" => Some(EventType::RegulatoryPolicy),
        "capex" | "investment" => Some(EventType::InvestmentCapex),
        "product" | "tech" => Some(EventType::ProductTech),
        "valuation" | "milestone" => Some(EventType::ValuationMilestone),
        "crypto" | "etf" => Some(EventType::CryptoEtf),
        _ => None,
    };

    match (alias, EventType::from_canonical(&s)) {
        (Some(event), _) => (event, Resolution::Alias),
        (None, Some(event)) => (event, Resolution::Canonical),
        (None, None) => (EventType::Other, Resolution::Fallback),
    }
}

/// Resolve a raw sentiment, reporting how it was resolved
pub fn resolve_sentiment(raw: Option<&str>) -> (Sentiment, Resolution) {
    let Some(raw) = raw else {
        return (Sentiment::Neu, Resolution::Absent);
    };
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return (Sentiment::Neu, Resolution::Absent);
    }

    if let Some(sentiment) = Sentiment::from_canonical(&s) {
        return (sentiment, Resolution::Canonical);
    }
    match s.as_str() {
        "positive" | "p" => (Sentiment::Pos, Resolution::Alias),
        "negative" => (Sentiment::Neg, Resolution::Alias),
        "neutral" | "n" => (Sentiment::Neu, Resolution::Alias),
        _ => (Sentiment::Neu, Resolution::Fallback),
    }
}

/// Resolve a raw ticker, reporting how it was resolved
///
/// Tickers have no closed vocabulary, so they never fall back: any
/// non-blank text other than `null`/`none` becomes a symbol.
pub fn resolve_ticker(raw: Option<&str>) -> (Ticker, Resolution) {
    let Some(raw) = raw else {
        return (Ticker::Null, Resolution::Absent);
    };
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("none") {
        return (Ticker::Null, Resolution::Absent);
    }

    let upper = s.to_uppercase();
    let resolution = if upper == s {
        Resolution::Canonical
    } else {
        Resolution::Alias
    };
    (Ticker::Symbol(upper), resolution)
}

/// Map a raw event type onto the canonical vocabulary
pub fn normalize_event_type(raw: Option<&str>) -> EventType {
    resolve_event_type(raw).0
}

/// Map a raw sentiment onto `pos`/`neu`/`neg`
pub fn normalize_sentiment(raw: Option<&str>) -> Sentiment {
    resolve_sentiment(raw).0
}

/// Map a raw ticker onto a symbol or the null ticker
pub fn normalize_ticker(raw: Option<&str>) -> Ticker {
    resolve_ticker(raw).0
}

/// Per-field tally of how values were resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationStats {
    pub canonical: usize,
    pub alias: usize,
    pub absent: usize,
    pub fallback: usize,
}

impl NormalizationStats {
    pub fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Canonical => self.canonical += 1,
            Resolution::Alias => self.alias += 1,
            Resolution::Absent => self.absent += 1,
            Resolution::Fallback => self.fallback += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.canonical + self.alias + self.absent + self.fallback
    }

    pub fn format_summary(&self) -> String {
        format!(
            "canonical {} | alias {} | absent {} | fallback {}",
            self.canonical, self.alias, self.absent, self.fallback
        )
    }
}

/// Normalize a sequence of raw values, tallying resolutions as we go
pub fn normalize_all<'a, T, I, F>(raw: I, resolve: F) -> (Vec<T>, NormalizationStats)
where
    I: IntoIterator<Item = Option<&'a str>>,
    F: Fn(Option<&str>) -> (T, Resolution),
{
    let mut stats = NormalizationStats::default();
    let labels = raw
        .into_iter()
        .map(|value| {
            let (label, resolution) = resolve(value);
            stats.record(resolution);
            label
        })
        .collect();
    (labels, stats)
}
