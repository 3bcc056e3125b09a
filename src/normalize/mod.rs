//! Label normalization
//!
//! Maps raw, noisy label values onto each field's canonical vocabulary.
//!
//! ## Fields
//!
//! - **Event type**: trim, lowercase, alias lookup, anything unknown → `other`
//! - **Sentiment**: trim, lowercase, alias lookup, anything unknown → `neu`
//! - **Ticker**: blank / `null` / `none` → [`Ticker::Null`], otherwise the
//!   trimmed uppercase symbol
//!
//! The `resolve_*` variants also report a [`Resolution`] so callers can count
//! how many values needed a default; the `normalize_*` variants return the
//! label alone.

pub mod labels;
pub mod rules;

pub use labels::{EventType, Sentiment, Ticker};
pub use rules::{
    normalize_all, normalize_event_type, normalize_sentiment, normalize_ticker,
    resolve_event_type, resolve_sentiment, resolve_ticker, NormalizationStats, Resolution,
};
