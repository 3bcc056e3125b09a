//! Evaluation report: three field passes plus console and JSON output
//!
//! Each field (event type, sentiment, ticker) is normalized and scored
//! independently. The passes share nothing, so their order never affects
//! the result.

use super::label_set::{gold_labels, ticker_labels};
use super::macro_f1::{macro_f1, micro_accuracy, ClassMetrics};
use crate::error::{EvalError, Result};
use crate::normalize::{
    normalize_all, resolve_event_type, resolve_sentiment, resolve_ticker, NormalizationStats,
};
use crate::records::{align, Alignment, Record, ResultsFile};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

/// A scored record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    EventType,
    Sentiment,
    Ticker,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EventType => "event_type",
            Self::Sentiment => "sentiment",
            Self::Ticker => "ticker",
        }
    }

    /// Heading used in console output
    pub fn title(&self) -> &'static str {
        match self {
            Self::EventType => "Event-type",
            Self::Sentiment => "Sentiment",
            Self::Ticker => "Ticker",
        }
    }
}

/// Metrics for one class, labelled for output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    /// Canonical label (the null ticker renders as `null`)
    pub label: String,
    #[serde(flatten)]
    pub metrics: ClassMetrics,
}

/// Scores for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub field: Field,
    pub macro_f1: f64,
    pub micro_accuracy: f64,
    /// Evaluated classes, in label-set order
    pub per_class: Vec<ClassReport>,
    /// How gold values were normalized
    pub gold_normalization: NormalizationStats,
    /// How predicted values were normalized
    pub pred_normalization: NormalizationStats,
}

impl FieldReport {
    /// Score one field from already-normalized sequences
    pub fn score<L>(
        field: Field,
        gold: &[L],
        pred: &[L],
        labels: &[L],
        gold_normalization: NormalizationStats,
        pred_normalization: NormalizationStats,
    ) -> Result<Self>
    where
        L: Eq + Hash + Clone + Display,
    {
        let result = macro_f1(gold, pred, labels)?;
        let micro = micro_accuracy(gold, pred);

        tracing::debug!(
            "{}: macro-F1 {:.3} over {} classes ({} averaged), micro-acc {:.3}",
            field.name(),
            result.macro_f1,
            result.per_class.len(),
            result.averaged_classes(),
            micro
        );

        Ok(Self {
            field,
            macro_f1: result.macro_f1,
            micro_accuracy: micro,
            per_class: result
                .per_class
                .into_iter()
                .map(|(label, metrics)| ClassReport {
                    label: label.to_string(),
                    metrics,
                })
                .collect(),
            gold_normalization,
            pred_normalization,
        })
    }

    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.per_class
            .iter()
            .find(|c| c.label == label)
            .map(|c| &c.metrics)
    }

    /// One summary line, e.g. `Ticker Macro-F1    : 0.667 (micro-acc 66.67%)`
    pub fn format_summary(&self) -> String {
        let heading = format!("{} Macro-F1", self.field.title());
        format!(
            "{:19}: {:.3} (micro-acc {})",
            heading,
            self.macro_f1,
            format_percent(self.micro_accuracy)
        )
    }

    /// Per-class table, rows by support (descending) then label
    pub fn format_table(&self) -> String {
        let mut rows: Vec<&ClassReport> = self.per_class.iter().collect();
        rows.sort_by(|a, b| {
            b.metrics
                .support
                .cmp(&a.metrics.support)
                .then_with(|| a.label.cmp(&b.label))
        });

        let mut out = format!("-- {} per-class --\n", self.field.title());
        out.push_str(&format!(
            "{:30} {:>5} {:>4} {:>4} {:>4} {:>6} {:>6} {:>6}\n",
            "class", "supp", "tp", "fp", "fn", "P", "R", "F1"
        ));
        for row in rows {
            let m = &row.metrics;
            out.push_str(&format!(
                "{:30} {:5} {:4} {:4} {:4} {:6.3} {:6.3} {:6.3}\n",
                row.label,
                m.support,
                m.true_positive,
                m.false_positive,
                m.false_negative,
                m.precision,
                m.recall,
                m.f1
            ));
        }
        out
    }

    pub fn format_diagnostics(&self) -> String {
        format!(
            "{:10} gold: {}\n{:10} pred: {}",
            self.field.title(),
            self.gold_normalization.format_summary(),
            "",
            self.pred_normalization.format_summary()
        )
    }
}

/// Full evaluation over all three fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Positions scored after alignment
    pub samples: usize,
    pub alignment: Alignment,
    pub include_null_ticker: bool,
    pub event_type: FieldReport,
    pub sentiment: FieldReport,
    pub ticker: FieldReport,
}

impl EvalReport {
    pub fn fields(&self) -> [&FieldReport; 3] {
        [&self.event_type, &self.sentiment, &self.ticker]
    }

    /// Header plus one summary line per field
    pub fn format_summary(&self) -> String {
        let mut out = String::from("== Evaluation Metrics ==\n");
        out.push_str(&format!("Samples: {}\n", self.samples));
        for field in self.fields() {
            out.push_str(&field.format_summary());
            out.push('\n');
        }
        out
    }

    pub fn format_tables(&self) -> String {
        self.fields()
            .iter()
            .map(|f| f.format_table())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_diagnostics(&self) -> String {
        let mut out = String::from("-- Normalization --\n");
        for field in self.fields() {
            out.push_str(&field.format_diagnostics());
            out.push('\n');
        }
        out
    }
}

/// Align, normalize and score gold against predicted records
pub fn evaluate(gold: &[Record], pred: &[Record], include_null_ticker: bool) -> Result<EvalReport> {
    let (gold, pred, alignment) = align(gold, pred);

    let (gold_event, gold_event_stats) =
        normalize_all(gold.iter().map(|r| r.event_type.as_deref()), resolve_event_type);
    let (pred_event, pred_event_stats) =
        normalize_all(pred.iter().map(|r| r.event_type.as_deref()), resolve_event_type);
    let event_type = FieldReport::score(
        Field::EventType,
        &gold_event,
        &pred_event,
        &gold_labels(&gold_event),
        gold_event_stats,
        pred_event_stats,
    )?;

    let (gold_sent, gold_sent_stats) =
        normalize_all(gold.iter().map(|r| r.sentiment.as_deref()), resolve_sentiment);
    let (pred_sent, pred_sent_stats) =
        normalize_all(pred.iter().map(|r| r.sentiment.as_deref()), resolve_sentiment);
    let sentiment = FieldReport::score(
        Field::Sentiment,
        &gold_sent,
        &pred_sent,
        &gold_labels(&gold_sent),
        gold_sent_stats,
        pred_sent_stats,
    )?;

    let (gold_ticker, gold_ticker_stats) =
        normalize_all(gold.iter().map(|r| r.ticker.as_deref()), resolve_ticker);
    let (pred_ticker, pred_ticker_stats) =
        normalize_all(pred.iter().map(|r| r.ticker.as_deref()), resolve_ticker);
    let ticker = FieldReport::score(
        Field::Ticker,
        &gold_ticker,
        &pred_ticker,
        &ticker_labels(&gold_ticker, include_null_ticker),
        gold_ticker_stats,
        pred_ticker_stats,
    )?;

    Ok(EvalReport {
        samples: alignment.scored,
        alignment,
        include_null_ticker,
        event_type,
        sentiment,
        ticker,
    })
}

/// Format a fraction as a percentage with two decimals
pub fn format_percent(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

/// Provenance for one input document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    pub path: String,
    pub sha256: String,
    pub records: usize,
}

impl From<&ResultsFile> for InputInfo {
    fn from(file: &ResultsFile) -> Self {
        Self {
            path: file.source.clone(),
            sha256: file.fingerprint.clone(),
            records: file.len(),
        }
    }
}

/// Report as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub timestamp: String,
    pub gold: InputInfo,
    pub pred: InputInfo,
    pub report: EvalReport,
}

impl ReportDocument {
    pub fn new(gold: &ResultsFile, pred: &ResultsFile, report: EvalReport) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            gold: gold.into(),
            pred: pred.into(),
            report,
        }
    }

    /// Write as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| EvalError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| EvalError::Json {
            source_name: path.display().to_string(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| EvalError::io(path, e))?;
        Ok(())
    }
}
