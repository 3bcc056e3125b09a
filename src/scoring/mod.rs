//! Scoring infrastructure
//!
//! Macro-F1 scoring of normalized labels, per field.
//!
//! ## Usage
//!
//! ```bash
//! label-eval score --gold ./gold.json --pred ./pred.json --pretty
//! ```
//!
//! ## Modules
//!
//! - `macro_f1` - Per-class confusion counts, P/R/F1, macro average, micro-accuracy
//! - `label_set` - Which classes are evaluated for each field
//! - `report` - Field passes, console formatting, JSON report

pub mod label_set;
pub mod macro_f1;
pub mod report;

#[cfg(test)]
mod scenario_tests;

pub use label_set::{gold_labels, ticker_labels};
pub use macro_f1::{macro_f1, micro_accuracy, ClassMetrics, MacroF1};
pub use report::{
    evaluate, format_percent, ClassReport, EvalReport, Field, FieldReport, InputInfo,
    ReportDocument,
};
