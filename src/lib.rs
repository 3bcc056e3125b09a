//! Label evaluation library
//!
//! Scores structured predictions (event type, sentiment, ticker) against a
//! gold set with per-class and macro-averaged F1.

pub mod config;
pub mod error;
pub mod normalize;
pub mod records;
pub mod scoring;

pub use error::{EvalError, Result};
