//! End-to-end scoring scenarios
//!
//! Each test starts from raw records (as they would appear in the JSON
//! documents) and checks the per-class counts and macro-F1 that come out.
//!
//! Run with: cargo test scenario

#[cfg(test)]
mod tests {
    use super::super::report::evaluate;
    use crate::normalize::{normalize_event_type, normalize_ticker, Ticker};
    use crate::records::{Record, ResultsFile};
    use crate::scoring::{macro_f1, ticker_labels};

    fn events(raw: &[&str]) -> Vec<Record> {
        raw.iter().map(|e| Record::new(Some(*e), None, None)).collect()
    }

    fn tickers(raw: &[Option<&str>]) -> Vec<Record> {
        raw.iter().map(|t| Record::new(None, None, *t)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // =========================================================================
    // EVENT TYPE
    // =========================================================================

    #[test]
    fn test_event_alias_in_prediction_scores_perfect() {
        let gold = events(&["earnings", "ipo_listing", "other"]);
        let pred = events(&["earnings", "ipo", "other"]);

        let pred_labels: Vec<_> = pred
            .iter()
            .map(|r| normalize_event_type(r.event_type.as_deref()))
            .collect();
        let gold_labels: Vec<_> = gold
            .iter()
            .map(|r| normalize_event_type(r.event_type.as_deref()))
            .collect();
        assert_eq!(pred_labels, gold_labels);

        let report = evaluate(&gold, &pred, true).unwrap();
        assert_eq!(report.event_type.per_class.len(), 3);
        for class in &report.event_type.per_class {
            assert_eq!(class.metrics.true_positive, 1, "{}", class.label);
            assert_eq!(class.metrics.f1, 1.0, "{}", class.label);
        }
        assert_eq!(report.event_type.macro_f1, 1.0);
    }

    #[test]
    fn test_prediction_only_event_class_is_not_evaluated() {
        let gold = events(&["earnings", "earnings"]);
        let pred = events(&["earnings", "crypto"]);

        let report = evaluate(&gold, &pred, true).unwrap();
        assert!(report.event_type.class("crypto_etf").is_none());
        let earnings = report.event_type.class("earnings").unwrap();
        assert_eq!(earnings.false_negative, 1);
        assert!(approx(report.event_type.macro_f1, 2.0 / 3.0));
    }

    #[test]
    fn test_garbage_events_collapse_to_other() {
        let gold = events(&["other", "other"]);
        let pred = events(&["sports", "  "]);
        let report = evaluate(&gold, &pred, true).unwrap();
        assert_eq!(report.event_type.macro_f1, 1.0);
        assert_eq!(report.event_type.pred_normalization.fallback, 1);
        assert_eq!(report.event_type.pred_normalization.absent, 1);
    }

    // =========================================================================
    // TICKER
    // =========================================================================

    #[test]
    fn test_ticker_with_null_class() {
        let gold = tickers(&[None, Some("nvda"), Some("AAPL")]);
        let pred = tickers(&[None, Some("NVDA"), None]);

        let report = evaluate(&gold, &pred, true).unwrap();
        let ticker = &report.ticker;

        let null = ticker.class("null").unwrap();
        assert_eq!((null.support, null.true_positive), (1, 1));
        assert_eq!(null.false_positive, 1);
        let nvda = ticker.class("NVDA").unwrap();
        assert_eq!((nvda.support, nvda.true_positive, nvda.f1), (1, 1, 1.0));
        let aapl = ticker.class("AAPL").unwrap();
        assert_eq!((aapl.support, aapl.true_positive, aapl.false_negative), (1, 0, 1));
        assert_eq!(aapl.f1, 0.0);

        // null: P=0.5 R=1 -> F1=2/3; the averaged value follows the counts
        let expected = (null.f1 + nvda.f1 + aapl.f1) / 3.0;
        assert!(approx(ticker.macro_f1, expected));
        assert!(approx(ticker.macro_f1, (2.0 / 3.0 + 1.0 + 0.0) / 3.0));
    }

    #[test]
    fn test_ticker_without_null_class() {
        let gold = tickers(&[None, Some("nvda"), Some("AAPL")]);
        let pred = tickers(&[None, Some("NVDA"), None]);

        let report = evaluate(&gold, &pred, false).unwrap();
        assert!(report.ticker.class("null").is_none());
        assert_eq!(report.ticker.per_class.len(), 2);
        assert!(approx(report.ticker.macro_f1, 0.5));
    }

    #[test]
    fn test_null_spellings_are_one_class() {
        let gold = tickers(&[None, Some(""), Some("null"), Some("NONE")]);
        let labels = ticker_labels(
            &gold
                .iter()
                .map(|r| normalize_ticker(r.ticker.as_deref()))
                .collect::<Vec<_>>(),
            true,
        );
        assert_eq!(labels, vec![Ticker::Null]);
    }

    #[test]
    fn test_ticker_classes_scored_directly() {
        // Counts match the worked example: null support 1 tp 1, NVDA tp 1, AAPL fn 1
        let gold = vec![
            Ticker::Null,
            Ticker::Symbol("NVDA".to_string()),
            Ticker::Symbol("AAPL".to_string()),
        ];
        let pred = vec![Ticker::Null, Ticker::Symbol("NVDA".to_string()), Ticker::Null];
        let labels = ticker_labels(&gold, false);
        let result = macro_f1(&gold, &pred, &labels).unwrap();
        assert!(approx(result.macro_f1, 0.5));
        assert!(result.get(&Ticker::Null).is_none());
    }

    // =========================================================================
    // SENTIMENT + DOCUMENTS
    // =========================================================================

    #[test]
    fn test_sentiment_aliases_and_defaults() {
        let gold = vec![
            Record::new(None, Some("positive"), None),
            Record::new(None, Some("neg"), None),
            Record::new(None, None, None),
        ];
        let pred = vec![
            Record::new(None, Some("P"), None),
            Record::new(None, Some("Negative"), None),
            Record::new(None, Some("unsure"), None),
        ];
        let report = evaluate(&gold, &pred, true).unwrap();
        assert_eq!(report.sentiment.macro_f1, 1.0);
        assert_eq!(report.sentiment.micro_accuracy, 1.0);
    }

    #[test]
    fn test_documents_of_different_length() {
        let gold = ResultsFile::from_json_str(
            r#"{"results": [
                {"event_type": "m&a", "sentiment": "pos", "ticker": "msft"},
                {"event_type": "earnings", "sentiment": "neg", "ticker": null},
                {"event_type": "tech", "sentiment": "neu", "ticker": "GOOG"}
            ]}"#,
            "gold",
        )
        .unwrap();
        let pred = ResultsFile::from_json_str(
            r#"{"results": [
                {"event_type": "m&a_deal", "sentiment": "positive", "ticker": "MSFT", "evidence": "x"},
                {"event_type": "EARNINGS", "sentiment": "n", "ticker": "none"}
            ]}"#,
            "pred",
        )
        .unwrap();

        let report = evaluate(&gold.records, &pred.records, true).unwrap();
        assert_eq!(report.samples, 2);
        assert_eq!(report.alignment.dropped(), 1);
        assert_eq!(report.event_type.macro_f1, 1.0);
        assert_eq!(report.ticker.macro_f1, 1.0);
        assert!(report.ticker.class("GOOG").is_none());
        // pos matched, neg predicted as neu
        assert!(approx(report.sentiment.macro_f1, 0.5));
        assert!(approx(report.sentiment.micro_accuracy, 0.5));
    }
}
