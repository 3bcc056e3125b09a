//! Canonical label vocabularies
//!
//! Event type and sentiment are closed enums. Tickers are open-ended, so
//! they carry the symbol text, with a dedicated variant for "no ticker".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical event type (closed vocabulary of 11 classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "earnings")]
    Earnings,
    #[serde(rename = "m&a_deal")]
    MergerAcquisition,
    #[serde(rename = "regulatory_policy")]
    RegulatoryPolicy,
    #[serde(rename = "investment_capex")]
    InvestmentCapex,
    #[serde(rename = "product_tech")]
    ProductTech,
    #[serde(rename = "labor_layoffs")]
    LaborLayoffs,
    #[serde(rename = "ipo_listing")]
    IpoListing,
    #[serde(rename = "valuation_milestone")]
    ValuationMilestone,
    #[serde(rename = "crypto_etf")]
    CryptoEtf,
    #[serde(rename = "macro_market")]
    MacroMarket,
    /// Catch-all for absent and unrecognized values
    #[serde(rename = "other")]
    Other,
}

impl EventType {
    /// Every event type, in declaration order
    pub const ALL: [EventType; 11] = [
        Self::Earnings,
        Self::MergerAcquisition,
        Self::RegulatoryPolicy,
        Self::InvestmentCapex,
        Self::ProductTech,
        Self::LaborLayoffs,
        Self::IpoListing,
        Self::ValuationMilestone,
        Self::CryptoEtf,
        Self::MacroMarket,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Earnings => "earnings",
            Self::MergerAcquisition => "m&a_deal",
            Self::RegulatoryPolicy => "regulatory_policy",
            Self::InvestmentCapex => "investment_capex",
            Self::ProductTech => "product_tech",
            Self::LaborLayoffs => "labor_layoffs",
            Self::IpoListing => "ipo_listing",
            Self::ValuationMilestone => "valuation_milestone",
            Self::CryptoEtf => "crypto_etf",
            Self::MacroMarket => "macro_market",
            Self::Other => "other",
        }
    }

    /// Exact match against the canonical spelling (already lowercased)
    pub fn from_canonical(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == s)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical sentiment polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Pos,
    /// Default for absent and unrecognized values
    Neu,
    Neg,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Pos, Self::Neu, Self::Neg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Neu => "neu",
            Self::Neg => "neg",
        }
    }

    pub fn from_canonical(s: &str) -> Option<Self> {
        match s {
            "pos" => Some(Self::Pos),
            "neu" => Some(Self::Neu),
            "neg" => Some(Self::Neg),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical ticker
///
/// `Null` is a separate variant rather than a reserved string, so no
/// symbol text can ever be mistaken for it. It sorts before every symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ticker {
    /// No ticker (missing, empty, `null` or `none`)
    Null,
    /// Uppercased, trimmed symbol
    Symbol(String),
}

impl Ticker {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The symbol text, if any
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Symbol(s) => Some(s),
        }
    }
}

/// Displays the null ticker as `null`. Real symbols are uppercase, so the
/// rendering stays unambiguous.
impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Symbol(s) => f.write_str(s),
        }
    }
}
