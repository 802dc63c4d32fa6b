use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::WarrantSimError;
use crate::simulation::inputs::SimulatorInput;
use crate::WarrantSimResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Government bond tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Benchmark {
    #[serde(rename = "3month")]
    ThreeMonth,
    #[serde(rename = "2year")]
    TwoYear,
    #[serde(rename = "5year")]
    FiveYear,
    #[serde(rename = "10year")]
    TenYear,
    #[serde(rename = "30year")]
    ThirtyYear,
}

/// Issuer market. `Eu` is the euro area AAA curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Us,
    De,
    Es,
    Eu,
    Fr,
    It,
    Nl,
}

impl Country {
    /// Markets published only as a monthly long-term rate, served for every
    /// tenor as a 10-year proxy.
    pub fn is_monthly_proxy(self) -> bool {
        matches!(self, Country::Es | Country::Fr | Country::It | Country::Nl)
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Benchmark::ThreeMonth => "3month",
            Benchmark::TwoYear => "2year",
            Benchmark::FiveYear => "5year",
            Benchmark::TenYear => "10year",
            Benchmark::ThirtyYear => "30year",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Country::Us => "us",
            Country::De => "de",
            Country::Es => "es",
            Country::Eu => "eu",
            Country::Fr => "fr",
            Country::It => "it",
            Country::Nl => "nl",
        };
        f.write_str(s)
    }
}

/// A yield as published, in percent points (4.25 means 4.25%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub benchmark: Benchmark,
    pub country: Country,
    pub value: Decimal,
    pub as_of: NaiveDate,
    #[serde(default)]
    pub monthly_proxy: bool,
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// Source of benchmark yields.
pub trait RateProvider {
    fn fetch(&self, benchmark: Benchmark, country: Country) -> WarrantSimResult<RateQuote>;
}

/// Provider over a fixed set of quotes, typically loaded from a file.
#[derive(Debug, Clone, Default)]
pub struct StaticRateProvider {
    quotes: HashMap<(Benchmark, Country), RateQuote>,
}

impl StaticRateProvider {
    /// Later quotes for the same benchmark and country replace earlier ones.
    pub fn new(quotes: impl IntoIterator<Item = RateQuote>) -> Self {
        let quotes = quotes
            .into_iter()
            .map(|q| ((q.benchmark, q.country), q))
            .collect();
        StaticRateProvider { quotes }
    }

    /// Parse a JSON array of quotes.
    pub fn from_json(json: &str) -> WarrantSimResult<Self> {
        let quotes: Vec<RateQuote> = serde_json::from_str(json)?;
        Ok(Self::new(quotes))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl RateProvider for StaticRateProvider {
    fn fetch(&self, benchmark: Benchmark, country: Country) -> WarrantSimResult<RateQuote> {
        let key = if country.is_monthly_proxy() {
            (Benchmark::TenYear, country)
        } else {
            (benchmark, country)
        };
        let quote = self.quotes.get(&key).ok_or_else(|| {
            WarrantSimError::MarketData(format!("no {benchmark} quote for '{country}'"))
        })?;
        if quote.value <= dec!(-100) {
            return Err(WarrantSimError::MarketData(format!(
                "quote {} for {benchmark}/{country} is not a usable yield",
                quote.value
            )));
        }

        let mut quote = quote.clone();
        quote.benchmark = benchmark;
        quote.monthly_proxy |= country.is_monthly_proxy();
        tracing::debug!(
            benchmark = %benchmark,
            country = %country,
            value = %quote.value,
            proxy = quote.monthly_proxy,
            "rate quote"
        );
        Ok(quote)
    }
}

/// Use a quoted yield as the current rate of `input`.
pub fn seed_current_rate(input: &mut SimulatorInput, quote: &RateQuote) {
    input.market.current_rate = quote.value / dec!(100);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(benchmark: Benchmark, country: Country, value: Decimal) -> RateQuote {
        RateQuote {
            benchmark,
            country,
            value,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            monthly_proxy: false,
        }
    }

    fn provider() -> StaticRateProvider {
        StaticRateProvider::new(vec![
            quote(Benchmark::TenYear, Country::Us, dec!(4.25)),
            quote(Benchmark::TwoYear, Country::Us, dec!(3.90)),
            quote(Benchmark::TenYear, Country::Es, dec!(3.12)),
        ])
    }

    #[test]
    fn test_fetch_exact_quote() {
        let q = provider().fetch(Benchmark::TwoYear, Country::Us).unwrap();
        assert_eq!(q.value, dec!(3.90));
        assert!(!q.monthly_proxy);
    }

    #[test]
    fn test_monthly_proxy_serves_any_tenor() {
        let q = provider().fetch(Benchmark::FiveYear, Country::Es).unwrap();
        assert_eq!(q.value, dec!(3.12));
        assert_eq!(q.benchmark, Benchmark::FiveYear);
        assert!(q.monthly_proxy);
    }

    #[test]
    fn test_missing_quote_is_market_data_error() {
        let err = provider().fetch(Benchmark::ThirtyYear, Country::De).unwrap_err();
        match err {
            WarrantSimError::MarketData(msg) => {
                assert!(msg.contains("30year"));
                assert!(msg.contains("de"));
            }
            other => panic!("Expected MarketData, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"benchmark": "3month", "country": "eu", "value": "2.05", "asOf": "2026-10-15"}
        ]"#;
        let p = StaticRateProvider::from_json(json).unwrap();
        assert_eq!(p.len(), 1);
        let q = p.fetch(Benchmark::ThreeMonth, Country::Eu).unwrap();
        assert_eq!(q.value, dec!(2.05));
        assert_eq!(q.as_of, NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    }

    #[test]
    fn test_from_json_rejects_unknown_country() {
        let json = r#"[{"benchmark": "10year", "country": "uk", "value": "4", "asOf": "2026-10-15"}]"#;
        assert!(matches!(
            StaticRateProvider::from_json(json),
            Err(WarrantSimError::SerializationError(_))
        ));
    }

    #[test]
    fn test_display_matches_serde() {
        for b in [Benchmark::ThreeMonth, Benchmark::ThirtyYear] {
            assert_eq!(serde_json::to_string(&b).unwrap(), format!("\"{b}\""));
        }
        assert_eq!(serde_json::to_string(&Country::Nl).unwrap(), "\"nl\"");
    }
}
