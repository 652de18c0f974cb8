use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::ConverterError;

pub const DEFAULT_API_URL: &str = "https://api.frankfurter.app";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Label used in the currency pickers.
impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// How a conversion is carried out.
#[derive(Clone, Debug, PartialEq)]
pub enum Conversion {
    /// Source and target are the same currency, the amount is the answer.
    Identity(f64),
    /// Ask the service, then read the rate with [`CurrencyApi::parse_rate`].
    Fetch { url: String },
}

#[derive(Deserialize)]
struct LatestResponse {
    rates: BTreeMap<String, f64>,
}

/// Request building and response parsing for a Frankfurter compatible exchange-rate service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyApi {
    base_url: String,
}

impl CurrencyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn currencies_url(&self) -> String {
        format!("{}/currencies", self.base_url)
    }

    /// Reads the `code -> name` object returned by the currencies endpoint, sorted by code.
    pub fn parse_currencies(body: &str) -> Result<Vec<Currency>, ConverterError> {
        let currencies: BTreeMap<String, String> =
            serde_json::from_str(body).map_err(|err| {
                log::error!("could not parse currency list: {}", err);
                ConverterError::FetchCurrencies
            })?;
        Ok(currencies
            .into_iter()
            .map(|(code, name)| Currency { code, name })
            .collect())
    }

    pub fn plan_conversion(&self, amount: f64, from: &Currency, to: &Currency) -> Conversion {
        if from.code == to.code {
            return Conversion::Identity(amount);
        }
        Conversion::Fetch {
            url: format!(
                "{}/latest?amount={}&from={}&to={}",
                self.base_url, amount, from.code, to.code
            ),
        }
    }

    /// Picks the converted amount for `to` out of a `latest` response.
    pub fn parse_rate(body: &str, to: &Currency) -> Result<f64, ConverterError> {
        let response: LatestResponse = serde_json::from_str(body).map_err(|err| {
            log::error!("could not parse conversion response: {}", err);
            ConverterError::Convert
        })?;
        response
            .rates
            .get(&to.code)
            .copied()
            .filter(|rate| rate.is_finite())
            .ok_or_else(|| ConverterError::MissingRate(to.code.clone()))
    }
}

impl Default for CurrencyApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

pub fn format_conversion(amount: f64, from: &Currency, to: &Currency, converted: f64) -> String {
    format!("{} {} = {:.2} {}", amount, from.code, converted, to.code)
}

/// Finds a currency by code in a loaded list.
pub fn find_currency<'a>(currencies: &'a [Currency], code: &str) -> Option<&'a Currency> {
    currencies.iter().find(|currency| currency.code == code)
}

/// Reads the amount typed in the form, anything that is not a finite number is rejected.
pub fn parse_amount(raw: &str) -> Result<f64, ConverterError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or(ConverterError::InvalidAmount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const CURRENCIES: &str = r#"{"AUD":"Australian Dollar","EUR":"Euro","USD":"United States Dollar"}"#;
    const LATEST: &str = r#"{"amount":10.0,"base":"EUR","date":"2024-05-17","rates":{"USD":10.866}}"#;

    fn eur() -> Currency {
        Currency::new("EUR", "Euro")
    }

    fn usd() -> Currency {
        Currency::new("USD", "United States Dollar")
    }

    #[test]
    fn same_currency_needs_no_request() {
        let api = CurrencyApi::default();
        assert_eq!(
            api.plan_conversion(12.5, &eur(), &eur()),
            Conversion::Identity(12.5)
        );
    }

    #[test]
    fn different_currencies_build_latest_url() {
        let api = CurrencyApi::new("https://example.test/");
        assert_eq!(
            api.plan_conversion(10.0, &eur(), &usd()),
            Conversion::Fetch {
                url: "https://example.test/latest?amount=10&from=EUR&to=USD".into()
            }
        );
        assert_eq!(api.currencies_url(), "https://example.test/currencies");
    }

    #[test]
    fn parses_currency_list_in_code_order() {
        let currencies = CurrencyApi::parse_currencies(CURRENCIES).unwrap();

        assert_eq!(currencies.len(), 3);
        assert_eq!(currencies[1], eur());
        assert_eq!(currencies[2].to_string(), "USD - United States Dollar");
        assert_eq!(find_currency(&currencies, "AUD").map(|c| c.name.as_str()), Some("Australian Dollar"));
        assert_eq!(find_currency(&currencies, "XXX"), None);
    }

    #[test]
    fn malformed_currency_list_is_a_fetch_error() {
        assert_eq!(
            CurrencyApi::parse_currencies("<html>").unwrap_err(),
            ConverterError::FetchCurrencies
        );
    }

    #[test]
    fn reads_rate_for_target() {
        assert_eq!(CurrencyApi::parse_rate(LATEST, &usd()), Ok(10.866));
    }

    #[test]
    fn missing_rate_is_reported() {
        let err = CurrencyApi::parse_rate(LATEST, &Currency::new("JPY", "Japanese Yen")).unwrap_err();
        assert_eq!(err, ConverterError::MissingRate("JPY".into()));
        assert_eq!(err.to_string(), "Error performing conversion.");
    }

    #[test]
    fn malformed_conversion_response_is_a_convert_error() {
        assert_eq!(
            CurrencyApi::parse_rate(r#"{"message":"not found"}"#, &usd()),
            Err(ConverterError::Convert)
        );
    }

    #[test]
    fn amount_must_be_a_number() {
        assert_eq!(parse_amount(" 12.5 "), Ok(12.5));
        assert_eq!(parse_amount("twelve"), Err(ConverterError::InvalidAmount));
        assert_eq!(parse_amount("inf"), Err(ConverterError::InvalidAmount));
        assert_eq!(parse_amount(""), Err(ConverterError::InvalidAmount));
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_conversion(10.0, &eur(), &usd(), 10.866), "10 EUR = 10.87 USD");
    }
}
