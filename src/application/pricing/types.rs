use serde::Deserialize;

use super::config::PRICE_PLACEHOLDER;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceSummary {
    pub btc: String,
    pub eth: String,
    pub sol: String,
}

impl PriceSummary {
    pub fn unavailable() -> Self {
        Self {
            btc: PRICE_PLACEHOLDER.to_string(),
            eth: PRICE_PLACEHOLDER.to_string(),
            sol: PRICE_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct QuoteResponse {
    pub bitcoin: UsdQuote,
    pub ethereum: UsdQuote,
    pub solana: UsdQuote,
}

#[derive(Deserialize, Debug)]
pub struct UsdQuote {
    pub usd: f64,
}

impl From<QuoteResponse> for PriceSummary {
    fn from(quotes: QuoteResponse) -> Self {
        Self {
            btc: format!("${}", quotes.bitcoin.usd),
            eth: format!("${}", quotes.ethereum.usd),
            sol: format!("${}", quotes.solana.usd),
        }
    }
}
