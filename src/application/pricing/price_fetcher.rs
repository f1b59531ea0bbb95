use super::types::{PriceSummary, QuoteResponse};
use anyhow::{Result, anyhow};
use reqwest::Client;

pub struct PriceFetcher {
    client: Client,
    endpoint: String,
}

impl PriceFetcher {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Never fails: any transport, status or decoding problem degrades to
    /// [`PriceSummary::unavailable`].
    pub async fn fetch_prices(&self) -> PriceSummary {
        match self.request_quotes().await {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("Failed to fetch crypto prices: {}", e);
                PriceSummary::unavailable()
            }
        }
    }

    async fn request_quotes(&self) -> Result<PriceSummary> {
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Quote API request failed with status: {}",
                response.status()
            ));
        }

        let quotes = response.json::<QuoteResponse>().await?;
        Ok(quotes.into())
    }
}
