use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://api.api-ninjas.com/v1";

/// API Ninjas commodity-price provider.
///
/// - **Requires**: API key (set via settings as "api_ninjas"), sent in
///   the `X-Api-Key` header.
/// - **Coverage**: major exchange-traded commodities; symbols are
///   translated to the API's lowercase contract names.
/// - **Strategy**: prices change slowly, so the market service caches
///   each quote for several minutes before refetching.
pub struct ApiNinjasProvider {
    client: Client,
    api_key: String,
    /// Map from our symbol (GOLD) to the API's contract name (gold)
    symbol_map: HashMap<String, String>,
}

impl ApiNinjasProvider {
    pub fn new(api_key: String) -> Self {
        let mut symbol_map = HashMap::new();
        symbol_map.insert("GOLD".to_string(), "gold".to_string());
        symbol_map.insert("SILVER".to_string(), "silver".to_string());
        symbol_map.insert("COPPER".to_string(), "copper".to_string());
        symbol_map.insert("ALUMINIUM".to_string(), "aluminum".to_string());
        symbol_map.insert("CRUDEOIL".to_string(), "crude_oil".to_string());
        symbol_map.insert("NATURALGAS".to_string(), "natural_gas".to_string());
        symbol_map.insert("BRENT".to_string(), "brent_crude_oil".to_string());
        symbol_map.insert("COTTON".to_string(), "cotton".to_string());
        symbol_map.insert("SOYBEAN".to_string(), "soybean".to_string());
        symbol_map.insert("WHEAT".to_string(), "wheat".to_string());
        symbol_map.insert("CORN".to_string(), "corn".to_string());
        symbol_map.insert("SUGAR".to_string(), "sugar".to_string());

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            symbol_map,
        }
    }

    /// Translate a desk symbol to the API's contract name.
    pub fn resolve_contract_name(&self, symbol: &str) -> Result<String, CoreError> {
        let upper = symbol.to_uppercase();
        self.symbol_map
            .get(&upper)
            .cloned()
            .ok_or_else(|| CoreError::Api {
                provider: "api-ninjas".into(),
                message: format!("Unsupported commodity symbol: {symbol}"),
            })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for ApiNinjasProvider {
    fn name(&self) -> &str {
        "api-ninjas"
    }

    fn supports(&self, symbol: &str) -> bool {
        self.symbol_map.contains_key(&symbol.to_uppercase())
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let contract_name = self.resolve_contract_name(symbol)?;
        let url = format!("{BASE_URL}/commodityprice");

        let resp_text = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[("name", contract_name.as_str())])
            .send()
            .await?
            .text()
            .await?;

        // The endpoint has returned both a bare object and a one-element
        // array over time; parse dynamically and accept either shape.
        let parsed: serde_json::Value =
            serde_json::from_str(&resp_text).map_err(|e| CoreError::Api {
                provider: "api-ninjas".into(),
                message: format!("Failed to parse commodityprice response: {e}"),
            })?;

        let quote = match &parsed {
            serde_json::Value::Array(items) => items.first(),
            other => Some(other),
        };

        if let Some(price) = quote
            .and_then(|q| q.get("price"))
            .and_then(|v| v.as_f64())
        {
            return Ok(price);
        }

        Err(CoreError::PriceNotAvailable {
            symbol: symbol.to_uppercase(),
        })
    }
}
