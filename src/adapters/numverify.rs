use crate::adapters::http::{extract_fields, fetch_json, into_result, FieldSpec};
use crate::config::settings::{ApiKeySettings, NUMVERIFY_API_KEY};
use crate::domain::model::{FieldMap, ProviderResult};
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use crate::utils::validation::credential;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const NAME: &str = "Numverify";
pub const DEFAULT_ENDPOINT: &str = "https://apilayer.net/api/validate";

const FIELDS: &[FieldSpec] = &[
    ("valid", "valid"),
    ("number", "number"),
    ("international_format", "international_format"),
    ("country_code", "country_code"),
    ("country_name", "country_name"),
    ("carrier", "carrier"),
    ("line_type", "line_type"),
];

pub struct NumVerifyProvider {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl NumVerifyProvider {
    pub fn new(client: Client, settings: &ApiKeySettings) -> Self {
        Self {
            client,
            api_key: credential(settings.api_key.as_deref()),
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    async fn query(&self, api_key: &str, number: &str) -> Result<FieldMap> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[("access_key", api_key), ("number", number)],
        )?;

        tracing::debug!("📡 {}: Looking up {}", NAME, number);
        let data = fetch_json(NAME, self.client.get(url)).await?;
        Ok(extract_fields(&data, FIELDS))
    }
}

#[async_trait]
impl Provider for NumVerifyProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn lookup(&self, number: &str) -> ProviderResult {
        let Some(api_key) = self.api_key.as_deref() else {
            return ProviderResult::Disabled(format!("{} not set", NUMVERIFY_API_KEY));
        };

        into_result(NAME, self.query(api_key, number).await)
    }
}
