use crate::adapters::http::{extract_fields, fetch_json, into_result, FieldSpec};
use crate::config::settings::TwilioSettings;
use crate::domain::model::{FieldMap, ProviderResult};
use crate::domain::ports::Provider;
use crate::utils::error::{NumintelError, Result};
use crate::utils::validation::credential;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const NAME: &str = "Twilio";
pub const DEFAULT_ENDPOINT: &str = "https://lookups.twilio.com/v2/PhoneNumbers";

const FIELDS: &[FieldSpec] = &[
    ("phone_number", "phone_number"),
    ("national_format", "national_format"),
    ("line_type_intelligence", "line_type_intelligence"),
    ("caller_name", "caller_name"),
    ("country_code", "country_code"),
];

/// Twilio Lookup v2, authenticated with the account SID and auth token.
pub struct TwilioProvider {
    client: Client,
    account_sid: Option<String>,
    auth_token: Option<String>,
    endpoint: String,
    fields: Vec<String>,
}

impl TwilioProvider {
    pub fn new(client: Client, settings: &TwilioSettings) -> Self {
        Self {
            client,
            account_sid: credential(settings.account_sid.as_deref()),
            auth_token: credential(settings.auth_token.as_deref()),
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            fields: settings.fields.clone().unwrap_or_default(),
        }
    }

    /// `{endpoint}/{number}`，號碼作為單一路徑片段編碼
    fn request_url(&self, number: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        url.path_segments_mut()
            .map_err(|_| NumintelError::ConfigError {
                message: format!("{} endpoint cannot take a path: {}", NAME, self.endpoint),
            })?
            .pop_if_empty()
            .push(number);

        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("Fields", &self.fields.join(","));
        }
        Ok(url)
    }

    async fn query(&self, account_sid: &str, auth_token: &str, number: &str) -> Result<FieldMap> {
        let url = self.request_url(number)?;

        tracing::debug!("📡 {}: Looking up {}", NAME, number);
        let request = self.client.get(url).basic_auth(account_sid, Some(auth_token));
        let data = fetch_json(NAME, request).await?;
        Ok(extract_fields(&data, FIELDS))
    }
}

#[async_trait]
impl Provider for TwilioProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn lookup(&self, number: &str) -> ProviderResult {
        let (Some(account_sid), Some(auth_token)) =
            (self.account_sid.as_deref(), self.auth_token.as_deref())
        else {
            return ProviderResult::Disabled("Twilio credentials not set".to_string());
        };

        into_result(NAME, self.query(account_sid, auth_token, number).await)
    }
}
