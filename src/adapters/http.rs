use crate::domain::model::{Field, FieldMap, ProviderResult};
use crate::utils::error::{NumintelError, Result};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// (報告欄位名稱, JSON 路徑)
pub type FieldSpec = (&'static str, &'static str);

/// 共用的 HTTP 設定，由各 provider 共享
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

pub fn default_user_agent() -> String {
    format!("numintel/{}", env!("CARGO_PKG_VERSION"))
}

pub fn build_client(options: &HttpOptions) -> Result<Client> {
    let mut builder = Client::builder().user_agent(options.user_agent.clone());
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// 送出請求並解析 JSON 回應
///
/// Errors never carry the request URL; it holds the API key.
pub async fn fetch_json(provider: &str, request: RequestBuilder) -> Result<serde_json::Value> {
    let response = request.send().await.map_err(|e| e.without_url())?;
    tracing::debug!("📡 {}: API response status: {}", provider, response.status());

    let response = response.error_for_status().map_err(|e| e.without_url())?;
    let body = response.text().await.map_err(|e| e.without_url())?;
    serde_json::from_str(&body).map_err(|e| NumintelError::ResponseError {
        message: format!("{} returned a non-JSON body: {}", provider, e),
    })
}

/// 查詢結果轉為 provider 結果；失敗時記錄警告
pub fn into_result(provider: &str, result: Result<FieldMap>) -> ProviderResult {
    match result {
        Ok(fields) => ProviderResult::Success(fields),
        Err(e) => {
            let message = e.describe();
            tracing::warn!("❌ {}: {}", provider, message);
            ProviderResult::Failure(message)
        }
    }
}

/// 依點號路徑取值（例如 `format.international`）
pub fn lookup_path(data: &serde_json::Value, path: &str) -> Field {
    let mut current = data;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Field::Absent,
        }
    }
    Field::Value(current.clone())
}

pub fn extract_fields(data: &serde_json::Value, specs: &[FieldSpec]) -> FieldMap {
    specs
        .iter()
        .map(|(name, path)| (name.to_string(), lookup_path(data, path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_path_nested() {
        let data = json!({
            "country": {"code": "US", "name": "United States"},
            "format": {"international": "+14155552671"}
        });

        assert_eq!(lookup_path(&data, "country.name"), Field::text("United States"));
        assert_eq!(lookup_path(&data, "format.international"), Field::text("+14155552671"));
        assert_eq!(lookup_path(&data, "format.local"), Field::Absent);
        assert_eq!(lookup_path(&data, "missing.deeper"), Field::Absent);
    }

    #[test]
    fn test_lookup_path_through_non_object() {
        let data = json!({"country": null, "location": "California"});

        assert_eq!(lookup_path(&data, "country.name"), Field::Absent);
        assert_eq!(lookup_path(&data, "country"), Field::Value(serde_json::Value::Null));
        assert_eq!(lookup_path(&data, "location.city"), Field::Absent);
    }

    #[test]
    fn test_extract_fields_keeps_declared_order() {
        let data = json!({"b": 2, "a": 1});
        let fields = extract_fields(&data, &[("A", "a"), ("Z", "z"), ("B", "b")]);

        let keys: Vec<&String> = fields.keys().collect();
        assert_eq!(keys, vec!["A", "Z", "B"]);
        assert_eq!(fields["A"], Field::Value(json!(1)));
        assert!(fields["Z"].is_absent());
    }

    #[test]
    fn test_extract_fields_from_non_object_response() {
        let fields = extract_fields(&json!([1, 2, 3]), &[("valid", "valid")]);
        assert!(fields["valid"].is_absent());
    }

    #[test]
    fn test_into_result() {
        let mut fields = FieldMap::new();
        fields.insert("valid".to_string(), Field::from(true));
        assert_eq!(
            into_result("Numverify", Ok(fields.clone())),
            ProviderResult::Success(fields)
        );

        let error = NumintelError::ResponseError {
            message: "Numverify returned a non-JSON body".to_string(),
        };
        match into_result("Numverify", Err(error)) {
            ProviderResult::Failure(message) => assert!(message.contains("non-JSON body")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
