use crate::adapters::http::build_client;
use crate::adapters::{AbstractApiProvider, NumVerifyProvider, TwilioProvider};
use crate::config::settings::Settings;
use crate::core::normalizer::normalize;
use crate::domain::model::{
    AggregateReport, LookupRequest, NormalizedNumber, ReportEntry, NORMALIZED_KEY,
};
use crate::domain::ports::Provider;
use crate::utils::error::Result;

/// 依固定順序執行所有查詢並彙整成一份報告
pub struct LookupEngine {
    providers: Vec<Box<dyn Provider>>,
}

impl LookupEngine {
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Numverify、AbstractAPI、Twilio，共用同一個 HTTP client
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = build_client(&settings.http_options())?;

        Ok(Self::new(vec![
            Box::new(NumVerifyProvider::new(client.clone(), &settings.numverify)),
            Box::new(AbstractApiProvider::new(client.clone(), &settings.abstractapi)),
            Box::new(TwilioProvider::new(client, &settings.twilio)),
        ]))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn run(&self, request: &LookupRequest) -> AggregateReport {
        let mut report = AggregateReport::new();

        tracing::debug!(
            "🔎 Normalizing {} (region {})",
            request.raw_number,
            request.region_hint
        );
        let normalized = normalize(&request.raw_number, &request.region_hint);
        if let NormalizedNumber::Error { message } = &normalized {
            tracing::warn!("⚠️ Could not parse {}: {}", request.raw_number, message);
        }
        report.insert(NORMALIZED_KEY, ReportEntry::Normalized(normalized));

        for provider in &self.providers {
            tracing::debug!("📡 Querying {}", provider.name());
            let result = provider.lookup(&request.raw_number).await;

            if result.is_disabled() {
                tracing::info!("⏭️ {}: skipped, no credentials", provider.name());
            }
            report.insert(provider.name(), ReportEntry::Provider(result));
        }

        tracing::debug!("✅ Report complete with {} entries", report.len());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Field, FieldMap, ProviderResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockProvider {
        name: String,
        result: ProviderResult,
        calls: Arc<AtomicUsize>,
    }

    impl MockProvider {
        fn new(name: &str, result: ProviderResult) -> Self {
            Self {
                name: name.to_string(),
                result,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn lookup(&self, _number: &str) -> ProviderResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn success(value: &str) -> ProviderResult {
        let mut fields = FieldMap::new();
        fields.insert("value".to_string(), Field::text(value));
        ProviderResult::Success(fields)
    }

    #[tokio::test]
    async fn test_run_keeps_fixed_order() {
        let engine = LookupEngine::new(vec![
            Box::new(MockProvider::new("First", success("1"))),
            Box::new(MockProvider::new("Second", success("2"))),
            Box::new(MockProvider::new("Third", success("3"))),
        ]);

        let report = engine.run(&LookupRequest::new("+14155552671", "US")).await;

        let sources: Vec<&str> = report.sources().collect();
        assert_eq!(sources, vec!["Normalized", "First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_short_circuit() {
        let last = MockProvider::new("Last", success("ok"));
        let last_calls = last.calls.clone();

        let engine = LookupEngine::new(vec![
            Box::new(MockProvider::new(
                "Broken",
                ProviderResult::Failure("connection refused".to_string()),
            )),
            Box::new(MockProvider::new(
                "Off",
                ProviderResult::Disabled("KEY not set".to_string()),
            )),
            Box::new(last),
        ]);

        let report = engine.run(&LookupRequest::new("not-a-number", "US")).await;

        assert_eq!(report.len(), 4);
        assert!(report.normalized().unwrap().is_error());
        assert!(report.provider("Broken").unwrap().is_failure());
        assert!(report.provider("Off").unwrap().is_disabled());
        assert!(report.provider("Last").unwrap().is_success());
        assert_eq!(last_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_from_settings_registers_all_providers() {
        let engine = LookupEngine::from_settings(&Settings::default()).unwrap();
        assert_eq!(engine.provider_names(), vec!["Numverify", "AbstractAPI", "Twilio"]);

        let report = engine.run(&LookupRequest::new("+14155552671", "US")).await;
        assert_eq!(report.len(), 4);
        for name in ["Numverify", "AbstractAPI", "Twilio"] {
            assert!(report.provider(name).unwrap().is_disabled());
        }
    }
}
