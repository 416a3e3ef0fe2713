use crate::domain::model::ProviderResult;
use async_trait::async_trait;

/// 外部電話驗證服務
///
/// `lookup` never returns an error: missing credentials become
/// [`ProviderResult::Disabled`] and transport or decoding problems become
/// [`ProviderResult::Failure`].
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    async fn lookup(&self, number: &str) -> ProviderResult;
}
