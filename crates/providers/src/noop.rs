use crate::{ChatProvider, ProviderError};

#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl ChatProvider for NoopProvider {
    async fn reply(&self, _message: &str) -> Result<String, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}
