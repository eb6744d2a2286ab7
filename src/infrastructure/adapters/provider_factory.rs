//! Provider 포트 구현 어댑터.

use anyhow::Result;

use crate::application::ports::{CompletionProvider, ProviderFactory};
use crate::infrastructure::config::{Config, resolve_model};
use crate::infrastructure::providers::OpenAiProvider;

/// 설정으로 OpenAI 호환 provider를 구성하는 팩토리 어댑터.
pub struct ProviderFactoryAdapter;

impl ProviderFactory for ProviderFactoryAdapter {
    fn build(&self, config: &Config) -> Result<Box<dyn CompletionProvider>> {
        Ok(Box::new(OpenAiProvider::from_config(config)?))
    }

    fn resolve_model(&self, config: &Config) -> String {
        resolve_model(&config.provider)
    }
}
