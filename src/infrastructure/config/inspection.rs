//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::{resolve_model, resolve_provider_api_key};
use crate::application::config::DefaultsConfig;
use crate::domain::review::REVIEW_TEMPERATURE;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective: EffectiveSettings,
    pub provider: ProviderInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub prompts_dir: String,
    pub output_dir: Option<String>,
    pub header_max_lines: usize,
    pub model: String,
    pub temperature: f64,
}

/// 인증 키 값 자체는 노출하지 않는다.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub api_base: String,
    pub api_key_env: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let credential = resolve_provider_api_key(&config.provider);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective: EffectiveSettings {
                prompts_dir: config.prompts_dir().display().to_string(),
                output_dir: config.output_dir().map(|p| p.display().to_string()),
                header_max_lines: config.header_max_lines(),
                model: resolve_model(&config.provider),
                temperature: REVIEW_TEMPERATURE,
            },
            provider: ProviderInspection {
                api_base: config.provider.api_base().to_string(),
                api_key_env: config.provider.api_key_env().to_string(),
                api_key_resolved: credential.credential.is_some(),
                api_key_source: credential.source,
            },
        }
    }
}
