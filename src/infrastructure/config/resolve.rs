//! 설정 값(api key/env/model)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{DEFAULT_MODEL, DEFAULT_MODEL_ENV, ProviderConfig};

/// Provider(API key) 해석 결과.
#[derive(Debug, Clone)]
pub struct ProviderCredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// API key를 `api_key`(직접값) → `api_key_env` 환경변수 순으로 해석한다.
pub fn resolve_provider_api_key(cfg: &ProviderConfig) -> ProviderCredentialResolution {
    if let Some(key) = cfg.api_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return ProviderCredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env();
    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ProviderCredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => ProviderCredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

/// 모델은 설정값 → `OPENAI_MODEL` → 기본값 순으로 결정한다.
pub fn resolve_model(cfg: &ProviderConfig) -> String {
    resolve_model_with(cfg, env::var(DEFAULT_MODEL_ENV).ok())
}

fn resolve_model_with(cfg: &ProviderConfig, env_model: Option<String>) -> String {
    cfg.model
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| {
            env_model
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
