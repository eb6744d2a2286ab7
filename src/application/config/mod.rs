//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::header::DEFAULT_HEADER_MAX_LINES;
use crate::domain::review::RunOptions;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MODEL_ENV: &str = "OPENAI_MODEL";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// completion 서비스 설정
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// system.md/reviewer.md/output_schema.md 가 있는 디렉터리
    pub prompts_dir: Option<PathBuf>,
    /// 리뷰 결과 출력 디렉터리
    pub output_dir: Option<PathBuf>,
    /// 헤더 컨텍스트 탐색 최대 줄 수
    pub header_max_lines: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// 모델 식별자
    pub model: Option<String>,
    /// OpenAI 호환 API 베이스 URL
    pub api_base: Option<String>,
    /// 인증 키(직접값)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

impl Config {
    pub fn prompts_dir(&self) -> PathBuf {
        self.defaults
            .prompts_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_DIR))
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.defaults.output_dir.clone()
    }

    pub fn header_max_lines(&self) -> usize {
        self.defaults
            .header_max_lines
            .unwrap_or(DEFAULT_HEADER_MAX_LINES)
    }

    /// CLI 인자를 설정 위에 덮어쓴다(CLI 우선). 경로는 바이트 그대로 유지한다.
    pub fn with_run_overrides(mut self, options: &RunOptions) -> Self {
        if let Some(model) = &options.model {
            self.provider.model = Some(model.clone());
        }
        if let Some(dir) = &options.prompts_dir {
            self.defaults.prompts_dir = Some(dir.clone());
        }
        if let Some(dir) = &options.out_dir {
            self.defaults.output_dir = Some(dir.clone());
        }
        self
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.provider.merge_from(other.provider);
    }
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.prompts_dir.is_some() {
            self.prompts_dir = other.prompts_dir;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.header_max_lines.is_some() {
            self.header_max_lines = other.header_max_lines;
        }
    }
}

impl ProviderConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub(crate) fn merge_from(&mut self, other: ProviderConfig) {
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}
