//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::prompt::PromptTemplates;
use crate::domain::review::{CompletionRequest, CompletionResponse};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 프롬프트 템플릿 묶음을 읽는 포트.
pub trait PromptTemplateSource: Send + Sync {
    fn load(&self, prompts_dir: &Path) -> Result<PromptTemplates>;
}

/// 리뷰 대상 SQL 파일 선택/읽기와 결과 저장 포트.
pub trait SqlWorkspace: Send + Sync {
    /// 입력 경로를 정렬된 `.sql` 파일 목록으로 변환한다.
    fn collect_inputs(&self, input: &Path) -> Result<Vec<PathBuf>>;
    fn read_sql(&self, path: &Path) -> Result<String>;
    fn write_review(&self, path: &Path, body: &str) -> Result<()>;
}

/// completion 서비스 호출 포트.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// 설정(모델/인증)에 맞는 provider를 구성하는 팩토리 포트.
/// 인증 정보가 없으면 에러를 반환한다.
pub trait ProviderFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Box<dyn CompletionProvider>>;
    fn resolve_model(&self, config: &Config) -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
