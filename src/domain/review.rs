//! 리뷰 도메인 엔티티/값 객체.

use std::path::PathBuf;

/// completion 호출에 쓰는 고정 샘플링 온도.
pub const REVIEW_TEMPERATURE: f64 = 0.2;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// `.sql` 파일 또는 `.sql` 파일이 있는 디렉터리
    pub input: PathBuf,
    /// 결과 출력 디렉터리(없으면 입력 옆)
    pub out_dir: Option<PathBuf>,
    /// 모델 이름 override
    pub model: Option<String>,
    /// 프롬프트 디렉터리 override
    pub prompts_dir: Option<PathBuf>,
    /// 프롬프트만 출력하고 호출/저장은 하지 않음
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn add_from(&mut self, other: &TokenUsage) {
        self.prompt_tokens = sum_optional(self.prompt_tokens, other.prompt_tokens);
        self.completion_tokens = sum_optional(self.completion_tokens, other.completion_tokens);
        self.total_tokens = sum_optional(self.total_tokens, other.total_tokens);
    }

    /// 콘솔 표시용 요약 문자열.
    pub fn summary(&self) -> String {
        fn show(v: Option<u64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
        }
        format!(
            "prompt={} completion={} total={}",
            show(self.prompt_tokens),
            show(self.completion_tokens),
            show(self.total_tokens)
        )
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
}

/// 파일 하나의 리뷰 결과.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub usage: TokenUsage,
}

/// 배치 실행 결과 요약.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ReviewOutcome>,
    pub usage: TokenUsage,
}

fn sum_optional(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x + y),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}
