//! 리뷰 실행 컨텍스트(설정/provider/템플릿/입력 목록) 준비 단계.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::application::config::Config;
use crate::application::ports::CompletionProvider;
use crate::application::usecases::review_sql::ReviewSqlUseCase;
use crate::domain::prompt::PromptTemplates;
use crate::domain::review::RunOptions;

/// 배치 실행 전 구간에서 공유되는 상태.
pub(super) struct RunContext {
    pub model: String,
    /// dry-run이면 None
    pub provider: Option<Box<dyn CompletionProvider>>,
    pub templates: PromptTemplates,
    pub inputs: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub header_max_lines: usize,
}

/// 설정 로딩, 인증 확인, 템플릿 로딩, 입력 파일 선택까지 선행한다.
/// 어느 단계든 실패하면 네트워크 호출 없이 종료된다.
pub(super) fn load_run_context(
    use_case: &ReviewSqlUseCase<'_>,
    options: &RunOptions,
) -> Result<RunContext> {
    let config: Config = use_case
        .config_repo
        .load()
        .context("failed to load sqlpilot config")?
        .with_run_overrides(options);

    let model = use_case.provider_factory.resolve_model(&config);
    let provider = if options.dry_run {
        None
    } else {
        Some(use_case.provider_factory.build(&config)?)
    };

    let prompts_dir = config.prompts_dir();
    let templates = use_case.template_source.load(&prompts_dir)?;
    use_case.reporter.kv("Prompts", &prompts_dir.display().to_string());
    use_case.reporter.kv("Model", &model);

    let inputs = use_case.workspace.collect_inputs(&options.input)?;
    if inputs.is_empty() {
        bail!("No .sql files found.");
    }
    debug!(count = inputs.len(), "selected sql inputs");

    let out_dir = config.output_dir();
    if let Some(dir) = &out_dir {
        use_case.reporter.kv("Output", &dir.display().to_string());
    }

    Ok(RunContext {
        model,
        provider,
        templates,
        inputs,
        out_dir,
        header_max_lines: config.header_max_lines(),
    })
}
