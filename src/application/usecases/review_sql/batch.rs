//! 파일 단위 순차 리뷰 실행 단계.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::ports::CompletionProvider;
use crate::application::usecases::review_sql::{ReviewSqlUseCase, context::RunContext};
use crate::domain::prompt::{PromptPair, build_prompt_with_header_limit};
use crate::domain::review::{
    CompletionRequest, REVIEW_TEMPERATURE, ReviewOutcome, RunSummary,
};
use crate::domain::target::review_output_path;

/// 입력 순서대로 한 파일씩 읽기 → 프롬프트 → 호출 → 저장을 끝낸 뒤 다음 파일로 넘어간다.
/// 첫 에러에서 전체 실행을 중단한다.
pub(super) async fn run_batch(
    use_case: &ReviewSqlUseCase<'_>,
    ctx: &RunContext,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for sql_path in &ctx.inputs {
        let sql = use_case.workspace.read_sql(sql_path)?;
        let prompt = build_prompt_with_header_limit(&ctx.templates, &sql, ctx.header_max_lines);
        let name = display_name(sql_path);

        let Some(provider) = ctx.provider.as_deref() else {
            print_prompt(use_case, &name, &prompt);
            continue;
        };

        let outcome = review_one(use_case, provider, ctx, sql_path, &name, prompt).await?;
        summary.usage.add_from(&outcome.usage);
        summary.outcomes.push(outcome);
    }

    if ctx.provider.is_some() {
        use_case.reporter.section("Summary");
        for outcome in &summary.outcomes {
            use_case.reporter.kv(
                &display_name(&outcome.source),
                &format!("{} ({})", outcome.output.display(), outcome.usage.summary()),
            );
        }
        use_case
            .reporter
            .kv("Reviewed", &summary.outcomes.len().to_string());
        use_case.reporter.kv("Tokens", &summary.usage.summary());
    }
    use_case.reporter.raw("Done.");

    Ok(summary)
}

async fn review_one(
    use_case: &ReviewSqlUseCase<'_>,
    provider: &dyn CompletionProvider,
    ctx: &RunContext,
    sql_path: &Path,
    name: &str,
    prompt: PromptPair,
) -> Result<ReviewOutcome> {
    use_case
        .reporter
        .status("review", &format!("Reviewing: {name} ..."));

    let request = CompletionRequest {
        model: ctx.model.clone(),
        system: prompt.system,
        user: prompt.user,
        temperature: REVIEW_TEMPERATURE,
    };
    info!(file = %sql_path.display(), provider = provider.name(), "requesting review");

    let response = provider
        .complete(&request)
        .await
        .with_context(|| format!("failed to review {}", sql_path.display()))?;

    let output = review_output_path(sql_path, ctx.out_dir.as_deref());
    use_case.workspace.write_review(&output, &response.content)?;
    use_case
        .reporter
        .status("saved", &format!("Saved: {}", output.display()));
    use_case.reporter.kv("Tokens", &response.usage.summary());

    Ok(ReviewOutcome {
        source: sql_path.to_path_buf(),
        output,
        usage: response.usage,
    })
}

fn print_prompt(use_case: &ReviewSqlUseCase<'_>, name: &str, prompt: &PromptPair) {
    use_case.reporter.section(&format!("Prompt: {name}"));
    use_case.reporter.raw("--- system ---");
    use_case.reporter.raw(&prompt.system);
    use_case.reporter.raw("--- user ---");
    use_case.reporter.raw(&prompt.user);
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
