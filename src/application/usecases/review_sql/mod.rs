//! SQL 파일 배치 리뷰 유스케이스.

mod batch;
mod context;

use anyhow::Result;

use crate::application::ports::{
    ConfigRepository, PromptTemplateSource, ProviderFactory, Reporter, SqlWorkspace,
};
use crate::domain::review::{RunOptions, RunSummary};

use batch::run_batch;
use context::load_run_context;

/// 입력 선택부터 프롬프트 조립, completion 호출, 결과 저장까지 전체 흐름을 조율한다.
pub struct ReviewSqlUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub template_source: &'a dyn PromptTemplateSource,
    pub workspace: &'a dyn SqlWorkspace,
    pub provider_factory: &'a dyn ProviderFactory,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ReviewSqlUseCase<'a> {
    /// 리뷰 본 실행 진입점.
    pub async fn execute(&self, options: RunOptions) -> Result<RunSummary> {
        self.reporter.section("Session");
        self.reporter.kv("Input", &options.input.display().to_string());
        self.reporter
            .kv("Mode", if options.dry_run { "dry-run" } else { "review" });

        let ctx = load_run_context(self, &options)?;
        run_batch(self, &ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use anyhow::{Result, bail};
    use async_trait::async_trait;

    use super::*;
    use crate::application::config::Config;
    use crate::application::ports::CompletionProvider;
    use crate::domain::prompt::PromptTemplates;
    use crate::domain::review::{
        CompletionRequest, CompletionResponse, REVIEW_TEMPERATURE, TokenUsage,
    };
    use crate::domain::target::{is_sql_dir_member, is_sql_file};

    struct FixedConfig(Config);

    impl ConfigRepository for FixedConfig {
        fn load(&self) -> Result<Config> {
            Ok(self.0.clone())
        }

        fn inspect_pretty_json(&self) -> Result<String> {
            Ok("{}".to_string())
        }
    }

    struct StaticTemplates;

    impl PromptTemplateSource for StaticTemplates {
        fn load(&self, _prompts_dir: &Path) -> Result<PromptTemplates> {
            Ok(PromptTemplates {
                system: "system".to_string(),
                reviewer: "reviewer".to_string(),
                output_schema: "schema".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MemoryWorkspace {
        files: BTreeMap<PathBuf, String>,
        written: Mutex<Vec<(PathBuf, String)>>,
    }

    impl MemoryWorkspace {
        fn with_files(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, body)| (PathBuf::from(p), body.to_string()))
                    .collect(),
                written: Mutex::new(Vec::new()),
            }
        }

        fn written(&self) -> Vec<(PathBuf, String)> {
            self.written.lock().unwrap().clone()
        }
    }

    impl SqlWorkspace for MemoryWorkspace {
        fn collect_inputs(&self, input: &Path) -> Result<Vec<PathBuf>> {
            if self.files.contains_key(input) {
                if !is_sql_file(input) {
                    bail!("Input must be a .sql file or a directory containing .sql files.");
                }
                return Ok(vec![input.to_path_buf()]);
            }
            Ok(self
                .files
                .keys()
                .filter(|p| p.parent() == Some(input) && is_sql_dir_member(p))
                .cloned()
                .collect())
        }

        fn read_sql(&self, path: &Path) -> Result<String> {
            match self.files.get(path) {
                Some(body) => Ok(body.clone()),
                None => bail!("no such file: {}", path.display()),
            }
        }

        fn write_review(&self, path: &Path, body: &str) -> Result<()> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), body.to_string()));
            Ok(())
        }
    }

    /// 호출을 기록하고, `fail_on`에 해당하는 user 프롬프트에서 실패하는 provider.
    struct RecordingProvider {
        calls: std::sync::Arc<Mutex<Vec<CompletionRequest>>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl CompletionProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
            self.calls.lock().unwrap().push(request.clone());
            if let Some(marker) = self.fail_on
                && request.user.contains(marker)
            {
                bail!("service unavailable");
            }
            Ok(CompletionResponse {
                content: format!("review #{}", self.calls.lock().unwrap().len()),
                usage: TokenUsage {
                    prompt_tokens: Some(3),
                    completion_tokens: Some(2),
                    total_tokens: Some(5),
                },
            })
        }
    }

    #[derive(Default)]
    struct FakeFactory {
        calls: std::sync::Arc<Mutex<Vec<CompletionRequest>>>,
        missing_credential: bool,
        fail_on: Option<&'static str>,
        builds: Mutex<usize>,
    }

    impl FakeFactory {
        fn calls(&self) -> Vec<CompletionRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProviderFactory for FakeFactory {
        fn build(&self, _config: &Config) -> Result<Box<dyn CompletionProvider>> {
            *self.builds.lock().unwrap() += 1;
            if self.missing_credential {
                bail!("Missing OPENAI_API_KEY. Set it in your environment or a .env file.");
            }
            Ok(Box::new(RecordingProvider {
                calls: self.calls.clone(),
                fail_on: self.fail_on,
            }))
        }

        fn resolve_model(&self, config: &Config) -> String {
            config
                .provider
                .model
                .clone()
                .unwrap_or_else(|| "default-model".to_string())
        }
    }

    #[derive(Default)]
    struct CapturingReporter {
        lines: Mutex<Vec<String>>,
    }

    impl CapturingReporter {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Reporter for CapturingReporter {
        fn section(&self, name: &str) {
            self.lines.lock().unwrap().push(format!("== {name}"));
        }

        fn kv(&self, key: &str, value: &str) {
            self.lines.lock().unwrap().push(format!("{key}: {value}"));
        }

        fn status(&self, _scope: &str, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }

        fn raw(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    struct Harness {
        config: FixedConfig,
        workspace: MemoryWorkspace,
        factory: FakeFactory,
        reporter: CapturingReporter,
    }

    impl Harness {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                config: FixedConfig(Config::default()),
                workspace: MemoryWorkspace::with_files(files),
                factory: FakeFactory::default(),
                reporter: CapturingReporter::default(),
            }
        }

        fn use_case(&self) -> ReviewSqlUseCase<'_> {
            ReviewSqlUseCase {
                config_repo: &self.config,
                template_source: &StaticTemplates,
                workspace: &self.workspace,
                provider_factory: &self.factory,
                reporter: &self.reporter,
            }
        }
    }

    fn options(input: &str) -> RunOptions {
        RunOptions {
            input: PathBuf::from(input),
            ..RunOptions::default()
        }
    }

    #[tokio::test]
    async fn reviews_directory_in_sorted_order() {
        let harness = Harness::new(&[
            ("q/b.sql", "select 'b'"),
            ("q/a.sql", "-- daily totals\nselect 'a'"),
            ("q/c.txt", "not sql"),
        ]);

        let summary = harness.use_case().execute(options("q")).await.unwrap();

        let calls = harness.factory.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].user.contains("select 'a'"));
        assert!(calls[0].user.contains("### Context from SQL file header\ndaily totals"));
        assert!(calls[1].user.contains("select 'b'"));
        assert!(!calls[1].user.contains("Context from SQL file header"));
        assert!(calls.iter().all(|c| c.temperature == REVIEW_TEMPERATURE));
        assert!(calls.iter().all(|c| c.model == "default-model"));
        assert_eq!(calls[0].system, "system");

        assert_eq!(
            harness.workspace.written(),
            vec![
                (PathBuf::from("q/a.review.md"), "review #1".to_string()),
                (PathBuf::from("q/b.review.md"), "review #2".to_string()),
            ]
        );
        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.usage.total_tokens, Some(10));

        let lines = harness.reporter.lines();
        assert!(lines.contains(&"Reviewing: a.sql ...".to_string()));
        assert!(lines.contains(&"Saved: q/a.review.md".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Done."));
    }

    #[tokio::test]
    async fn reports_token_usage_per_file_and_in_total() {
        let harness = Harness::new(&[("q/a.sql", "select 'a'"), ("q/b.sql", "select 'b'")]);

        harness.use_case().execute(options("q")).await.unwrap();

        let lines = harness.reporter.lines();
        let per_file = lines
            .iter()
            .filter(|l| l.as_str() == "Tokens: prompt=3 completion=2 total=5")
            .count();
        assert_eq!(per_file, 2);

        let saved_a = lines.iter().position(|l| l == "Saved: q/a.review.md").unwrap();
        assert_eq!(lines[saved_a + 1], "Tokens: prompt=3 completion=2 total=5");

        let summary = lines.iter().position(|l| l == "== Summary").unwrap();
        let tail = &lines[summary..];
        assert!(tail.contains(&"a.sql: q/a.review.md (prompt=3 completion=2 total=5)".to_string()));
        assert!(tail.contains(&"b.sql: q/b.review.md (prompt=3 completion=2 total=5)".to_string()));
        assert!(tail.contains(&"Tokens: prompt=6 completion=4 total=10".to_string()));
    }

    #[tokio::test]
    async fn writes_under_output_dir_when_given() {
        let harness = Harness::new(&[("q/orders.sql", "select 1")]);
        let mut opts = options("q/orders.sql");
        opts.out_dir = Some(PathBuf::from("reviews"));

        harness.use_case().execute(opts).await.unwrap();

        let written = harness.workspace.written();
        assert_eq!(written[0].0, PathBuf::from("reviews/orders.review.md"));
    }

    #[tokio::test]
    async fn cli_model_overrides_config() {
        let mut harness = Harness::new(&[("q/orders.sql", "select 1")]);
        harness.config.0.provider.model = Some("config-model".to_string());
        let mut opts = options("q/orders.sql");
        opts.model = Some("cli-model".to_string());

        harness.use_case().execute(opts).await.unwrap();

        assert_eq!(harness.factory.calls()[0].model, "cli-model");
    }

    #[tokio::test]
    async fn missing_credential_aborts_before_any_call() {
        let mut harness = Harness::new(&[("q/orders.sql", "select 1")]);
        harness.factory.missing_credential = true;

        let err = harness
            .use_case()
            .execute(options("q"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Missing OPENAI_API_KEY"));
        assert!(harness.factory.calls().is_empty());
        assert!(harness.workspace.written().is_empty());
    }

    #[tokio::test]
    async fn non_sql_file_is_rejected_before_any_call() {
        let harness = Harness::new(&[("q/notes.txt", "hello")]);

        let err = harness
            .use_case()
            .execute(options("q/notes.txt"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Input must be a .sql file"));
        assert!(harness.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_selection_is_an_error() {
        let harness = Harness::new(&[("q/readme.md", "# nothing")]);

        let err = harness
            .use_case()
            .execute(options("q"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No .sql files found.");
        assert!(harness.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn first_failure_stops_remaining_files() {
        let mut harness = Harness::new(&[
            ("q/a.sql", "select 'a'"),
            ("q/b.sql", "select 'boom'"),
            ("q/c.sql", "select 'c'"),
        ]);
        harness.factory.fail_on = Some("boom");

        let err = harness
            .use_case()
            .execute(options("q"))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("service unavailable"));
        assert!(err.to_string().contains("q/b.sql"));
        assert_eq!(harness.factory.calls().len(), 2);
        assert_eq!(
            harness.workspace.written(),
            vec![(PathBuf::from("q/a.review.md"), "review #1".to_string())]
        );
    }

    #[tokio::test]
    async fn dry_run_prints_prompts_without_calling_or_writing() {
        let mut harness = Harness::new(&[("q/orders.sql", "-- ctx\nselect 1")]);
        harness.factory.missing_credential = true;
        let mut opts = options("q");
        opts.dry_run = true;

        let summary = harness.use_case().execute(opts).await.unwrap();

        assert_eq!(*harness.factory.builds.lock().unwrap(), 0);
        assert!(harness.factory.calls().is_empty());
        assert!(harness.workspace.written().is_empty());
        assert!(summary.outcomes.is_empty());

        let lines = harness.reporter.lines();
        assert!(lines.contains(&"== Prompt: orders.sql".to_string()));
        assert!(lines.iter().any(|l| l.contains("### Context from SQL file header\nctx")));
    }
}
