//! 프롬프트 템플릿 포트 구현(파일시스템).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::PromptTemplateSource;
use crate::domain::prompt::PromptTemplates;

const SYSTEM_FILE: &str = "system.md";
const REVIEWER_FILE: &str = "reviewer.md";
const OUTPUT_SCHEMA_FILE: &str = "output_schema.md";

/// 프롬프트 디렉터리의 `system.md`, `reviewer.md`, `output_schema.md`를 읽는다.
pub struct FileSystemTemplateSource;

impl PromptTemplateSource for FileSystemTemplateSource {
    fn load(&self, prompts_dir: &Path) -> Result<PromptTemplates> {
        Ok(PromptTemplates {
            system: read_template(prompts_dir, SYSTEM_FILE)?,
            reviewer: read_template(prompts_dir, REVIEWER_FILE)?,
            output_schema: read_template(prompts_dir, OUTPUT_SCHEMA_FILE)?,
        })
    }
}

fn read_template(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read prompt template at {}", path.display()))
}
