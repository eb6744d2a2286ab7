//! 리뷰 프롬프트(system/user) 조립 규칙.

use super::header::{DEFAULT_HEADER_MAX_LINES, extract_header_context};

/// 프롬프트 디렉터리에서 읽어 온 고정 템플릿 묶음.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptTemplates {
    pub system: String,
    pub reviewer: String,
    pub output_schema: String,
}

/// completion 서비스에 전달할 메시지 쌍.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// 기본 헤더 탐색 한도로 프롬프트를 조립한다.
pub fn build_prompt(templates: &PromptTemplates, sql: &str) -> PromptPair {
    build_prompt_with_header_limit(templates, sql, DEFAULT_HEADER_MAX_LINES)
}

/// 리뷰 지침 → 출력 형식 → (헤더 컨텍스트) → SQL 코드 블록 순서로 user 메시지를 만든다.
pub fn build_prompt_with_header_limit(
    templates: &PromptTemplates,
    sql: &str,
    header_max_lines: usize,
) -> PromptPair {
    let header_ctx = extract_header_context(sql, header_max_lines);
    let context_block = if header_ctx.is_empty() {
        String::new()
    } else {
        format!("### Context from SQL file header\n{header_ctx}\n\n")
    };

    let user = format!(
        "{}\n\n{}\n\n{}### SQL\n```sql\n{}\n```",
        templates.reviewer.trim(),
        templates.output_schema.trim(),
        context_block,
        sql.trim()
    );

    PromptPair {
        system: templates.system.trim().to_string(),
        user,
    }
}
