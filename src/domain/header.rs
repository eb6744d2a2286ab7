//! SQL 파일 상단 주석 블록에서 리뷰 컨텍스트를 추출한다.

/// 헤더 탐색 시 기본으로 검사하는 최대 줄 수.
pub const DEFAULT_HEADER_MAX_LINES: usize = 25;

const COMMENT_MARKER: &str = "--";

/// 파일 상단의 `--` 주석을 모아 컨텍스트 문자열로 만든다.
///
/// 빈 줄은 건너뛰고, 주석이 아닌 첫 줄에서 즉시 멈춘다.
/// 그 뒤의 줄은 주석이어도 보지 않는다.
pub fn extract_header_context(sql: &str, max_lines: usize) -> String {
    let mut ctx_lines = Vec::new();

    for line in sql.lines().take(max_lines) {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        let Some(comment) = stripped.strip_prefix(COMMENT_MARKER) else {
            break;
        };
        ctx_lines.push(comment.trim());
    }

    ctx_lines.join("\n").trim().to_string()
}
