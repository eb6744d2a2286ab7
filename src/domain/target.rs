//! 리뷰 입력 파일 판별과 결과 파일 경로 규칙.

use std::path::{Path, PathBuf};

const SQL_EXTENSION: &str = "sql";
const REVIEW_SUFFIX: &str = ".review.md";

/// 단일 입력 파일 판별: 확장자가 `.sql`(대소문자 무시)인지 확인한다.
pub fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SQL_EXTENSION))
}

/// 디렉터리 입력의 구성원 판별: 정확히 `.sql`만 허용한다.
/// `a.sql`과 `a.SQL`이 같은 결과 파일로 겹치지 않게 한다.
pub fn is_sql_dir_member(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SQL_EXTENSION)
}

/// `<stem>.review.md` 경로를 계산한다.
/// 출력 디렉터리가 없으면 입력 파일 옆에 둔다.
pub fn review_output_path(sql_path: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = sql_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{REVIEW_SUFFIX}");

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => sql_path.with_file_name(file_name),
    }
}
