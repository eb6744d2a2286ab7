//! SQL 입력 선택/읽기와 리뷰 결과 저장 포트 구현(파일시스템).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::application::ports::SqlWorkspace;
use crate::domain::target::{is_sql_dir_member, is_sql_file};

/// 로컬 파일시스템 기반 작업 공간.
pub struct FileSystemSqlWorkspace;

impl SqlWorkspace for FileSystemSqlWorkspace {
    /// 디렉터리면 바로 아래의 `.sql` 파일(확장자 정확히 일치)을 경로순으로,
    /// 파일이면 확장자가 `.sql`(대소문자 무시)일 때만 선택한다.
    fn collect_inputs(&self, input: &Path) -> Result<Vec<PathBuf>> {
        if input.is_dir() {
            let entries = fs::read_dir(input)
                .with_context(|| format!("failed to list directory {}", input.display()))?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .with_context(|| format!("failed to list directory {}", input.display()))?
                    .path();
                if path.is_file() && is_sql_dir_member(&path) {
                    files.push(path);
                }
            }
            files.sort();
            return Ok(files);
        }

        if input.is_file() && is_sql_file(input) {
            return Ok(vec![input.to_path_buf()]);
        }

        bail!("Input must be a .sql file or a directory containing .sql files.")
    }

    fn read_sql(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read SQL file {}", path.display()))
    }

    /// 상위 디렉터리를 만든 뒤 응답을 그대로 기록한다.
    fn write_review(&self, path: &Path, body: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(path, body)
            .with_context(|| format!("failed to write review to {}", path.display()))
    }
}
