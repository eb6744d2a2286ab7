//! Domain layer
//! SQL 리뷰 규칙(헤더 추출/프롬프트 조립/경로 정책)을 외부 의존성 없이 표현한다.

pub mod header;
pub mod prompt;
pub mod review;
pub mod target;
