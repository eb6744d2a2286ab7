//! completion 서비스 provider 모듈.
//! OpenAI 호환 chat completions API 호출과 응답 표준화를 담당한다.

mod api_runner;
pub mod openai;

pub use openai::OpenAiProvider;
