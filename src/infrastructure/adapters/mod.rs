//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod prompt_templates;
mod provider_factory;
mod reporter;
mod sql_workspace;

pub use config_repository::JsonConfigRepository;
pub use prompt_templates::FileSystemTemplateSource;
pub use provider_factory::ProviderFactoryAdapter;
pub use reporter::ConsoleReporter;
pub use sql_workspace::FileSystemSqlWorkspace;
