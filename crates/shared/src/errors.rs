use thiserror::Error;

/// アプリケーション共通のエラー型
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Tracing initialization error: {0}")]
    Tracing(String),
}
