use async_trait::async_trait;
use domain::{ToDo, ToDoId};
use thiserror::Error;

/// CRUD リソース呼び出しのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// サーバーがペイロードを拒否した（400 相当）
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("ToDo not found: {0}")]
    NotFound(ToDoId),

    /// 通信エラーやサーバー内部エラー
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ResourceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ResourceError::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ResourceError::Transport(_))
    }
}

/// ToDo の CRUD リソース
///
/// 各呼び出しは一回限りで、リトライはしない。
#[async_trait]
pub trait ToDoResource: Send + Sync {
    /// 新規作成。識別子を持つ ToDo は拒否される
    async fn create(&self, todo: &ToDo) -> Result<ToDo, ResourceError>;

    /// 更新。識別子を持たない ToDo は新規作成として扱われる
    async fn update(&self, todo: &ToDo) -> Result<ToDo, ResourceError>;

    async fn get(&self, id: ToDoId) -> Result<ToDo, ResourceError>;

    async fn list(&self) -> Result<Vec<ToDo>, ResourceError>;

    async fn delete(&self, id: ToDoId) -> Result<(), ResourceError>;
}
