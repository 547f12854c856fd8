use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ToDo 更新通知のイベント名サフィックス
pub const TODO_UPDATE_SUFFIX: &str = "toDoUpdate";

/// 通知チャネル上のイベント名（例: `hipToDoApp:toDoUpdate`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    /// イベント名を検証して作成
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEventName(name));
        }
        Ok(Self(name))
    }

    /// アプリケーション名から ToDo 更新イベント名を作成
    pub fn todo_update(app_name: &str) -> Result<Self, DomainError> {
        Self::new(format!("{app_name}:{TODO_UPDATE_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_update_event_name() {
        let name = EventName::todo_update("hipToDoApp").unwrap();
        assert_eq!(name.as_str(), "hipToDoApp:toDoUpdate");
        assert_eq!(name.to_string(), "hipToDoApp:toDoUpdate");
    }

    #[test]
    fn test_event_name_validation() {
        assert!(EventName::new("").is_err());
        assert!(EventName::new("my app:toDoUpdate").is_err());
        assert!(EventName::todo_update("bad name").is_err());
    }
}
