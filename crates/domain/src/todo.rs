use crate::errors::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 日付型フィールドの名前一覧（日付ピッカーの対象）
pub const DATE_FIELDS: [&str; 1] = ["creationDate"];

/// サーバー側のシーケンスで採番される ToDo の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToDoId(pub i64);

impl ToDoId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ToDoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToDoId {
    type Err = DomainError;

    /// ルートパラメータ（例: `/to-do/42`）の文字列から識別子を復元
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidToDoId(s.to_string()))
    }
}

/// 保存時にどの CRUD 操作を呼ぶか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Create,
    Update(ToDoId),
}

/// ToDo エンティティ
///
/// `id` は初回永続化後にのみ存在する。`id` の有無が作成/更新の唯一の判別条件。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDo {
    #[serde(default)]
    pub id: Option<ToDoId>,
    #[serde(default)]
    pub todo_name: Option<String>,
    #[serde(default)]
    pub todo_description: Option<String>,
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
}

impl ToDo {
    /// 未保存の空の ToDo を作成
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ToDoId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn todo_name(mut self, todo_name: impl Into<String>) -> Self {
        self.todo_name = Some(todo_name.into());
        self
    }

    pub fn todo_description(mut self, todo_description: impl Into<String>) -> Self {
        self.todo_description = Some(todo_description.into());
        self
    }

    pub fn creation_date(mut self, creation_date: NaiveDate) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    /// まだ作成されていない（識別子を持たない）かどうか
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// 識別子の有無から保存操作を決定
    pub fn save_action(&self) -> SaveAction {
        match self.id {
            Some(id) => SaveAction::Update(id),
            None => SaveAction::Create,
        }
    }

    /// 同一エンティティかどうかを識別子で判定
    ///
    /// どちらかが未保存の場合は常に false。
    pub fn same_entity(&self, other: &ToDo) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::Deserialization(e.to_string()))
    }
}

impl fmt::Display for ToDo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_null<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "null".to_string())
        }

        write!(
            f,
            "ToDo{{id={}, todoName='{}', todoDescription='{}', creationDate='{}'}}",
            or_null(&self.id),
            or_null(&self.todo_name),
            or_null(&self.todo_description),
            or_null(&self.creation_date),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
    }

    #[test]
    fn test_save_action_follows_identifier() {
        let new_todo = ToDo::new().todo_name("AAAAAAAAAA");
        assert!(new_todo.is_new());
        assert_eq!(new_todo.save_action(), SaveAction::Create);

        let saved = new_todo.with_id(ToDoId::new(7));
        assert!(!saved.is_new());
        assert_eq!(saved.save_action(), SaveAction::Update(ToDoId::new(7)));
    }

    #[test]
    fn test_same_entity_requires_both_ids() {
        let a = ToDo::new().with_id(ToDoId::new(1)).todo_name("a");
        let b = ToDo::new().with_id(ToDoId::new(1)).todo_name("b");
        let c = ToDo::new().with_id(ToDoId::new(2));
        let unsaved = ToDo::new();

        assert!(a.same_entity(&b));
        assert!(!a.same_entity(&c));
        assert!(!unsaved.same_entity(&unsaved.clone()));
        assert!(!a.same_entity(&unsaved));
    }

    #[test]
    fn test_json_uses_camel_case_and_iso_dates() {
        let todo = ToDo::new()
            .with_id(ToDoId::new(3))
            .todo_name("AAAAAAAAAA")
            .todo_description("BBBBBBBBBB")
            .creation_date(epoch());

        let value: serde_json::Value = serde_json::from_str(&todo.to_json().unwrap()).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["todoName"], "AAAAAAAAAA");
        assert_eq!(value["todoDescription"], "BBBBBBBBBB");
        assert_eq!(value["creationDate"], "1970-01-01");
    }

    #[test]
    fn test_from_json_tolerates_missing_fields() {
        let todo = ToDo::from_json(r#"{"id":null,"todoName":"x"}"#).unwrap();
        assert!(todo.is_new());
        assert_eq!(todo.todo_name.as_deref(), Some("x"));
        assert_eq!(todo.creation_date, None);

        assert!(matches!(
            ToDo::from_json("not json"),
            Err(DomainError::Deserialization(_))
        ));
    }

    #[test]
    fn test_todo_id_from_route_param() {
        assert_eq!("42".parse::<ToDoId>().unwrap(), ToDoId::new(42));
        assert_eq!(
            "abc".parse::<ToDoId>(),
            Err(DomainError::InvalidToDoId("abc".to_string()))
        );
    }

    #[test]
    fn test_display_matches_entity_format() {
        let todo = ToDo::new().with_id(ToDoId::new(1)).todo_name("x");
        assert_eq!(
            todo.to_string(),
            "ToDo{id=1, todoName='x', todoDescription='null', creationDate='null'}"
        );
    }
}
