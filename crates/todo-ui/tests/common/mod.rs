//! 結合テスト用のテストダブル

#![allow(dead_code)]

use async_trait::async_trait;
use domain::{EventName, ToDo, ToDoId};
use infrastructure::{ResourceError, ToDoResource};
use std::sync::Mutex;
use todo_ui::{DismissReason, ModalHost, SaveState};
use tokio::sync::watch;

pub fn update_event() -> EventName {
    EventName::todo_update("hipToDoApp").unwrap()
}

/// モーダル操作を記録するホスト
#[derive(Default)]
pub struct RecordingModal {
    pub closed: Mutex<Vec<ToDo>>,
    pub dismissed: Mutex<Vec<DismissReason>>,
    pub focused: Mutex<Vec<usize>>,
}

impl ModalHost for RecordingModal {
    fn close(&self, result: ToDo) {
        self.closed.lock().unwrap().push(result);
    }

    fn dismiss(&self, reason: DismissReason) {
        self.dismissed.lock().unwrap().push(reason);
    }

    fn focus_form_group(&self, index: usize) {
        self.focused.lock().unwrap().push(index);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(ToDo),
    Update(ToDo),
}

/// 呼び出しを記録し、あらかじめ決めた結果を返すリソース
///
/// 応答が未設定なら create は id=100 を採番し、update は入力をそのまま返す。
#[derive(Default)]
pub struct ScriptedResource {
    pub calls: Mutex<Vec<Call>>,
    response: Mutex<Option<Result<ToDo, ResourceError>>>,
    state: Mutex<Option<watch::Receiver<SaveState>>>,
    pub states_during_call: Mutex<Vec<SaveState>>,
}

impl ScriptedResource {
    pub fn respond_with(&self, response: Result<ToDo, ResourceError>) {
        *self.response.lock().unwrap() = Some(response);
    }

    /// 呼び出し中のダイアログの保存状態を記録する
    pub fn observe(&self, state: watch::Receiver<SaveState>) {
        *self.state.lock().unwrap() = Some(state);
    }

    fn record(&self, call: Call) {
        if let Some(state) = self.state.lock().unwrap().as_ref() {
            self.states_during_call.lock().unwrap().push(*state.borrow());
        }
        self.calls.lock().unwrap().push(call);
    }

    fn scripted(&self) -> Option<Result<ToDo, ResourceError>> {
        self.response.lock().unwrap().take()
    }
}

#[async_trait]
impl ToDoResource for ScriptedResource {
    async fn create(&self, todo: &ToDo) -> Result<ToDo, ResourceError> {
        self.record(Call::Create(todo.clone()));
        tokio::task::yield_now().await;
        self.scripted()
            .unwrap_or_else(|| Ok(todo.clone().with_id(ToDoId::new(100))))
    }

    async fn update(&self, todo: &ToDo) -> Result<ToDo, ResourceError> {
        self.record(Call::Update(todo.clone()));
        tokio::task::yield_now().await;
        self.scripted().unwrap_or_else(|| Ok(todo.clone()))
    }

    async fn get(&self, id: ToDoId) -> Result<ToDo, ResourceError> {
        Err(ResourceError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<ToDo>, ResourceError> {
        Ok(Vec::new())
    }

    async fn delete(&self, id: ToDoId) -> Result<(), ResourceError> {
        Err(ResourceError::NotFound(id))
    }
}

/// create / update が完了しないリソース（応答のないサーバー相当）
#[derive(Default)]
pub struct StalledResource;

#[async_trait]
impl ToDoResource for StalledResource {
    async fn create(&self, _todo: &ToDo) -> Result<ToDo, ResourceError> {
        std::future::pending().await
    }

    async fn update(&self, _todo: &ToDo) -> Result<ToDo, ResourceError> {
        std::future::pending().await
    }

    async fn get(&self, id: ToDoId) -> Result<ToDo, ResourceError> {
        Err(ResourceError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<ToDo>, ResourceError> {
        Ok(Vec::new())
    }

    async fn delete(&self, id: ToDoId) -> Result<(), ResourceError> {
        Err(ResourceError::NotFound(id))
    }
}
