use crate::host::{DismissReason, ModalHost};
use domain::{EventName, SaveAction, ToDo, DATE_FIELDS};
use infrastructure::{ResourceError, ToDoResource};
use shared::NotificationPublisher;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 表示直後にフォーカスを当てるフォームグループの位置
pub const FOCUSED_FORM_GROUP: usize = 1;

/// 保存処理の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Save failed: {0}")]
    Resource(#[from] ResourceError),
}

impl SaveError {
    /// 入力内容が拒否されたのか（通信エラーではなく）
    pub fn is_validation(&self) -> bool {
        match self {
            SaveError::Resource(e) => e.is_validation(),
        }
    }
}

/// 保存中の間だけ状態を Saving にするガード
struct SavingGuard<'a> {
    state: &'a watch::Sender<SaveState>,
}

impl<'a> SavingGuard<'a> {
    fn enter(state: &'a watch::Sender<SaveState>) -> Self {
        state.send_replace(SaveState::Saving);
        Self { state }
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(SaveState::Idle);
    }
}

/// ToDo の作成/編集モーダルダイアログ
pub struct EditDialog {
    to_do: ToDo,
    state: watch::Sender<SaveState>,
    date_picker_open_status: BTreeMap<String, bool>,
    last_error: Option<SaveError>,
    event: EventName,
    resource: Arc<dyn ToDoResource>,
    publisher: Arc<dyn NotificationPublisher<ToDo>>,
    modal: Arc<dyn ModalHost>,
}

impl EditDialog {
    /// ダイアログを開く
    ///
    /// 一度制御を返してホストの描画を待ってから、2 番目のフォームグループにフォーカスを移す。
    pub async fn open(
        entity: ToDo,
        resource: Arc<dyn ToDoResource>,
        publisher: Arc<dyn NotificationPublisher<ToDo>>,
        modal: Arc<dyn ModalHost>,
        event: EventName,
    ) -> Self {
        let date_picker_open_status = DATE_FIELDS
            .iter()
            .map(|field| (field.to_string(), false))
            .collect();

        let (state, _) = watch::channel(SaveState::Idle);
        let dialog = Self {
            to_do: entity,
            state,
            date_picker_open_status,
            last_error: None,
            event,
            resource,
            publisher,
            modal,
        };

        tokio::task::yield_now().await;
        dialog.modal.focus_form_group(FOCUSED_FORM_GROUP);
        dialog
    }

    pub fn to_do(&self) -> &ToDo {
        &self.to_do
    }

    /// フォーム入力の反映先
    pub fn to_do_mut(&mut self) -> &mut ToDo {
        &mut self.to_do
    }

    pub fn is_saving(&self) -> bool {
        *self.state.borrow() == SaveState::Saving
    }

    /// 保存状態の遷移を監視するレシーバ（保存ボタンの無効化用）
    pub fn state_changes(&self) -> watch::Receiver<SaveState> {
        self.state.subscribe()
    }

    /// 直近の保存失敗。次の保存開始時にクリアされる
    pub fn last_error(&self) -> Option<&SaveError> {
        self.last_error.as_ref()
    }

    /// 保存する
    ///
    /// 成功時は更新通知を発行してモーダルを閉じる。失敗時はモーダルを開いたまま
    /// 状態だけ Idle に戻し、再試行できるようにする。
    pub async fn save(&mut self) -> Result<ToDo, SaveError> {
        // future が途中で破棄されても Idle に戻す
        let _saving = SavingGuard::enter(&self.state);
        self.last_error = None;

        let result = match self.to_do.save_action() {
            SaveAction::Update(id) => {
                debug!(todo_id = %id, "Dispatching ToDo update");
                self.resource.update(&self.to_do).await
            }
            SaveAction::Create => {
                debug!("Dispatching ToDo create");
                self.resource.create(&self.to_do).await
            }
        };

        match result {
            Ok(saved) => {
                self.publisher.publish(&self.event, &saved);
                self.modal.close(saved.clone());
                info!(todo_id = ?saved.id, "ToDo saved");
                Ok(saved)
            }
            Err(e) => {
                let error = SaveError::from(e);
                warn!(
                    error = %error,
                    validation = error.is_validation(),
                    "ToDo save failed"
                );
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// キャンセル。通信も通知も行わない
    pub fn clear(&self) {
        self.modal.dismiss(DismissReason::Cancel);
    }

    /// 日付フィールドのピッカーを開く
    pub fn open_calendar(&mut self, field: &str) {
        self.date_picker_open_status.insert(field.to_string(), true);
    }

    pub fn is_calendar_open(&self, field: &str) -> bool {
        self.date_picker_open_status
            .get(field)
            .copied()
            .unwrap_or(false)
    }

    pub fn date_picker_open_status(&self) -> &BTreeMap<String, bool> {
        &self.date_picker_open_status
    }
}
