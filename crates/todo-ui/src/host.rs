use domain::ToDo;
use std::fmt;

/// ダイアログを閉じた理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Cancel,
}

impl DismissReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DismissReason::Cancel => "cancel",
        }
    }
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// モーダルをホストする UI 側のコントロール
pub trait ModalHost: Send + Sync {
    /// 保存結果を返してモーダルを閉じる
    fn close(&self, result: ToDo);

    /// 結果なしでモーダルを閉じる
    fn dismiss(&self, reason: DismissReason);

    /// 指定位置のフォームグループの入力欄にフォーカスを移す
    fn focus_form_group(&self, index: usize);
}

/// ルーターが解決した遷移元の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousState {
    pub name: String,
}

impl PreviousState {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
