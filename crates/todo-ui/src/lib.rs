//! ToDo エンティティの詳細画面と作成/編集ダイアログのコントローラ

pub mod detail;
pub mod dialog;
pub mod host;

pub use detail::*;
pub use dialog::*;
pub use host::*;
