use anyhow::Context;
use chrono::Utc;
use domain::{DomainError, EventName, ToDo, ToDoId};
use infrastructure::{InMemoryToDoResource, ResourceError, ToDoResource};
use shared::{init_tracing, Config, EventBus};
use std::sync::Arc;
use todo_ui::{DetailView, DismissReason, EditDialog, ModalHost, PreviousState};
use tracing::info;

/// ログに出すだけのモーダルホスト
struct LoggingModal;

impl ModalHost for LoggingModal {
    fn close(&self, result: ToDo) {
        info!(result = %result, "Modal closed");
    }

    fn dismiss(&self, reason: DismissReason) {
        info!(reason = %reason, "Modal dismissed");
    }

    fn focus_form_group(&self, index: usize) {
        info!(form_group = index, "Focus moved");
    }
}

/// ルーター相当: `/to-do/{id}` から識別子を解決する
fn resolve_route(path: &str) -> Result<ToDoId, DomainError> {
    path.strip_prefix("/to-do/")
        .ok_or_else(|| DomainError::InvalidToDoId(path.to_string()))?
        .parse()
}

struct App {
    bus: EventBus<ToDo>,
    resource: Arc<InMemoryToDoResource>,
    event: EventName,
}

impl App {
    async fn open_dialog(&self, entity: ToDo) -> EditDialog {
        EditDialog::open(
            entity,
            self.resource.clone(),
            Arc::new(self.bus.clone()),
            Arc::new(LoggingModal),
            self.event.clone(),
        )
        .await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(&config).context("failed to initialise tracing")?;

    let app = App {
        bus: EventBus::new(),
        resource: Arc::new(InMemoryToDoResource::new()),
        event: config.todo_update_event()?,
    };
    info!(environment = %config.environment, event = %app.event, "Starting ToDo demo session");

    // 新規作成
    let mut dialog = app.open_dialog(ToDo::new()).await;
    *dialog.to_do_mut() =
        ToDo::from_json(r#"{"id":null,"todoName":"Buy milk","todoDescription":"2 litres"}"#)?
            .creation_date(Utc::now().date_naive());
    dialog.open_calendar("creationDate");
    let created = dialog.save().await?;

    // 詳細画面を表示したまま編集
    let route = format!("/to-do/{}", created.id.map(|id| id.value()).unwrap_or_default());
    let resolved = app.resource.get(resolve_route(&route)?).await?;
    let payload = resolved.to_json()?;
    info!(route = %route, payload = %payload, "Route resolved");
    let view = DetailView::new(
        resolved,
        &PreviousState::new("to-do"),
        &app.bus,
        &app.event,
    );
    let mut edit = app.open_dialog(created.clone()).await;
    edit.to_do_mut().todo_description = Some("3 litres".to_string());
    edit.save().await?;
    info!(displayed = %view.to_do(), "Detail view after edit");

    // 失敗しても再試行できる
    let mut retry = app.open_dialog(view.to_do()).await;
    app.resource
        .fail_next(ResourceError::Transport("connection reset".to_string()))
        .await;
    if let Err(e) = retry.save().await {
        info!(error = %e, saving = retry.is_saving(), "Save failed, retrying");
        retry.save().await?;
    }

    // キャンセル
    app.open_dialog(view.to_do()).await.clear();

    view.destroy();
    info!(count = app.resource.list().await?.len(), "Demo session finished");
    Ok(())
}
