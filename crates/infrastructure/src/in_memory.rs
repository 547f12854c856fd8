use crate::resource::{ResourceError, ToDoResource};
use async_trait::async_trait;
use domain::{ToDo, ToDoId};
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug)]
struct Store {
    next_id: i64,
    records: BTreeMap<ToDoId, ToDo>,
    pending_failure: Option<ResourceError>,
}

impl Store {
    fn take_failure(&mut self) -> Result<(), ResourceError> {
        match self.pending_failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn insert_new(&mut self, todo: &ToDo) -> ToDo {
        self.next_id += 1;
        let saved = todo.clone().with_id(ToDoId::new(self.next_id));
        self.records.insert(ToDoId::new(self.next_id), saved.clone());
        saved
    }
}

/// メモリ上で `/api/to-dos` と同じ振る舞いをする CRUD リソース
///
/// 識別子は 1 から順に採番される。
#[derive(Debug)]
pub struct InMemoryToDoResource {
    store: Mutex<Store>,
}

impl Default for InMemoryToDoResource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryToDoResource {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 0,
                records: BTreeMap::new(),
                pending_failure: None,
            }),
        }
    }

    /// 次の呼び出しを指定エラーで失敗させる
    pub async fn fail_next(&self, error: ResourceError) {
        self.store.lock().await.pending_failure = Some(error);
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ToDoResource for InMemoryToDoResource {
    async fn create(&self, todo: &ToDo) -> Result<ToDo, ResourceError> {
        let mut store = self.store.lock().await;
        store.take_failure()?;

        if todo.id.is_some() {
            return Err(ResourceError::Validation(
                "A new toDo cannot already have an ID".to_string(),
            ));
        }

        let saved = store.insert_new(todo);
        info!(todo_id = ?saved.id, "ToDo created");
        Ok(saved)
    }

    async fn update(&self, todo: &ToDo) -> Result<ToDo, ResourceError> {
        let mut store = self.store.lock().await;
        store.take_failure()?;

        let Some(id) = todo.id else {
            let saved = store.insert_new(todo);
            info!(todo_id = ?saved.id, "ToDo created by update");
            return Ok(saved);
        };

        match store.records.get_mut(&id) {
            Some(record) => {
                *record = todo.clone();
                info!(todo_id = %id, "ToDo updated");
                Ok(todo.clone())
            }
            None => Err(ResourceError::NotFound(id)),
        }
    }

    async fn get(&self, id: ToDoId) -> Result<ToDo, ResourceError> {
        let mut store = self.store.lock().await;
        store.take_failure()?;
        store
            .records
            .get(&id)
            .cloned()
            .ok_or(ResourceError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<ToDo>, ResourceError> {
        let mut store = self.store.lock().await;
        store.take_failure()?;
        debug!(count = store.records.len(), "Listing ToDos");
        Ok(store.records.values().cloned().collect())
    }

    async fn delete(&self, id: ToDoId) -> Result<(), ResourceError> {
        let mut store = self.store.lock().await;
        store.take_failure()?;
        match store.records.remove(&id) {
            Some(_) => {
                info!(todo_id = %id, "ToDo deleted");
                Ok(())
            }
            None => Err(ResourceError::NotFound(id)),
        }
    }
}
