//! 名前付きイベントのプロセス内 pub/sub バス
//!
//! 配信は `publish` 呼び出し中に同期的に行われる。キューイングや永続化はしない。
//! 購読者がいない場合、イベントは黙って捨てられる。

use domain::EventName;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

/// 購読ハンドラ
pub type Handler<T> = Box<dyn Fn(&T) + Send + Sync>;

type SharedHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// 通知の発行側インターフェース
pub trait NotificationPublisher<T>: Send + Sync {
    /// 購読中の全ハンドラに配信し、呼び出したハンドラ数を返す
    fn publish(&self, event: &EventName, payload: &T) -> usize;
}

/// 通知の購読側インターフェース
pub trait NotificationSubscriber<T>: Send + Sync {
    /// ハンドラを登録する。返されたガードが破棄されると登録解除される
    fn subscribe(&self, event: &EventName, handler: Handler<T>) -> Subscription;
}

struct Registry<T> {
    next_id: u64,
    handlers: HashMap<EventName, Vec<(u64, SharedHandler<T>)>>,
}

impl<T> Registry<T> {
    fn remove(&mut self, event: &EventName, id: u64) -> bool {
        let Some(entries) = self.handlers.get_mut(event) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.handlers.remove(event);
        }
        removed
    }
}

/// イベントバス。クローンは同じ登録表を共有する
pub struct EventBus<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = lock(&self.registry);
        f.debug_struct("EventBus")
            .field("events", &registry.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: HashMap::new(),
            })),
        }
    }

    /// 指定イベントの購読者数
    pub fn subscriber_count(&self, event: &EventName) -> usize {
        lock(&self.registry)
            .handlers
            .get(event)
            .map_or(0, Vec::len)
    }
}

impl<T: 'static> NotificationPublisher<T> for EventBus<T> {
    fn publish(&self, event: &EventName, payload: &T) -> usize {
        // ハンドラ内から subscribe/unsubscribe できるようにロックを先に外す
        let handlers: Vec<SharedHandler<T>> = lock(&self.registry)
            .handlers
            .get(event)
            .map(|entries| entries.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        for handler in &handlers {
            handler(payload);
        }

        debug!(event = %event, subscribers = handlers.len(), "Notification published");
        handlers.len()
    }
}

impl<T: 'static> NotificationSubscriber<T> for EventBus<T> {
    fn subscribe(&self, event: &EventName, handler: Handler<T>) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry
                .handlers
                .entry(event.clone())
                .or_default()
                .push((id, Arc::from(handler)));
            id
        };
        debug!(event = %event, subscription_id = id, "Subscribed");

        let registry: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        let event = event.clone();
        Subscription::new(move || {
            // バスが先に破棄されていれば何もしない
            if let Some(registry) = registry.upgrade() {
                if lock(&registry).remove(&event, id) {
                    debug!(event = %event, subscription_id = id, "Unsubscribed");
                }
            }
        })
    }
}

/// 購読の解除ガード
///
/// `Drop` または `unsubscribe` のどちらか一度だけ解除処理が走る。
#[must_use = "dropping a Subscription immediately unsubscribes the handler"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// 明示的に購読を解除
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
