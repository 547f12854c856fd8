use crate::host::PreviousState;
use domain::{EventName, ToDo};
use shared::{NotificationSubscriber, Subscription};
use tokio::sync::watch;
use tracing::debug;

/// ToDo の詳細画面
///
/// 生成時に更新通知を購読し、通知を受けるたびに表示中の ToDo を丸ごと置き換える。
/// 通知がどのエンティティのものかは確認しない。
#[derive(Debug)]
pub struct DetailView {
    to_do: watch::Receiver<ToDo>,
    previous_state: String,
    subscription: Subscription,
}

impl DetailView {
    pub fn new(
        entity: ToDo,
        previous_state: &PreviousState,
        subscriber: &dyn NotificationSubscriber<ToDo>,
        event: &EventName,
    ) -> Self {
        let (sender, to_do) = watch::channel(entity);
        let subscription = subscriber.subscribe(
            event,
            Box::new(move |result: &ToDo| {
                debug!(todo_id = ?result.id, "Detail view refreshed from notification");
                sender.send_replace(result.clone());
            }),
        );

        Self {
            to_do,
            previous_state: previous_state.name.clone(),
            subscription,
        }
    }

    /// 現在表示中の ToDo
    pub fn to_do(&self) -> ToDo {
        self.to_do.borrow().clone()
    }

    pub fn previous_state(&self) -> &str {
        &self.previous_state
    }

    /// 表示中の ToDo の変更を監視するレシーバ
    pub fn changes(&self) -> watch::Receiver<ToDo> {
        self.to_do.clone()
    }

    /// 画面の破棄。購読はここで一度だけ解除される
    pub fn destroy(self) {
        let DetailView { subscription, .. } = self;
        subscription.unsubscribe();
    }
}
