//! Periodic background refresh.
//!
//! Dashboard screens re-pull their data on a fixed cadence while the admin
//! keeps them open. The screen owns an [`AutoRefresh`] handle; dropping it
//! (navigating away) stops the refresh task with it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::components::list::{ListController, ListSource};

/// How often dashboard screens re-pull their data.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to a background refresh task. Aborts the task on drop.
#[derive(Debug)]
pub struct AutoRefresh {
    handle: JoinHandle<()>,
}

impl AutoRefresh {
    /// Run `tick` every `period` until cancelled or dropped.
    ///
    /// The first tick fires one full period after spawn; the screen has
    /// just loaded, so an immediate refresh would be a wasted request.
    /// A tick that runs long delays the next one rather than bunching.
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                tick().await;
            }
        });
        Self { handle }
    }

    /// Refresh a shared list controller every `period`.
    pub fn for_list<S>(controller: Arc<Mutex<ListController<S>>>, period: Duration) -> Self
    where
        S: ListSource + Send + Sync + 'static,
        S::Entity: Send,
    {
        Self::spawn(period, move || {
            let controller = Arc::clone(&controller);
            async move {
                controller.lock().await.fetch().await;
            }
        })
    }

    /// Stop the refresh task.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the refresh task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
