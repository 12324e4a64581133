//! Transient notifications that expire on their own.
//!
//! The queue keeps its entries in a `watch` channel so a renderer can wait
//! for changes instead of polling. Each notification schedules its own
//! removal on the runtime it was created with; there is no manual dismissal.
use std::sync::Arc;
use std::time::Duration;

use aires_logging::aires_debug;
use tokio::runtime::Handle;
use tokio::sync::watch;
use uuid::Uuid;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(Uuid);

impl ToastId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastStatus {
    #[default]
    Default,
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastOptions {
    pub status: ToastStatus,
    pub duration: Duration,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            status: ToastStatus::Default,
            duration: DEFAULT_DURATION,
        }
    }
}

impl ToastOptions {
    pub fn status(status: ToastStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub description: String,
    pub status: ToastStatus,
    pub duration: Duration,
}

#[derive(Clone)]
pub struct ToastQueue {
    entries: Arc<watch::Sender<Vec<Toast>>>,
    runtime: Handle,
}

impl ToastQueue {
    pub fn new(runtime: Handle) -> Self {
        let (entries, _) = watch::channel(Vec::new());
        Self {
            entries: Arc::new(entries),
            runtime,
        }
    }

    /// Append a toast and schedule its removal after `options.duration`.
    pub fn notify(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        options: ToastOptions,
    ) -> ToastId {
        let toast = Toast {
            id: ToastId::new(),
            title: title.into(),
            description: description.into(),
            status: options.status,
            duration: options.duration,
        };
        let id = toast.id;
        aires_debug!("toast {:?} '{}' for {:?}", toast.status, toast.title, toast.duration);
        self.entries.send_modify(|entries| entries.push(toast));

        let entries = self.entries.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(options.duration).await;
            entries.send_modify(|entries| entries.retain(|toast| toast.id != id));
        });
        id
    }

    /// Current toasts, oldest first.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.entries.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.entries.subscribe()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("len", &self.len())
            .finish()
    }
}
