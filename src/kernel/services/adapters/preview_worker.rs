//! Background bundling.
//!
//! One bundling task per project. Trees are handed over through a `watch` channel, so a
//! pass always sees the newest tree and superseded trees are dropped without being bundled.
//! Passes never overlap. A notice follows the bundle whenever the selected entry changes.

use crate::kernel::services::bus::{EventSender, NoticeLevel, PreviewEvent};
use crate::kernel::services::ports::PreviewConfig;
use crate::models::FileTree;
use crate::preview::PreviewBundler;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

pub struct PreviewWorker {
    runtime: tokio::runtime::Runtime,
    tx: watch::Sender<Option<Arc<FileTree>>>,
}

impl PreviewWorker {
    pub fn spawn(config: PreviewConfig, events: EventSender) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("preview-worker")
            .build()?;

        let (tx, mut rx) = watch::channel::<Option<Arc<FileTree>>>(None);

        runtime.spawn(async move {
            let mut bundler = PreviewBundler::new(config);
            let mut last_entry: Option<Option<String>> = None;
            while rx.changed().await.is_ok() {
                let latest = rx.borrow_and_update().clone();
                let Some(tree) = latest else {
                    continue;
                };
                let bundle = bundler.bundle(&tree);
                let entry = bundle.entry.clone();
                events.send(PreviewEvent::BundleReady(bundle));

                if last_entry.as_ref() != Some(&entry) {
                    match &entry {
                        Some(path) => {
                            events.notice(NoticeLevel::Info, format!("preview entry: {path}"))
                        }
                        None => events.notice(NoticeLevel::Warning, "no html entry point"),
                    }
                    last_entry = Some(entry);
                }
            }
            tracing::debug!("preview worker stopped");
        });

        Ok(Self { runtime, tx })
    }

    /// Replaces any tree still waiting to be bundled.
    pub fn submit(&self, tree: Arc<FileTree>) {
        self.tx.send_replace(Some(tree));
    }

    pub fn shutdown(self) {
        let Self { runtime, tx } = self;
        drop(tx);
        runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/preview_worker.rs"]
mod tests;
