use crate::models::NodeId;
use crate::preview::Bundle;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug)]
pub enum PreviewEvent {
    BundleReady(Bundle),
    HistoryCommitted { ids: Vec<NodeId> },
    Notice { level: NoticeLevel, message: String },
}

#[derive(Clone)]
pub struct EventSender {
    tx: Sender<PreviewEvent>,
}

pub struct EventReceiver {
    rx: Receiver<PreviewEvent>,
}

pub fn event_bus() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, EventReceiver { rx })
}

impl EventSender {
    /// Delivery is best-effort: a dropped receiver means nobody is listening.
    pub fn send(&self, event: PreviewEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("preview event dropped: receiver closed");
        }
    }

    pub fn notice(&self, level: NoticeLevel, message: impl Into<String>) {
        self.send(PreviewEvent::Notice {
            level,
            message: message.into(),
        });
    }
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<PreviewEvent, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<PreviewEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn drain(&mut self) -> Vec<PreviewEvent> {
        self.rx.try_iter().collect()
    }
}
