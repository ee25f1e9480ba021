//! Application events and the background tasks that produce them.
//!
//! Everything that happens off the UI task (terminal input, document loads,
//! tile notifications) arrives as an [`AppEvent`] on one unbounded channel,
//! so the main loop has a single place to wait.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::core::document::Document;
use crate::core::source::{DocumentError, DocumentSource};
use crate::ui::node::Notifier;

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    /// A document fetch finished.  `generation` identifies the request.
    DocumentLoaded {
        generation: u64,
        result: Result<Document, DocumentError>,
    },
    /// A tile asked for a toast.
    Notify(String),
}

/// Polls the terminal on a blocking task and forwards events to `tx`.
/// Sends `Tick` whenever nothing happened within `tick_rate`.
pub fn spawn_event_reader(tx: EventSender, tick_rate: Duration) {
    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("terminal read failed: {err}");
                    continue;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(err) => {
                tracing::warn!("terminal poll failed: {err}");
                AppEvent::Tick
            }
        };
        if tx.send(next).is_err() {
            break; // receiver dropped
        }
    });
}

/// Runs `source.fetch()` on a blocking task; the result comes back as
/// [`AppEvent::DocumentLoaded`].
pub fn spawn_document_load(source: Arc<dyn DocumentSource>, generation: u64, tx: EventSender) {
    tokio::task::spawn_blocking(move || {
        let started = std::time::Instant::now();
        let result = source.fetch();
        tracing::debug!(
            "fetch #{generation} from {} finished in {:.2?} (ok={})",
            source.describe(),
            started.elapsed(),
            result.is_ok()
        );
        let _ = tx.send(AppEvent::DocumentLoaded { generation, result });
    });
}

/// Forwards tile notifications to the main loop as [`AppEvent::Notify`].
///
/// If the loop is gone the message is dropped.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: EventSender,
}

impl ChannelNotifier {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: String) {
        let _ = self.tx.send(AppEvent::Notify(message));
    }
}
