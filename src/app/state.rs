//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::component::Component;
use crate::core::document::Document;
use crate::core::source::DocumentError;
use crate::ui::grid_widget::GridState;

use super::toast::ToastQueue;

/// Where the current document stands.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Document),
    /// The last load failed; the message is shown instead of any content.
    Unavailable(String),
}

/// Top-level application state.
pub struct AppState {
    pub load: LoadState,
    /// Incremented per fetch; results from older fetches are ignored.
    pub load_generation: u64,
    /// One entry per document component (see `StackWidget`).
    pub grids: Vec<GridState>,
    /// Component index of the grid receiving keyboard input.
    pub focused_grid: Option<usize>,
    pub toasts: ToastQueue,
    pub config: AppConfig,
    /// Human-readable origin of the document.
    pub origin: String,
    /// Last known terminal size, for hit-testing.
    pub terminal_area: Rect,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Set by handlers to request a (re)fetch on the next loop turn.
    pub needs_reload: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, origin: String) -> Self {
        Self {
            load: LoadState::Loading,
            load_generation: 0,
            grids: Vec::new(),
            focused_grid: None,
            toasts: ToastQueue::new(config.toast_duration()),
            config,
            origin,
            terminal_area: Rect::default(),
            status_message: None,
            needs_reload: true,
            should_quit: false,
        }
    }

    /// Start a new fetch and return its generation.  The previous document
    /// stays on screen until the new one arrives.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.needs_reload = false;
        self.status_message = Some(format!("Loading {}…", self.origin));
        self.load_generation
    }

    /// Apply a fetch result.  Returns `false` if it belongs to a stale request.
    pub fn finish_load(&mut self, generation: u64, result: Result<Document, DocumentError>) -> bool {
        if generation != self.load_generation {
            tracing::debug!("ignoring stale document #{generation}");
            return false;
        }

        match result {
            Ok(document) => {
                tracing::info!(
                    "loaded {} component(s) from {}",
                    document.len(),
                    self.origin
                );
                self.grids = vec![GridState::default(); document.len()];
                self.focused_grid = document
                    .components()
                    .iter()
                    .position(|c| matches!(c, Component::Grid { items } if !items.is_empty()));
                self.status_message = None;
                self.load = LoadState::Ready(document);
            }
            Err(err) => {
                tracing::warn!("document load failed: {err}");
                self.grids.clear();
                self.focused_grid = None;
                self.status_message = None;
                self.load = LoadState::Unavailable(err.to_string());
            }
        }
        true
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.load {
            LoadState::Ready(doc) => Some(doc),
            LoadState::Loading | LoadState::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::{DocumentSource, SampleSource};

    fn unavailable() -> DocumentError {
        DocumentError::Unavailable {
            origin: "doc.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
    }

    #[test]
    fn successful_load_focuses_first_grid() {
        let mut state = AppState::new(AppConfig::default(), "sample".into());
        let generation = state.begin_load();
        assert!(state.finish_load(generation, SampleSource.fetch()));

        assert!(state.document().is_some());
        assert_eq!(state.grids.len(), 2);
        assert_eq!(state.focused_grid, Some(1));
    }

    #[test]
    fn failed_load_shows_no_document() {
        let mut state = AppState::new(AppConfig::default(), "doc.json".into());
        let generation = state.begin_load();
        state.finish_load(generation, SampleSource.fetch());

        let generation = state.begin_load();
        state.finish_load(generation, Err(unavailable()));

        assert!(state.document().is_none());
        assert!(state.grids.is_empty());
        assert!(matches!(state.load, LoadState::Unavailable(ref m) if m.contains("doc.json")));
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut state = AppState::new(AppConfig::default(), "sample".into());
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(!state.finish_load(first, Err(unavailable())));
        assert!(matches!(state.load, LoadState::Loading));

        assert!(state.finish_load(second, SampleSource.fetch()));
        assert!(state.document().is_some());
    }
}
