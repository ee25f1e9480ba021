//! User configuration: rendering metrics, timings and key bindings.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/sdui-tui/config.toml` (default
//! `~/.config/sdui-tui/config.toml`):
//!
//! ```toml
//! px_per_row = 20
//! large_font_px = 24
//! toast_ms = 2000
//! tick_ms = 100
//!
//! [keys]
//! tap = ["Enter", "Space"]
//! quit = ["q", "Ctrl+q"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use thiserror::Error;

use crate::ui::grid_widget::TileMetrics;

// ───────────────────────────────────────── actions ───────────

/// All bindable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Tap,
    NextGrid,
    PageUp,
    PageDown,
    Reload,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Tap,
        Action::NextGrid,
        Action::PageUp,
        Action::PageDown,
        Action::Reload,
        Action::Quit,
    ];

    /// Key used in the `[keys]` table.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Tap => "tap",
            Action::NextGrid => "next_grid",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Reload => "reload",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Single characters keep their case: `"R"` is Shift+r on most terminals.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Errors that can occur when loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    px_per_row: Option<f32>,
    large_font_px: Option<f32>,
    toast_ms: Option<u64>,
    tick_ms: Option<u64>,
    keys: HashMap<String, Vec<String>>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Logical pixels per terminal row.
    pub px_per_row: f32,
    /// Labels at or above this size are drawn bold.
    pub large_font_px: f32,
    /// How long each toast stays on screen.
    pub toast_ms: u64,
    /// Idle redraw interval.
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            px_per_row: 20.0,
            large_font_px: 24.0,
            toast_ms: 2000,
            tick_ms: 100,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(MoveLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(MoveRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Tap, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(NextGrid, vec![KeyBind::new(Tab, n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n)]);
        m.insert(Reload, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}{}{}{}: select | {}: tap | {}: next grid | {}: reload | {}: quit",
            self.short_binding(Action::MoveLeft),
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::MoveDown),
            self.short_binding(Action::MoveRight),
            self.short_binding(Action::Tap),
            self.short_binding(Action::NextGrid),
            self.short_binding(Action::Reload),
            self.short_binding(Action::Quit),
        )
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn tile_metrics(&self) -> TileMetrics {
        TileMetrics {
            px_per_row: self.px_per_row,
            large_font_px: self.large_font_px,
        }
    }

    // ── loading ─────────────────────────────────────────────────

    /// Load from the default path.  A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text, applying it over the defaults.  Out-of-range numbers
    /// are clamped; unknown actions and unparseable keys are skipped.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(s)?;
        let mut config = Self::default();

        if let Some(v) = file.px_per_row.filter(|v| v.is_finite()) {
            config.px_per_row = v.clamp(1.0, 200.0);
        }
        if let Some(v) = file.large_font_px.filter(|v| v.is_finite() && *v > 0.0) {
            config.large_font_px = v;
        }
        if let Some(v) = file.toast_ms {
            config.toast_ms = v.clamp(250, 10_000);
        }
        if let Some(v) = file.tick_ms {
            config.tick_ms = v.clamp(16, 1000);
        }

        for (key, values) in &file.keys {
            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("config: unknown action `{key}` in [keys]");
                continue;
            };
            let mut parsed = Vec::new();
            for value in values {
                match KeyBind::parse(value.trim()) {
                    Some(bind) => parsed.push(bind),
                    None => tracing::warn!("config: cannot parse key `{value}` for `{key}`"),
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        Ok(config)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/sdui-tui/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_key_strings() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBind::parse("alt+Up"),
            Some(KeyBind::new(KeyCode::Up, KeyModifiers::ALT))
        );
        assert_eq!(
            KeyBind::parse("Space"),
            Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("F5"),
            Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("R"),
            Some(KeyBind::new(KeyCode::Char('R'), KeyModifiers::NONE))
        );
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("nonsense"), None);
    }

    #[test]
    fn defaults_cover_every_action() {
        let config = AppConfig::default();
        for action in Action::ALL {
            assert!(
                config.bindings.get(action).is_some_and(|b| !b.is_empty()),
                "{action:?} unbound"
            );
        }
        assert_eq!(
            config.match_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Tap)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn toml_overrides_and_clamps() {
        let config = AppConfig::from_toml_str(
            r#"
            px_per_row = 0.5
            toast_ms = 1500
            tick_ms = 1

            [keys]
            tap = ["t", "bogus key"]
            teleport = ["x"]
            "#,
        )
        .unwrap();

        assert_eq!(config.px_per_row, 1.0);
        assert_eq!(config.toast_ms, 1500);
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.large_font_px, 24.0);
        assert_eq!(
            config.match_key(key(KeyCode::Char('t'), KeyModifiers::NONE)),
            Some(Action::Tap)
        );
        // Replaced, not extended.
        assert_eq!(config.match_key(key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("px_per_row = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.toast_ms, 2000);
    }

    #[test]
    fn unparseable_file_reports_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "toast_ms = [").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn status_hint_uses_first_bindings() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("←↑↓→: select"));
        assert!(hint.contains("Enter: tap"));
        assert!(hint.contains("q: quit"));
    }
}
