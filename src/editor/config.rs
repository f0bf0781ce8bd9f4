use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::player::PlayerConfig;
use crate::session::SessionStyles;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default)]
    pub playback: PlaybackSettings,
    #[serde(default)]
    pub styles: SessionStyles,
    /// Character painted for every stroked cell.
    #[serde(default = "default_brush")]
    pub brush: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub add_frame: String,
    pub play: String,
    pub pause: String,
    pub quit: String,
    pub fullscreen: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    #[serde(flatten)]
    pub player: PlayerConfig,
    /// Rate at which the terminal host delivers playback ticks.
    #[serde(default = "default_refresh_hz")]
    pub refresh_hz: f64,
}

fn default_brush() -> char {
    '█'
}

fn default_refresh_hz() -> f64 {
    60.0
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            add_frame: "+".into(),
            play: "p".into(),
            pause: "Space".into(),
            quit: "q".into(),
            fullscreen: "F11".into(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        PlaybackSettings {
            player: PlayerConfig::default(),
            refresh_hz: default_refresh_hz(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            key_bindings: KeyBindings::default(),
            playback: PlaybackSettings::default(),
            styles: SessionStyles::default(),
            brush: default_brush(),
        }
    }
}

impl EditorConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    tracing::info!(path = %config_path.display(), "editor config loaded");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), error = %e, "invalid editor config");
                    eprintln!("Warning: invalid editor config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn config_path() -> std::path::PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = std::path::PathBuf::from(home);
        path.push(".config");
        path.push("celpad");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && matches_key(rest, event.code);
    }
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && matches_key(rest, event.code);
    }

    // Plain bindings must not fire on Ctrl/Alt chords.
    if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Backspace" => code == KeyCode::Backspace,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        s => {
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                return code == KeyCode::F(n);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_char_binding() {
        assert!(matches_binding("p", &key(KeyCode::Char('p'), KeyModifiers::NONE)));
        assert!(!matches_binding("p", &key(KeyCode::Char('p'), KeyModifiers::ALT)));
        assert!(!matches_binding("p", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn shifted_symbol_still_matches() {
        assert!(matches_binding("+", &key(KeyCode::Char('+'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn named_and_function_keys() {
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("F11", &key(KeyCode::F(11), KeyModifiers::NONE)));
        assert!(!matches_binding("F11", &key(KeyCode::F(1), KeyModifiers::NONE)));
        assert!(matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn multi_char_garbage_never_matches() {
        assert!(!matches_binding("pp", &key(KeyCode::Char('p'), KeyModifiers::NONE)));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"playback":{"fps":12,"loop":false},"brush":"*"}"#).unwrap();
        assert_eq!(config.playback.player.fps, 12.0);
        assert!(!config.playback.player.loop_playback);
        assert_eq!(config.playback.refresh_hz, 60.0);
        assert_eq!(config.brush, '*');
        assert_eq!(config.key_bindings.play, "p");
        assert_eq!(config.styles, SessionStyles::default());
    }

    #[test]
    fn default_config_round_trips() {
        let json = serde_json::to_string(&EditorConfig::default()).unwrap();
        let back: EditorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.playback, PlaybackSettings::default());
        assert_eq!(back.brush, default_brush());
    }
}
