//! Theme slice: light/dark mode with a derived palette.

mod palette;

use cartwheel_core::ThemeMode;
use serde::{Deserialize, Serialize};

pub use palette::{DARK, LIGHT, Palette};

use crate::store::{Intent, Reducer, SliceState, Store};

/// Store handle for the theme slice.
pub type ThemeStore = Store<ThemeReducer>;

/// Persisted theme. The palette is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeState {
    pub mode: ThemeMode,
}

impl SliceState for ThemeState {}

impl ThemeState {
    /// Palette for the current mode.
    #[must_use]
    pub const fn palette(&self) -> &'static Palette {
        match self.mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ThemeIntent {
    Toggle,
    Set(ThemeMode),
}

impl Intent for ThemeIntent {}

pub struct ThemeReducer;

impl Reducer for ThemeReducer {
    type State = ThemeState;
    type Intent = ThemeIntent;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool {
        let mode = match intent {
            ThemeIntent::Toggle => state.mode.toggled(),
            ThemeIntent::Set(mode) => mode,
        };
        let changed = mode != state.mode;
        state.mode = mode;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_light() {
        let state = ThemeState::default();
        assert_eq!(state.mode, ThemeMode::Light);
        assert_eq!(state.palette().background, "#FFFFFF");
    }

    #[test]
    fn test_toggle_switches_palette() {
        let state = ThemeReducer::apply(ThemeState::default(), ThemeIntent::Toggle);
        assert_eq!(state.mode, ThemeMode::Dark);
        assert_eq!(state.palette(), &DARK);

        let state = ThemeReducer::apply(state, ThemeIntent::Toggle);
        assert_eq!(state.palette(), &LIGHT);
    }

    #[test]
    fn test_set_same_mode_is_unchanged() {
        let mut state = ThemeState::default();
        assert!(!ThemeReducer::reduce(&mut state, ThemeIntent::Set(ThemeMode::Light)));
        assert_eq!(state, ThemeState::default());
    }

    #[test]
    fn test_persisted_form() {
        let json = serde_json::to_string(&ThemeState {
            mode: ThemeMode::Dark,
        })
        .unwrap_or_default();
        assert_eq!(json, r#"{"mode":"dark"}"#);
    }
}
