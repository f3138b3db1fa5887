use std::fmt;

use crate::prelude::*;
use crate::{
    DAYS_PER_WEEK, KEY_CODE_DOWN, KEY_CODE_ENTER, KEY_CODE_LEFT, KEY_CODE_RIGHT, KEY_CODE_UP, SelectionController,
};

pub type KeyHook = Box<dyn FnMut(Key)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Other(u32),
}

/// What a handled key does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Shift the highlight by this many days
    Move(i64),
    /// Select the highlighted day
    Select,
}

impl Key {
    pub const fn from_key_code(code: u32) -> Self {
        match code {
            KEY_CODE_LEFT => Self::Left,
            KEY_CODE_RIGHT => Self::Right,
            KEY_CODE_UP => Self::Up,
            KEY_CODE_DOWN => Self::Down,
            KEY_CODE_ENTER => Self::Enter,
            other => Self::Other(other),
        }
    }

    pub const fn action(self) -> Option<KeyAction> {
        match self {
            Self::Left => Some(KeyAction::Move(-1)),
            Self::Right => Some(KeyAction::Move(1)),
            Self::Up => Some(KeyAction::Move(-DAYS_PER_WEEK)),
            Self::Down => Some(KeyAction::Move(DAYS_PER_WEEK)),
            Self::Enter => Some(KeyAction::Select),
            Self::Other(_) => None,
        }
    }
}

pub struct KeyboardController {
    enabled:     bool,
    on_key_down: Option<KeyHook>,
}

impl fmt::Debug for KeyboardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardController")
            .field("enabled", &self.enabled)
            .field("on_key_down", &self.on_key_down.is_some())
            .finish()
    }
}

impl KeyboardController {
    pub fn new(enabled: bool, on_key_down: Option<KeyHook>) -> Self {
        Self { enabled, on_key_down }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Applies `key` to `selection`. Unrecognized keys, and every key while
    /// disabled, are ignored without notification. A handled key fires
    /// `on_key_down` afterwards whether or not the selection changed.
    pub fn handle(&mut self, key: Key, selection: &mut SelectionController) -> Option<KeyAction> {
        if !self.enabled {
            return None;
        }
        let action = key.action()?;
        match action {
            KeyAction::Move(days) => {
                selection.move_by(days);
            },
            KeyAction::Select => {
                selection.select(selection.highlighted());
            },
        }
        trace!(?key, highlighted = %selection.highlighted(), "key handled");
        if let Some(hook) = self.on_key_down.as_mut() {
            hook(key);
        }
        Some(action)
    }
}
