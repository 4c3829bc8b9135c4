//! Key chords in the widget's encoding: a key code with modifier bits.

use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum KeyCode {
    Enter = 3,
    KeyF = 36,
}

/// Modifier bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMod(u32);

impl KeyMod {
    /// Ctrl on Linux and Windows, Cmd on macOS.
    pub const CTRL_CMD: Self = Self(1 << 11);
    pub const SHIFT: Self = Self(1 << 10);
    pub const ALT: Self = Self(1 << 9);
}

impl BitOr for KeyMod {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<KeyCode> for KeyMod {
    type Output = Keybinding;

    fn bitor(self, key: KeyCode) -> Keybinding {
        Keybinding(self.0 | key as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keybinding(u32);

impl Keybinding {
    /// A key pressed with no modifiers.
    #[must_use]
    pub const fn key(key: KeyCode) -> Self {
        Self(key as u32)
    }

    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }
}
