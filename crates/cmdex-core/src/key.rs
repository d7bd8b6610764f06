//! Key definitions and key event structures.
//!
//! The host delivers discrete key records (pressed flag, modifier state, the
//! translated character and a virtual key code). This module gives those
//! records a typed shape the editor can match on.

use serde::{Deserialize, Serialize};

/// Virtual keys the editor distinguishes.
///
/// Codes follow the Windows virtual-key table since that is what console hosts
/// deliver; anything the editor has no use for lands in [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Backspace,
    Tab,
    Enter,
    Escape,
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Delete,

    // Pure modifiers
    Shift,
    Control,
    Alt,

    /// Letter and digit keys, stored as the uppercase character
    Char(char),

    /// Any other virtual key code
    Other(u16),
}

impl Key {
    /// Map a Windows virtual-key code onto a [`Key`].
    pub fn from_virtual_code(code: u16) -> Self {
        match code {
            0x08 => Key::Backspace,
            0x09 => Key::Tab,
            0x0D => Key::Enter,
            0x10 => Key::Shift,
            0x11 => Key::Control,
            0x12 => Key::Alt,
            0x1B => Key::Escape,
            0x21 => Key::PageUp,
            0x22 => Key::PageDown,
            0x23 => Key::End,
            0x24 => Key::Home,
            0x25 => Key::Left,
            0x26 => Key::Up,
            0x27 => Key::Right,
            0x28 => Key::Down,
            0x2E => Key::Delete,
            0x30..=0x39 | 0x41..=0x5A => Key::Char(char::from(code as u8)),
            other => Key::Other(other),
        }
    }

    /// Shift, Ctrl or Alt on their own.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt)
    }
}

/// A single key record from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// `false` for key-up records, which the editor ignores
    pub pressed: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Character produced by the key, if any
    pub ch: Option<char>,
    pub key: Key,
}

impl KeyEvent {
    /// Key-down event with no modifiers.
    pub fn simple(key: Key) -> Self {
        Self {
            pressed: true,
            ctrl: false,
            alt: false,
            shift: false,
            ch: None,
            key,
        }
    }

    /// Key-down event for a typed character.
    pub fn character(ch: char) -> Self {
        let key = if ch.is_ascii_alphanumeric() {
            Key::Char(ch.to_ascii_uppercase())
        } else {
            Key::Other(0)
        };
        Self {
            ch: Some(ch),
            ..Self::simple(key)
        }
    }

    /// Build an event from the raw fields of a host key record.
    pub fn from_record(
        pressed: bool,
        ctrl: bool,
        alt: bool,
        shift: bool,
        ch: Option<char>,
        virtual_key: u16,
    ) -> Self {
        Self {
            pressed,
            ctrl,
            alt,
            shift,
            ch: ch.filter(|c| *c != '\0'),
            key: Key::from_virtual_code(virtual_key),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// The printable character this event would insert, if any.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl || self.alt {
            return None;
        }
        self.ch.filter(|c| !c.is_control())
    }
}
