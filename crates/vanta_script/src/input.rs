//! Keyboard and mouse polling.
//!
//! Key and button numbering follows GLFW, which is what the host's window
//! layer reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::internal::InternalCalls;

/// A keyboard key.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    D0 = 48,
    D1 = 49,
    D2 = 50,
    D3 = 51,
    D4 = 52,
    D5 = 53,
    D6 = 54,
    D7 = 55,
    D8 = 56,
    D9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
}

const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("Space", KeyCode::Space),
    ("Apostrophe", KeyCode::Apostrophe),
    ("Comma", KeyCode::Comma),
    ("Minus", KeyCode::Minus),
    ("Period", KeyCode::Period),
    ("Slash", KeyCode::Slash),
    ("D0", KeyCode::D0),
    ("D1", KeyCode::D1),
    ("D2", KeyCode::D2),
    ("D3", KeyCode::D3),
    ("D4", KeyCode::D4),
    ("D5", KeyCode::D5),
    ("D6", KeyCode::D6),
    ("D7", KeyCode::D7),
    ("D8", KeyCode::D8),
    ("D9", KeyCode::D9),
    ("Semicolon", KeyCode::Semicolon),
    ("Equal", KeyCode::Equal),
    ("A", KeyCode::A),
    ("B", KeyCode::B),
    ("C", KeyCode::C),
    ("D", KeyCode::D),
    ("E", KeyCode::E),
    ("F", KeyCode::F),
    ("G", KeyCode::G),
    ("H", KeyCode::H),
    ("I", KeyCode::I),
    ("J", KeyCode::J),
    ("K", KeyCode::K),
    ("L", KeyCode::L),
    ("M", KeyCode::M),
    ("N", KeyCode::N),
    ("O", KeyCode::O),
    ("P", KeyCode::P),
    ("Q", KeyCode::Q),
    ("R", KeyCode::R),
    ("S", KeyCode::S),
    ("T", KeyCode::T),
    ("U", KeyCode::U),
    ("V", KeyCode::V),
    ("W", KeyCode::W),
    ("X", KeyCode::X),
    ("Y", KeyCode::Y),
    ("Z", KeyCode::Z),
    ("Escape", KeyCode::Escape),
    ("Enter", KeyCode::Enter),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Insert", KeyCode::Insert),
    ("Delete", KeyCode::Delete),
    ("Right", KeyCode::Right),
    ("Left", KeyCode::Left),
    ("Down", KeyCode::Down),
    ("Up", KeyCode::Up),
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
    ("LeftShift", KeyCode::LeftShift),
    ("LeftControl", KeyCode::LeftControl),
    ("LeftAlt", KeyCode::LeftAlt),
    ("RightShift", KeyCode::RightShift),
    ("RightControl", KeyCode::RightControl),
    ("RightAlt", KeyCode::RightAlt),
];

impl KeyCode {
    /// The GLFW key number.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(_, key)| *key == self)
            .map_or("Unknown", |(name, _)| name)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key name that does not match any [`KeyCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key `{0}`")]
pub struct UnknownKey(pub String);

impl FromStr for KeyCode {
    type Err = UnknownKey;

    /// Parse a key by name, ignoring ASCII case (`"w"`, `"Space"`, `"ESCAPE"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KEY_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, key)| key)
            .ok_or_else(|| UnknownKey(s.to_owned()))
    }
}

/// A mouse button.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Button0 = 0,
    Button1 = 1,
    Button2 = 2,
    Button3 = 3,
    Button4 = 4,
    Button5 = 5,
    Button6 = 6,
    Button7 = 7,
}

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton::Button0;
    pub const RIGHT: MouseButton = MouseButton::Button1;
    pub const MIDDLE: MouseButton = MouseButton::Button2;
    pub const LAST: MouseButton = MouseButton::Button7;

    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Polls the host for the current input state.
#[derive(Clone, Copy)]
pub struct Input<'a> {
    calls: &'a dyn InternalCalls,
}

impl<'a> Input<'a> {
    pub(crate) fn new(calls: &'a dyn InternalCalls) -> Self {
        Self { calls }
    }

    /// Whether `key` is held this frame.
    #[must_use]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.calls.is_key_down(key)
    }

    /// Whether `button` is held this frame.
    #[must_use]
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.calls.is_mouse_down(button)
    }
}
