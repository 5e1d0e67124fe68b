//! Shared value types used across domain states.

use std::fmt;

/// An RGBA color stored as four 8-bit channels.
///
/// Rendered into yabai's `0xAARRGGBB` notation by [`Rgba::to_argb_hex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    #[serde(default = "opaque")]
    pub a: u8,
}

/// Default alpha for snapshots written before the channel existed.
const fn opaque() -> u8 {
    0xff
}

impl Rgba {
    /// Construct an opaque color from an RGB triplet.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Format as yabai's `0xAARRGGBB` hex notation.
    #[must_use]
    pub fn to_argb_hex(self) -> String {
        format!("0x{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

/// Keyboard modifier keys recognized by skhd.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// The `fn` key.
    Fn,
    /// Control.
    Ctrl,
    /// Option/Alt.
    Alt,
    /// Shift.
    Shift,
    /// Command.
    Cmd,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fn => "fn",
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Cmd => "cmd",
        };
        f.write_str(s)
    }
}

/// One key combination: zero or more modifiers plus a key literal in skhd's
/// notation (e.g. `"r"`, `"0x12"`, `"up"`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyCombo {
    /// Modifier keys, kept in canonical order for deterministic rendering.
    pub mods: Vec<Modifier>,
    /// Key literal in skhd notation.
    pub key: String,
}

impl KeyCombo {
    /// Construct a combo from a modifier list and a key literal.
    #[must_use]
    pub fn new(mods: &[Modifier], key: &str) -> Self {
        Self {
            mods: mods.to_vec(),
            key: key.to_string(),
        }
    }

    /// Render in skhd's hotkey notation: `ctrl + alt - x`, or just the key
    /// when no modifiers are set.
    #[must_use]
    pub fn to_skhd(&self) -> String {
        if self.mods.is_empty() {
            return self.key.clone();
        }
        let mods = self
            .mods
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        format!("{mods} - {}", self.key)
    }
}
