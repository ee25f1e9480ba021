//! Colour values carried by a document and their textual encodings.
//!
//! Tiles describe their background as `#RRGGBB` or `#AARRGGBB`.  The short
//! list of colour names that Android's `parseColor` understands is accepted
//! too, since documents written for mobile clients use them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ───────────────────────────────────────── types ─────────────

/// A 32-bit colour with an alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Why a colour string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty colour string")]
    Empty,
    #[error("colour `{0}` must be #RRGGBB or #AARRGGBB")]
    BadLength(String),
    #[error("colour `{0}` contains a non-hex digit")]
    BadDigit(String),
    #[error("unknown colour name `{0}`")]
    UnknownName(String),
}

/// Named colours, as `0xAARRGGBB`.
const NAMED: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("darkgrey", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("grey", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("lightgrey", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

impl Argb {
    pub const WHITE: Argb = Argb::opaque(0xFF, 0xFF, 0xFF);

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        Self {
            alpha: (value >> 24) as u8,
            red: (value >> 16) as u8,
            green: (value >> 8) as u8,
            blue: value as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        (self.alpha as u32) << 24 | (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }

    /// Parse `#RRGGBB`, `#AARRGGBB` (hex digits in any case) or a colour name.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let Some(hex) = s.strip_prefix('#') else {
            let lower = s.to_ascii_lowercase();
            return NAMED
                .iter()
                .find(|(name, _)| *name == lower)
                .map(|&(_, value)| Self::from_u32(value))
                .ok_or_else(|| ColorParseError::UnknownName(s.to_string()));
        };

        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        // `from_str_radix` tolerates a leading sign, so check digits first.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigit(s.to_string()))?;

        Ok(if hex.len() == 6 {
            Self::from_u32(0xFF00_0000 | value)
        } else {
            Self::from_u32(value)
        })
    }

    /// Blend onto a black background, giving the opaque RGB a terminal can show.
    pub fn composite_over_black(self) -> (u8, u8, u8) {
        let scale = |c: u8| ((c as u16 * self.alpha as u16 + 127) / 255) as u8;
        (scale(self.red), scale(self.green), scale(self.blue))
    }
}

impl FromStr for Argb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats as `#rrggbb` when opaque, `#aarrggbb` otherwise.
impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 0xFF {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.alpha, self.red, self.green, self.blue
            )
        }
    }
}
