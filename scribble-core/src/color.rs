/// An 8-bit per channel, straight (non-premultiplied) alpha sRGB color.
///
/// Stored as packed `0xAARRGGBB`, the same layout touch platforms hand out for color ints,
/// so palette values round-trip through settings files without loss.
#[repr(transparent)]
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct Color(u32);
impl Color {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);
    pub const BLUE: Self = Self(0xFF00_00FF);
    pub const YELLOW: Self = Self(0xFFFF_FF00);
    pub const CYAN: Self = Self(0xFF00_FFFF);
    pub const MAGENTA: Self = Self(0xFFFF_00FF);
    pub const GRAY: Self = Self(0xFF88_8888);
    pub const DARK_GRAY: Self = Self(0xFF44_4444);
    pub const LIGHT_GRAY: Self = Self(0xFFCC_CCCC);

    /// Names accepted by [`Color::parse`], lower case.
    const NAMED: &'static [(&'static str, Color)] = &[
        ("black", Self::BLACK),
        ("darkgray", Self::DARK_GRAY),
        ("gray", Self::GRAY),
        ("lightgray", Self::LIGHT_GRAY),
        ("white", Self::WHITE),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("yellow", Self::YELLOW),
        ("cyan", Self::CYAN),
        ("magenta", Self::MAGENTA),
        ("aqua", Self::CYAN),
        ("fuchsia", Self::MAGENTA),
        ("darkgrey", Self::DARK_GRAY),
        ("grey", Self::GRAY),
        ("lightgrey", Self::LIGHT_GRAY),
        ("lime", Self::GREEN),
        ("maroon", Self(0xFF80_0000)),
        ("navy", Self(0xFF00_0080)),
        ("olive", Self(0xFF80_8000)),
        ("purple", Self(0xFF80_0080)),
        ("silver", Self(0xFFC0_C0C0)),
        ("teal", Self(0xFF00_8080)),
    ];

    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 0xFF)
    }
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }
    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
    }
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
    /// Channels in `[r, g, b, a]` order, as image buffers want them.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
            (self.0 >> 24) as u8,
        ]
    }
    /// Parse `#RRGGBB`, `#AARRGGBB`, or one of a handful of color names (case-insensitive).
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ColorParseError::InvalidHex);
            }
            if !matches!(hex.len(), 6 | 8) {
                return Err(ColorParseError::BadLength);
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidHex)?;
            return Ok(if hex.len() == 6 {
                Self(0xFF00_0000 | value)
            } else {
                Self(value)
            });
        }
        Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|&(_, color)| color)
            .ok_or(ColorParseError::UnknownName)
    }
}
impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}
/// Formats as `#RRGGBB` when opaque, `#AARRGGBB` otherwise. Parses back with [`Color::parse`].
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}
impl std::str::FromStr for Color {
    type Err = ColorParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Human-editable in settings files.
        serializer.serialize_str(&self.to_string())
    }
}
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let str =
            <std::borrow::Cow<'de, str> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        str.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("hex color contains non-hex digits")]
    InvalidHex,
    #[error("hex color must have 6 or 8 digits")]
    BadLength,
    #[error("unknown color name")]
    UnknownName,
}

#[cfg(test)]
mod test {
    use super::{Color, ColorParseError};
    #[test]
    fn parse_hex() {
        assert_eq!(Color::parse("#FF0000"), Ok(Color::RED));
        assert_eq!(Color::parse("#80ff0000"), Ok(Color::from_argb(0x80FF_0000)));
        assert_eq!(Color::parse("#12345"), Err(ColorParseError::BadLength));
        // Too many digits to fit in a u32 is still a length problem.
        assert_eq!(Color::parse("#FF00FF00FF"), Err(ColorParseError::BadLength));
        assert_eq!(Color::parse("#123456789"), Err(ColorParseError::BadLength));
        assert_eq!(Color::parse("#GG0000"), Err(ColorParseError::InvalidHex));
        // A leading sign would sneak through `from_str_radix`.
        assert_eq!(Color::parse("#+FFFFF"), Err(ColorParseError::InvalidHex));
    }
    #[test]
    fn parse_names() {
        assert_eq!(Color::parse("Red"), Ok(Color::RED));
        assert_eq!(Color::parse(" navy "), Ok(Color::from_rgb(0, 0, 0x80)));
        assert_eq!(Color::parse("chartreuse"), Err(ColorParseError::UnknownName));
    }
    #[test]
    fn display_parses_back() {
        for color in [Color::RED, Color::from_argb(0x7F12_3456), Color::TRANSPARENT] {
            assert_eq!(Color::parse(&color.to_string()), Ok(color));
        }
        assert_eq!(Color::from_rgb(0x12, 0xAB, 0x0F).to_string(), "#12AB0F");
    }
    #[test]
    fn channel_order() {
        assert_eq!(
            Color::from_rgba(1, 2, 3, 4).to_rgba(),
            [1, 2, 3, 4],
            "argb packing must unpack to rgba"
        );
        assert_eq!(Color::from_rgba(1, 2, 3, 4).argb(), 0x0401_0203);
    }
}
