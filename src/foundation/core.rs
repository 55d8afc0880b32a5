use crate::foundation::error::{PathviewError, PathviewResult};

pub use kurbo::{Point, Rect, Vec2};

/// A device-pixel rectangle anchored at the origin `(0, 0)`.
///
/// This is the region of the target surface the display is permitted to
/// paint into. The region is empty when either dimension is zero; an empty
/// region short-circuits rendering entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScreenRect {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl ScreenRect {
    /// The empty region. Displays start out with this and render nothing
    /// until a real region is set.
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
    };

    /// Build a region of the given pixel dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight-alpha RGBA8 color (not premultiplied).
///
/// Premultiplication happens at the paint boundary inside the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 = opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque mid gray, the default path color.
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Build a color from straight RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color from a small CSS-like vocabulary.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` hex forms and the named colors
    /// `black`, `white`, `gray`, `red`, `green`, `blue`.
    pub fn parse(s: &str) -> PathviewResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "gray" | "grey" => return Ok(Self::GRAY),
            "red" => return Ok(Self::RED),
            "green" => return Ok(Self::GREEN),
            "blue" => return Ok(Self::BLUE),
            _ => {}
        }
        let Some(hex) = s.strip_prefix('#') else {
            return Err(PathviewError::validation(format!("unknown color: {s:?}")));
        };
        let nibble = |c: u8| -> PathviewResult<u8> {
            match c {
                b'0'..=b'9' => Ok(c - b'0'),
                b'a'..=b'f' => Ok(c - b'a' + 10),
                b'A'..=b'F' => Ok(c - b'A' + 10),
                _ => Err(PathviewError::validation(format!(
                    "invalid hex digit in color: {s:?}"
                ))),
            }
        };
        let b = hex.as_bytes();
        match b.len() {
            3 => {
                let r = nibble(b[0])?;
                let g = nibble(b[1])?;
                let bl = nibble(b[2])?;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, bl << 4 | bl))
            }
            6 | 8 => {
                let byte = |i: usize| -> PathviewResult<u8> {
                    Ok(nibble(b[i])? << 4 | nibble(b[i + 1])?)
                };
                let a = if b.len() == 8 { byte(6)? } else { 255 };
                Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
            }
            _ => Err(PathviewError::validation(format!(
                "color must be #rgb, #rrggbb or #rrggbbaa: {s:?}"
            ))),
        }
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = PathviewError;

    fn from_str(s: &str) -> PathviewResult<Self> {
        Self::parse(s)
    }
}
