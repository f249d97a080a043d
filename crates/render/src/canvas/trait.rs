use serde::{Deserialize, Serialize};

use folio_core::Pt;

use crate::error::CanvasError;

/// 8-bit RGB color. Serialized as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #RRGGBB"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Backend font name, e.g. "Helvetica-Bold".
    pub family: String,
    pub size: Pt,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: Pt) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One line of text; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
    pub font: FontSpec,
    pub color: Color,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: Pt,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: Pt) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(color: Color, width: Pt) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

/// Axis-aligned rectangle; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSpec {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectSpec {
    pub fn filled(x: Pt, y: Pt, width: Pt, height: Pt, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn outlined(x: Pt, y: Pt, width: Pt, height: Pt, stroke: Stroke) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn top(&self) -> Pt {
        self.y + self.height
    }
}

/// What a canvas draws when an image asset cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFallback {
    /// Fill the image frame with a flat color.
    Fill(Color),
    /// Draw nothing.
    Skip,
}

/// Image stretched into a frame; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpec {
    /// Asset key or path, resolved by the backend.
    pub asset: String,
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
    pub fallback: ImageFallback,
}

/// Drawing surface the composer writes pages onto.
///
/// Coordinates are PDF points with the origin at the bottom-left of the
/// current page. The composer never calls [`Canvas::start_new_page`] before
/// page 1; a backend starts with page 1 open.
pub trait Canvas {
    fn place_text(&mut self, text: &TextSpec) -> Result<(), CanvasError>;

    fn place_rect(&mut self, rect: &RectSpec) -> Result<(), CanvasError>;

    /// Draw an image, or apply `image.fallback` when the asset is unavailable.
    fn place_image(&mut self, image: &ImageSpec) -> Result<(), CanvasError>;

    /// Advance width of `text` set in `font`.
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> Pt;

    /// Close the current page and open the next one.
    fn start_new_page(&mut self) -> Result<(), CanvasError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse_from_hex() {
        assert_eq!(Color::from_hex("#8B6914"), Some(Color::rgb(0x8B, 0x69, 0x14)));
        assert_eq!(Color::from_hex("c5961a"), Some(Color::rgb(0xC5, 0x96, 0x1A)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::rgb(61, 31, 0).to_hex(), "#3D1F00");
    }

    #[test]
    fn mix_blends_each_channel() {
        let dark = Color::rgb(0x8B, 0x69, 0x14);
        let light = Color::rgb(0xD4, 0xA8, 0x43);
        assert_eq!(dark.mix(light, 0.0), dark);
        assert_eq!(dark.mix(light, 1.0), light);
        assert_eq!(dark.mix(light, 2.0), light);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn rect_top_is_bottom_plus_height() {
        let rect = RectSpec::filled(10.0, 20.0, 30.0, 40.0, Color::BLACK);
        assert_eq!(rect.top(), 60.0);
    }
}
