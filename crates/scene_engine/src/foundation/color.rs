//! RGB colors as they appear in scene documents and panel widgets
//!
//! Documents write colors as CSS-style hex strings (`"#ff00ff"`, `"#f0f"`) or
//! as `[r, g, b]` triples in `[0, 1]`. Colors always serialize back as
//! `#rrggbb`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::math::{utils::clamp_unit, Vec3};

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

/// Error produced when a color string cannot be parsed
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{input}': expected #rgb or #rrggbb")]
pub struct ColorParseError {
    /// The rejected input
    pub input: String,
}

impl Color {
    /// Pure white
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Pure black
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a color from float components, clamped into `[0, 1]`
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let error = || ColorParseError { input: input.to_string() };
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| error());
        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            _ => Err(error()),
        }
    }

    /// 8-bit channels, rounded
    pub fn to_rgb8(self) -> [u8; 3] {
        // Components are clamped on construction, so the casts cannot overflow
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantize = |c: f32| (clamp_unit(c) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Lowercase `#rrggbb` representation
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Components as a vector
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Accepted on-disk shapes of a color
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Triple([f32; 3]),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Hex(text) => Self::from_hex(&text).map_err(serde::de::Error::custom),
            ColorRepr::Triple([r, g, b]) => Ok(Self::rgb(r, g, b)),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
