use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit RGB color.
///
/// Serializes as the text form `"r,g,b"`, which is also what the settings
/// document stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// White, the default part color.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Black, the default screen background.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Mid gray, used when an image background cannot be shown.
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Construct from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Error for a malformed `"r,g,b"` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError(String);

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected \"r,g,b\" with 0-255 channels, got {:?}", self.0)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_owned());
        let mut channels = s.split(',').map(|c| c.trim().parse::<u8>());
        let mut next = || -> Result<u8, ParseRgbError> {
            channels.next().ok_or_else(err)?.map_err(|_| err())
        };
        let rgb = Self::new(next()?, next()?, next()?);
        if channels.next().is_some() {
            return Err(err());
        }
        Ok(rgb)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
