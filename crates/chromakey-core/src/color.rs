//! 8-bit RGB colors and the lenient color literal parser
//!
//! Colors reach the engine either as host text such as `"8, 39, 245"` or
//! as values derived from the image (corner pixel, farthest search).
//! Both end up as an [`Rgb`].
//!
//! # Literal format
//!
//! Tokens are separated by any run of commas, semicolons or whitespace.
//! Each token is parsed as a float, truncated toward zero and clamped to
//! `0..=255`. Exactly three tokens are required.
//!
//! ```
//! use chromakey_core::{DEFAULT_KEY_COLOR, Rgb};
//!
//! assert_eq!("300,-5,10".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 10));
//! assert_eq!(Rgb::parse_or_default("1,2"), DEFAULT_KEY_COLOR);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Color used whenever a literal cannot be parsed.
pub const DEFAULT_KEY_COLOR: Rgb = Rgb::new(8, 39, 245);

/// Reasons a color literal is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRgbError {
    /// The literal did not split into exactly three tokens
    #[error("expected 3 color components, found {0}")]
    WrongComponentCount(usize),

    /// A token is not a finite number
    #[error("invalid color component: {0:?}")]
    InvalidComponent(String),
}

/// An RGB triple with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels scaled to `[0, 1]`.
    #[inline]
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Quantize a unit-range color, clamping each channel first.
    ///
    /// Rounds half to even.
    pub fn from_unit(rgb: [f32; 3]) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8;
        Self::new(q(rgb[0]), q(rgb[1]), q(rgb[2]))
    }

    /// Squared Euclidean distance in 8-bit space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Parse a color literal, returning [`DEFAULT_KEY_COLOR`] if it is
    /// malformed.
    pub fn parse_or_default(s: &str) -> Self {
        match s.parse() {
            Ok(rgb) => rgb,
            Err(err) => {
                tracing::debug!(literal = s, %err, "color literal rejected, using default");
                DEFAULT_KEY_COLOR
            }
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        DEFAULT_KEY_COLOR
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() != 3 {
            return Err(ParseRgbError::WrongComponentCount(tokens.len()));
        }

        let mut channels = [0u8; 3];
        for (slot, token) in channels.iter_mut().zip(&tokens) {
            *slot = parse_component(token)?;
        }
        Ok(channels.into())
    }
}

/// Drop digit-group underscores (`1_000`). An underscore that is not
/// between two digits makes the token invalid.
fn strip_digit_groups(token: &str) -> Option<String> {
    let bytes = token.as_bytes();
    for (i, &c) in bytes.iter().enumerate() {
        if c == b'_' {
            let before = i > 0 && bytes[i - 1].is_ascii_digit();
            let after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !(before && after) {
                return None;
            }
        }
    }
    Some(token.replace('_', ""))
}

fn parse_component(token: &str) -> Result<u8, ParseRgbError> {
    let invalid = || ParseRgbError::InvalidComponent(token.to_string());
    let value: f64 = strip_digit_groups(token)
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value.trunc().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!("8, 39, 245".parse::<Rgb>().unwrap(), Rgb::new(8, 39, 245));
    }

    #[test]
    fn test_parse_digit_groups() {
        assert_eq!("1_000,0,0".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("1_2, 3_4.5_0, 0".parse::<Rgb>().unwrap(), Rgb::new(12, 34, 0));
        assert!("_12,0,0".parse::<Rgb>().is_err());
        assert!("12_,0,0".parse::<Rgb>().is_err());
        assert!("1__2,0,0".parse::<Rgb>().is_err());
        assert!("1_.5,0,0".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_parse_mixed_separators() {
        assert_eq!(
            " 1;2 ,, 3 ".parse::<Rgb>().unwrap(),
            Rgb::new(1, 2, 3)
        );
        assert_eq!("10\t20\n30".parse::<Rgb>().unwrap(), Rgb::new(10, 20, 30));
    }

    #[test]
    fn test_parse_clamps_per_token() {
        assert_eq!("300,-5,10".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 10));
    }

    #[test]
    fn test_parse_truncates_floats() {
        assert_eq!(
            "12.9, 0.4, -0.7".parse::<Rgb>().unwrap(),
            Rgb::new(12, 0, 0)
        );
        assert_eq!("1e2,2.55e2,0".parse::<Rgb>().unwrap(), Rgb::new(100, 255, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1,2".parse::<Rgb>(),
            Err(ParseRgbError::WrongComponentCount(2))
        );
        assert_eq!(
            "".parse::<Rgb>(),
            Err(ParseRgbError::WrongComponentCount(0))
        );
        assert!(matches!(
            "a,b,c".parse::<Rgb>(),
            Err(ParseRgbError::InvalidComponent(_))
        ));
        assert!(matches!(
            "inf,0,0".parse::<Rgb>(),
            Err(ParseRgbError::InvalidComponent(_))
        ));
        assert!(matches!(
            "1,NaN,0".parse::<Rgb>(),
            Err(ParseRgbError::InvalidComponent(_))
        ));
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(Rgb::parse_or_default("a,b,c"), DEFAULT_KEY_COLOR);
        assert_eq!(Rgb::parse_or_default("1,2"), DEFAULT_KEY_COLOR);
        assert_eq!(Rgb::parse_or_default("1,2,3,4"), DEFAULT_KEY_COLOR);
        assert_eq!(Rgb::parse_or_default("0 0 0"), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_display_roundtrips_through_parser() {
        let c = Rgb::new(7, 128, 255);
        assert_eq!(c.to_string().parse::<Rgb>().unwrap(), c);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Rgb::new(255, 0, 51).to_unit(), [1.0, 0.0, 0.2]);
        assert_eq!(Rgb::from_unit([1.5, -0.2, 0.2]), Rgb::new(255, 0, 51));
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Rgb::new(0, 0, 0).distance_sq(Rgb::new(3, 4, 0)), 25);
        assert_eq!(
            Rgb::new(255, 255, 255).distance_sq(Rgb::new(0, 0, 0)),
            3 * 255 * 255
        );
    }
}
