//! Utility functions and shared types for subtrack core
//!
//! Contains the timestamp and color codecs, markup transforms, hashing
//! helpers and input decoding used by the parser and the timeline.
//!
//! # Example
//!
//! ```rust
//! use subtrack_core::utils::{decode_color, decode_time};
//!
//! assert_eq!(decode_time("1:02:03.5"), Some(3723.5));
//! assert_eq!(decode_color("&H00FF8000"), "#0080FF");
//! ```

use core::fmt;

pub mod errors;
pub mod hashers;
pub mod markup;

pub use errors::CoreError;
pub use hashers::{create_hash_map, fold_key};
pub use markup::{display_markup, strip_markup};

/// RGB color decoded from an ASS `&HAABBGGRR` value
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Rgb {
    /// Opaque white, the fallback for any color that fails to decode
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Color from its three channels
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Render as `#RRGGBB`
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Parse ASS BGR color format to RGB
///
/// ASS colors look like `&HAABBGGRR&` with optional alpha and trailing
/// ampersand. Only the last six hex digits carry color; alpha is ignored.
///
/// # Example
///
/// ```rust
/// # use subtrack_core::utils::{parse_bgr_color, Rgb};
/// let rgb = parse_bgr_color("&H000000FF&")?;
/// assert_eq!(rgb, Rgb::new(255, 0, 0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`CoreError::InvalidColor`] if the marker is missing, the value
/// holds non-hex characters, or fewer than six digits are present.
pub fn parse_bgr_color(color_str: &str) -> Result<Rgb, CoreError> {
    let trimmed = color_str.trim();
    let trimmed = trimmed.strip_suffix('&').unwrap_or(trimmed);

    let hex_part = trimmed
        .strip_prefix("&H")
        .or_else(|| trimmed.strip_prefix("&h"))
        .or_else(|| trimmed.strip_prefix("0x"))
        .ok_or_else(|| CoreError::InvalidColor(format!("Missing &H marker: {color_str}")))?;

    if hex_part.len() < 6 || hex_part.len() > 8 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(CoreError::InvalidColor(format!(
            "Invalid hex value: {hex_part}"
        )));
    }

    let bgr = &hex_part[hex_part.len() - 6..];
    let channel = |range: core::ops::Range<usize>| {
        u8::from_str_radix(&bgr[range], 16)
            .map_err(|_| CoreError::InvalidColor(format!("Invalid hex value: {hex_part}")))
    };

    Ok(Rgb {
        blue: channel(0..2)?,
        green: channel(2..4)?,
        red: channel(4..6)?,
    })
}

/// Decode an ASS color to `#RRGGBB`, falling back to opaque white
#[must_use]
pub fn decode_color(color_str: &str) -> String {
    parse_bgr_color(color_str).unwrap_or(Rgb::WHITE).to_hex()
}

/// Parse ASS time format `[H:]MM:SS[.f]` to seconds
///
/// Minutes and seconds are exactly two digits. The fraction holds one to
/// three digits read as tenths, hundredths or thousandths.
///
/// # Example
///
/// ```rust
/// # use subtrack_core::utils::parse_ass_time;
/// assert_eq!(parse_ass_time("0:01:30.50")?, 90.5);
/// assert_eq!(parse_ass_time("01:30")?, 90.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] if the string does not follow the grammar.
pub fn parse_ass_time(time_str: &str) -> Result<f64, CoreError> {
    let invalid = || CoreError::InvalidTime(format!("Invalid time format: {time_str}"));
    let trimmed = time_str.trim();

    let (clock, fraction) = match trimmed.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (trimmed, None),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [hours, minutes, seconds] => (Some(*hours), *minutes, *seconds),
        [minutes, seconds] => (None, *minutes, *seconds),
        _ => return Err(invalid()),
    };

    let hours = match hours {
        Some(h) if !h.is_empty() && h.bytes().all(|b| b.is_ascii_digit()) => {
            h.parse::<u32>().map_err(|_| invalid())?
        }
        Some(_) => return Err(invalid()),
        None => 0,
    };
    let minutes = two_digits(minutes).ok_or_else(invalid)?;
    let seconds = two_digits(seconds).ok_or_else(invalid)?;

    let fraction = match fraction {
        Some(frac) if (1..=3).contains(&frac.len()) && frac.bytes().all(|b| b.is_ascii_digit()) => {
            let value: u32 = frac.parse().map_err(|_| invalid())?;
            f64::from(value) / 10f64.powi(i32::try_from(frac.len()).unwrap_or(3))
        }
        Some(_) => return Err(invalid()),
        None => 0.0,
    };

    Ok(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + f64::from(seconds) + fraction)
}

/// Decode an ASS timestamp, mapping anything malformed to `None`
#[must_use]
pub fn decode_time(time_str: &str) -> Option<f64> {
    parse_ass_time(time_str).ok()
}

/// Format seconds back to `H:MM:SS.mmm`
///
/// Rounds to the nearest millisecond. Negative and non-finite inputs
/// format as zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{hours}:{minutes:02}:{secs:02}.{millis:03}")
}

/// Strip a leading UTF-8 byte order mark
///
/// Returns the remaining text and whether a BOM was removed.
#[must_use]
pub fn strip_bom(text: &str) -> (&str, bool) {
    text.strip_prefix('\u{FEFF}')
        .map_or((text, false), |rest| (rest, true))
}

/// Split text into lines ending in `\n`, `\r\n` or a lone `\r`
///
/// Terminators are not included in the yielded lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split('\r'))
}

/// Parse exactly two ASCII digits
fn two_digits(field: &str) -> Option<u32> {
    if field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}
