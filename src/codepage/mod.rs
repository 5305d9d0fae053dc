//! # Code Tables and Text Transcoding
//!
//! ESC/POS printers render text from single bytes: 0x00-0x7F is ASCII and
//! 0x80-0xFF is whatever character code table the firmware has selected
//! (`ESC t n`). This module carries the supported tables and converts Unicode
//! strings into bytes for the active one.
//!
//! ## Contract
//!
//! - ASCII (U+0000-U+007F) passes through unchanged on every page.
//! - Characters in the page's upper half map to their single byte.
//! - Anything else substitutes [`SUBSTITUTE`] (`?`). Substitution is silent:
//!   the printer must still receive a byte per character, and a receipt with
//!   a `?` beats a failed print job.
//!
//! The multi-byte CJK pages (cp936, cp949, cp950) are selectable so the
//! printer can be put into the right mode, but this encoder only transcodes
//! their ASCII range; every other character substitutes.
//!
//! ## Usage Example
//!
//! ```
//! use boleta::codepage::{self, Codepage};
//!
//! let page = Codepage::from_name("cp858")?;
//! let out = codepage::transcode(page, "Total: 12,50€");
//! assert_eq!(out.bytes.last(), Some(&0xD5)); // the euro sign on CP858
//! assert_eq!(out.substituted, 0);
//! # Ok::<(), boleta::EncodeError>(())
//! ```

mod tables;

use std::fmt;
use std::str::FromStr;

use crate::error::EncodeError;
use crate::protocol::commands::{CR, LF};

/// Byte substituted for characters the active page cannot represent.
pub const SUBSTITUTE: u8 = b'?';

// ============================================================================
// CODEPAGE ENUMERATION
// ============================================================================

/// Character code tables supported by the encoder.
///
/// Each value pairs a Unicode mapping table with the `ESC t` index the common
/// multi-language thermal firmwares assign to it. `cp1252` and `windows1252`
/// share the same table under two indices, matching the firmware menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codepage {
    Cp437,
    Cp737,
    Cp775,
    Cp850,
    Cp852,
    Cp855,
    Cp857,
    Cp858,
    Cp860,
    Cp861,
    Cp862,
    Cp863,
    Cp864,
    Cp865,
    Cp866,
    Cp869,
    Cp936,
    Cp949,
    Cp950,
    Cp1252,
    Iso88596,
    ShiftJis,
    Windows874,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
}

impl Codepage {
    /// Every supported page, in the caller-facing name order.
    pub const ALL: [Codepage; 32] = [
        Codepage::Cp437,
        Codepage::Cp737,
        Codepage::Cp775,
        Codepage::Cp850,
        Codepage::Cp852,
        Codepage::Cp855,
        Codepage::Cp857,
        Codepage::Cp858,
        Codepage::Cp860,
        Codepage::Cp861,
        Codepage::Cp862,
        Codepage::Cp863,
        Codepage::Cp864,
        Codepage::Cp865,
        Codepage::Cp866,
        Codepage::Cp869,
        Codepage::Cp936,
        Codepage::Cp949,
        Codepage::Cp950,
        Codepage::Cp1252,
        Codepage::Iso88596,
        Codepage::ShiftJis,
        Codepage::Windows874,
        Codepage::Windows1250,
        Codepage::Windows1251,
        Codepage::Windows1252,
        Codepage::Windows1253,
        Codepage::Windows1254,
        Codepage::Windows1255,
        Codepage::Windows1256,
        Codepage::Windows1257,
        Codepage::Windows1258,
    ];

    /// The caller-facing lowercase name (`"cp437"`, `"windows1252"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Codepage::Cp437 => "cp437",
            Codepage::Cp737 => "cp737",
            Codepage::Cp775 => "cp775",
            Codepage::Cp850 => "cp850",
            Codepage::Cp852 => "cp852",
            Codepage::Cp855 => "cp855",
            Codepage::Cp857 => "cp857",
            Codepage::Cp858 => "cp858",
            Codepage::Cp860 => "cp860",
            Codepage::Cp861 => "cp861",
            Codepage::Cp862 => "cp862",
            Codepage::Cp863 => "cp863",
            Codepage::Cp864 => "cp864",
            Codepage::Cp865 => "cp865",
            Codepage::Cp866 => "cp866",
            Codepage::Cp869 => "cp869",
            Codepage::Cp936 => "cp936",
            Codepage::Cp949 => "cp949",
            Codepage::Cp950 => "cp950",
            Codepage::Cp1252 => "cp1252",
            Codepage::Iso88596 => "iso88596",
            Codepage::ShiftJis => "shiftjis",
            Codepage::Windows874 => "windows874",
            Codepage::Windows1250 => "windows1250",
            Codepage::Windows1251 => "windows1251",
            Codepage::Windows1252 => "windows1252",
            Codepage::Windows1253 => "windows1253",
            Codepage::Windows1254 => "windows1254",
            Codepage::Windows1255 => "windows1255",
            Codepage::Windows1256 => "windows1256",
            Codepage::Windows1257 => "windows1257",
            Codepage::Windows1258 => "windows1258",
        }
    }

    /// The `ESC t` table index on the common multi-language firmwares.
    pub const fn printer_index(self) -> u8 {
        match self {
            Codepage::Cp437 => 0x00,
            Codepage::Cp737 => 0x40,
            Codepage::Cp775 => 0x5F,
            Codepage::Cp850 => 0x02,
            Codepage::Cp852 => 0x12,
            Codepage::Cp855 => 0x3C,
            Codepage::Cp857 => 0x3D,
            Codepage::Cp858 => 0x13,
            Codepage::Cp860 => 0x03,
            Codepage::Cp861 => 0x38,
            Codepage::Cp862 => 0x3E,
            Codepage::Cp863 => 0x04,
            Codepage::Cp864 => 0x1C,
            Codepage::Cp865 => 0x05,
            Codepage::Cp866 => 0x11,
            Codepage::Cp869 => 0x42,
            Codepage::Cp936 => 0xFF,
            Codepage::Cp949 => 0xFD,
            Codepage::Cp950 => 0xFE,
            Codepage::Cp1252 => 0x10,
            Codepage::Iso88596 => 0x16,
            Codepage::ShiftJis => 0xFC,
            Codepage::Windows874 => 0x1E,
            Codepage::Windows1250 => 0x48,
            Codepage::Windows1251 => 0x49,
            Codepage::Windows1252 => 0x47,
            Codepage::Windows1253 => 0x5A,
            Codepage::Windows1254 => 0x5B,
            Codepage::Windows1255 => 0x20,
            Codepage::Windows1256 => 0x5C,
            Codepage::Windows1257 => 0x19,
            Codepage::Windows1258 => 0x5E,
        }
    }

    /// The upper-half glyph table, or `None` for the multi-byte CJK pages.
    pub fn table(self) -> Option<&'static [char; 128]> {
        match self {
            Codepage::Cp437 => Some(&tables::CP437),
            Codepage::Cp737 => Some(&tables::CP737),
            Codepage::Cp775 => Some(&tables::CP775),
            Codepage::Cp850 => Some(&tables::CP850),
            Codepage::Cp852 => Some(&tables::CP852),
            Codepage::Cp855 => Some(&tables::CP855),
            Codepage::Cp857 => Some(&tables::CP857),
            Codepage::Cp858 => Some(&tables::CP858),
            Codepage::Cp860 => Some(&tables::CP860),
            Codepage::Cp861 => Some(&tables::CP861),
            Codepage::Cp862 => Some(&tables::CP862),
            Codepage::Cp863 => Some(&tables::CP863),
            Codepage::Cp864 => Some(&tables::CP864),
            Codepage::Cp865 => Some(&tables::CP865),
            Codepage::Cp866 => Some(&tables::CP866),
            Codepage::Cp869 => Some(&tables::CP869),
            Codepage::Cp936 => None,
            Codepage::Cp949 => None,
            Codepage::Cp950 => None,
            Codepage::Cp1252 => Some(&tables::CP1252),
            Codepage::Iso88596 => Some(&tables::ISO8859_6),
            Codepage::ShiftJis => Some(&tables::SHIFTJIS),
            Codepage::Windows874 => Some(&tables::WINDOWS874),
            Codepage::Windows1250 => Some(&tables::WINDOWS1250),
            Codepage::Windows1251 => Some(&tables::WINDOWS1251),
            Codepage::Windows1252 => Some(&tables::CP1252),
            Codepage::Windows1253 => Some(&tables::WINDOWS1253),
            Codepage::Windows1254 => Some(&tables::WINDOWS1254),
            Codepage::Windows1255 => Some(&tables::WINDOWS1255),
            Codepage::Windows1256 => Some(&tables::WINDOWS1256),
            Codepage::Windows1257 => Some(&tables::WINDOWS1257),
            Codepage::Windows1258 => Some(&tables::WINDOWS1258),
        }
    }

    /// Look up a page by its caller-facing name.
    ///
    /// Fails with [`EncodeError::Config`] for names outside the supported
    /// set.
    pub fn from_name(name: &str) -> Result<Codepage, EncodeError> {
        Codepage::ALL
            .into_iter()
            .find(|page| page.name() == name)
            .ok_or_else(|| EncodeError::Config(format!("unknown codepage '{}'", name)))
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codepage {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codepage::from_name(s)
    }
}

// ============================================================================
// TRANSCODING
// ============================================================================

/// Result of transcoding one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded {
    /// The page-encoded bytes, including any inserted newline commands.
    pub bytes: Vec<u8>,
    /// How many characters fell back to [`SUBSTITUTE`].
    pub substituted: usize,
}

/// Map one character through a page.
///
/// - ASCII (U+0000-U+007F): passed through as-is
/// - Page upper half: the matching byte 0x80-0xFF
/// - Anything else: `None`
pub fn encode_char(page: Codepage, ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    if ch == '\u{FFFD}' {
        // The replacement character marks undefined table slots; never let
        // it alias one.
        return None;
    }
    let table = page.table()?;
    table
        .iter()
        .position(|&c| c == ch)
        .map(|i| (0x80 + i) as u8)
}

/// Transcode a string through a page, substituting unmappable characters.
pub fn transcode(page: Codepage, text: &str) -> Transcoded {
    transcode_inner(page, text, None)
}

/// Transcode with character-count wrapping: after every `wrap` characters a
/// newline command (`LF CR`) is inserted before continuing.
///
/// Characters are counted per Unicode scalar value, so a substituted
/// character still counts as one column. The column counter starts at zero
/// for each call; no trailing newline is appended.
pub fn transcode_wrapped(page: Codepage, text: &str, wrap: usize) -> Transcoded {
    debug_assert!(wrap > 0, "wrap width must be at least 1");
    transcode_inner(page, text, Some(wrap))
}

fn transcode_inner(page: Codepage, text: &str, wrap: Option<usize>) -> Transcoded {
    let mut bytes = Vec::with_capacity(text.len());
    let mut substituted = 0;
    let mut column = 0;
    for ch in text.chars() {
        if let Some(width) = wrap {
            if column == width {
                bytes.extend_from_slice(&[LF, CR]);
                column = 0;
            }
            column += 1;
        }
        match encode_char(page, ch) {
            Some(byte) => bytes.push(byte),
            None => {
                bytes.push(SUBSTITUTE);
                substituted += 1;
            }
        }
    }
    Transcoded { bytes, substituted }
}

// ============================================================================
// TESTS
// ============================================================================
