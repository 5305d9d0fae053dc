//! # ESC/POS Text Styling Commands
//!
//! This module implements the formatting commands that change how subsequent
//! text prints.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Single or double underline |
//! | Italic | ESC 4 / ESC 5 | Slanted text (clone firmware) |
//! | Size | ESC M f, GS ! s | Font select + character scale |
//! | Alignment | ESC a n | Left / center / right |
//! | Code table | ESC t n | Character code table for bytes ≥ 0x80 |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! ## Statefulness
//!
//! Every command here latches: it affects all subsequent text until changed
//! or until `ESC @` re-initializes the printer. The encoder facade mirrors
//! these latches in its [`PrintState`](crate::encoder::PrintState).

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Sets the alignment for subsequent text lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Behavior
///
/// - Affects all subsequent lines until changed
/// - Takes effect at start of next line
/// - Reset by ESC @ (initialize)
///
/// ## Example
///
/// ```
/// use boleta::protocol::text::{align, Alignment};
///
/// let center = align(Alignment::Center);
/// assert_eq!(center, vec![0x1B, 0x61, 0x01]);
/// ```
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// Emphasis levels for the `ESC E` command.
///
/// Core ESC/POS defines 0 (off) and 1 (on); the double level is honored by
/// clone firmwares that read the whole parameter byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bold {
    #[default]
    Off = 0,
    On = 1,
    Double = 2,
}

/// # Set Emphasis (ESC E n)
///
/// Controls emphasized (bold) printing for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E n |
/// | Hex     | 1B 45 n |
/// | Decimal | 27 69 n |
///
/// ## Effect
///
/// Text is printed with a doubled strike, appearing bolder/darker. On
/// thermal printers this means more heat applied per dot column.
///
/// ## Example
///
/// ```
/// use boleta::protocol::text::{bold, Bold};
///
/// let mut data = Vec::new();
/// data.extend(bold(Bold::On));
/// data.extend(b"IMPORTANT");
/// data.extend(bold(Bold::Off));
/// ```
#[inline]
pub fn bold(level: Bold) -> Vec<u8> {
    vec![ESC, b'E', level as u8]
}

// ============================================================================
// UNDERLINE
// ============================================================================

/// Underline thickness for the `ESC - n` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    Off = 0,
    /// One dot thick.
    Single = 1,
    /// Two dots thick.
    Double = 2,
}

/// # Set Underline Mode (ESC - n)
///
/// Controls underlining for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
/// | Decimal | 27 45 n |
///
/// ## Parameters
///
/// - `n = 0`: Underline OFF
/// - `n = 1`: Underline ON (1 dot thick)
/// - `n = 2`: Underline ON (2 dots thick)
///
/// ## Note
///
/// Underline does not affect 90°-rotated or inverted characters.
///
/// ## Example
///
/// ```
/// use boleta::protocol::text::{underline, Underline};
///
/// let mut data = Vec::new();
/// data.extend(underline(Underline::Single));
/// data.extend(b"underlined text");
/// data.extend(underline(Underline::Off));
/// ```
#[inline]
pub fn underline(mode: Underline) -> Vec<u8> {
    vec![ESC, b'-', mode as u8]
}

// ============================================================================
// ITALIC
// ============================================================================

/// # Enable Italic (ESC 4)
///
/// Prints subsequent text slanted.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 4 |
/// | Hex     | 1B 34 |
/// | Decimal | 27 52 |
///
/// ## Note
///
/// Italic is not part of the core Epson command set; the paired
/// `ESC 4` / `ESC 5` toggle is the convention among the widespread clone
/// firmwares. Printers without an italic font ignore it.
///
/// ## Example
///
/// ```
/// use boleta::protocol::text::{italic_on, italic_off};
///
/// let mut data = Vec::new();
/// data.extend(italic_on());
/// data.extend(b"et cetera");
/// data.extend(italic_off());
/// ```
#[inline]
pub fn italic_on() -> Vec<u8> {
    vec![ESC, b'4']
}

/// # Disable Italic (ESC 5)
///
/// Returns to upright text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 5 |
/// | Hex     | 1B 35 |
/// | Decimal | 27 53 |
#[inline]
pub fn italic_off() -> Vec<u8> {
    vec![ESC, b'5']
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Character size presets.
///
/// Each preset expands to a font-select plus a scale command (§ see [`size`]).
///
/// | Variant | Font (`ESC M`) | Scale (`GS !`) |
/// |---------|----------------|-----------------|
/// | Small   | 0x01 (font B)  | 0x00 |
/// | Normal  | 0x00 (font A)  | 0x00 |
/// | Wide    | 0x00           | 0x10 |
/// | Tall    | 0x00           | 0x01 |
/// | Double  | 0x00           | 0x11 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    /// Font B: narrower glyphs, more columns per line.
    Small,
    /// Font A at 1x1 scale.
    #[default]
    Normal,
    /// Double width.
    Wide,
    /// Double height.
    Tall,
    /// Double width and double height.
    Double,
}

impl TextSize {
    /// Font-select argument for `ESC M`.
    #[inline]
    pub const fn font(self) -> u8 {
        match self {
            TextSize::Small => 0x01,
            _ => 0x00,
        }
    }

    /// Scale argument for `GS !`: high nibble = width multiplier - 1,
    /// low nibble = height multiplier - 1.
    #[inline]
    pub const fn scale(self) -> u8 {
        match self {
            TextSize::Small | TextSize::Normal => 0x00,
            TextSize::Wide => 0x10,
            TextSize::Tall => 0x01,
            TextSize::Double => 0x11,
        }
    }
}

/// # Set Character Size (ESC M f, GS ! s)
///
/// Emits a font-select followed by a scale command. Emitting both keeps the
/// printer deterministic: switching back to `Normal` also clears any scale
/// left over from `Wide`/`Tall`/`Double`.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC M f GS ! s |
/// | Hex     | 1B 4D f 1D 21 s |
/// | Decimal | 27 77 f 29 33 s |
///
/// ## Example
///
/// ```
/// use boleta::protocol::text::{size, TextSize};
///
/// // Double width and height
/// let big = size(TextSize::Double);
/// assert_eq!(big, vec![0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x11]);
///
/// // Compact font B
/// let small = size(TextSize::Small);
/// assert_eq!(small, vec![0x1B, 0x4D, 0x01, 0x1D, 0x21, 0x00]);
/// ```
#[inline]
pub fn size(preset: TextSize) -> Vec<u8> {
    vec![ESC, b'M', preset.font(), GS, b'!', preset.scale()]
}

// ============================================================================
// CODE TABLE SELECTION
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// Selects which glyph table the printer uses for bytes 0x80-0xFF.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC t n |
/// | Hex     | 1B 74 n |
/// | Decimal | 27 116 n |
///
/// The table index `n` is firmware-defined; [`Codepage::printer_index`]
/// carries the values for the supported pages.
///
/// [`Codepage::printer_index`]: crate::codepage::Codepage::printer_index
///
/// ## Example
///
/// ```
/// use boleta::protocol::text::codepage;
///
/// // Table 0 = CP437 on virtually every firmware
/// assert_eq!(codepage(0), vec![0x1B, 0x74, 0x00]);
/// ```
#[inline]
pub fn codepage(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(Bold::Off), vec![0x1B, 0x45, 0x00]);
        assert_eq!(bold(Bold::On), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(Bold::Double), vec![0x1B, 0x45, 0x02]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline(Underline::Off), vec![0x1B, 0x2D, 0x00]);
        assert_eq!(underline(Underline::Single), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(Underline::Double), vec![0x1B, 0x2D, 0x02]);
    }

    #[test]
    fn test_italic() {
        assert_eq!(italic_on(), vec![0x1B, 0x34]);
        assert_eq!(italic_off(), vec![0x1B, 0x35]);
    }

    #[test]
    fn test_size_variants() {
        assert_eq!(size(TextSize::Small), vec![0x1B, 0x4D, 0x01, 0x1D, 0x21, 0x00]);
        assert_eq!(size(TextSize::Normal), vec![0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x00]);
        assert_eq!(size(TextSize::Wide), vec![0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x10]);
        assert_eq!(size(TextSize::Tall), vec![0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x01]);
        assert_eq!(size(TextSize::Double), vec![0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x11]);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Alignment::default(), Alignment::Left);
        assert_eq!(Bold::default(), Bold::Off);
        assert_eq!(Underline::default(), Underline::Off);
        assert_eq!(TextSize::default(), TextSize::Normal);
    }

    #[test]
    fn test_codepage() {
        assert_eq!(codepage(0), vec![0x1B, 0x74, 0x00]);
        assert_eq!(codepage(0x10), vec![0x1B, 0x74, 0x10]);
        assert_eq!(codepage(255), vec![0x1B, 0x74, 0xFF]);
    }
}
