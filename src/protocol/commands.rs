//! # ESC/POS Base Commands
//!
//! This module implements the hardware-level ESC/POS commands shared by every
//! print job: initialization, paper cutting, and line advancement.
//!
//! ## Protocol Overview
//!
//! ESC/POS commands are byte sequences starting with a prefix byte:
//!
//! - **ESC (0x1B)**: classic commands inherited from dot-matrix firmware
//! - **GS (0x1D)**: extended commands (cutter, barcodes, raster graphics)
//! - Bare control bytes: `LF`, `CR`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Reference
//!
//! Based on the Epson "ESC/POS Application Programming Guide" command set,
//! as implemented by the common 58mm/80mm thermal printer firmwares.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// The classic ESC/POS commands begin with ESC (0x1B). This byte signals the
/// start of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Prefixes the extended command set:
/// - Cutter control (`GS V`), character scaling (`GS !`)
/// - Barcodes (`GS h`, `GS w`, `GS k`), 2D symbols (`GS ( k`)
/// - Raster graphics (`GS v 0`)
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by the current
/// line spacing amount.
pub const LF: u8 = 0x0A;

/// CR (Carriage Return) - Return print position to line start
///
/// Ignored by most thermal models but required by impact printers; always
/// emitted after LF so the same stream drives both.
pub const CR: u8 = 0x0D;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. This should be sent
/// at the start of each print job to ensure consistent behavior.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Text formatting (bold, underline, character scale) disabled
/// - Alignment reset to left
/// - Character code table reset to the firmware default
///
/// ## What Does NOT Reset
///
/// - User-defined characters in RAM
/// - NV graphics stored in flash
/// - Configuration settings (density, interface parameters)
///
/// ## Example
///
/// ```
/// use boleta::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// LINE ADVANCEMENT
// ============================================================================

/// # Print and Line Feed (LF CR)
///
/// Prints the line buffer and advances one line. The trailing CR is a no-op
/// on thermal models and moves the head home on impact models.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | LF CR |
/// | Hex     | 0A 0D |
/// | Decimal | 10 13 |
#[inline]
pub fn newline() -> Vec<u8> {
    vec![LF, CR]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// Paper cut variants for the `GS V` command.
///
/// | Variant | m | Result |
/// |---------|---|--------|
/// | Full    | 0 | severs the paper completely |
/// | Partial | 1 | leaves a small uncut hinge |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CutMode {
    /// Full cut, receipt drops free.
    #[default]
    Full = 0,
    /// Partial cut, receipt stays attached by a small hinge for tearing off.
    Partial = 1,
}

/// # Cut Paper (GS V m)
///
/// Cuts the paper at the current position. Any pending data in the line
/// buffer is printed first.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V m   |
/// | Hex     | 1D 56 m  |
/// | Decimal | 29 86 m  |
///
/// `m` = 0 for a full cut, 1 for a partial cut.
///
/// ## Example
///
/// ```
/// use boleta::protocol::commands::{cut, CutMode};
///
/// assert_eq!(cut(CutMode::Full), vec![0x1D, 0x56, 0x00]);
/// assert_eq!(cut(CutMode::Partial), vec![0x1D, 0x56, 0x01]);
/// ```
#[inline]
pub fn cut(mode: CutMode) -> Vec<u8> {
    vec![GS, b'V', mode as u8]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ESC/POS uses little-endian encoding for all multi-byte integers.
///
/// ## Example
///
/// ```
/// use boleta::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]); // 576 = 0x0240
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
