//! # Encoder Facade
//!
//! The stateful, chainable surface most callers use. An [`Encoder`] owns the
//! current [`PrintState`] and a [`CommandBuffer`]; every method validates its
//! arguments, emits the matching protocol bytes into the buffer, and keeps
//! the tracked state in step with what the printer will believe.
//!
//! ## Lifecycle
//!
//! ```text
//! Encoder::new() → facade calls (validate + track + buffer) → encode() → bytes
//!                       ↑                                        |
//!                       └──────── buffer drained, state reset ───┘
//! ```
//!
//! [`Encoder::encode`] concatenates everything buffered so far into one
//! contiguous byte stream for the transport, then resets the instance so it
//! can build the next document. Because the reset also clears the tracked
//! codepage, text after `encode()` needs a codepage selected again.
//!
//! ## Error Behavior
//!
//! Every failure surfaces at the call that caused it; `encode()` itself
//! cannot fail. A failed call appends nothing, so a caller that drops the
//! error mid-chain still holds a buffer of only whole commands.
//!
//! ## Usage Example
//!
//! ```
//! use boleta::{Alignment, Bold, CutMode, Encoder};
//!
//! let mut encoder = Encoder::new();
//! encoder
//!     .initialize()
//!     .codepage_by_name("cp437")?
//!     .align(Alignment::Center)
//!     .bold(Bold::On)
//!     .line("PANADERIA ROSITA")?
//!     .bold(Bold::Off)
//!     .align(Alignment::Left)
//!     .line("2x Marraqueta      $1.200")?
//!     .cut(CutMode::Partial);
//!
//! let bytes = encoder.encode();
//! // Send `bytes` to the printer via any transport...
//! # Ok::<(), boleta::EncodeError>(())
//! ```

use image::DynamicImage;
use log::debug;

use crate::codepage::{self, Codepage};
use crate::error::EncodeError;
use crate::protocol::barcode::{barcode1d, qr};
use crate::protocol::commands::{self, CutMode};
use crate::protocol::graphics;
use crate::protocol::text::{self, Alignment, Bold, TextSize, Underline};
use crate::render::dither::{DEFAULT_THRESHOLD, DitheringAlgorithm, dither};
use crate::render::image as sampling;

// ============================================================================
// PRINT STATE
// ============================================================================

/// The formatting state the printer is in after replaying the buffer.
///
/// Mirrors the printer-side latches: every style command both emits bytes and
/// updates the corresponding field here, so a test can snapshot the state
/// before and after a call and assert exactly what changed. Redundant style
/// commands are still emitted — firmwares expect explicit commands, and the
/// buffer should read back exactly what the caller asked for.
///
/// `codepage` starts out unselected. Text transcoding requires one, so the
/// first `text()` before any `codepage()` call fails with
/// [`EncodeError::State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintState {
    /// Active character code table, `None` until one is selected.
    pub codepage: Option<Codepage>,
    /// Emphasis level (`ESC E`).
    pub bold: Bold,
    /// Italic latch (`ESC 4` / `ESC 5`).
    pub italic: bool,
    /// Underline thickness (`ESC -`).
    pub underline: Underline,
    /// Line alignment (`ESC a`).
    pub align: Alignment,
    /// Font and scale preset (`ESC M` + `GS !`).
    pub size: TextSize,
}

// ============================================================================
// COMMAND BUFFER
// ============================================================================

/// The bytes one facade call put on the wire.
///
/// Segments are immutable once buffered and opaque to each other; their
/// only relationship is insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSegment(Vec<u8>);

impl CommandSegment {
    /// The segment's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte count of this segment.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the segment carries no bytes (e.g. transcoding `""`).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An append-only sequence of [`CommandSegment`]s.
///
/// The buffer grows monotonically as facade calls succeed and is drained as
/// a whole by [`Encoder::encode`]. It never reorders or merges segments;
/// concatenation in insertion order is the entire finalization step.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    segments: Vec<CommandSegment>,
}

impl CommandBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment.
    pub fn push(&mut self, bytes: Vec<u8>) {
        self.segments.push(CommandSegment(bytes));
    }

    /// Number of buffered segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing has been buffered.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total byte count across all segments.
    pub fn byte_len(&self) -> usize {
        self.segments.iter().map(CommandSegment::len).sum()
    }

    /// The buffered segments in insertion order.
    pub fn segments(&self) -> &[CommandSegment] {
        &self.segments
    }

    /// Concatenate every segment into one contiguous byte vector.
    pub fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for segment in &self.segments {
            out.extend_from_slice(segment.as_bytes());
        }
        out
    }

    /// Discard all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

// ============================================================================
// ENCODER FACADE
// ============================================================================

/// Builds an ESC/POS command stream from high-level print operations.
///
/// Each instance owns its [`PrintState`] and [`CommandBuffer`] exclusively;
/// concurrent print jobs each construct their own encoder. All methods are
/// synchronous and chainable: infallible operations return `&mut Self`
/// directly, fallible ones return `Result<&mut Self, EncodeError>` so a
/// chain reads naturally with `?`.
#[derive(Debug, Default)]
pub struct Encoder {
    state: PrintState,
    buffer: CommandBuffer,
}

impl Encoder {
    /// Create an encoder with default state and an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the tracked print state.
    pub fn state(&self) -> &PrintState {
        &self.state
    }

    /// Read-only view of the buffered segments.
    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    fn push(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.buffer.push(bytes);
        self
    }

    // ------------------------------------------------------------------
    // Printer control
    // ------------------------------------------------------------------

    /// Queue printer initialization (`ESC @`).
    ///
    /// Only bytes are emitted; the tracked state keeps its construction
    /// defaults, which already mirror the printer's post-reset formatting.
    /// Re-initializing mid-stream is allowed, the caller then re-issues any
    /// style commands it wants back.
    pub fn initialize(&mut self) -> &mut Self {
        self.push(commands::init())
    }

    /// Queue a paper cut (`GS V`).
    pub fn cut(&mut self, mode: CutMode) -> &mut Self {
        self.push(commands::cut(mode))
    }

    /// Queue a line break (`LF CR`).
    pub fn newline(&mut self) -> &mut Self {
        self.push(commands::newline())
    }

    /// Append caller-supplied bytes verbatim.
    ///
    /// Escape hatch: nothing is validated and the tracked state is not
    /// consulted or updated. If the bytes change formatting, the printer and
    /// [`PrintState`] disagree afterwards; that trade-off belongs to the
    /// caller.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.push(bytes.to_vec())
    }

    // ------------------------------------------------------------------
    // Codepage and text
    // ------------------------------------------------------------------

    /// Select the character code table (`ESC t`) and make it the active
    /// table for subsequent [`text`](Self::text) calls.
    pub fn codepage(&mut self, page: Codepage) -> &mut Self {
        self.state.codepage = Some(page);
        self.push(text::codepage(page.printer_index()))
    }

    /// Select a code table by its caller-facing name (`"cp437"`,
    /// `"windows1252"`, ...).
    ///
    /// Fails with [`EncodeError::Config`] for unknown names; nothing is
    /// buffered on failure.
    pub fn codepage_by_name(&mut self, name: &str) -> Result<&mut Self, EncodeError> {
        let page = Codepage::from_name(name)?;
        Ok(self.codepage(page))
    }

    /// Queue text, transcoded through the active code table.
    ///
    /// Characters the table cannot represent substitute `?` silently; the
    /// call only fails (with [`EncodeError::State`]) when no codepage has
    /// been selected since construction or the last [`encode`](Self::encode).
    pub fn text(&mut self, value: &str) -> Result<&mut Self, EncodeError> {
        self.transcode(value, None)
    }

    /// Queue text with a column limit: after every `wrap` characters a line
    /// break is inserted before continuing.
    ///
    /// Columns count Unicode scalar values, so a substituted character still
    /// occupies one column. The column counter starts fresh at each call; it
    /// does not carry over from earlier text.
    ///
    /// Fails with [`EncodeError::Validation`] when `wrap` is zero, and with
    /// [`EncodeError::State`] when no codepage is active.
    pub fn text_wrapped(&mut self, value: &str, wrap: usize) -> Result<&mut Self, EncodeError> {
        if wrap == 0 {
            return Err(EncodeError::Validation(
                "wrap width must be at least 1 column".to_string(),
            ));
        }
        self.transcode(value, Some(wrap))
    }

    /// Queue text followed by a line break.
    ///
    /// An empty value queues just the line break, which also makes
    /// `line("")` usable before any codepage is selected.
    pub fn line(&mut self, value: &str) -> Result<&mut Self, EncodeError> {
        if !value.is_empty() {
            self.text(value)?;
        }
        Ok(self.newline())
    }

    /// Queue wrapped text followed by a line break.
    ///
    /// Applies the same wrap rule as [`text_wrapped`](Self::text_wrapped).
    pub fn line_wrapped(&mut self, value: &str, wrap: usize) -> Result<&mut Self, EncodeError> {
        if !value.is_empty() {
            self.text_wrapped(value, wrap)?;
        }
        Ok(self.newline())
    }

    fn transcode(&mut self, value: &str, wrap: Option<usize>) -> Result<&mut Self, EncodeError> {
        let page = self.state.codepage.ok_or_else(|| {
            EncodeError::State("no codepage selected; call codepage() before text()".to_string())
        })?;
        let out = match wrap {
            Some(width) => codepage::transcode_wrapped(page, value, width),
            None => codepage::transcode(page, value),
        };
        if out.substituted > 0 {
            debug!(
                "transcoded {} character(s) on {}, {} substituted",
                value.chars().count(),
                page,
                out.substituted
            );
        }
        Ok(self.push(out.bytes))
    }

    // ------------------------------------------------------------------
    // Styling
    // ------------------------------------------------------------------

    /// Set emphasis (`ESC E`) and track it.
    pub fn bold(&mut self, level: Bold) -> &mut Self {
        self.state.bold = level;
        self.push(text::bold(level))
    }

    /// Toggle italics (`ESC 4` / `ESC 5`) and track them.
    pub fn italic(&mut self, on: bool) -> &mut Self {
        self.state.italic = on;
        self.push(if on {
            text::italic_on()
        } else {
            text::italic_off()
        })
    }

    /// Set underline thickness (`ESC -`) and track it.
    pub fn underline(&mut self, mode: Underline) -> &mut Self {
        self.state.underline = mode;
        self.push(text::underline(mode))
    }

    /// Set line alignment (`ESC a`) and track it.
    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.state.align = alignment;
        self.push(text::align(alignment))
    }

    /// Set the character size preset (`ESC M` + `GS !`) and track it.
    pub fn size(&mut self, preset: TextSize) -> &mut Self {
        self.state.size = preset;
        self.push(text::size(preset))
    }

    // ------------------------------------------------------------------
    // Barcodes and QR codes
    // ------------------------------------------------------------------

    /// Queue a linear barcode: height, module width, then the framed
    /// payload.
    ///
    /// The payload is validated against the symbology's character set and
    /// length rules first; a violation fails with
    /// [`EncodeError::Validation`] naming the symbology and rule, and
    /// buffers nothing.
    pub fn barcode(
        &mut self,
        value: &str,
        symbology: barcode1d::Symbology,
        height: u8,
    ) -> Result<&mut Self, EncodeError> {
        let cmd = barcode1d::generate(symbology, value, height)?;
        Ok(self.push(cmd))
    }

    /// Queue a QR code with the default model 2, module size 6 and error
    /// level M.
    pub fn qrcode(&mut self, value: &str) -> Result<&mut Self, EncodeError> {
        self.qrcode_with(
            value,
            qr::QrModel::default(),
            qr::DEFAULT_MODULE_SIZE,
            qr::QrErrorLevel::default(),
        )
    }

    /// Queue a QR code with explicit model, module size (1-8) and error
    /// correction level.
    ///
    /// The payload encodes as Latin-1: characters beyond U+00FF substitute
    /// `?`. Fails with [`EncodeError::Validation`] on an out-of-range module
    /// size or a payload over [`qr::MAX_PAYLOAD`] bytes.
    pub fn qrcode_with(
        &mut self,
        value: &str,
        model: qr::QrModel,
        module_size: u8,
        level: qr::QrErrorLevel,
    ) -> Result<&mut Self, EncodeError> {
        let data = qr::payload_bytes(value);
        let cmd = qr::generate(&data, model, module_size, level)?;
        Ok(self.push(cmd))
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Queue an image as raster graphics at the default binarization
    /// threshold.
    ///
    /// See [`image_with_threshold`](Self::image_with_threshold).
    pub fn image(
        &mut self,
        source: &DynamicImage,
        width: u32,
        height: u32,
        algorithm: DitheringAlgorithm,
    ) -> Result<&mut Self, EncodeError> {
        self.image_with_threshold(source, width, height, algorithm, DEFAULT_THRESHOLD)
    }

    /// Queue an image as raster graphics (`GS v 0`).
    ///
    /// The source is resampled to exactly `width` x `height` device pixels
    /// (nearest-neighbor), reduced to luminance, dithered down to one bit
    /// per pixel with `algorithm`, and framed as a raster command. A width
    /// that is not a multiple of 8 pads each row on the right with blank
    /// dots.
    ///
    /// Fails with [`EncodeError::Validation`] when either dimension is zero
    /// or exceeds what the command's two-byte fields can carry.
    pub fn image_with_threshold(
        &mut self,
        source: &DynamicImage,
        width: u32,
        height: u32,
        algorithm: DitheringAlgorithm,
        threshold: u8,
    ) -> Result<&mut Self, EncodeError> {
        let luma = sampling::luminance_map(source, width, height)?;
        let bitmap = dither(&luma, width, height, algorithm, threshold);
        // luminance_map bounds both dimensions to 65535, so these casts
        // cannot truncate.
        let cmd = graphics::raster(width as u16, height as u16, &bitmap.data);
        Ok(self.push(cmd))
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    /// Concatenate everything buffered so far into one byte stream, then
    /// reset the encoder for the next document.
    ///
    /// The buffer is drained and the tracked state returns to its defaults,
    /// including the unselected codepage. `encode()` itself never fails;
    /// all validation happened at the call that buffered each segment.
    pub fn encode(&mut self) -> Vec<u8> {
        let bytes = self.buffer.concat();
        debug!(
            "encoded {} segment(s) into {} bytes",
            self.buffer.len(),
            bytes.len()
        );
        self.buffer.clear();
        self.state = PrintState::default();
        bytes
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_state() {
        let encoder = Encoder::new();
        assert_eq!(
            *encoder.state(),
            PrintState {
                codepage: None,
                bold: Bold::Off,
                italic: false,
                underline: Underline::Off,
                align: Alignment::Left,
                size: TextSize::Normal,
            }
        );
        assert!(encoder.buffer().is_empty());
    }

    #[test]
    fn test_initialize_then_cut() {
        let mut encoder = Encoder::new();
        encoder.initialize().cut(CutMode::Full);
        assert_eq!(encoder.encode(), vec![0x1B, 0x40, 0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_initialize_keeps_state_defaults() {
        let mut encoder = Encoder::new();
        let before = *encoder.state();
        encoder.initialize();
        assert_eq!(*encoder.state(), before);
    }

    #[test]
    fn test_text_without_codepage_is_state_error() {
        let mut encoder = Encoder::new();
        let err = encoder.text("hola").unwrap_err();
        assert!(matches!(err, EncodeError::State(_)));
        // The failed call buffered nothing.
        assert!(encoder.buffer().is_empty());
    }

    #[test]
    fn test_codepage_then_text() {
        let mut encoder = Encoder::new();
        encoder.codepage(Codepage::Cp437).text("ñ5").unwrap();
        assert_eq!(encoder.encode(), vec![0x1B, 0x74, 0x00, 0xA4, b'5']);
    }

    #[test]
    fn test_codepage_by_name() {
        let mut encoder = Encoder::new();
        encoder.codepage_by_name("windows1252").unwrap();
        assert_eq!(encoder.state().codepage, Some(Codepage::Windows1252));
        assert_eq!(encoder.encode(), vec![0x1B, 0x74, 0x47]);
    }

    #[test]
    fn test_unknown_codepage_name_is_config_error() {
        let mut encoder = Encoder::new();
        let err = encoder.codepage_by_name("cp9000").unwrap_err();
        assert!(matches!(err, EncodeError::Config(_)));
        assert_eq!(encoder.state().codepage, None);
        assert!(encoder.buffer().is_empty());
    }

    #[test]
    fn test_text_substitutes_silently() {
        let mut encoder = Encoder::new();
        encoder.codepage(Codepage::Cp437).text("a★b").unwrap();
        let bytes = encoder.encode();
        assert_eq!(&bytes[3..], &[b'a', b'?', b'b']);
    }

    #[test]
    fn test_text_wrapped_inserts_line_breaks() {
        let mut encoder = Encoder::new();
        encoder
            .codepage(Codepage::Cp437)
            .text_wrapped("abcdefgh", 3)
            .unwrap();
        let bytes = encoder.encode();
        assert_eq!(
            &bytes[3..],
            &[b'a', b'b', b'c', 0x0A, 0x0D, b'd', b'e', b'f', 0x0A, 0x0D, b'g', b'h']
        );
    }

    #[test]
    fn test_text_wrapped_zero_width_rejected() {
        let mut encoder = Encoder::new();
        encoder.codepage(Codepage::Cp437);
        let err = encoder.text_wrapped("abc", 0).unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
    }

    #[test]
    fn test_line_is_text_plus_newline() {
        let mut encoder = Encoder::new();
        encoder.codepage(Codepage::Cp437).line("ok").unwrap();
        let bytes = encoder.encode();
        assert_eq!(&bytes[3..], &[b'o', b'k', 0x0A, 0x0D]);
    }

    #[test]
    fn test_empty_line_needs_no_codepage() {
        let mut encoder = Encoder::new();
        encoder.line("").unwrap();
        assert_eq!(encoder.encode(), vec![0x0A, 0x0D]);
    }

    #[test]
    fn test_style_setters_emit_and_track() {
        let mut encoder = Encoder::new();
        encoder
            .bold(Bold::Double)
            .italic(true)
            .underline(Underline::Single)
            .align(Alignment::Right)
            .size(TextSize::Wide);

        let state = encoder.state();
        assert_eq!(state.bold, Bold::Double);
        assert!(state.italic);
        assert_eq!(state.underline, Underline::Single);
        assert_eq!(state.align, Alignment::Right);
        assert_eq!(state.size, TextSize::Wide);

        assert_eq!(
            encoder.encode(),
            vec![
                0x1B, 0x45, 0x02, // bold double
                0x1B, 0x34, // italic on
                0x1B, 0x2D, 0x01, // underline single
                0x1B, 0x61, 0x02, // align right
                0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x10, // size wide
            ]
        );
    }

    #[test]
    fn test_redundant_style_commands_are_not_elided() {
        let mut encoder = Encoder::new();
        encoder.bold(Bold::On).bold(Bold::On);
        assert_eq!(encoder.buffer().len(), 2);
        assert_eq!(encoder.encode(), vec![0x1B, 0x45, 0x01, 0x1B, 0x45, 0x01]);
    }

    #[test]
    fn test_italic_off_bytes() {
        let mut encoder = Encoder::new();
        encoder.italic(false);
        assert!(!encoder.state().italic);
        assert_eq!(encoder.encode(), vec![0x1B, 0x35]);
    }

    #[test]
    fn test_barcode_valid_payload() {
        let mut encoder = Encoder::new();
        encoder
            .barcode("012345678905", barcode1d::Symbology::UpcA, 80)
            .unwrap();
        let bytes = encoder.encode();
        assert_eq!(&bytes[..3], &[0x1D, 0x68, 80]);
        assert_eq!(&bytes[3..6], &[0x1D, 0x77, 3]);
        assert_eq!(&bytes[6..10], &[0x1D, 0x6B, 65, 12]);
        assert_eq!(&bytes[10..], b"012345678905");
    }

    #[test]
    fn test_barcode_invalid_payload_buffers_nothing() {
        let mut encoder = Encoder::new();
        let err = encoder
            .barcode("123", barcode1d::Symbology::UpcA, 80)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
        assert!(encoder.buffer().is_empty());
    }

    #[test]
    fn test_qrcode_defaults() {
        let mut encoder = Encoder::new();
        encoder.qrcode("boleta").unwrap();
        let bytes = encoder.encode();
        // Model 2, then module size 6.
        assert!(bytes.starts_with(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]));
        assert_eq!(&bytes[9..17], &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 0x06]);
        // Print trigger last.
        assert!(bytes.ends_with(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]));
    }

    #[test]
    fn test_qrcode_with_invalid_module_size() {
        let mut encoder = Encoder::new();
        let err = encoder
            .qrcode_with("x", qr::QrModel::Model2, 9, qr::QrErrorLevel::L)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
        assert!(encoder.buffer().is_empty());
    }

    #[test]
    fn test_image_frames_raster_command() {
        use image::{Rgba, RgbaImage};

        let black = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([0, 0, 0, 255]),
        ));
        let mut encoder = Encoder::new();
        encoder
            .image(&black, 12, 2, DitheringAlgorithm::Threshold)
            .unwrap();
        let bytes = encoder.encode();
        // 12 dots round up to 2 bytes per row.
        assert_eq!(&bytes[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 2, 0]);
        // Each row: 12 dark dots then 4 bits of padding.
        assert_eq!(&bytes[8..], &[0xFF, 0xF0, 0xFF, 0xF0]);
    }

    #[test]
    fn test_image_zero_dimension_rejected() {
        let source = DynamicImage::new_rgb8(4, 4);
        let mut encoder = Encoder::new();
        let err = encoder
            .image(&source, 0, 4, DitheringAlgorithm::Threshold)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Validation(_)));
        assert!(encoder.buffer().is_empty());
    }

    #[test]
    fn test_raw_bypasses_validation() {
        let mut encoder = Encoder::new();
        // Not a valid command, buffered verbatim anyway.
        encoder.raw(&[0x00, 0xFF, 0x1B]);
        assert_eq!(encoder.encode(), vec![0x00, 0xFF, 0x1B]);
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let mut encoder = Encoder::new();
        encoder.raw(&[1, 2]).raw(&[]).raw(&[3]);
        assert_eq!(encoder.buffer().len(), 3);
        assert_eq!(encoder.encode(), vec![1, 2, 3]);
    }

    #[test]
    fn test_encode_drains_buffer_and_resets_state() {
        let mut encoder = Encoder::new();
        encoder
            .initialize()
            .codepage(Codepage::Cp858)
            .bold(Bold::On)
            .text("x")
            .unwrap();
        assert!(!encoder.encode().is_empty());

        // Second encode yields nothing.
        assert!(encoder.buffer().is_empty());
        assert_eq!(encoder.encode(), Vec::<u8>::new());

        // State is back to defaults, including the unselected codepage.
        assert_eq!(*encoder.state(), PrintState::default());
        assert!(matches!(
            encoder.text("y").unwrap_err(),
            EncodeError::State(_)
        ));
    }

    #[test]
    fn test_failed_call_leaves_buffer_intact() {
        let mut encoder = Encoder::new();
        encoder.initialize();
        let before = encoder.buffer().byte_len();
        assert!(encoder.barcode("abc", barcode1d::Symbology::Ean8, 64).is_err());
        assert_eq!(encoder.buffer().byte_len(), before);
    }

    #[test]
    fn test_chaining_mixed_fallibility() {
        let mut encoder = Encoder::new();
        let result: Result<(), EncodeError> = (|| {
            encoder
                .initialize()
                .codepage_by_name("cp437")?
                .align(Alignment::Center)
                .text("ready")?
                .newline()
                .cut(CutMode::Partial);
            Ok(())
        })();
        result.unwrap();
        assert_eq!(encoder.buffer().len(), 6);
    }

    #[test]
    fn test_command_buffer_accounting() {
        let mut buffer = CommandBuffer::new();
        assert!(buffer.is_empty());
        buffer.push(vec![1, 2, 3]);
        buffer.push(Vec::new());
        buffer.push(vec![4]);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.byte_len(), 4);
        assert_eq!(buffer.concat(), vec![1, 2, 3, 4]);
        // concat is non-destructive; clear drains.
        assert_eq!(buffer.len(), 3);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.concat(), Vec::<u8>::new());
    }

    #[test]
    fn test_command_segment_views() {
        let mut buffer = CommandBuffer::new();
        buffer.push(vec![0x1B, 0x40]);
        buffer.push(Vec::new());
        let segments = buffer.segments();
        assert_eq!(segments[0].as_bytes(), &[0x1B, 0x40]);
        assert_eq!(segments[0].len(), 2);
        assert!(!segments[0].is_empty());
        assert!(segments[1].is_empty());
    }
}
