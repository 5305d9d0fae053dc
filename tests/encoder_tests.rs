//! # Encoder Integration Tests
//!
//! End-to-end tests driving the [`Encoder`] facade the way a real caller
//! would: whole documents built through the chainable surface, asserted
//! against the exact byte streams the printer must receive.
//!
//! Expected bytes are written inline next to each scenario. When one of
//! these fails, the diff *is* the wire diff.

use boleta::{
    Alignment, Bold, Codepage, CutMode, DitheringAlgorithm, EncodeError, Encoder, Symbology,
    TextSize, Underline,
};
use image::{DynamicImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

/// A solid-color test image.
fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

// ============================================================================
// MINIMAL DOCUMENTS
// ============================================================================

#[test]
fn test_initialize_and_cut_is_two_fixed_commands() {
    let mut encoder = Encoder::new();
    encoder.initialize().cut(CutMode::Full);
    assert_eq!(encoder.encode(), vec![0x1B, 0x40, 0x1D, 0x56, 0x00]);
}

#[test]
fn test_empty_encoder_yields_empty_stream() {
    let mut encoder = Encoder::new();
    assert_eq!(encoder.encode(), Vec::<u8>::new());
}

// ============================================================================
// FULL RECEIPT SCENARIO
// ============================================================================

#[test]
fn test_cafe_receipt_stream() {
    let mut encoder = Encoder::new();
    encoder
        .initialize()
        .codepage_by_name("cp437")
        .unwrap()
        .align(Alignment::Center)
        .size(TextSize::Double)
        .bold(Bold::On)
        .line("CAFÉ LUNA")
        .unwrap()
        .bold(Bold::Off)
        .size(TextSize::Normal)
        .align(Alignment::Left)
        .line("1x Cortado $2.100")
        .unwrap()
        .line("1x Piñón $900")
        .unwrap()
        .underline(Underline::Single)
        .line("total $3.000")
        .unwrap()
        .underline(Underline::Off)
        .newline()
        .barcode("5901234123457", Symbology::Ean13, 64)
        .unwrap()
        .cut(CutMode::Full);

    let mut expected = Vec::new();
    expected.extend([0x1B, 0x40]); // initialize
    expected.extend([0x1B, 0x74, 0x00]); // codepage cp437
    expected.extend([0x1B, 0x61, 0x01]); // align center
    expected.extend([0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x11]); // size double
    expected.extend([0x1B, 0x45, 0x01]); // bold on
    expected.extend([0x43, 0x41, 0x46, 0x90, 0x20, 0x4C, 0x55, 0x4E, 0x41]); // CAFÉ LUNA
    expected.extend([0x0A, 0x0D]);
    expected.extend([0x1B, 0x45, 0x00]); // bold off
    expected.extend([0x1B, 0x4D, 0x00, 0x1D, 0x21, 0x00]); // size normal
    expected.extend([0x1B, 0x61, 0x00]); // align left
    expected.extend(*b"1x Cortado $2.100");
    expected.extend([0x0A, 0x0D]);
    expected.extend([0x31, 0x78, 0x20, 0x50, 0x69, 0xA4, 0xA2, 0x6E]); // 1x Piñón
    expected.extend(*b" $900");
    expected.extend([0x0A, 0x0D]);
    expected.extend([0x1B, 0x2D, 0x01]); // underline single
    expected.extend(*b"total $3.000");
    expected.extend([0x0A, 0x0D]);
    expected.extend([0x1B, 0x2D, 0x00]); // underline off
    expected.extend([0x0A, 0x0D]); // blank line
    expected.extend([0x1D, 0x68, 64]); // barcode height
    expected.extend([0x1D, 0x77, 3]); // module width
    expected.extend([0x1D, 0x6B, 67, 13]); // GS k ean13, 13 bytes
    expected.extend(*b"5901234123457");
    expected.extend([0x1D, 0x56, 0x00]); // full cut

    assert_eq!(encoder.encode(), expected);
}

// ============================================================================
// TEXT AND WRAPPING
// ============================================================================

#[test]
fn test_wrap_positions_are_codepage_independent() {
    let pages = [Codepage::Cp437, Codepage::Windows1251, Codepage::ShiftJis];
    let mut streams = Vec::new();
    for page in pages {
        let mut encoder = Encoder::new();
        encoder
            .codepage(page)
            .text_wrapped("abcdefgh", 3)
            .unwrap();
        // Strip the 3-byte codepage select; the wrapped text must match
        // byte-for-byte across pages since ASCII is shared.
        streams.push(encoder.encode()[3..].to_vec());
    }
    let expected = vec![
        b'a', b'b', b'c', 0x0A, 0x0D, b'd', b'e', b'f', 0x0A, 0x0D, b'g', b'h',
    ];
    for stream in streams {
        assert_eq!(stream, expected);
    }
}

#[test]
fn test_unmappable_characters_print_as_question_marks() {
    let mut encoder = Encoder::new();
    encoder
        .codepage(Codepage::Cp437)
        .line("10% off ☂ today")
        .unwrap();
    let bytes = encoder.encode();
    assert_eq!(&bytes[3..], b"10% off ? today\x0A\x0D");
}

#[test]
fn test_wrapped_line_ends_with_single_break() {
    let mut encoder = Encoder::new();
    encoder
        .codepage(Codepage::Cp437)
        .line_wrapped("abcdef", 3)
        .unwrap();
    let bytes = encoder.encode();
    assert_eq!(
        &bytes[3..],
        &[b'a', b'b', b'c', 0x0A, 0x0D, b'd', b'e', b'f', 0x0A, 0x0D]
    );
}

// ============================================================================
// RAW PASSTHROUGH
// ============================================================================

#[test]
fn test_raw_bytes_survive_unmodified_in_order() {
    let payload = [0x00, 0x1B, 0xFF, 0x0A, 0x80, 0x7F];
    let mut encoder = Encoder::new();
    encoder.initialize().raw(&payload).cut(CutMode::Partial);

    let mut expected = vec![0x1B, 0x40];
    expected.extend(payload);
    expected.extend([0x1D, 0x56, 0x01]);
    assert_eq!(encoder.encode(), expected);
}

// ============================================================================
// QR PAYLOAD SPLITTING
// ============================================================================

#[test]
fn test_qr_thousand_byte_payload_length_fields() {
    let payload = "q".repeat(1000);
    let mut encoder = Encoder::new();
    encoder.qrcode(&payload).unwrap();
    let bytes = encoder.encode();

    // model(9) + module size(8) + error level(8) + store(8 + 1000) + print(8)
    assert_eq!(bytes.len(), 9 + 8 + 8 + 8 + 1000 + 8);

    // Store command sits after the three setup commands. Its length field
    // covers payload + 3 function bytes: 1003 = 0x03EB little-endian.
    let store = &bytes[25..33];
    assert_eq!(store, &[0x1D, 0x28, 0x6B, 0xEB, 0x03, 0x31, 0x50, 0x30]);

    // The payload itself is stored untruncated.
    assert!(bytes[33..1033].iter().all(|&b| b == b'q'));

    // Print trigger closes the sequence.
    assert_eq!(&bytes[1033..], &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);
}

#[test]
fn test_qr_payload_too_large_is_rejected() {
    let payload = "q".repeat(65533);
    let mut encoder = Encoder::new();
    let err = encoder.qrcode(&payload).unwrap_err();
    assert!(matches!(err, EncodeError::Validation(_)));
    assert_eq!(encoder.encode(), Vec::<u8>::new());
}

// ============================================================================
// IMAGES
// ============================================================================

#[test]
fn test_white_image_prints_no_dots_under_every_algorithm() {
    let white = solid(8, 8, [255, 255, 255, 255]);
    for algorithm in [
        DitheringAlgorithm::Threshold,
        DitheringAlgorithm::Bayer,
        DitheringAlgorithm::FloydSteinberg,
        DitheringAlgorithm::Atkinson,
    ] {
        let mut encoder = Encoder::new();
        encoder.image(&white, 16, 8, algorithm).unwrap();
        let bytes = encoder.encode();
        assert_eq!(&bytes[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 8, 0]);
        assert!(
            bytes[8..].iter().all(|&b| b == 0x00),
            "{:?} printed dots on white",
            algorithm
        );
    }
}

#[test]
fn test_black_image_prints_solid_under_every_algorithm() {
    let black = solid(8, 8, [0, 0, 0, 255]);
    for algorithm in [
        DitheringAlgorithm::Threshold,
        DitheringAlgorithm::Bayer,
        DitheringAlgorithm::FloydSteinberg,
        DitheringAlgorithm::Atkinson,
    ] {
        let mut encoder = Encoder::new();
        encoder.image(&black, 16, 8, algorithm).unwrap();
        let bytes = encoder.encode();
        assert!(
            bytes[8..].iter().all(|&b| b == 0xFF),
            "{:?} left blanks on black",
            algorithm
        );
    }
}

#[test]
fn test_image_width_pads_to_byte_boundary() {
    let black = solid(4, 4, [0, 0, 0, 255]);
    let mut encoder = Encoder::new();
    encoder
        .image(&black, 10, 2, DitheringAlgorithm::Threshold)
        .unwrap();
    let bytes = encoder.encode();
    // 10 dots occupy 2 bytes per row; the 6 pad bits stay blank.
    assert_eq!(&bytes[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 2, 0]);
    assert_eq!(&bytes[8..], &[0xFF, 0xC0, 0xFF, 0xC0]);
}

// ============================================================================
// LIFECYCLE AND ERROR SURFACING
// ============================================================================

#[test]
fn test_instance_is_reusable_after_encode() {
    let mut encoder = Encoder::new();
    encoder
        .initialize()
        .codepage(Codepage::Cp437)
        .text("first")
        .unwrap();
    let first = encoder.encode();
    assert!(first.ends_with(b"first"));

    // encode() reset the codepage along with the rest of the state.
    assert!(matches!(
        encoder.text("second").unwrap_err(),
        EncodeError::State(_)
    ));

    encoder.codepage(Codepage::Cp437).text("second").unwrap();
    let second = encoder.encode();
    assert_eq!(&second[..3], &[0x1B, 0x74, 0x00]);
    assert!(second.ends_with(b"second"));
    assert!(!second.windows(5).any(|w| w == b"first"));
}

#[test]
fn test_failed_calls_leave_no_partial_commands() {
    let mut encoder = Encoder::new();
    encoder.initialize();
    assert!(encoder.barcode("not digits", Symbology::Ean8, 64).is_err());
    assert!(encoder.qrcode(&"q".repeat(70000)).is_err());
    assert!(encoder.text("no codepage yet").is_err());
    encoder.cut(CutMode::Full);

    // Only the two valid calls made it into the stream.
    assert_eq!(encoder.encode(), vec![0x1B, 0x40, 0x1D, 0x56, 0x00]);
}

#[test]
fn test_errors_name_the_offending_rule() {
    let mut encoder = Encoder::new();

    let err = encoder.barcode("123", Symbology::UpcA, 64).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("upca"), "{}", message);
    assert!(message.contains("11 or 12"), "{}", message);

    let err = encoder.codepage_by_name("klingon").unwrap_err();
    assert!(err.to_string().contains("klingon"));
}
