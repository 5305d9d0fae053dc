//! # ESC/POS Barcode Commands
//!
//! Command builders and payload validation for the two barcode families
//! ESC/POS printers support:
//!
//! | Family | Commands | Capacity |
//! |--------|----------|----------|
//! | 1D (linear) | `GS h`, `GS w`, `GS k` | up to 255 payload bytes |
//! | QR (2D matrix) | `GS ( k` function group | up to 65532 payload bytes |
//!
//! Payloads are validated against each symbology's character set and length
//! rules *before* any bytes are built; a receipt with half a barcode is worse
//! than a refused call.
//!
//! ## Usage Example
//!
//! ```
//! use boleta::protocol::barcode::{barcode1d, qr};
//!
//! let mut data = Vec::new();
//! data.extend(barcode1d::generate(barcode1d::Symbology::Ean13, "5901234123457", 64)?);
//! data.extend(qr::generate(
//!     b"https://example.com",
//!     qr::QrModel::Model2,
//!     6,
//!     qr::QrErrorLevel::M,
//! )?);
//! # Ok::<(), boleta::EncodeError>(())
//! ```

// ============================================================================
// 1D BARCODE COMMANDS (GS h / GS w / GS k)
// ============================================================================

/// Linear barcode validation and command builders.
///
/// Uses the function-B form of `GS k` (symbology codes 65-79) whose single
/// length byte covers every supported symbology and keeps NUL-capable
/// payloads unambiguous, unlike the NUL-terminated function-A form.
pub mod barcode1d {
    use crate::error::EncodeError;
    use crate::protocol::commands::GS;

    /// Linear symbologies, tagged with their `GS k` function-B codes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(u8)]
    pub enum Symbology {
        /// UPC-A (11 digits, or 12 with check digit)
        UpcA = 65,
        /// UPC-E (zero-suppressed UPC-A)
        UpcE = 66,
        /// EAN-13 / JAN-13 (12 digits, or 13 with check digit)
        Ean13 = 67,
        /// EAN-8 / JAN-8 (7 digits, or 8 with check digit)
        Ean8 = 68,
        /// Code 39 (self-checking alphanumeric subset)
        Code39 = 69,
        /// Interleaved 2 of 5 (digit pairs)
        Itf = 70,
        /// Codabar / NW-7 (start/stop letters A-D)
        Codabar = 71,
        /// Code 93 (full ASCII)
        Code93 = 72,
        /// Code 128 (full ASCII, caller manages subcodes)
        Code128 = 73,
        /// GS1-128 (Code 128 with GS1 application identifiers)
        Gs1128 = 74,
        /// GS1 DataBar Omnidirectional (13 digits)
        Gs1DatabarOmni = 75,
        /// GS1 DataBar Truncated (13 digits)
        Gs1DatabarTruncated = 76,
        /// GS1 DataBar Limited (13 digits)
        Gs1DatabarLimited = 77,
        /// GS1 DataBar Expanded (extended character set)
        Gs1DatabarExpanded = 78,
        /// Code 128 with printer-side subcode selection
        Code128Auto = 79,
    }

    impl Symbology {
        /// Every supported symbology.
        pub const ALL: [Symbology; 15] = [
            Symbology::UpcA,
            Symbology::UpcE,
            Symbology::Ean13,
            Symbology::Ean8,
            Symbology::Code39,
            Symbology::Itf,
            Symbology::Codabar,
            Symbology::Code93,
            Symbology::Code128,
            Symbology::Gs1128,
            Symbology::Gs1DatabarOmni,
            Symbology::Gs1DatabarTruncated,
            Symbology::Gs1DatabarLimited,
            Symbology::Gs1DatabarExpanded,
            Symbology::Code128Auto,
        ];

        /// The caller-facing lowercase name.
        pub const fn name(self) -> &'static str {
            match self {
                Symbology::UpcA => "upca",
                Symbology::UpcE => "upce",
                Symbology::Ean13 => "ean13",
                Symbology::Ean8 => "ean8",
                Symbology::Code39 => "code39",
                Symbology::Itf => "itf",
                Symbology::Codabar => "codabar",
                Symbology::Code93 => "code93",
                Symbology::Code128 => "code128",
                Symbology::Gs1128 => "gs1-128",
                Symbology::Gs1DatabarOmni => "gs1-databar-omni",
                Symbology::Gs1DatabarTruncated => "gs1-databar-truncated",
                Symbology::Gs1DatabarLimited => "gs1-databar-limited",
                Symbology::Gs1DatabarExpanded => "gs1-databar-expanded",
                Symbology::Code128Auto => "code128-auto",
            }
        }

        /// Look up a symbology by name. `"coda39"` is accepted as a legacy
        /// alias for `code39`.
        ///
        /// Fails with [`EncodeError::Config`] for unknown names.
        pub fn from_name(name: &str) -> Result<Symbology, EncodeError> {
            if name == "coda39" {
                return Ok(Symbology::Code39);
            }
            Symbology::ALL
                .into_iter()
                .find(|s| s.name() == name)
                .ok_or_else(|| EncodeError::Config(format!("unknown barcode symbology '{}'", name)))
        }

        /// Module (narrow bar) width in dots for this symbology.
        ///
        /// Code 39 prints its wide/narrow pattern legibly at 2 dots; the
        /// denser codes need 3.
        pub const fn module_width(self) -> u8 {
            match self {
                Symbology::Code39 => 2,
                _ => 3,
            }
        }

        /// Check a payload against this symbology's length and character
        /// rules.
        ///
        /// Fails with [`EncodeError::Validation`] naming the symbology and
        /// the violated rule. GTIN check digits (UPC-A, EAN-13, EAN-8) are
        /// verified when the caller supplies them and left to the printer
        /// when omitted.
        pub fn validate(self, payload: &str) -> Result<(), EncodeError> {
            match self {
                Symbology::UpcA => match payload.len() {
                    11 => require_digits(self, payload),
                    12 => {
                        require_digits(self, payload)?;
                        verify_gtin_check(self, payload)
                    }
                    n => Err(rule(self, format!("payload must be 11 or 12 digits, got {}", n))),
                },
                Symbology::UpcE => {
                    require_digits(self, payload)?;
                    let len = payload.len();
                    if !matches!(len, 6 | 7 | 8 | 11 | 12) {
                        return Err(rule(
                            self,
                            format!("payload must be 6, 7, 8, 11 or 12 digits, got {}", len),
                        ));
                    }
                    if len != 6 && !payload.starts_with('0') {
                        return Err(rule(
                            self,
                            "payloads longer than 6 digits must start with 0".to_string(),
                        ));
                    }
                    Ok(())
                }
                Symbology::Ean13 => match payload.len() {
                    12 => require_digits(self, payload),
                    13 => {
                        require_digits(self, payload)?;
                        verify_gtin_check(self, payload)
                    }
                    n => Err(rule(self, format!("payload must be 12 or 13 digits, got {}", n))),
                },
                Symbology::Ean8 => match payload.len() {
                    7 => require_digits(self, payload),
                    8 => {
                        require_digits(self, payload)?;
                        verify_gtin_check(self, payload)
                    }
                    n => Err(rule(self, format!("payload must be 7 or 8 digits, got {}", n))),
                },
                Symbology::Code39 => {
                    require_len(self, payload, 1, 255)?;
                    require_charset(self, payload, "0-9 A-Z space $%*+-./", |b| {
                        b.is_ascii_digit()
                            || b.is_ascii_uppercase()
                            || matches!(b, b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/')
                    })
                }
                Symbology::Itf => {
                    require_digits(self, payload)?;
                    let len = payload.len();
                    if len < 2 || len > 254 || len % 2 != 0 {
                        return Err(rule(
                            self,
                            format!("payload must be an even count of 2-254 digits, got {}", len),
                        ));
                    }
                    Ok(())
                }
                Symbology::Codabar => {
                    require_len(self, payload, 2, 255)?;
                    let bytes = payload.as_bytes();
                    let start = bytes[0];
                    let stop = bytes[bytes.len() - 1];
                    if !is_codabar_guard(start) || !is_codabar_guard(stop) {
                        return Err(rule(
                            self,
                            "payload must start and stop with A, B, C or D".to_string(),
                        ));
                    }
                    for &b in &bytes[1..bytes.len() - 1] {
                        if !(b.is_ascii_digit() || matches!(b, b'$' | b'+' | b'-' | b'.' | b'/' | b':'))
                        {
                            return Err(rule(
                                self,
                                format!("invalid character '{}' in payload body", b as char),
                            ));
                        }
                    }
                    Ok(())
                }
                Symbology::Code93
                | Symbology::Code128
                | Symbology::Gs1128
                | Symbology::Code128Auto => {
                    require_len(self, payload, 1, 255)?;
                    require_charset(self, payload, "ASCII", |b| b.is_ascii())
                }
                Symbology::Gs1DatabarOmni
                | Symbology::Gs1DatabarTruncated
                | Symbology::Gs1DatabarLimited => {
                    require_digits(self, payload)?;
                    if payload.len() != 13 {
                        return Err(rule(
                            self,
                            format!("payload must be exactly 13 digits, got {}", payload.len()),
                        ));
                    }
                    Ok(())
                }
                Symbology::Gs1DatabarExpanded => {
                    require_len(self, payload, 2, 255)?;
                    require_charset(
                        self,
                        payload,
                        "digits, letters, space !\"%&'()*+,-./:;<=>?_{",
                        |b| {
                            b.is_ascii_alphanumeric()
                                || matches!(
                                    b,
                                    b' ' | b'!'
                                        | b'"'
                                        | b'%'
                                        | b'&'
                                        | b'\''
                                        | b'('
                                        | b')'
                                        | b'*'
                                        | b'+'
                                        | b','
                                        | b'-'
                                        | b'.'
                                        | b'/'
                                        | b':'
                                        | b';'
                                        | b'<'
                                        | b'='
                                        | b'>'
                                        | b'?'
                                        | b'_'
                                        | b'{'
                                )
                        },
                    )
                }
            }
        }
    }

    impl std::fmt::Display for Symbology {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.name())
        }
    }

    impl std::str::FromStr for Symbology {
        type Err = EncodeError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Symbology::from_name(s)
        }
    }

    fn rule(symbology: Symbology, message: String) -> EncodeError {
        EncodeError::Validation(format!("{}: {}", symbology.name(), message))
    }

    fn require_digits(symbology: Symbology, payload: &str) -> Result<(), EncodeError> {
        if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
            return Err(rule(symbology, "payload must contain only digits".to_string()));
        }
        Ok(())
    }

    fn require_len(
        symbology: Symbology,
        payload: &str,
        min: usize,
        max: usize,
    ) -> Result<(), EncodeError> {
        let len = payload.chars().count();
        if len < min || len > max {
            return Err(rule(
                symbology,
                format!("payload length must be {}-{}, got {}", min, max, len),
            ));
        }
        Ok(())
    }

    fn require_charset(
        symbology: Symbology,
        payload: &str,
        allowed: &str,
        accept: impl Fn(u8) -> bool,
    ) -> Result<(), EncodeError> {
        if payload.is_ascii() && payload.bytes().all(accept) {
            return Ok(());
        }
        Err(rule(symbology, format!("payload must contain only {}", allowed)))
    }

    fn is_codabar_guard(b: u8) -> bool {
        matches!(b, b'A'..=b'D' | b'a'..=b'd')
    }

    /// Check digit for GTIN payloads (UPC-A, EAN-13, EAN-8): alternating
    /// 3/1 weights from the right, complement mod 10.
    fn gtin_check_digit(digits: &[u8]) -> u8 {
        let mut sum = 0u32;
        for (i, &b) in digits.iter().rev().enumerate() {
            let d = u32::from(b - b'0');
            sum += if i % 2 == 0 { d * 3 } else { d };
        }
        ((10 - sum % 10) % 10) as u8
    }

    fn verify_gtin_check(symbology: Symbology, payload: &str) -> Result<(), EncodeError> {
        let bytes = payload.as_bytes();
        let expected = gtin_check_digit(&bytes[..bytes.len() - 1]);
        let supplied = bytes[bytes.len() - 1] - b'0';
        if supplied != expected {
            return Err(rule(
                symbology,
                format!("check digit {} does not match computed {}", supplied, expected),
            ));
        }
        Ok(())
    }

    /// # Set Barcode Height (GS h n)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 68 n |
    ///
    /// `n` is the height in dots, 1-255.
    #[inline]
    pub fn set_height(height: u8) -> Vec<u8> {
        vec![GS, b'h', height]
    }

    /// # Set Barcode Module Width (GS w n)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 77 n |
    #[inline]
    pub fn set_width(width: u8) -> Vec<u8> {
        vec![GS, b'w', width]
    }

    /// # Print Barcode (GS k m n d1..dn)
    ///
    /// Function-B frame: symbology code, single length byte, payload.
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 6B m n d1..dn |
    ///
    /// `payload` must already be validated; this builder only frames it.
    pub fn print(symbology: Symbology, payload: &[u8]) -> Vec<u8> {
        debug_assert!(payload.len() <= 255, "function B length byte overflow");
        let mut cmd = Vec::with_capacity(4 + payload.len());
        cmd.push(GS);
        cmd.push(b'k');
        cmd.push(symbology as u8);
        cmd.push(payload.len() as u8);
        cmd.extend_from_slice(payload);
        cmd
    }

    /// Validate a payload and build the complete barcode sequence: height,
    /// module width, then the `GS k` frame.
    ///
    /// Fails with [`EncodeError::Validation`] on a malformed payload or a
    /// zero height.
    pub fn generate(
        symbology: Symbology,
        payload: &str,
        height: u8,
    ) -> Result<Vec<u8>, EncodeError> {
        if height == 0 {
            return Err(rule(symbology, "height must be 1-255 dots".to_string()));
        }
        symbology.validate(payload)?;

        let mut cmd = Vec::with_capacity(10 + payload.len());
        cmd.extend(set_height(height));
        cmd.extend(set_width(symbology.module_width()));
        cmd.extend(print(symbology, payload.as_bytes()));
        Ok(cmd)
    }
}

// ============================================================================
// QR CODE COMMANDS (GS ( k)
// ============================================================================

/// QR code command builders.
///
/// QR output is a five-step sequence within the `GS ( k` function group:
/// select model, set module size, set error correction, store the data,
/// print the stored symbol. Each step is an independently framed command;
/// [`generate`](qr::generate) composes all five.
pub mod qr {
    use crate::error::EncodeError;
    use crate::protocol::commands::{GS, u16_le};

    /// Largest storable payload. The store command's two-byte length field
    /// covers the payload plus its three function bytes.
    pub const MAX_PAYLOAD: usize = 0xFFFF - 3;

    /// Module size (in dots) used when the caller does not pick one.
    pub const DEFAULT_MODULE_SIZE: u8 = 6;

    /// QR model selection.
    ///
    /// Model 2 is the variant every current reader expects; model 1 is the
    /// original 1994 layout, kept for firmware completeness.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(u8)]
    pub enum QrModel {
        /// Original QR layout (versions 1-14)
        Model1 = 1,
        /// Extended layout with alignment patterns (versions 1-40)
        #[default]
        Model2 = 2,
    }

    /// Error correction level.
    ///
    /// | Level | Recovery | Cost |
    /// |-------|----------|------|
    /// | L | ~7% | smallest symbol |
    /// | M | ~15% | default |
    /// | Q | ~25% | larger |
    /// | H | ~30% | largest |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(u8)]
    pub enum QrErrorLevel {
        /// ~7% recovery
        L = 0,
        /// ~15% recovery
        #[default]
        M = 1,
        /// ~25% recovery
        Q = 2,
        /// ~30% recovery
        H = 3,
    }

    /// # Select QR Model (GS ( k fn 65)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 28 6B 04 00 31 41 n 00 |
    ///
    /// `n` is 0x31 for model 1, 0x32 for model 2.
    #[inline]
    pub fn set_model(model: QrModel) -> Vec<u8> {
        vec![GS, b'(', b'k', 0x04, 0x00, 0x31, 0x41, 0x30 + model as u8, 0x00]
    }

    /// # Set QR Module Size (GS ( k fn 67)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 28 6B 03 00 31 43 n |
    ///
    /// `n` is the dot width of one module; readable receipts sit around 4-8.
    #[inline]
    pub fn set_module_size(size: u8) -> Vec<u8> {
        vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x43, size]
    }

    /// # Set QR Error Correction (GS ( k fn 69)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 28 6B 03 00 31 45 n |
    ///
    /// `n` runs 0x30 (L) through 0x33 (H).
    #[inline]
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x45, 0x30 + level as u8]
    }

    /// # Store QR Data (GS ( k fn 80)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 28 6B pL pH 31 50 30 d1..dk |
    ///
    /// The little-endian length `pL + 256 * pH` counts the payload plus the
    /// three function bytes (`31 50 30`). The symbol stays in printer memory
    /// until [`print`] emits it.
    pub fn store_data(data: &[u8]) -> Vec<u8> {
        debug_assert!(data.len() <= MAX_PAYLOAD, "store length field overflow");
        let [pl, ph] = u16_le((data.len() + 3) as u16);
        let mut cmd = Vec::with_capacity(8 + data.len());
        cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, 0x31, 0x50, 0x30]);
        cmd.extend_from_slice(data);
        cmd
    }

    /// # Print Stored QR Symbol (GS ( k fn 81)
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1D 28 6B 03 00 31 51 30 |
    #[inline]
    pub fn print() -> Vec<u8> {
        vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x51, 0x30]
    }

    /// Convert a string to QR payload bytes: characters up to U+00FF encode
    /// as their byte value, everything else substitutes `?`. Readers decode
    /// that byte range as Latin-1.
    pub fn payload_bytes(value: &str) -> Vec<u8> {
        value
            .chars()
            .map(|ch| {
                let cp = ch as u32;
                if cp <= 0xFF { cp as u8 } else { b'?' }
            })
            .collect()
    }

    /// Validate the settings and build the complete five-command QR
    /// sequence.
    ///
    /// Fails with [`EncodeError::Validation`] when `module_size` is outside
    /// 1-8 or the payload exceeds [`MAX_PAYLOAD`] bytes.
    pub fn generate(
        data: &[u8],
        model: QrModel,
        module_size: u8,
        level: QrErrorLevel,
    ) -> Result<Vec<u8>, EncodeError> {
        if !(1..=8).contains(&module_size) {
            return Err(EncodeError::Validation(format!(
                "qr module size must be 1-8, got {}",
                module_size
            )));
        }
        if data.len() > MAX_PAYLOAD {
            return Err(EncodeError::Validation(format!(
                "qr payload must be at most {} bytes, got {}",
                MAX_PAYLOAD,
                data.len()
            )));
        }

        let mut cmd = Vec::with_capacity(34 + data.len());
        cmd.extend(set_model(model));
        cmd.extend(set_module_size(module_size));
        cmd.extend(set_error_correction(level));
        cmd.extend(store_data(data));
        cmd.extend(print());
        Ok(cmd)
    }
}

// ============================================================================
// TESTS
// ============================================================================
