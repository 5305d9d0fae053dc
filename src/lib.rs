//! # Boleta - ESC/POS Command-Stream Encoder
//!
//! Boleta builds the binary command streams that drive thermal and impact
//! receipt printers speaking the ESC/POS control language. It provides:
//!
//! - **Encoder facade**: chainable, validated print operations
//! - **Protocol builders**: exact byte layouts for every supported command
//! - **Text transcoding**: 32 character code tables with silent substitution
//! - **Dithering**: four algorithms reducing images to printable bitmaps
//!
//! Transporting the bytes to a printer (USB, serial, network, Bluetooth) is
//! deliberately out of scope; `encode()` hands back a `Vec<u8>` and any
//! writer takes it from there.
//!
//! ## Quick Start
//!
//! ```
//! use boleta::{Alignment, Bold, CutMode, Encoder, Symbology};
//!
//! let mut encoder = Encoder::new();
//! encoder
//!     .initialize()
//!     .codepage_by_name("cp437")?
//!     .align(Alignment::Center)
//!     .bold(Bold::On)
//!     .line("CAFÉ LUNA")?
//!     .bold(Bold::Off)
//!     .align(Alignment::Left)
//!     .line("1x Cortado          $2.100")?
//!     .line("1x Medialuna          $900")?
//!     .newline()
//!     .barcode("012345678905", Symbology::UpcA, 64)?
//!     .qrcode("https://example.com/r/42")?
//!     .cut(CutMode::Partial);
//!
//! let bytes = encoder.encode();
//! // Send `bytes` to the printer via any transport...
//! # Ok::<(), boleta::EncodeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encoder`] | Stateful chainable facade and command buffer |
//! | [`protocol`] | ESC/POS command builders |
//! | [`codepage`] | Code tables and text transcoding |
//! | [`render`] | Image sampling and dithering |
//! | [`error`] | Error types |
//!
//! ## Printer Compatibility
//!
//! The emitted bytes follow the Epson ESC/POS command set as implemented by
//! the common 58mm/80mm thermal firmwares. Model-specific quirks (unusual
//! code table indices, unsupported symbologies) are not worked around here;
//! [`Encoder::raw`] exists for those.

pub mod codepage;
pub mod encoder;
pub mod error;
pub mod protocol;
pub mod render;

// Re-exports for convenience
pub use codepage::Codepage;
pub use encoder::{CommandBuffer, CommandSegment, Encoder, PrintState};
pub use error::EncodeError;
pub use protocol::barcode::barcode1d::Symbology;
pub use protocol::barcode::qr::{QrErrorLevel, QrModel};
pub use protocol::commands::CutMode;
pub use protocol::text::{Alignment, Bold, TextSize, Underline};
pub use render::dither::DitheringAlgorithm;
