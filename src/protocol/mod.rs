//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS control language spoken by
//! thermal receipt printers. Every function returns the exact bytes one
//! command puts on the wire; nothing here tracks state or validates intent.
//!
//! ## Module Structure
//!
//! - [`commands`]: initialize, newline, paper cut, shared byte constants
//! - [`text`]: styling (alignment, bold, underline, italic, size) and
//!   code table selection
//! - [`barcode`]: 1D symbologies and QR codes, including payload validation
//! - [`graphics`]: the raster bit-image command
//!
//! ## Usage Example
//!
//! ```
//! use boleta::protocol::{commands, text};
//!
//! // Build a styled header by hand
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold(text::Bold::On));
//! data.extend(b"RECEIPT");
//! data.extend(commands::newline());
//! data.extend(text::bold(text::Bold::Off));
//! data.extend(commands::cut(commands::CutMode::Full));
//!
//! // Send `data` to the printer via any transport...
//! ```
//!
//! Most callers want the stateful [`crate::Encoder`] instead, which layers
//! validation and print-state tracking over these builders.

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;
