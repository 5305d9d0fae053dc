//! # Image Rendering
//!
//! Turns caller-supplied images into the packed monochrome bitmaps the
//! raster graphics command prints.
//!
//! ## Modules
//!
//! - [`image`]: resample to device pixels and compute luminance
//! - [`dither`]: reduce luminance to one bit per pixel (four algorithms)
//!
//! ## Usage Example
//!
//! ```
//! use boleta::render::{dither, image as sampling};
//! use boleta::render::dither::{DitheringAlgorithm, DEFAULT_THRESHOLD};
//!
//! let source = image::DynamicImage::new_rgb8(64, 64);
//! let luma = sampling::luminance_map(&source, 384, 384)?;
//! let bitmap = dither::dither(&luma, 384, 384, DitheringAlgorithm::Atkinson, DEFAULT_THRESHOLD);
//!
//! // bitmap.data is ready for protocol::graphics::raster()
//! # Ok::<(), boleta::EncodeError>(())
//! ```

pub mod dither;
pub mod image;
