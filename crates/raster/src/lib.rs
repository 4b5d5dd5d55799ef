//! Skinpack Raster
//!
//! Converts between encoded skin images and [`PixelGrid`]s:
//! - **Decode:** PNG bytes to an exact RGBA grid, restricted to canonical sizes
//! - **Encode:** a grid back to an RGBA PNG at its stored size
//!
//! Both directions are lossless on 8-bit RGBA; no color management,
//! gamma or alpha premultiplication is applied.
//!
//! [`PixelGrid`]: skinpack_model::PixelGrid

pub mod decode;
pub mod encode;

pub use decode::{accepted_dimensions, decode_skin, probe_dimensions};
pub use encode::encode_png;
