//! Skinpack Model
//!
//! Defines the in-memory contracts of one editing session:
//! - **Dimensions:** the canonical skin texture sizes
//! - **Pixels:** exact 8-bit RGBA pixel grids
//! - **Geometry:** shallowly validated bone/cube model documents
//! - **Pack:** the ordered skin collection and its mutation operations
//!
//! Nothing here touches the filesystem; decoding and export live in
//! `skinpack-raster` and `skinpack-export`.

pub mod dimensions;
pub mod geometry;
pub mod ids;
pub mod pack;
pub mod pixel;
pub mod skin;

pub use dimensions::*;
pub use geometry::*;
pub use ids::*;
pub use pack::*;
pub use pixel::*;
pub use skin::*;
