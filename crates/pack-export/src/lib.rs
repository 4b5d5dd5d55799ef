//! Skinpack Export
//!
//! Serializes a pack snapshot into the flat `.mcpack` archive the game
//! client loads.
//!
//! # Archive Layout
//!
//! ```text
//! PackSnapshot ──┬── manifest.json   (pack name, two fresh UUIDs, version 1.0.0)
//!                ├── skins.json      (one entry per skin, in pack order)
//!                ├── geometry.json   (only when a skin carries custom geometry)
//!                │
//!                └── skins ── encode (fan-out, one blocking task per skin)
//!                                │
//!                                ▼  join all
//!                         skin_0.png, skin_1.png, ...
//!                                │
//!                                ▼
//!                           ZipSink ──► archive bytes
//! ```

pub mod archive;
pub mod documents;
pub mod export;
pub mod preflight;

pub use archive::*;
pub use documents::*;
pub use export::*;
pub use preflight::*;
