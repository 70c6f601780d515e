//! Raster types used by the pipeline.
//!
//! - [`ImageRgba8`]: the decoded input note, borrowed, 4 bytes per pixel.
//! - [`GrayImageU8`]: 8-bit luma intermediate of the preprocessing stage.
//! - [`io`]: decoding rasters, writing PNG crops and JSON manifests.

pub mod io;
pub mod rgba;
pub mod traits;
pub mod u8;

pub use self::rgba::ImageRgba8;
pub use self::traits::{ImageView, Rows};
pub use self::u8::GrayImageU8;
