//! Single-channel image buffers, views and I/O.
//!
//! Rasters are stored top row first, exactly as decoded. The detection stages
//! decide for themselves when to work in the flipped (y-up) display frame.

pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
