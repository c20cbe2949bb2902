//! Frame rasters consumed by the pipeline.
//!
//! - [`FrameView`]: borrowed RGB/RGBA raster with explicit stride.
//! - [`io::OwnedFrame`]: decoded frame owning its bytes.
//! - [`ImageView`]: row access shared with [`crate::edges::EdgeMap`].
pub mod frame;
pub mod io;
pub mod traits;

pub use self::frame::{FrameView, PixelFormat};
pub use self::traits::{ImageView, Rows};
