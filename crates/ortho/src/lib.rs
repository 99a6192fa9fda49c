#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use ortho_camera as camera;

#[doc(inline)]
pub use ortho_raster as raster;

#[doc(inline)]
pub use ortho_rectify as rectify;

#[doc(inline)]
pub use ortho_terrain as terrain;
