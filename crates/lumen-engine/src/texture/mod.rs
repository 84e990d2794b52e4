//! CPU textures read by the sampling builtins.
//!
//! Texels are RGBA `f32`. There is a single mip level, so bias and explicit lod
//! arguments of the lookup builtins have no effect on the result.

mod cube;
mod image;
mod sampler;
mod units;

pub use cube::{CubeFace, TextureCube};
pub use image::Texture2D;
pub use sampler::{Filter, SamplerState, Wrap};
pub use units::TextureUnits;

/// One RGBA texel.
pub type Rgba = [f32; 4];
