use std::collections::HashMap;
use std::sync::Arc;

use super::{Texture2D, TextureCube};
use crate::error::EngineError;

#[derive(Debug, Clone)]
enum Bound {
    Flat(Arc<Texture2D>),
    Cube(Arc<TextureCube>),
}

/// Textures bound to sampler unit numbers.
///
/// A sampler uniform holds a unit number; lookups resolve it here.
#[derive(Debug, Clone, Default)]
pub struct TextureUnits {
    units: HashMap<i32, Bound>,
}

impl TextureUnits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_2d(&mut self, unit: i32, texture: impl Into<Arc<Texture2D>>) {
        self.units.insert(unit, Bound::Flat(texture.into()));
    }

    pub fn bind_cube(&mut self, unit: i32, texture: impl Into<Arc<TextureCube>>) {
        self.units.insert(unit, Bound::Cube(texture.into()));
    }

    pub fn unbind(&mut self, unit: i32) -> bool {
        self.units.remove(&unit).is_some()
    }

    pub fn texture_2d(&self, unit: i32) -> Result<&Texture2D, EngineError> {
        match self.units.get(&unit) {
            Some(Bound::Flat(t)) => Ok(t),
            _ => Err(EngineError::TextureUnit { unit, expected: "sampler2D" }),
        }
    }

    pub fn texture_cube(&self, unit: i32) -> Result<&TextureCube, EngineError> {
        match self.units.get(&unit) {
            Some(Bound::Cube(t)) => Ok(t),
            _ => Err(EngineError::TextureUnit { unit, expected: "samplerCube" }),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::SamplerState;

    #[test]
    fn lookups_check_the_bound_kind() {
        let mut units = TextureUnits::new();
        units.bind_2d(0, Texture2D::new(1, 1, vec![[1.0; 4]], SamplerState::default()).unwrap());
        assert!(units.texture_2d(0).is_ok());
        assert!(matches!(
            units.texture_cube(0),
            Err(EngineError::TextureUnit { unit: 0, expected: "samplerCube" })
        ));
        assert!(units.texture_2d(1).is_err());
        assert!(units.unbind(0));
        assert!(units.is_empty());
    }
}
