use crate::chain::ActiveChain;
use crate::exec::VectorPaths;
use crate::texture::TextureUnits;

/// Context handed to runtime implementations: which rows run, which wide
/// paths the executor may take, and the bound textures.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    chain: &'a ActiveChain,
    paths: VectorPaths,
    textures: Option<&'a TextureUnits>,
}

impl<'a> Invocation<'a> {
    pub fn new(chain: &'a ActiveChain, paths: VectorPaths) -> Self {
        Self { chain, paths, textures: None }
    }

    pub fn with_textures(mut self, textures: &'a TextureUnits) -> Self {
        self.textures = Some(textures);
        self
    }

    #[inline]
    pub fn chain(&self) -> &'a ActiveChain {
        self.chain
    }

    #[inline]
    pub fn paths(&self) -> VectorPaths {
        self.paths
    }

    /// Bound textures, if the caller supplied any.
    #[inline]
    pub fn textures(&self) -> Option<&'a TextureUnits> {
        self.textures
    }
}
