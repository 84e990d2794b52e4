use super::{Filter, Rgba, SamplerState};
use crate::error::EngineError;

/// A 2D RGBA float texture, row-major with row 0 at `t = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    width: usize,
    height: usize,
    texels: Vec<Rgba>,
    sampler: SamplerState,
}

impl Texture2D {
    pub fn new(
        width: usize,
        height: usize,
        texels: Vec<Rgba>,
        sampler: SamplerState,
    ) -> Result<Self, EngineError> {
        let expected = width * height;
        if expected == 0 || texels.len() != expected {
            return Err(EngineError::TextureSize { width, height, expected, got: texels.len() });
        }
        Ok(Self { width, height, texels, sampler })
    }

    /// Fills each texel from its `(x, y)` coordinate.
    pub fn from_fn(
        width: usize,
        height: usize,
        sampler: SamplerState,
        texel: impl Fn(usize, usize) -> Rgba,
    ) -> Result<Self, EngineError> {
        let texels = (0..height).flat_map(|y| (0..width).map(move |x| (x, y))).map(|(x, y)| texel(x, y)).collect();
        Self::new(width, height, texels, sampler)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn sampler(&self) -> SamplerState {
        self.sampler
    }

    pub fn texel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width {
            return None;
        }
        self.texels.get(y * self.width + x).copied()
    }

    /// Samples at normalized coordinates with the texture's own sampler state.
    pub fn sample(&self, s: f32, t: f32) -> Rgba {
        self.sample_with(self.sampler, s, t)
    }

    pub fn sample_with(&self, sampler: SamplerState, s: f32, t: f32) -> Rgba {
        let u = s * self.width as f32;
        let v = t * self.height as f32;
        match sampler.filter {
            Filter::Nearest => self.fetch(sampler, u.floor() as i64, v.floor() as i64),
            Filter::Linear => {
                let (u, v) = (u - 0.5, v - 0.5);
                let (x0, y0) = (u.floor(), v.floor());
                let (fx, fy) = (u - x0, v - y0);
                let (x0, y0) = (x0 as i64, y0 as i64);
                let (x1, y1) = (x0.saturating_add(1), y0.saturating_add(1));
                let weighted = [
                    ((1.0 - fx) * (1.0 - fy), self.fetch(sampler, x0, y0)),
                    (fx * (1.0 - fy), self.fetch(sampler, x1, y0)),
                    ((1.0 - fx) * fy, self.fetch(sampler, x0, y1)),
                    (fx * fy, self.fetch(sampler, x1, y1)),
                ];
                let mut out = [0.0; 4];
                for (w, texel) in weighted {
                    for (o, c) in out.iter_mut().zip(texel) {
                        *o += w * c;
                    }
                }
                out
            }
        }
    }

    fn fetch(&self, sampler: SamplerState, x: i64, y: i64) -> Rgba {
        let x = sampler.wrap_s.apply(x, self.width);
        let y = sampler.wrap_t.apply(y, self.height);
        self.texels[y * self.width + x]
    }
}
