use super::{Rgba, SamplerState, Texture2D, Wrap};
use crate::error::EngineError;

/// Cube map faces in GL order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// Major-axis face for direction `r` and the face-local `(s, t)` in `[0, 1]`.
    ///
    /// Ties prefer x over y over z.
    pub fn select(r: [f32; 3]) -> (CubeFace, f32, f32) {
        let [x, y, z] = r;
        let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
        let (face, sc, tc, ma) = if ax >= ay && ax >= az {
            if x >= 0.0 {
                (CubeFace::PositiveX, -z, -y, ax)
            } else {
                (CubeFace::NegativeX, z, -y, ax)
            }
        } else if ay >= az {
            if y >= 0.0 {
                (CubeFace::PositiveY, x, z, ay)
            } else {
                (CubeFace::NegativeY, x, -z, ay)
            }
        } else if z >= 0.0 {
            (CubeFace::PositiveZ, x, -y, az)
        } else {
            (CubeFace::NegativeZ, -x, -y, az)
        };
        (face, (sc / ma + 1.0) * 0.5, (tc / ma + 1.0) * 0.5)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Six square faces of equal size, sampled with clamp-to-edge per face.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCube {
    faces: [Texture2D; 6],
}

impl TextureCube {
    pub fn new(faces: [Texture2D; 6]) -> Result<Self, EngineError> {
        let size = faces[0].width();
        for face in &faces {
            if face.width() != size || face.height() != size {
                return Err(EngineError::TextureSize {
                    width: face.width(),
                    height: face.height(),
                    expected: size * size,
                    got: face.width() * face.height(),
                });
            }
        }
        Ok(Self { faces })
    }

    pub fn size(&self) -> usize {
        self.faces[0].width()
    }

    pub fn face(&self, face: CubeFace) -> &Texture2D {
        &self.faces[face.index()]
    }

    /// Samples along direction `r`; the direction need not be normalized.
    pub fn sample(&self, r: [f32; 3]) -> Rgba {
        let (face, s, t) = CubeFace::select(r);
        let tex = self.face(face);
        let sampler = SamplerState { wrap_s: Wrap::ClampToEdge, wrap_t: Wrap::ClampToEdge, ..tex.sampler() };
        tex.sample_with(sampler, s, t)
    }
}
