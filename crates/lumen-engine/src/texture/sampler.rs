/// Texture coordinate wrap mode, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    #[default]
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

impl Wrap {
    /// Maps an integer texel coordinate into `0..size`.
    pub fn apply(self, i: i64, size: usize) -> usize {
        let n = size.max(1) as i64;
        let idx = match self {
            Wrap::Repeat => i.rem_euclid(n),
            Wrap::ClampToEdge => i.clamp(0, n - 1),
            Wrap::MirroredRepeat => {
                let m = i.rem_euclid(2 * n);
                if m < n { m } else { 2 * n - 1 - m }
            }
        };
        idx as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Nearest,
    Linear,
}

/// Sampling state attached to a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerState {
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub filter: Filter,
}

impl SamplerState {
    pub const fn new(wrap: Wrap, filter: Filter) -> Self {
        Self { wrap_s: wrap, wrap_t: wrap, filter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_wraps_negative_coordinates() {
        assert_eq!(Wrap::Repeat.apply(-1, 4), 3);
        assert_eq!(Wrap::Repeat.apply(9, 4), 1);
    }

    #[test]
    fn clamp_pins_to_edges() {
        assert_eq!(Wrap::ClampToEdge.apply(-5, 4), 0);
        assert_eq!(Wrap::ClampToEdge.apply(17, 4), 3);
    }

    #[test]
    fn mirrored_repeat_reflects_every_other_period() {
        let got: Vec<usize> = (-4..8).map(|i| Wrap::MirroredRepeat.apply(i, 4)).collect();
        assert_eq!(got, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
    }
}
