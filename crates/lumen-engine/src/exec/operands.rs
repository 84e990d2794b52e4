/// A tuple of equally long operand slices read one row at a time.
pub trait Operands: Copy {
    /// One row of every operand.
    type Item;

    /// Rows in each slice.
    fn len(&self) -> usize;

    /// The same tuple restricted to `start..start + width`.
    fn window(&self, start: usize, width: usize) -> Self;

    fn fetch(&self, row: usize) -> Self::Item;
}

/// A pure scalar function of the operand tuple `I`.
///
/// Implemented for every `Fn` of matching arity, so builtins pass plain
/// functions or closures.
pub trait Operator<I> {
    type Output;

    fn apply(&self, input: I) -> Self::Output;
}

macro_rules! operands {
    ($($T:ident . $idx:tt),+) => {
        impl<'a, $($T: Copy),+> Operands for ($(&'a [$T],)+) {
            type Item = ($($T,)+);

            #[inline(always)]
            fn len(&self) -> usize {
                self.0.len()
            }

            #[inline(always)]
            fn window(&self, start: usize, width: usize) -> Self {
                ($(&self.$idx[start..start + width],)+)
            }

            #[inline(always)]
            fn fetch(&self, row: usize) -> Self::Item {
                ($(self.$idx[row],)+)
            }
        }
    };
}

operands!(A.0);
operands!(A.0, B.1);
operands!(A.0, B.1, C.2);
operands!(A.0, B.1, C.2, D.3);

macro_rules! operator {
    ($($T:ident $v:ident),+) => {
        impl<F, $($T,)+ R> Operator<($($T,)+)> for F
        where
            F: Fn($($T),+) -> R,
        {
            type Output = R;

            #[inline(always)]
            fn apply(&self, ($($v,)+): ($($T,)+)) -> R {
                self($($v),+)
            }
        }
    };
}

operator!(A a);
operator!(A a, B b);
operator!(A a, B b, C c);
operator!(A a, B b, C c, D d);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_then_fetch_reads_the_offset_row() {
        let a = [1.0f32, 2.0, 3.0, 4.0];
        let b = [10, 20, 30, 40];
        let ops = (&a[..], &b[..]);
        let w = ops.window(2, 2);
        assert_eq!(w.len(), 2);
        assert_eq!(w.fetch(1), (4.0, 40));
    }

    #[test]
    fn closures_are_operators() {
        let add = |x: f32, y: f32| x + y;
        assert_eq!(add.apply((1.0, 2.0)), 3.0);
        assert_eq!(f32::sqrt.apply((9.0,)), 3.0);
    }
}
