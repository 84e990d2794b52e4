use super::{Operands, Operator, RowKernel, VectorPaths, traverse};
use crate::chain::ActiveChain;

/// Writes `op(inputs[row])` to `out[row]` for each visited row.
struct MapKernel<'a, O, R, F> {
    inputs: O,
    out: &'a mut [R],
    op: &'a F,
}

impl<O, R, F> RowKernel for MapKernel<'_, O, R, F>
where
    O: Operands,
    F: Operator<O::Item, Output = R>,
{
    #[inline(always)]
    fn rows<const W: usize>(&mut self, start: usize) {
        let inputs = self.inputs.window(start, W);
        let out = &mut self.out[start..start + W];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.op.apply(inputs.fetch(i));
        }
    }
}

/// Replaces `acc[row]` with `op(acc[row], inputs[row])` for each visited row.
struct UpdateKernel<'a, O, R, F> {
    inputs: O,
    acc: &'a mut [R],
    op: F,
}

impl<O, R, F> RowKernel for UpdateKernel<'_, O, R, F>
where
    O: Operands,
    R: Copy,
    F: Fn(R, O::Item) -> R,
{
    #[inline(always)]
    fn rows<const W: usize>(&mut self, start: usize) {
        let inputs = self.inputs.window(start, W);
        let acc = &mut self.acc[start..start + W];
        for (i, slot) in acc.iter_mut().enumerate() {
            *slot = (self.op)(*slot, inputs.fetch(i));
        }
    }
}

fn map<O, R, F>(chain: &ActiveChain, paths: VectorPaths, inputs: O, out: &mut [R], op: &F)
where
    O: Operands,
    F: Operator<O::Item, Output = R>,
{
    debug_assert_eq!(inputs.len(), chain.rows());
    debug_assert_eq!(out.len(), chain.rows());
    traverse(chain, paths, &mut MapKernel { inputs, out, op });
}

fn update<O, R, F>(chain: &ActiveChain, paths: VectorPaths, inputs: O, acc: &mut [R], op: F)
where
    O: Operands,
    R: Copy,
    F: Fn(R, O::Item) -> R,
{
    debug_assert_eq!(inputs.len(), chain.rows());
    debug_assert_eq!(acc.len(), chain.rows());
    traverse(chain, paths, &mut UpdateKernel { inputs, acc, op });
}

// ── Entry points ──────────────────────────────────────────────────────────

/// `out[r] = op(a[r])` for every live row `r`; other rows are untouched.
pub fn execute1<A, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    a: &[A],
    out: &mut [R],
    op: impl Fn(A) -> R,
) where
    A: Copy,
{
    map(chain, paths, (a,), out, &op);
}

pub fn execute2<A, B, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    a: &[A],
    b: &[B],
    out: &mut [R],
    op: impl Fn(A, B) -> R,
) where
    A: Copy,
    B: Copy,
{
    map(chain, paths, (a, b), out, &op);
}

pub fn execute3<A, B, C, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    a: &[A],
    b: &[B],
    c: &[C],
    out: &mut [R],
    op: impl Fn(A, B, C) -> R,
) where
    A: Copy,
    B: Copy,
    C: Copy,
{
    map(chain, paths, (a, b, c), out, &op);
}

#[allow(clippy::too_many_arguments)]
pub fn execute4<A, B, C, D, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    a: &[A],
    b: &[B],
    c: &[C],
    d: &[D],
    out: &mut [R],
    op: impl Fn(A, B, C, D) -> R,
) where
    A: Copy,
    B: Copy,
    C: Copy,
    D: Copy,
{
    map(chain, paths, (a, b, c, d), out, &op);
}

/// `acc[r] = op(acc[r], a[r])` for every live row `r`.
pub fn update1<A, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    acc: &mut [R],
    a: &[A],
    op: impl Fn(R, A) -> R,
) where
    A: Copy,
    R: Copy,
{
    update(chain, paths, (a,), acc, |r, (x,)| op(r, x));
}

pub fn update2<A, B, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    acc: &mut [R],
    a: &[A],
    b: &[B],
    op: impl Fn(R, A, B) -> R,
) where
    A: Copy,
    B: Copy,
    R: Copy,
{
    update(chain, paths, (a, b), acc, |r, (x, y)| op(r, x, y));
}

pub fn update3<A, B, C, R>(
    chain: &ActiveChain,
    paths: VectorPaths,
    acc: &mut [R],
    a: &[A],
    b: &[B],
    c: &[C],
    op: impl Fn(R, A, B, C) -> R,
) where
    A: Copy,
    B: Copy,
    C: Copy,
    R: Copy,
{
    update(chain, paths, (a, b, c), acc, |r, (x, y, z)| op(r, x, y, z));
}
