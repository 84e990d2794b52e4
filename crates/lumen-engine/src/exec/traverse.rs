use bytemuck::pod_read_unaligned;

use super::VectorPaths;
use crate::chain::ActiveChain;

/// Work applied to a run of `W` adjacent live rows starting at `start`.
///
/// `W` is 8, 4 or 1. Implementations loop over `0..W` with no per-row
/// branching so the wide instantiations vectorize.
pub trait RowKernel {
    fn rows<const W: usize>(&mut self, start: usize);
}

/// Low 7 link bytes of a dense 8-row run, little-endian.
const DENSE8: u64 = 0x0001_0101_0101_0101;
const DENSE8_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;
/// Low 3 link bytes of a dense 4-row run, little-endian.
const DENSE4: u32 = 0x0001_0101;
const DENSE4_MASK: u32 = 0x00FF_FFFF;

/// Visits every live row of `chain` exactly once, in ascending order.
pub fn traverse<K: RowKernel>(chain: &ActiveChain, paths: VectorPaths, kernel: &mut K) {
    let links = chain.as_bytes();
    let rows = links.len();
    let Some(mut row) = chain.start() else {
        return;
    };

    loop {
        debug_assert!(row < rows, "chain link past the end of the batch");

        // `last` is the final row of the run; its link continues the chain.
        let (last, delta) = if paths.wide8() && row % 8 == 0 && row + 8 <= rows {
            let word = u64::from_le(pod_read_unaligned::<u64>(&links[row..row + 8]));
            if word & DENSE8_MASK == DENSE8 {
                kernel.rows::<8>(row);
                (row + 7, (word >> 56) as u8)
            } else {
                narrow(links, row, paths, kernel)
            }
        } else {
            narrow(links, row, paths, kernel)
        };

        if delta == 0 {
            return;
        }
        row = last + delta as usize;
    }
}

#[inline(always)]
fn narrow<K: RowKernel>(links: &[u8], row: usize, paths: VectorPaths, kernel: &mut K) -> (usize, u8) {
    if paths.wide4() && row % 4 == 0 && row + 4 <= links.len() {
        let word = u32::from_le(pod_read_unaligned::<u32>(&links[row..row + 4]));
        if word & DENSE4_MASK == DENSE4 {
            kernel.rows::<4>(row);
            return (row + 3, (word >> 24) as u8);
        }
    }
    kernel.rows::<1>(row);
    (row, links[row])
}
