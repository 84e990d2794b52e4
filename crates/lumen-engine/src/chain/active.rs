use crate::error::EngineError;

/// Largest batch whose live rows are always within one byte of each other.
pub const MAX_BATCH_ROWS: usize = 256;

/// Forward-linked encoding of the live rows of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChain {
    links: Vec<u8>,
    start: Option<usize>,
    live: usize,
}

impl ActiveChain {
    /// Every row live: links are `1, 1, ..., 1, 0`.
    pub fn full(rows: usize) -> Result<Self, EngineError> {
        check_rows(rows)?;
        Ok(Self::build(rows, 0..rows))
    }

    /// No live rows; traversal visits nothing.
    pub fn empty(rows: usize) -> Result<Self, EngineError> {
        check_rows(rows)?;
        Ok(Self::build(rows, std::iter::empty()))
    }

    /// Live rows are the `true` entries of `mask`.
    pub fn from_mask(mask: &[bool]) -> Result<Self, EngineError> {
        check_rows(mask.len())?;
        Ok(Self::build(mask.len(), mask.iter().enumerate().filter(|&(_, &m)| m).map(|(r, _)| r)))
    }

    /// Live rows listed explicitly, in any order; duplicates collapse.
    pub fn from_rows(rows: usize, live: &[usize]) -> Result<Self, EngineError> {
        check_rows(rows)?;
        let mut mask = vec![false; rows];
        for &row in live {
            match mask.get_mut(row) {
                Some(m) => *m = true,
                None => return Err(EngineError::RowOutOfRange { row, rows }),
            }
        }
        Self::from_mask(&mask)
    }

    /// Adopts raw link bytes produced by an external chain builder.
    ///
    /// The builder must guarantee forward progress and exact coverage of the
    /// live set; nothing beyond the batch limit is validated here.
    pub fn from_links(links: Vec<u8>, start: Option<usize>) -> Result<Self, EngineError> {
        check_rows(links.len())?;
        let mut chain = Self { links, start, live: 0 };
        chain.live = chain.iter().count();
        Ok(chain)
    }

    fn build(rows: usize, live: impl Iterator<Item = usize>) -> Self {
        let mut links = vec![0u8; rows];
        let mut start = None;
        let mut prev: Option<usize> = None;
        let mut count = 0;

        for row in live {
            match prev {
                Some(p) => {
                    debug_assert!(row > p && row - p <= u8::MAX as usize);
                    links[p] = (row - p) as u8;
                }
                None => start = Some(row),
            }
            prev = Some(row);
            count += 1;
        }

        Self { links, start, live: count }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Batch size the chain is co-indexed with.
    #[inline]
    pub fn rows(&self) -> usize {
        self.links.len()
    }

    /// First live row, or `None` for an empty chain.
    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// The raw link bytes, one per row.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.links
    }

    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter { links: &self.links, next: self.start }
    }

    pub fn to_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.rows()];
        for row in self.iter() {
            mask[row] = true;
        }
        mask
    }

    // ── Maintenance ───────────────────────────────────────────────────────

    /// The chain of live rows for which `keep(row)` holds.
    pub fn filter(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        Self::build(self.rows(), self.iter().filter(|&row| keep(row)))
    }

    /// Splits the live rows on a condition column: `(cond true, cond false)`.
    pub fn split(&self, cond: &[bool]) -> (Self, Self) {
        debug_assert_eq!(cond.len(), self.rows());
        (self.filter(|row| cond[row]), self.filter(|row| !cond[row]))
    }
}

fn check_rows(rows: usize) -> Result<(), EngineError> {
    if rows > MAX_BATCH_ROWS {
        return Err(EngineError::BatchTooLarge { rows, max: MAX_BATCH_ROWS });
    }
    Ok(())
}

/// Visits live rows by following link bytes.
pub struct ChainIter<'c> {
    links: &'c [u8],
    next: Option<usize>,
}

impl Iterator for ChainIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let row = self.next?;
        let delta = *self.links.get(row)?;
        self.next = match delta {
            0 => None,
            d => Some(row + d as usize),
        };
        Some(row)
    }
}
