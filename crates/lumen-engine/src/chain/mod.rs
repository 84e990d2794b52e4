//! Active-row chains: which rows of a batch an operation visits.
//!
//! Encoding (one byte per row, bit-exact):
//! - for a live row, the byte is the forward distance to the next live row
//! - `0` marks the last live row; traversal stops there
//! - bytes of rows that are not on the chain are never read as links
//!
//! Traversal starts at [`ActiveChain::start`] and visits every live row once,
//! in ascending order. A byte can express a distance of at most 255, so a batch
//! holds at most [`MAX_BATCH_ROWS`] rows.

mod active;

pub use active::{ActiveChain, ChainIter, MAX_BATCH_ROWS};
