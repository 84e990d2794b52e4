//! Shader execution over batches.
//!
//! A [`Batch`] holds the named registers of up to 256 invocations, the chain
//! of rows still running, and the discard flags. The [`Interpreter`] walks a
//! type-resolved shader body and runs every operator and builtin call through
//! the vectorized executor under the current chain.

mod batch;
mod interpreter;
pub(crate) mod ops;

pub use batch::Batch;
pub use interpreter::Interpreter;
