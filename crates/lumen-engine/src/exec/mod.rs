//! Chain-driven execution of scalar operators over columns.
//!
//! One generic traversal ([`traverse`]) walks the active chain and hands dense
//! runs of 8 or 4 rows, or single rows, to a [`RowKernel`]. The kernels here
//! apply an [`Operator`] to a tuple of operand slices ([`Operands`]) and either
//! write one result per row ([`execute1`]..[`execute4`]) or fold into an
//! accumulator column ([`update1`]..[`update3`]).
//!
//! Every combination of operand tuple and operator is monomorphized; there is
//! no dynamic dispatch inside the row loop.

mod kernel;
mod operands;
mod paths;
mod traverse;

pub use kernel::{execute1, execute2, execute3, execute4, update1, update2, update3};
pub use operands::{Operands, Operator};
pub use paths::VectorPaths;
pub use traverse::{RowKernel, traverse};
