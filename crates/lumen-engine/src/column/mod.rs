//! Columnar operand storage for one batch of shader invocations.
//!
//! Layout:
//! - a [`Column`] holds one scalar per row (one invocation per row)
//! - a [`Lane`] is a column tagged with its element kind
//! - a [`Register`] is one shading value: `ty.components()` lanes in order,
//!   matrices column-major
//! - a [`ColumnStore`] maps variable names to registers
//!
//! Rows outside the active set are never written by operators; their contents
//! carry no meaning but are never corrupted either.

mod column;
mod lane;
mod register;
mod store;

pub use column::Column;
pub use lane::Lane;
pub use register::Register;
pub use store::ColumnStore;
