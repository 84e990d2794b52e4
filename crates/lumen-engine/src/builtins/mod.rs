//! The builtin function registry.
//!
//! Every GLSL ES 1.00 builtin overload is registered with two slots: a runtime
//! implementation that runs over the live rows of a batch, and a constant
//! evaluator used by the folder. A slot may instead be marked as having no
//! compile-time form (texture lookups) or as not implemented (`reflect`,
//! `refract`); both are explicit values, never callable stand-ins.
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | `table`         | Declarations paired with implementation factories    |
//! | `componentwise` | Per-component factories with scalar broadcast        |
//! | `scalar`        | Scalar operators shared by both slots                |
//! | `geometric`     | dot, length, distance, cross, normalize, faceforward |
//! | `relational`    | Comparisons and boolean vector reductions            |
//! | `sampling`      | Texture lookups                                      |
//! | `global`        | Process-wide registry behind the mutex primitive     |
//! | `selfcheck`     | Runtime vs constant slot agreement                   |

pub(crate) mod componentwise;
mod geometric;
mod global;
mod invocation;
mod registry;
mod relational;
mod sampling;
pub mod scalar;
pub mod selfcheck;
mod slot;
mod table;

pub use global::LazyRegistry;
pub use invocation::Invocation;
pub use registry::BuiltinRegistry;
pub use selfcheck::{Mismatch, SelfCheckReport, self_check};
pub use slot::{BuiltinEntry, ConstFn, Implementation, RuntimeFn, Slot};
