//! Lumen engine crate.
//!
//! Runs type-resolved GLSL ES 1.00 shaders on the CPU, one batch of up to 256
//! invocations at a time, and owns the builtin function registry shared by the
//! interpreter and the constant folder.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`column`] | Columnar registers and the named store of a batch |
//! | [`chain`] | Active-row chain encoding |
//! | [`exec`] | Vectorized traversal and n-ary operator kernels |
//! | [`builtins`] | Builtin registry, runtime and constant slots |
//! | [`sync`] | Mutex primitive guarding registry construction |
//! | [`interp`] | Batches and the shader interpreter |
//! | [`fold`] | Constant folding |
//! | [`texture`] | Textures, samplers and unit bindings |
//! | [`config`], [`logging`], [`error`] | Settings, logger setup, error type |
//!
//! ```rust
//! use lumen_engine::{Batch, BuiltinRegistry, EngineConfig, Interpreter};
//! use lumen_glsl::{Expr, Shader, ShaderType, Stage, Stmt, Value};
//!
//! let registry = BuiltinRegistry::global().unwrap();
//! let interp = Interpreter::new(registry, EngineConfig::default()).unwrap();
//!
//! let mut batch = Batch::new(16).unwrap();
//! batch.set_uniform("a", &Value::float(1.0)).unwrap();
//! let shader = Shader::new(Stage::Fragment, vec![Stmt::assign(
//!     "b",
//!     Expr::call("mix", ShaderType::Float, vec![
//!         Expr::var("a", ShaderType::Float),
//!         Expr::constant(Value::float(3.0)),
//!         Expr::constant(Value::float(0.5)),
//!     ]),
//! )]);
//! interp.run(&shader, &mut batch).unwrap();
//! assert_eq!(batch.value("b", 7).unwrap(), Value::float(2.0));
//! ```

pub mod builtins;
pub mod chain;
pub mod column;
pub mod config;
pub mod error;
pub mod exec;
pub mod fold;
pub mod interp;
pub mod logging;
pub mod sync;
pub mod texture;

pub use builtins::{BuiltinEntry, BuiltinRegistry, Slot};
pub use chain::{ActiveChain, MAX_BATCH_ROWS};
pub use column::{ColumnStore, Register};
pub use config::EngineConfig;
pub use error::EngineError;
pub use exec::VectorPaths;
pub use fold::ConstantFolder;
pub use interp::{Batch, Interpreter};
