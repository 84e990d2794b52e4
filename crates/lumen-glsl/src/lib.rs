//! Type system, constant values, and type-resolved IR for **GLSL ES 1.00**
//! shaders executed by `lumen-engine`.
//!
//! This crate is intentionally dependency-free so front ends and tooling can
//! produce the IR without pulling in the execution engine.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | `ScalarKind`, `ShaderType` |
//! | [`value`] | `Value`, `Scalar`, `Components` |
//! | [`signature`] | `Signature`, generic `Declaration` and its expansion |
//! | [`expr`] | `Expr`, `Stmt`, `Shader` |
//! | [`lexer`], [`parser`] | builtin declaration parsing |
//! | [`error`] | `DeclError` |
//!
//! # Quick start
//!
//! ```rust
//! use lumen_glsl::parse_declaration;
//!
//! let decl = parse_declaration("genType mix(genType, genType, float)").unwrap();
//! let overloads = decl.expand();
//! assert_eq!(overloads.len(), 4);
//! assert_eq!(overloads[3].to_string(), "vec4 mix(vec4, vec4, float)");
//! ```

pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod signature;
pub mod types;
pub mod value;

pub use error::DeclError;
pub use expr::{BinaryOp, Expr, Shader, Stage, Stmt, UnaryOp};
pub use parser::parse_declaration;
pub use signature::{CallShape, Declaration, Family, Signature, TypePattern};
pub use types::{ScalarKind, ShaderType};
pub use value::{Components, Scalar, Value};
