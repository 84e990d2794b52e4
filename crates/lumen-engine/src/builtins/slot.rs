use std::fmt;
use std::sync::Arc;

use lumen_glsl::{ShaderType, Signature, Value};

use super::Invocation;
use crate::column::Register;
use crate::error::EngineError;

/// Runtime implementation: reads argument registers on the live rows of the
/// invocation chain and writes the result register on the same rows.
pub type RuntimeFn =
    Arc<dyn Fn(&Invocation<'_>, &[&Register], &mut Register) -> Result<(), EngineError> + Send + Sync>;

/// Constant evaluator: one value per parameter in, the result value out.
pub type ConstFn = Arc<dyn Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync>;

/// One implementation slot of an overload.
pub enum Slot<F> {
    Implemented(F),
    /// The builtin has no compile-time form (texture lookups).
    NoCompileTimeForm,
    /// Registered so lookups succeed, but calling it is an error.
    NotImplemented,
}

impl<F> Slot<F> {
    pub fn is_implemented(&self) -> bool {
        matches!(self, Slot::Implemented(_))
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Slot::Implemented(_) => "implemented",
            Slot::NoCompileTimeForm => "no compile-time form",
            Slot::NotImplemented => "not implemented",
        }
    }
}

impl<F> fmt::Debug for Slot<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Both slots for one concrete overload, produced by an implementation factory.
#[derive(Debug)]
pub struct Implementation {
    pub runtime: Slot<RuntimeFn>,
    pub constant: Slot<ConstFn>,
}

impl Implementation {
    pub fn not_implemented() -> Self {
        Self { runtime: Slot::NotImplemented, constant: Slot::NotImplemented }
    }

    pub fn runtime_only(runtime: RuntimeFn) -> Self {
        Self { runtime: Slot::Implemented(runtime), constant: Slot::NoCompileTimeForm }
    }
}

/// A registered overload. Immutable once the registry is built.
#[derive(Debug)]
pub struct BuiltinEntry {
    signature: Signature,
    runtime: Slot<RuntimeFn>,
    constant: Slot<ConstFn>,
}

impl BuiltinEntry {
    pub(crate) fn new(signature: Signature, implementation: Implementation) -> Self {
        Self { signature, runtime: implementation.runtime, constant: implementation.constant }
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn runtime(&self) -> &Slot<RuntimeFn> {
        &self.runtime
    }

    pub fn constant(&self) -> &Slot<ConstFn> {
        &self.constant
    }

    /// Runs the runtime slot over the live rows of `inv`.
    ///
    /// Argument and result register types must match the signature exactly.
    pub fn execute(
        &self,
        inv: &Invocation<'_>,
        args: &[&Register],
        out: &mut Register,
    ) -> Result<(), EngineError> {
        let run = match &self.runtime {
            Slot::Implemented(f) => f,
            _ => return Err(self.unimplemented()),
        };
        self.check_params(args.iter().map(|r| r.ty()))?;
        if out.ty() != self.signature.ret {
            return Err(EngineError::mismatch(self.signature.ret, out.ty()));
        }
        let rows = inv.chain().rows();
        if let Some(r) = args.iter().map(|r| r.rows()).chain([out.rows()]).find(|&r| r != rows) {
            return Err(EngineError::mismatch(format!("{rows} rows"), format!("{r} rows")));
        }
        run(inv, args, out)
    }

    /// Evaluates the constant slot.
    ///
    /// `Ok(None)` means the overload has no compile-time form and the call
    /// must stay in the tree.
    pub fn evaluate(&self, args: &[Value]) -> Result<Option<Value>, EngineError> {
        match &self.constant {
            Slot::Implemented(f) => {
                self.check_params(args.iter().map(Value::ty))?;
                f(args).map(Some)
            }
            Slot::NoCompileTimeForm => Ok(None),
            Slot::NotImplemented => Err(self.unimplemented()),
        }
    }

    fn check_params(
        &self,
        found: impl ExactSizeIterator<Item = ShaderType>,
    ) -> Result<(), EngineError> {
        if found.len() != self.signature.params.len() {
            return Err(EngineError::mismatch(
                format!("{} arguments to `{}`", self.signature.params.len(), self.signature),
                found.len(),
            ));
        }
        for (&expected, got) in self.signature.params.iter().zip(found) {
            if expected != got {
                return Err(EngineError::mismatch(expected, got));
            }
        }
        Ok(())
    }

    fn unimplemented(&self) -> EngineError {
        EngineError::Unimplemented { signature: self.signature.to_string() }
    }
}
