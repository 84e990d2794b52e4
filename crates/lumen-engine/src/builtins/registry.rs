use std::collections::HashMap;

use lumen_glsl::{CallShape, ShaderType, Signature, parse_declaration};

use super::{BuiltinEntry, Implementation, global};
use crate::error::EngineError;

/// Accumulates overloads while the declaration table is processed.
#[derive(Default)]
pub(crate) struct RegistryBuilder {
    by_name: HashMap<String, Vec<BuiltinEntry>>,
    skipped: usize,
}

impl RegistryBuilder {
    /// Expands `decl` and registers every overload not registered yet.
    pub(crate) fn declare(
        &mut self,
        decl: &str,
        factory: impl Fn(&Signature) -> Implementation,
    ) -> Result<&mut Self, EngineError> {
        let decl = parse_declaration(decl)?;
        for sig in decl.expand() {
            let overloads = self.by_name.entry(sig.name.clone()).or_default();
            if overloads.iter().any(|e| e.signature().params == sig.params) {
                log::trace!("duplicate expansion `{sig}` skipped");
                self.skipped += 1;
                continue;
            }
            let implementation = factory(&sig);
            overloads.push(BuiltinEntry::new(sig, implementation));
        }
        Ok(self)
    }

    pub(crate) fn finish(self) -> BuiltinRegistry {
        let mut names: Vec<String> = self.by_name.keys().cloned().collect();
        names.sort_unstable();
        let len = self.by_name.values().map(Vec::len).sum();
        log::debug!(
            "builtin registry: {len} overloads across {} names ({} duplicate expansions skipped)",
            names.len(),
            self.skipped
        );
        BuiltinRegistry { by_name: self.by_name, names, len }
    }
}

/// Every GLSL ES 1.00 builtin overload, keyed by `(name, parameter types)`.
///
/// Built once; read-only afterwards.
pub struct BuiltinRegistry {
    by_name: HashMap<String, Vec<BuiltinEntry>>,
    names: Vec<String>,
    len: usize,
}

impl BuiltinRegistry {
    /// Builds a fresh registry from the declaration table.
    pub fn build() -> Result<Self, EngineError> {
        let mut builder = RegistryBuilder::default();
        super::table::declare(&mut builder)?;
        Ok(builder.finish())
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> Result<&'static BuiltinRegistry, EngineError> {
        global::GLOBAL.get_or_build()
    }

    /// Exact match on name and parameter types.
    pub fn find(&self, name: &str, params: &[ShaderType]) -> Option<&BuiltinEntry> {
        self.overloads(name).iter().find(|e| e.signature().params == params)
    }

    /// Like [`find`](Self::find), reporting a miss as `UnknownBuiltin`.
    pub fn lookup(&self, name: &str, params: &[ShaderType]) -> Result<&BuiltinEntry, EngineError> {
        self.find(name, params).ok_or_else(|| EngineError::UnknownBuiltin {
            call: CallShape { name, params }.to_string(),
        })
    }

    /// All overloads of `name`, in declaration order.
    pub fn overloads(&self, name: &str) -> &[BuiltinEntry] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every overload, by name and then in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &BuiltinEntry> + '_ {
        self.names.iter().flat_map(|n| self.overloads(n))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("names", &self.names.len())
            .field("overloads", &self.len)
            .finish()
    }
}
