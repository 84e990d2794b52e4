use std::collections::HashMap;

use super::Register;
use crate::error::EngineError;

/// Named registers of one batch.
///
/// Every register in the store has exactly `rows` rows.
#[derive(Debug, Clone, Default)]
pub struct ColumnStore {
    rows: usize,
    registers: HashMap<String, Register>,
}

impl ColumnStore {
    pub fn new(rows: usize) -> Self {
        Self { rows, registers: HashMap::new() }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Inserts or replaces `name`, returning the previous register.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        register: Register,
    ) -> Result<Option<Register>, EngineError> {
        if register.rows() != self.rows {
            return Err(EngineError::mismatch(
                format!("{} rows", self.rows),
                format!("{} rows", register.rows()),
            ));
        }
        Ok(self.registers.insert(name.into(), register))
    }

    pub fn get(&self, name: &str) -> Option<&Register> {
        self.registers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Register> {
        self.registers.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registers.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Register> {
        self.registers.remove(name)
    }

    /// Register names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_glsl::{ShaderType, Value};

    #[test]
    fn insert_checks_row_count() {
        let mut store = ColumnStore::new(8);
        assert!(store.insert("a", Register::zeroed(ShaderType::Vec2, 8)).unwrap().is_none());
        assert!(store.insert("b", Register::zeroed(ShaderType::Vec2, 4)).is_err());
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut store = ColumnStore::new(2);
        store.insert("u", Register::splat(&Value::float(1.0), 2)).unwrap();
        let old = store.insert("u", Register::splat(&Value::float(2.0), 2)).unwrap().unwrap();
        assert_eq!(old.floats(0).unwrap(), &[1.0, 1.0]);
        assert_eq!(store.get("u").unwrap().floats(0).unwrap(), &[2.0, 2.0]);
    }

    #[test]
    fn names_are_sorted() {
        let mut store = ColumnStore::new(1);
        for n in ["z", "a", "m"] {
            store.insert(n, Register::zeroed(ShaderType::Int, 1)).unwrap();
        }
        assert_eq!(store.names(), vec!["a", "m", "z"]);
    }
}
