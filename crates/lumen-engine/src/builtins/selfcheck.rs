//! Cross-checks the two slots of every overload that has both.
//!
//! Each overload runs over a batch of sample arguments under every
//! [`VectorPaths`] policy, on a full chain and a sparse one, and every live
//! row is compared with the constant evaluator's result for the same inputs.

use lumen_glsl::{Components, ScalarKind, ShaderType, Value};

use super::{BuiltinEntry, BuiltinRegistry, Invocation};
use crate::chain::ActiveChain;
use crate::column::Register;
use crate::error::EngineError;
use crate::exec::VectorPaths;

const FLOATS: [f32; 17] = [
    0.0,
    -0.0,
    1.0,
    -1.0,
    0.5,
    -2.5,
    3.0,
    10.0,
    -0.25,
    100.0,
    1e-3,
    f32::NAN,
    f32::INFINITY,
    f32::NEG_INFINITY,
    0.75,
    2.0,
    -7.0,
];
const INTS: [i32; 9] = [0, 1, -1, 2, -3, 7, 100, i32::MAX, i32::MIN];
const BOOLS: [bool; 2] = [false, true];

/// Rows per check batch; not a multiple of 8 so tails are exercised.
pub const SAMPLE_ROWS: usize = 45;

/// One row where the runtime and constant slots disagree.
#[derive(Debug, Clone)]
pub struct Mismatch {
    pub signature: String,
    pub paths: VectorPaths,
    pub row: usize,
    pub runtime: Option<Value>,
    pub constant: Value,
}

#[derive(Debug, Clone, Default)]
pub struct SelfCheckReport {
    /// Overloads that have both slots and were compared.
    pub checked: usize,
    /// Row comparisons made across all overloads, chains and policies.
    pub comparisons: usize,
    pub mismatches: Vec<Mismatch>,
}

impl SelfCheckReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

fn pick<T: Copy>(samples: &[T], row: usize, param: usize, component: usize) -> T {
    samples[(row * (2 * param + 1) + component * 5 + param * 3) % samples.len()]
}

/// Sample argument `param` of type `ty` for `row`.
pub fn sample_value(ty: ShaderType, row: usize, param: usize) -> Option<Value> {
    let n = ty.components();
    let data = match ty.kind()? {
        ScalarKind::Float => Components::Float((0..n).map(|c| pick(&FLOATS, row, param, c)).collect()),
        ScalarKind::Int => Components::Int((0..n).map(|c| pick(&INTS, row, param, c)).collect()),
        ScalarKind::Bool => Components::Bool((0..n).map(|c| pick(&BOOLS, row, param, c)).collect()),
    };
    Value::new(ty, data)
}

fn sample_args(entry: &BuiltinEntry, row: usize) -> Result<Vec<Value>, EngineError> {
    entry
        .signature()
        .params
        .iter()
        .enumerate()
        .map(|(j, &ty)| sample_value(ty, row, j).ok_or_else(|| EngineError::mismatch("value type", ty)))
        .collect()
}

/// Compares runtime and constant results for one overload.
pub fn check_entry(entry: &BuiltinEntry, report: &mut SelfCheckReport) -> Result<(), EngineError> {
    let rows: Vec<Vec<Value>> = (0..SAMPLE_ROWS).map(|r| sample_args(entry, r)).collect::<Result<_, _>>()?;
    let expected: Vec<Value> = rows
        .iter()
        .map(|args| entry.evaluate(args)?.ok_or_else(|| EngineError::mismatch("constant form", "none")))
        .collect::<Result<_, _>>()?;

    let registers: Vec<Register> = entry
        .signature()
        .params
        .iter()
        .enumerate()
        .map(|(j, &ty)| {
            let column: Vec<Value> = rows.iter().map(|args| args[j].clone()).collect();
            Register::from_values(ty, &column)
        })
        .collect::<Result<_, _>>()?;
    let args: Vec<&Register> = registers.iter().collect();

    let sparse: Vec<bool> = (0..SAMPLE_ROWS).map(|r| r % 3 != 1).collect();
    let chains = [ActiveChain::full(SAMPLE_ROWS)?, ActiveChain::from_mask(&sparse)?];

    for chain in &chains {
        for paths in VectorPaths::ALL {
            let mut out = Register::zeroed(entry.signature().ret, SAMPLE_ROWS);
            entry.execute(&Invocation::new(chain, paths), &args, &mut out)?;
            for row in chain.iter() {
                report.comparisons += 1;
                let got = out.row_value(row);
                if !got.as_ref().is_some_and(|v| v.same(&expected[row])) {
                    report.mismatches.push(Mismatch {
                        signature: entry.signature().to_string(),
                        paths,
                        row,
                        runtime: got,
                        constant: expected[row].clone(),
                    });
                }
            }
        }
    }
    report.checked += 1;
    Ok(())
}

/// Checks every overload of `registry` that has both slots implemented.
pub fn self_check(registry: &BuiltinRegistry) -> Result<SelfCheckReport, EngineError> {
    let mut report = SelfCheckReport::default();
    for entry in registry.iter() {
        if entry.runtime().is_implemented() && entry.constant().is_implemented() {
            check_entry(entry, &mut report)?;
        }
    }
    log::debug!(
        "self-check: {} overloads, {} comparisons, {} mismatches",
        report.checked,
        report.comparisons,
        report.mismatches.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Implementation;
    use crate::builtins::componentwise::map1;
    use lumen_glsl::Signature;

    #[test]
    fn every_overload_with_both_slots_agrees() {
        let registry = BuiltinRegistry::build().unwrap();
        let report = self_check(&registry).unwrap();
        assert!(report.is_clean(), "{:#?}", &report.mismatches[..report.mismatches.len().min(5)]);
        // texture lookups (12) and reflect/refract (8) have no constant slot
        assert_eq!(report.checked, registry.len() - 20);
    }

    #[test]
    fn disagreeing_slots_are_reported() {
        let sig = Signature::new(ShaderType::Float, "skewed", vec![ShaderType::Float]);
        let runtime = map1(|x: f32| x + 1.0)(&sig).runtime;
        let constant = map1(|x: f32| x)(&sig).constant;
        let entry = BuiltinEntry::new(sig, Implementation { runtime, constant });

        let mut report = SelfCheckReport::default();
        check_entry(&entry, &mut report).unwrap();
        assert!(!report.is_clean());
        assert!(report.mismatches.iter().all(|m| m.signature == "float skewed(float)"));
    }

    #[test]
    fn samples_cover_special_values() {
        let values: Vec<Value> = (0..SAMPLE_ROWS).filter_map(|r| sample_value(ShaderType::Float, r, 0)).collect();
        assert!(values.iter().any(|v| v.as_floats().is_some_and(|f| f[0].is_nan())));
        assert!(values.iter().any(|v| v.as_floats().is_some_and(|f| f[0] == f32::NEG_INFINITY)));
    }
}
