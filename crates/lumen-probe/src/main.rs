use anyhow::{Context, bail};
use lumen_engine::builtins::{SelfCheckReport, self_check};
use lumen_engine::logging::{LoggingConfig, init_logging};
use lumen_engine::{BuiltinEntry, BuiltinRegistry};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // Optional arguments restrict the printed table to those builtin names.
    let filter: Vec<String> = std::env::args().skip(1).collect();

    let registry = BuiltinRegistry::global().context("building the builtin registry")?;
    log::info!("{} builtin overloads across {} names", registry.len(), registry.names().len());

    print_table(registry, &filter);

    let report = self_check(registry).context("running the slot self-check")?;
    print_report(&report);
    if !report.is_clean() {
        bail!("{} runtime/constant mismatches", report.mismatches.len());
    }
    Ok(())
}

fn print_table(registry: &BuiltinRegistry, filter: &[String]) {
    let shown = |e: &&BuiltinEntry| filter.is_empty() || filter.iter().any(|n| *n == e.signature().name);
    let entries: Vec<&BuiltinEntry> = registry.iter().filter(shown).collect();
    let width = entries.iter().map(|e| e.signature().to_string().len()).max().unwrap_or(0);

    println!();
    println!("  {:<width$}  {:<22}  {}", "overload", "runtime", "constant");
    println!("  {}", "─".repeat(width + 50));
    for e in &entries {
        println!(
            "  {:<width$}  {:<22}  {}",
            e.signature().to_string(),
            e.runtime().describe(),
            e.constant().describe(),
        );
    }
    println!();
}

fn print_report(report: &SelfCheckReport) {
    println!(
        "  self-check: {} overloads, {} row comparisons, {} mismatches",
        report.checked,
        report.comparisons,
        report.mismatches.len()
    );
    for m in report.mismatches.iter().take(20) {
        let runtime = m.runtime.as_ref().map_or_else(|| "<none>".to_owned(), ToString::to_string);
        println!(
            "    {} [{}] row {}: runtime {runtime}, constant {}",
            m.signature, m.paths, m.row, m.constant
        );
    }
    if report.mismatches.len() > 20 {
        println!("    ... {} more", report.mismatches.len() - 20);
    }
    println!();
}
