//! Result surface, `spec.md` §6.3.

use std::collections::HashMap;
use std::fmt;

/// One node of the hierarchical per-call cycle tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModuleResult {
    pub name: String,
    pub start_cycle: i64,
    pub end_cycle: i64,
    pub children: Vec<ModuleResult>,
}

impl fmt::Display for ModuleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl ModuleResult {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{}{} [{}, {}]",
            "  ".repeat(depth),
            self.name,
            self.start_cycle,
            self.end_cycle
        )?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// The final output of a completed [`super::Simulation`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationResult {
    pub top_module: ModuleResult,
    pub observed_fifo_depths: HashMap<u32, usize>,
    pub ap_continue_cycle: Option<i64>,
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.top_module)?;
        if let Some(c) = self.ap_continue_cycle {
            writeln!(f, "ap_continue at cycle {c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_indented_tree() {
        let result = ModuleResult {
            name: "top".into(),
            start_cycle: 0,
            end_cycle: 10,
            children: vec![ModuleResult {
                name: "child".into(),
                start_cycle: 2,
                end_cycle: 5,
                children: vec![],
            }],
        };
        let rendered = result.to_string();
        assert!(rendered.contains("top [0, 10]"));
        assert!(rendered.contains("  child [2, 5]"));
    }
}
