//! Plain-text rendering of an AnalysisView for the terminal.

use std::fmt::{self, Write};

use crate::analysis::{AnalysisView, TaskSection};
use crate::visuals::{CostTable, RiskChart};

const DIVIDER: &str = "---";
const BAR_WIDTH: usize = 40;

pub fn render_text(view: &AnalysisView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_view(&mut out, view)?;
    Ok(out)
}

fn write_view(out: &mut impl Write, view: &AnalysisView) -> fmt::Result {
    if let Some(notice) = view.notice {
        return writeln!(out, "{}", notice);
    }
    if let Some(task) = view.current_task {
        writeln!(out, "## Current Task: {}\n", task)?;
    }
    if let Some(heading) = view.results_heading {
        writeln!(out, "### {}\n", heading)?;
    }

    for (i, section) in view.sections.iter().enumerate() {
        if i > 0 {
            writeln!(out, "{}\n", DIVIDER)?;
        }
        write_section(out, section)?;
    }

    if let Some(failure) = &view.failure {
        if !view.sections.is_empty() {
            writeln!(out, "{}\n", DIVIDER)?;
        }
        writeln!(
            out,
            "!! {} failed ({:?} error): {}",
            failure.task_label, failure.kind, failure.message
        )?;
    }
    Ok(())
}

fn write_section(out: &mut impl Write, section: &TaskSection) -> fmt::Result {
    writeln!(out, "#### {} {}\n", section.heading, section.icon)?;
    writeln!(out, "{}\n", section.text.trim_end())?;
    if let Some(table) = &section.cost_table {
        write_cost_table(out, table)?;
    }
    if let Some(chart) = &section.risk_chart {
        write_risk_chart(out, chart)?;
    }
    Ok(())
}

fn write_cost_table(out: &mut impl Write, table: &CostTable) -> fmt::Result {
    let name_width = table
        .rows
        .iter()
        .map(|r| r.category.len())
        .chain(std::iter::once(table.columns[0].len()))
        .max()
        .unwrap_or(0);
    writeln!(out, "{:<w$}  {:>17}", table.columns[0], table.columns[1], w = name_width)?;
    for row in &table.rows {
        writeln!(out, "{:<w$}  {:>17}", row.category, row.cost_estimate, w = name_width)?;
    }
    writeln!(out)
}

fn write_risk_chart(out: &mut impl Write, chart: &RiskChart) -> fmt::Result {
    writeln!(out, "{}", chart.title)?;
    let max = chart.bars.iter().map(|b| b.value).max().unwrap_or(1).max(1) as usize;
    let label_width = chart.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
    for bar in &chart.bars {
        let len = BAR_WIDTH * bar.value as usize / max;
        writeln!(
            out,
            "{:<w$} | {} {}%",
            bar.label,
            "#".repeat(len),
            bar.value,
            w = label_width
        )?;
    }
    writeln!(out)
}
