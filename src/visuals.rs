//! Illustrative sample data shown next to the cost and risk results.
//!
//! These datasets are decoration: they never depend on the description or the
//! generated text.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostRow {
    pub category: &'static str,
    pub cost_estimate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub name: &'static str,
    pub likelihood: u8,
}

pub const COST_COLUMNS: [&str; 2] = ["Category", "Cost Estimate ($)"];
pub const RISK_COLUMNS: [&str; 2] = ["Risk Factor", "Likelihood (%)"];

pub const SAMPLE_COSTS: [CostRow; 6] = [
    CostRow { category: "Materials", cost_estimate: 5000 },
    CostRow { category: "Labor", cost_estimate: 10000 },
    CostRow { category: "Equipment", cost_estimate: 8000 },
    CostRow { category: "Software", cost_estimate: 2000 },
    CostRow { category: "Services", cost_estimate: 3000 },
    CostRow { category: "Travel", cost_estimate: 1500 },
];

pub const SAMPLE_RISKS: [RiskFactor; 4] = [
    RiskFactor { name: "Financial", likelihood: 35 },
    RiskFactor { name: "Operational", likelihood: 20 },
    RiskFactor { name: "Compliance", likelihood: 25 },
    RiskFactor { name: "Strategic", likelihood: 20 },
];

pub const RISK_CHART_TITLE: &str = "Risk Factor Likelihood";
pub const RISK_BAR_COLOR: &str = "#ff8c00";

#[derive(Debug, Clone, Serialize)]
pub struct CostTable {
    pub columns: [&'static str; 2],
    pub rows: Vec<CostRow>,
}

pub fn sample_cost_table() -> CostTable {
    CostTable {
        columns: COST_COLUMNS,
        rows: SAMPLE_COSTS.to_vec(),
    }
}

// SVG geometry for the risk chart, in viewBox units.
const CHART_WIDTH: u32 = 400;
const CHART_HEIGHT: u32 = 240;
const PLOT_TOP: u32 = 30;
const PLOT_BOTTOM: u32 = 210;
const BAR_GAP: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: u8,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskChart {
    pub title: &'static str,
    pub columns: [&'static str; 2],
    pub color: &'static str,
    pub width: u32,
    pub height: u32,
    pub baseline: u32,
    pub bars: Vec<ChartBar>,
}

/// Lays the sample risks out as vertical bars scaled to the largest value.
pub fn sample_risk_chart() -> RiskChart {
    let max = SAMPLE_RISKS.iter().map(|r| r.likelihood).max().unwrap_or(1).max(1) as u32;
    let count = SAMPLE_RISKS.len() as u32;
    let slot = CHART_WIDTH / count;
    let width = slot - BAR_GAP;
    let plot_height = PLOT_BOTTOM - PLOT_TOP;

    let bars = SAMPLE_RISKS
        .iter()
        .enumerate()
        .map(|(i, risk)| {
            let height = plot_height * risk.likelihood as u32 / max;
            ChartBar {
                label: risk.name,
                value: risk.likelihood,
                x: i as u32 * slot + BAR_GAP / 2,
                y: PLOT_BOTTOM - height,
                width,
                height,
            }
        })
        .collect();

    RiskChart {
        title: RISK_CHART_TITLE,
        columns: RISK_COLUMNS,
        color: RISK_BAR_COLOR,
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        baseline: PLOT_BOTTOM,
        bars,
    }
}
