//! Turns (description, selection) into a view of analysis results.
//!
//! Nothing here is cached: every call re-runs the generator for the
//! selected tasks.

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_interaction::{FailureKind, GenerationError, TextGenerator};
use crate::prompts::AnalysisTask;
use crate::selection::TaskSelection;
use crate::visuals::{sample_cost_table, sample_risk_chart, CostTable, RiskChart};

pub const SELECT_TASK_NOTICE: &str = "Please select a task from the sidebar.";
pub const ENTER_DESCRIPTION_NOTICE: &str = "Enter a project description to run the analysis.";
pub const RUN_ALL_HEADING: &str = "All Analyses Results";

#[derive(Debug, Clone, Serialize)]
pub struct TaskSection {
    pub task: AnalysisTask,
    pub heading: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub text: String,
    pub cost_table: Option<CostTable>,
    pub risk_chart: Option<RiskChart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureView {
    pub kind: FailureKind,
    pub task: AnalysisTask,
    pub task_label: &'static str,
    pub message: String,
}

/// Everything the page (or terminal report) needs for one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub description: String,
    pub selection: TaskSelection,
    /// Neutral prompt shown when no analysis runs.
    pub notice: Option<&'static str>,
    /// "Current Task: ..." heading for a single selected task.
    pub current_task: Option<&'static str>,
    /// Heading above the results, present once analysis has run.
    pub results_heading: Option<&'static str>,
    pub sections: Vec<TaskSection>,
    pub failure: Option<FailureView>,
}

impl AnalysisView {
    fn idle(description: &str, selection: TaskSelection) -> Self {
        let notice = match selection {
            TaskSelection::Unset => SELECT_TASK_NOTICE,
            _ => ENTER_DESCRIPTION_NOTICE,
        };
        Self {
            description: description.to_string(),
            selection,
            notice: Some(notice),
            current_task: None,
            results_heading: None,
            sections: Vec::new(),
            failure: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Runs the selected analyses against `description`.
///
/// Tasks run one after another in the selection's order. The first failing
/// call stops the pass; sections completed before it stay in the view.
pub async fn render(
    generator: &dyn TextGenerator,
    description: &str,
    selection: TaskSelection,
) -> AnalysisView {
    if description.trim().is_empty() || selection == TaskSelection::Unset {
        return AnalysisView::idle(description, selection);
    }

    let (current_task, results_heading) = match selection {
        TaskSelection::Single(task) => (Some(task.label()), "Task Result"),
        _ => (None, RUN_ALL_HEADING),
    };

    let tasks = selection.tasks();
    info!(
        selection = selection.key(),
        tasks = tasks.len(),
        description_len = description.len(),
        "Running analysis"
    );

    let mut sections = Vec::with_capacity(tasks.len());
    let mut failure = None;
    for task in tasks {
        match run_task(generator, task, description).await {
            Ok(section) => sections.push(section),
            Err(e) => {
                warn!(task = task.key(), error = %e, "Analysis task failed");
                failure = Some(FailureView {
                    kind: e.kind(),
                    task,
                    task_label: task.label(),
                    message: e.to_string(),
                });
                break;
            }
        }
    }

    AnalysisView {
        description: description.to_string(),
        selection,
        notice: None,
        current_task,
        results_heading: Some(results_heading),
        sections,
        failure,
    }
}

async fn run_task(
    generator: &dyn TextGenerator,
    task: AnalysisTask,
    description: &str,
) -> Result<TaskSection, GenerationError> {
    let text = generator.generate(&task.instruction(description)).await?;
    Ok(TaskSection {
        task,
        heading: task.result_heading(),
        icon: task.icon(),
        color: task.color(),
        text,
        cost_table: (task == AnalysisTask::CostEstimation).then(sample_cost_table),
        risk_chart: (task == AnalysisTask::RiskManagement).then(sample_risk_chart),
    })
}
