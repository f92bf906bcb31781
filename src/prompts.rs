//! Prompt templates for the six project analyses.
//!
//! Every template embeds the project description verbatim; nothing is
//! validated, truncated or escaped.

use serde::Serialize;

pub fn estimate_cost(project_description: &str) -> String {
    format!("Provide a cost estimation for the following project: {}", project_description)
}

pub fn assess_sustainability(project_description: &str) -> String {
    format!(
        "Evaluate the sustainability and environmental impact of this project: {}",
        project_description
    )
}

pub fn optimize_resources(project_description: &str) -> String {
    format!(
        "Suggest an optimal allocation of resources (equipment, personnel, time) for this project: {}",
        project_description
    )
}

pub fn manage_risks(project_description: &str) -> String {
    format!(
        "Identify potential risks and suggest mitigation strategies for this project: {}",
        project_description
    )
}

pub fn prioritize_tasks(project_description: &str) -> String {
    format!(
        "List and prioritize critical tasks for the successful completion of this project: {}",
        project_description
    )
}

pub fn optimize_schedule(project_description: &str) -> String {
    format!("Create an efficient timeline and schedule for this project: {}", project_description)
}

/// One of the six analyses the tool can run against a project description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTask {
    CostEstimation,
    SustainabilityAssessment,
    ResourceOptimization,
    RiskManagement,
    TaskPrioritization,
    ScheduleOptimization,
}

impl AnalysisTask {
    /// Fixed order used by the selector and by "run all".
    pub const ALL: [AnalysisTask; 6] = [
        AnalysisTask::CostEstimation,
        AnalysisTask::SustainabilityAssessment,
        AnalysisTask::ResourceOptimization,
        AnalysisTask::RiskManagement,
        AnalysisTask::TaskPrioritization,
        AnalysisTask::ScheduleOptimization,
    ];

    /// Builds the instruction sent to the generation service for this task.
    pub fn instruction(self, project_description: &str) -> String {
        match self {
            AnalysisTask::CostEstimation => estimate_cost(project_description),
            AnalysisTask::SustainabilityAssessment => assess_sustainability(project_description),
            AnalysisTask::ResourceOptimization => optimize_resources(project_description),
            AnalysisTask::RiskManagement => manage_risks(project_description),
            AnalysisTask::TaskPrioritization => prioritize_tasks(project_description),
            AnalysisTask::ScheduleOptimization => optimize_schedule(project_description),
        }
    }

    /// Stable key used in form fields and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            AnalysisTask::CostEstimation => "cost",
            AnalysisTask::SustainabilityAssessment => "sustainability",
            AnalysisTask::ResourceOptimization => "resources",
            AnalysisTask::RiskManagement => "risk",
            AnalysisTask::TaskPrioritization => "prioritization",
            AnalysisTask::ScheduleOptimization => "schedule",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|task| task.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisTask::CostEstimation => "Cost Estimation",
            AnalysisTask::SustainabilityAssessment => "Sustainability Assessment",
            AnalysisTask::ResourceOptimization => "Resource Optimization",
            AnalysisTask::RiskManagement => "Risk Management",
            AnalysisTask::TaskPrioritization => "Task Prioritization",
            AnalysisTask::ScheduleOptimization => "Schedule Optimization",
        }
    }

    /// Accent colour for the task's heading and selector button.
    pub fn color(self) -> &'static str {
        match self {
            AnalysisTask::CostEstimation => "#ff6347",
            AnalysisTask::SustainabilityAssessment => "#4682b4",
            AnalysisTask::ResourceOptimization => "#32cd32",
            AnalysisTask::RiskManagement => "#ff8c00",
            AnalysisTask::TaskPrioritization => "#8a2be2",
            AnalysisTask::ScheduleOptimization => "#ff1493",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AnalysisTask::CostEstimation => "💸",
            AnalysisTask::SustainabilityAssessment => "🌍",
            AnalysisTask::ResourceOptimization => "📊",
            AnalysisTask::RiskManagement => "⚠️",
            AnalysisTask::TaskPrioritization => "📋",
            AnalysisTask::ScheduleOptimization => "📅",
        }
    }

    pub fn result_heading(self) -> String {
        format!("{} Result", self.label())
    }
}
