//! Which analysis the user has asked for, and how user actions change it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::prompts::AnalysisTask;

pub const RUN_ALL_KEY: &str = "run_all";
/// Shorthand for `run_all` accepted wherever a selection key is read.
pub const RUN_ALL_ALIAS: &str = "all";
pub const SUBMIT_KEY: &str = "analyze";

/// The active selection. Starts as `Unset` and never returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSelection {
    #[default]
    Unset,
    Single(AnalysisTask),
    RunAll,
}

/// A user interaction coming from the selector or the description form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(AnalysisTask),
    RunAll,
    /// Description edited or re-submitted; selection untouched.
    Submit,
}

impl TaskSelection {
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::Select(task) => TaskSelection::Single(task),
            Action::RunAll => TaskSelection::RunAll,
            Action::Submit => self,
        }
    }

    /// Tasks to run for this selection, in execution order.
    pub fn tasks(self) -> Vec<AnalysisTask> {
        match self {
            TaskSelection::Unset => Vec::new(),
            TaskSelection::Single(task) => vec![task],
            TaskSelection::RunAll => AnalysisTask::ALL.to_vec(),
        }
    }

    /// Key carried between requests; empty for `Unset`.
    pub fn key(self) -> &'static str {
        match self {
            TaskSelection::Unset => "",
            TaskSelection::Single(task) => task.key(),
            TaskSelection::RunAll => RUN_ALL_KEY,
        }
    }

    /// Strict parse: `None` for keys that name nothing.
    pub fn parse_key(key: &str) -> Option<Self> {
        match key.trim() {
            "" => Some(TaskSelection::Unset),
            RUN_ALL_KEY | RUN_ALL_ALIAS => Some(TaskSelection::RunAll),
            other => AnalysisTask::from_key(other).map(TaskSelection::Single),
        }
    }

    /// Unknown keys fall back to `Unset`.
    pub fn from_key(key: &str) -> Self {
        Self::parse_key(key).unwrap_or_default()
    }
}

impl Action {
    /// Parses the value of a selector/submit button. `None` for unrecognised values.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            RUN_ALL_KEY | RUN_ALL_ALIAS => Some(Action::RunAll),
            SUBMIT_KEY | "" => Some(Action::Submit),
            other => AnalysisTask::from_key(other).map(Action::Select),
        }
    }
}

impl Serialize for TaskSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for TaskSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(TaskSelection::from_key(&key))
    }
}
