pub mod analysis;
pub mod constants;
pub mod llm_interaction;
pub mod markdown;
pub mod prompts;
pub mod report;
pub mod selection;
pub mod visuals;
pub mod web_server;

pub use analysis::{render, AnalysisView};
pub use llm_interaction::{FailureKind, GeminiClient, GeminiConfig, GenerationError, TextGenerator};
pub use prompts::AnalysisTask;
pub use selection::{Action, TaskSelection};
