//! Environment-backed settings, read once and fixed for the process lifetime.

use std::env;

lazy_static::lazy_static! {
    /// Access key for the generation service. Absence only surfaces on the first generation call.
    pub static ref GOOGLE_API_KEY: Option<String> = env::var("GOOGLE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    pub static ref GEMINI_MODEL: String = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
    pub static ref GEMINI_API_URL: String = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const PAGE_TITLE: &str = "Project Planning & Assessment Tool";
