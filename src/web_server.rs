use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    serve, Form, Json, Router,
};
use minijinja::{path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::Deserialize;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::analysis::{self, AnalysisView};
use crate::constants::PAGE_TITLE;
use crate::llm_interaction::TextGenerator;
use crate::markdown::markdown_filter;
use crate::prompts::AnalysisTask;
use crate::selection::{Action, TaskSelection, RUN_ALL_KEY, SUBMIT_KEY};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

// Shared application state
#[derive(Clone)]
pub struct AppState {
    templates: Arc<AutoReloader>,
    generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(templates_dir: impl AsRef<Path>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            templates: Arc::new(create_minijinja_env(templates_dir.as_ref())),
            generator,
        }
    }
}

/// Form posted by the selector buttons and the description box.
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub description: String,
    /// Selection carried over from the previous render.
    #[serde(default)]
    pub selected: String,
    /// Which button was pressed.
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub selection: TaskSelection,
}

fn create_minijinja_env(templates_dir: &Path) -> AutoReloader {
    let templates_dir = templates_dir.to_path_buf();
    AutoReloader::new(move |notifier| {
        let mut env = Environment::new();
        env.set_loader(path_loader(&templates_dir));
        env.add_filter("markdown", markdown_filter);
        notifier.watch_path(&templates_dir, true);
        Ok(env)
    })
}

fn render_page(state: &AppState, view: &AnalysisView) -> Response {
    let tasks: Vec<_> = AnalysisTask::ALL
        .iter()
        .map(|task| {
            minijinja::context! {
                key => task.key(),
                label => task.label(),
                color => task.color(),
                active => view.selection == TaskSelection::Single(*task),
            }
        })
        .collect();

    let rendered = state.templates.acquire_env().and_then(|env| {
        env.get_template("index.html").and_then(|tmpl| {
            tmpl.render(minijinja::context! {
                title => PAGE_TITLE,
                tasks => tasks,
                run_all_key => RUN_ALL_KEY,
                submit_key => SUBMIT_KEY,
                run_all_active => view.selection == TaskSelection::RunAll,
                view => view,
            })
        })
    });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to get or render template: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Internal Server Error: {}", e)),
            )
                .into_response()
        }
    }
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let view = analysis::render(state.generator.as_ref(), "", TaskSelection::Unset).await;
    render_page(&state, &view)
}

async fn submit_handler(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Response {
    let current = TaskSelection::from_key(&form.selected);
    let action = Action::from_key(&form.action).unwrap_or_else(|| {
        warn!(action = %form.action, "Ignoring unknown action");
        Action::Submit
    });
    let selection = current.apply(action);

    let view = analysis::render(state.generator.as_ref(), &form.description, selection).await;
    render_page(&state, &view)
}

async fn api_analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalysisView> {
    Json(analysis::render(state.generator.as_ref(), &request.description, request.selection).await)
}

pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // Serve static files from the static directory
    let static_files_service = ServeDir::new(static_dir.as_ref()).not_found_service(
        tower::service_fn(|_req: axum::extract::Request| async {
            Ok::<_, std::convert::Infallible>((StatusCode::NOT_FOUND, "Not Found").into_response())
        }),
    );

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/api/analyze", post(api_analyze_handler))
        .nest_service("/static", static_files_service)
        .with_state(state)
        .layer(TraceLayer::new_for_http()) // Add request logging
}

pub async fn start_web_server(config: ServerConfig, generator: Arc<dyn TextGenerator>) -> Result<()> {
    if !config.templates_dir.is_dir() {
        anyhow::bail!("Templates directory {} not found", config.templates_dir.display());
    }
    let state = AppState::new(&config.templates_dir, generator);
    let app = router(state, &config.static_dir);

    info!("Web server listening on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context(format!("Failed to bind to address {}", config.addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
