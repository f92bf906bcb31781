use anyhow::Result;
use clap::Parser;
use std::{net::IpAddr, path::PathBuf, sync::Arc};
use tracing::info;

use planscope::{
    analysis,
    constants::{DEFAULT_PORT, DEFAULT_STATIC_DIR, DEFAULT_TEMPLATES_DIR},
    report,
    web_server::{self, ServerConfig},
    GeminiClient, GeminiConfig, TaskSelection,
};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the web UI.
    Serve {
        #[arg(long, env = "PLANSCOPE_HOST", default_value = "0.0.0.0", help = "Address to bind.")]
        host: IpAddr,
        #[arg(long, env = "PLANSCOPE_PORT", default_value_t = DEFAULT_PORT, help = "Port for the web server.")]
        port: u16,
        #[arg(long, default_value = DEFAULT_TEMPLATES_DIR, help = "Directory holding the page templates.")]
        templates: PathBuf,
        #[arg(long, default_value = DEFAULT_STATIC_DIR, help = "Directory served under /static.")]
        static_dir: PathBuf,
    },
    /// Run an analysis once and print the result.
    Analyze {
        #[arg(
            long,
            value_parser = parse_task,
            help = "cost, sustainability, resources, risk, prioritization, schedule or all."
        )]
        task: TaskSelection,
        /// Free-text project description.
        description: String,
    },
}

fn parse_task(value: &str) -> Result<TaskSelection, String> {
    match TaskSelection::parse_key(value) {
        Some(TaskSelection::Unset) | None => Err(format!("unknown task '{}'", value)),
        Some(selection) => Ok(selection),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for GOOGLE_API_KEY and friends)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG (e.g. RUST_LOG=info,planscope=debug).
    // Logs go to stderr so `analyze` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = GeminiClient::new(GeminiConfig::from_env());

    match cli.command {
        Commands::Serve {
            host,
            port,
            templates,
            static_dir,
        } => {
            info!(model = client.model(), "Starting web UI on port {}...", port);
            let config = ServerConfig {
                addr: (host, port).into(),
                templates_dir: templates,
                static_dir,
            };

            let web_server = web_server::start_web_server(config, Arc::new(client));
            tokio::select! {
                result = web_server => result?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl-C received, shutting down.");
                }
            }
        }
        Commands::Analyze { task, description } => {
            let view = analysis::render(&client, &description, task).await;
            print!("{}", report::render_text(&view)?);
            if let Some(failure) = view.failure {
                return Err(anyhow::anyhow!(failure.message)
                    .context(format!("{} analysis failed", failure.task_label)));
            }
        }
    }

    Ok(())
}
