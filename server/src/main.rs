//! EduPass tutoring server
//!
//! Serves the license login flow and the gated photo tutoring API.
//!
//! Usage:
//!   edupass-server --port 8080
//!   edupass-server --store-file licenses.json   # local document, no Gist
//!
//! Settings come from the environment: `GITHUB_TOKEN`, `GIST_ID`,
//! `GIST_FILE`, `ZHIPU_KEY`, `DEEPSEEK_KEY`, `EDUPASS_APP_SCOPE`.

use std::{path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::Parser;
use edupass_server::{build_router, session::SWEEP_INTERVAL, AppConfig, AppState};
use edupass_session::LicenseGate;
use edupass_store::{FileStore, RecordStore};
use edupass_tutor::TutorPipeline;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "edupass-server")]
#[command(about = "EduPass license-gated tutoring server")]
struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Use a local JSON license document instead of the Gist
    #[arg(long)]
    store_file: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("EduPass server starting...");
    let config = AppConfig::from_env();

    let store: Arc<dyn RecordStore> = match &args.store_file {
        Some(path) => {
            info!("Using local license document {:?}", path);
            Arc::new(FileStore::new(path))
        }
        None => config.record_store(),
    };
    let backend = store.backend_name();

    let gate = LicenseGate::new(store, config.app_scope.clone());
    let pipeline = TutorPipeline::new(config.recognizer(), config.generator());
    let state = AppState::new(gate, pipeline);
    state.sessions().spawn_sweeper(SWEEP_INTERVAL);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .context("Failed to bind HTTP port")?;

    println!("\n========================================");
    println!("  EduPass Server Running");
    println!("========================================");
    println!("  HTTP Port:  {}", args.port);
    println!("  App scope:  {}", config.app_scope);
    println!("  Licenses:   {}", backend);
    println!("========================================\n");

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
