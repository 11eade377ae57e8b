//! arvocab - AR Vocabulary Learning Experiment backend
//!
//! Handles QR code translations, voice recording uploads, and CSV export
//! for the vocabulary-learning study.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use arvocab::config::{Args, DataFolders};
use arvocab::recordings::RecordingStore;
use arvocab::vocabulary::Vocabulary;
use arvocab::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting arvocab v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Resolve and create the data folder layout
    let folders = DataFolders::resolve(args.data_dir.as_deref());
    folders.ensure_directories()?;
    info!("Data folder: {}", folders.root.display());

    // Open or create the database
    let db_path = folders.database_path();
    let pool = arvocab::db::init_database(&db_path).await?;

    // Build the immutable vocabulary registry
    let vocabulary = Vocabulary::builtin();
    info!(
        "Vocabulary registry loaded: {} markers",
        vocabulary.len()
    );

    let recordings = RecordingStore::new(folders.recordings_dir());
    let state = AppState::new(pool, vocabulary, recordings, folders.export_dir());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("arvocab listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
