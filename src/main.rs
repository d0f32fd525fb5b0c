//! Application entry point — interactive text annotator.
//!
//! # Startup sequence
//!
//! 1. Load [`AppConfig`] from disk (returns default on first run).
//! 2. Initialise logging with the configured filter (`RUST_LOG` wins).
//! 3. Create the [`tokio`] runtime.
//! 4. Build the capability provider and the [`AnnotationPipeline`].
//! 5. Spawn the transcript printer (store subscriber).
//! 6. Read stdin line by line until `/quit` or EOF, then wait for every
//!    request still running before exiting.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use text_annotator::{
    command::Command,
    config::{AppConfig, AppPaths},
    pipeline::AnnotationPipeline,
    provider::build_provider,
    session::{spawn_transcript, Session},
    store::MessageStore,
};

async fn run_session(pipeline: AnnotationPipeline) -> anyhow::Result<()> {
    // Subscribe before the first request so its append is printed.
    let events = pipeline.store().subscribe();
    let printer = spawn_transcript(events, |text| println!("{text}"));
    let mut session = Session::new(pipeline);

    println!("text-annotator — type a message, or /help");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if !session.handle(Command::parse(&line)) {
            break;
        }
    }

    let messages = session.finish().await;
    // Every store handle is gone now; the printer drains and exits.
    printer.await.context("transcript task")?;
    log::info!("session ended with {messages} messages");
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Configuration (logged once the logger exists)
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // 2. Logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.filter.as_str()),
    )
    .init();
    log::info!("text-annotator starting up");
    match &loaded {
        Err(e) => log::warn!("Failed to load config ({e}); using defaults"),
        Ok(_) => write_default_settings(&config),
    }

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(async move {
        // 4. Provider + pipeline
        let provider = build_provider(&config.provider);
        let pipeline = AnnotationPipeline::new(MessageStore::new(), provider, config.pipeline);

        // 5–6. Session
        run_session(pipeline).await
    })
}

/// Save the defaults on first run so the user has a file to edit.
fn write_default_settings(config: &AppConfig) {
    let paths = AppPaths::new();
    if paths.settings_file.exists() {
        return;
    }
    match config.save() {
        Ok(()) => log::info!("Wrote default settings to {}", paths.settings_file.display()),
        Err(e) => log::warn!("Could not write default settings: {e}"),
    }
}
