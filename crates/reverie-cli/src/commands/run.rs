use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use reverie_core::image::ImageData;
use reverie_core::session::ReflectionMode;
use reverie_interaction::DryrunStudio;

use crate::app::App;

#[derive(Args)]
pub struct RunArgs {
    /// Photo to turn into a postcard
    #[arg(long)]
    pub image: PathBuf,

    /// Theme id (defaults to the configured or built-in default)
    #[arg(long)]
    pub theme: Option<String>,

    /// Reflection mode, saved as the new default
    #[arg(long)]
    pub mode: Option<ReflectionMode>,

    /// Answer for the next act; repeat once per act
    #[arg(long = "answer")]
    pub answers: Vec<String>,

    /// Simulated collaborator latency in milliseconds
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,
}

pub async fn run(app: &App, args: RunArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let image = ImageData::from_bytes(&bytes, None)?;

    let studio = DryrunStudio::new().with_latency(Duration::from_millis(args.latency_ms));
    let orchestrator = app.orchestrator(Arc::new(studio));
    orchestrator.restore_preferences().await;
    let mut events = orchestrator.subscribe();

    if let Some(mode) = args.mode {
        orchestrator.set_reflection_mode(mode).await;
    }
    if let Some(theme_id) = args.theme.or_else(|| app.config.default_theme_id.clone()) {
        if !orchestrator.set_theme(&theme_id) {
            bail!("Unknown theme: {}", theme_id);
        }
    }

    orchestrator.set_image_data(image);
    let result = orchestrator.run_to_completion(&args.answers).await;
    orchestrator.wait_for_background().await;

    while let Ok(event) = events.try_recv() {
        tracing::debug!("[run] {:?}", event);
    }

    let state = result?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
