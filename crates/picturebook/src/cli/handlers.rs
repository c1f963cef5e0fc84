//! Command handlers.

use super::commands::OutputFormat;
use picturebook::{
    ArtifactStore, JsonError, Pipeline, PicturebookConfig, PicturebookResult, RunManifest,
    StoryId, StoryLength,
    report::{credential_report, manifest_summary},
};
use std::path::PathBuf;
use tracing::{info, warn};

fn load_config(output_dir: Option<PathBuf>) -> PicturebookResult<PicturebookConfig> {
    let mut config = PicturebookConfig::load()?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    Ok(config)
}

fn print_manifest(manifest: &RunManifest, format: OutputFormat) -> PicturebookResult<()> {
    match format {
        OutputFormat::Human => print!("{}", manifest_summary(manifest)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(manifest)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Run the pipeline for one prompt and print the manifest.
pub async fn generate(
    prompt: &str,
    length: Option<&str>,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
) -> PicturebookResult<()> {
    let config = load_config(output_dir)?;
    let length = length
        .map(StoryLength::parse_or_default)
        .unwrap_or(config.default_length);
    info!(length = %length, output_dir = %config.output_dir.display(), "Generating storybook");

    let manifest = Pipeline::from_config(&config)?.generate(prompt, length).await?;
    print_manifest(&manifest, format)
}

/// Print the saved bundle of a previous run.
pub async fn show(
    story_id: &StoryId,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
) -> PicturebookResult<()> {
    let config = load_config(output_dir)?;
    let store = ArtifactStore::new(config.resolved_output_dir()?)?;
    let manifest = store.load_bundle(story_id).await?;
    print_manifest(&manifest, format)
}

/// Print which credentials are configured.
pub fn check() -> PicturebookResult<()> {
    let config = PicturebookConfig::load()?;
    let status = config.credentials.status();
    for name in status.missing() {
        warn!(variable = name, "Credential not set");
    }
    print!("{}", credential_report(&status));
    Ok(())
}
