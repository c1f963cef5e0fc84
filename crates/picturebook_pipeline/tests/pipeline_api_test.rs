//! A full run against the configured live providers.
//!
//! Run with `cargo test -p picturebook_pipeline --features api`.

#![cfg(feature = "api")]

use picturebook_config::PicturebookConfig;
use picturebook_core::{PipelineState, StoryLength};
use picturebook_pipeline::Pipeline;

#[tokio::test]
async fn test_live_short_storybook() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let dir = tempfile::tempdir()?;
    let mut config = PicturebookConfig::load()?;
    config.output_dir = dir.path().to_path_buf();

    let manifest = Pipeline::from_config(&config)?
        .generate("a hedgehog who plants a garden", StoryLength::Short)
        .await?;

    assert_eq!(manifest.state, PipelineState::Complete);
    assert_eq!(manifest.stats.total_pages, 3);
    assert_eq!(manifest.stats.images_ok, 3);
    assert!(manifest.pdf_path.is_some());
    Ok(())
}
