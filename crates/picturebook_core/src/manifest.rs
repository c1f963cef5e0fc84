//! Run manifest and pipeline states.

use crate::{PageAsset, StoryDocument, StoryId, StoryLength};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stage of a pipeline run.
///
/// Runs move `Started → TextGenerated → ImagesDone → AudioDone → Assembled →
/// Complete`. `Failed` is terminal and only reachable from `Started`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PipelineState {
    /// Run created, nothing generated yet
    Started,
    /// Story text validated
    TextGenerated,
    /// Every page has an image slot resolved
    ImagesDone,
    /// Every page has an audio slot resolved
    AudioDone,
    /// PDF rendering attempted
    Assembled,
    /// Bundle written (or its failure logged)
    Complete,
    /// Story text could not be produced
    Failed,
}

impl PipelineState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Started, TextGenerated)
                | (Started, Failed)
                | (TextGenerated, ImagesDone)
                | (ImagesDone, AudioDone)
                | (AudioDone, Assembled)
                | (Assembled, Complete)
        )
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Complete | PipelineState::Failed)
    }
}

/// Summary counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Pages with an illustration on disk
    pub images_ok: usize,
    /// Pages with narration on disk
    pub audio_ok: usize,
    /// Pages in the story
    pub total_pages: usize,
}

impl RunStats {
    /// Reduce per-page assets to counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use picturebook_core::{PageAsset, RunStats};
    /// use std::path::PathBuf;
    ///
    /// let assets = vec![
    ///     PageAsset::new(Some(PathBuf::from("a.png")), None),
    ///     PageAsset::new(Some(PathBuf::from("b.png")), Some(PathBuf::from("b.wav"))),
    /// ];
    /// let stats = RunStats::from_assets(&assets);
    /// assert_eq!((stats.images_ok, stats.audio_ok, stats.total_pages), (2, 1, 2));
    /// ```
    pub fn from_assets(assets: &[PageAsset]) -> Self {
        assets.iter().fold(
            RunStats {
                total_pages: assets.len(),
                ..Default::default()
            },
            |mut stats, asset| {
                stats.images_ok += usize::from(asset.has_image());
                stats.audio_ok += usize::from(asset.has_audio());
                stats
            },
        )
    }
}

/// Everything a finished run produced.
///
/// `images` and `audio` are indexed by page position and always have
/// `story.page_count()` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Identifier shared by every artifact of the run
    pub story_id: StoryId,
    /// Requested length
    pub length: StoryLength,
    /// Validated story text
    pub story: StoryDocument,
    /// Illustration path per page
    pub images: Vec<Option<PathBuf>>,
    /// Narration path per page
    pub audio: Vec<Option<PathBuf>>,
    /// Combined PDF, if rendering succeeded
    pub pdf_path: Option<PathBuf>,
    /// Summary counts
    pub stats: RunStats,
    /// Final state
    pub state: PipelineState,
    /// States visited, in order
    #[serde(default)]
    pub transitions: Vec<PipelineState>,
    /// When the run started
    pub created_at: DateTime<Utc>,
}

impl RunManifest {
    /// Per-page assets, zipped from the image and audio slots.
    pub fn page_assets(&self) -> Vec<PageAsset> {
        self.images
            .iter()
            .zip(self.audio.iter())
            .map(|(image, audio)| PageAsset::new(image.clone(), audio.clone()))
            .collect()
    }
}
