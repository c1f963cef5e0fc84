//! End-to-end storybook generation.

use crate::{ImageOrchestrator, ImageSource, NarrationGenerator};
use chrono::Utc;
use picturebook_assembler::{DocumentPlan, PdfAssembler};
use picturebook_config::PicturebookConfig;
use picturebook_core::{
    ArtifactNames, PageAsset, PipelineState, RunManifest, RunStats, StoryDocument, StoryId,
    StoryLength, StoryRequest,
};
use picturebook_error::PicturebookResult;
use picturebook_models::{ProviderClient, image_providers, speech_providers, text_provider};
use picturebook_narrative::StoryTextGenerator;
use picturebook_storage::ArtifactStore;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

/// What the run produced for one story page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// 1-based page number
    pub page: usize,
    /// Illustration file, if written
    pub image_path: Option<PathBuf>,
    /// Source of the illustration
    pub image_source: ImageSource,
    /// Narration file, if written
    pub audio_path: Option<PathBuf>,
}

impl PageOutcome {
    /// The page's media slots.
    pub fn asset(&self) -> PageAsset {
        PageAsset::new(self.image_path.clone(), self.audio_path.clone())
    }
}

/// State history of one run.
#[derive(Debug)]
struct RunState {
    current: PipelineState,
    history: Vec<PipelineState>,
}

impl RunState {
    fn start() -> Self {
        Self {
            current: PipelineState::Started,
            history: vec![PipelineState::Started],
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.current.can_advance_to(next),
            "illegal transition {} -> {}",
            self.current,
            next
        );
        info!(from = %self.current, to = %next, "Pipeline state changed");
        self.current = next;
        self.history.push(next);
    }
}

/// Turns a prompt into a complete storybook.
///
/// A run generates the story text, then illustrates every page, then
/// narrates every page, then assembles the PDF and writes the JSON bundle.
/// Only a story text failure aborts a run. Every other stage degrades to a
/// missing artifact and the run still completes.
///
/// # Example
///
/// ```no_run
/// use picturebook_config::PicturebookConfig;
/// use picturebook_core::StoryLength;
/// use picturebook_pipeline::Pipeline;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PicturebookConfig::load()?;
/// let pipeline = Pipeline::from_config(&config)?;
/// let manifest = pipeline.generate("a shy dragon learns to sing", StoryLength::Short).await?;
/// println!("{} ({} pages)", manifest.story.title(), manifest.stats.total_pages);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    text: StoryTextGenerator,
    images: ImageOrchestrator,
    narration: NarrationGenerator,
    store: ArtifactStore,
    assembler: Option<PdfAssembler>,
}

impl Pipeline {
    /// Assemble a pipeline from its stages. PDF assembly is enabled.
    pub fn new(
        text: StoryTextGenerator,
        images: ImageOrchestrator,
        narration: NarrationGenerator,
        store: ArtifactStore,
    ) -> Self {
        Self {
            text,
            images,
            narration,
            store,
            assembler: Some(PdfAssembler::new()),
        }
    }

    /// Enable or disable PDF assembly.
    pub fn with_assembly(mut self, enabled: bool) -> Self {
        self.assembler = enabled.then(PdfAssembler::new);
        self
    }

    /// Build the configured provider chains and open the output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be resolved or created.
    #[instrument(skip(config), fields(output_dir = %config.output_dir.display()))]
    pub fn from_config(config: &PicturebookConfig) -> PicturebookResult<Self> {
        if !config.credentials.status().can_generate_text() {
            warn!("OPENROUTER_API_KEY is not set, story generation will fail");
        }

        let client = ProviderClient::new();
        let text = StoryTextGenerator::new(Box::new(text_provider(config, &client)), &config.text);
        let images = ImageOrchestrator::new(image_providers(config, &client), &config.images);
        let narration = NarrationGenerator::new(speech_providers(config, &client));
        let store = ArtifactStore::new(config.resolved_output_dir()?)?;

        debug!(
            images = ?images.provider_names(),
            speech = ?narration.provider_names(),
            "Pipeline ready"
        );
        Ok(Self::new(text, images, narration, store).with_assembly(config.assembly.enabled))
    }

    /// The artifact store runs write to.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Generate a storybook for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns the story error if the text cannot be generated or fails
    /// validation. Image, narration, PDF and bundle failures are logged and
    /// leave the matching manifest slot empty.
    pub async fn generate(
        &self,
        prompt: &str,
        length: StoryLength,
    ) -> PicturebookResult<RunManifest> {
        self.run(&StoryRequest::new(prompt, length)).await
    }

    /// Generate a storybook for a prepared request.
    #[instrument(skip_all, fields(story_id = tracing::field::Empty, length = %request.length()))]
    pub async fn run(&self, request: &StoryRequest) -> PicturebookResult<RunManifest> {
        let story_id = StoryId::generate();
        tracing::Span::current().record("story_id", tracing::field::display(&story_id));
        let names = ArtifactNames::new(story_id.clone());
        let created_at = Utc::now();
        let mut state = RunState::start();
        info!("Starting storybook run");

        let story = match self.text.generate(request).await {
            Ok(story) => story,
            Err(e) => {
                state.advance(PipelineState::Failed);
                error!(error = %e, "Story text generation failed");
                return Err(e.into());
            }
        };
        state.advance(PipelineState::TextGenerated);

        let mut images = Vec::with_capacity(story.page_count());
        for page in story.pages() {
            images.push(self.images.illustrate(&story, page, &names, &self.store).await);
        }
        state.advance(PipelineState::ImagesDone);

        let mut narration = Vec::with_capacity(story.page_count());
        for page in story.pages() {
            narration.push(self.narration.narrate(page, &names, &self.store).await);
        }
        state.advance(PipelineState::AudioDone);

        let outcomes: Vec<PageOutcome> = story
            .pages()
            .iter()
            .zip(images)
            .zip(narration)
            .map(|((page, image), audio)| PageOutcome {
                page: *page.page(),
                image_path: image.path,
                image_source: image.source,
                audio_path: audio.path,
            })
            .collect();

        let image_paths: Vec<Option<PathBuf>> =
            outcomes.iter().map(|o| o.image_path.clone()).collect();
        let pdf_path = self.assemble(&story, &image_paths, &names).await;
        state.advance(PipelineState::Assembled);

        let assets: Vec<PageAsset> = outcomes.iter().map(PageOutcome::asset).collect();
        let stats = RunStats::from_assets(&assets);
        state.advance(PipelineState::Complete);

        let manifest = RunManifest {
            story_id,
            length: *request.length(),
            story,
            images: image_paths,
            audio: outcomes.iter().map(|o| o.audio_path.clone()).collect(),
            pdf_path,
            stats,
            state: state.current,
            transitions: state.history,
            created_at,
        };

        match self.store.save_bundle(&manifest).await {
            Ok(path) => debug!(path = %path.display(), "Bundle saved"),
            Err(e) => error!(error = %e, "Could not save story bundle"),
        }

        let placeholders = outcomes
            .iter()
            .filter(|o| o.image_source == ImageSource::Placeholder)
            .count();
        info!(
            title = %manifest.story.title(),
            pages = stats.total_pages,
            images = stats.images_ok,
            placeholders,
            audio = stats.audio_ok,
            pdf = manifest.pdf_path.is_some(),
            "Storybook run complete"
        );
        Ok(manifest)
    }

    async fn assemble(
        &self,
        story: &StoryDocument,
        images: &[Option<PathBuf>],
        names: &ArtifactNames,
    ) -> Option<PathBuf> {
        let Some(assembler) = &self.assembler else {
            debug!("PDF assembly disabled");
            return None;
        };

        let bytes = match DocumentPlan::build(story, images).and_then(|plan| assembler.render(&plan)) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "PDF assembly failed");
                return None;
            }
        };

        match self.store.write_pdf(names, &bytes).await {
            Ok(path) => {
                info!(path = %path.display(), size = bytes.len(), "Storybook PDF written");
                Some(path)
            }
            Err(e) => {
                error!(error = %e, "Could not write storybook PDF");
                None
            }
        }
    }
}
