use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    backend::Backend,
    error::Result,
    search::{SearchDispatcher, SearchOutcome, SearchStrategy},
    types::{MediaFile, MediaType, SearchResponse, Transcription, UploadResult, Video},
    upload::upload_media,
};

/// Canonical in-memory state of the console: the two media collections and
/// the current search result set.
///
/// The console is the only writer. Every event replaces or prepends in a single
/// step, so readers never observe a half-applied update.
pub struct MediaConsole<B: ?Sized> {
    backend: Arc<B>,
    dispatcher: Arc<SearchDispatcher<B>>,
    videos: Vec<Video>,
    transcriptions: Vec<Transcription>,
    results: Option<SearchOutcome>,
    active_label: String,
}

impl<B> MediaConsole<B>
where
    B: Backend + ?Sized,
{
    /// Fetch both collections concurrently. Either fetch failing fails the
    /// whole load and nothing is kept.
    pub async fn load(backend: Arc<B>) -> Result<Self> {
        let (videos, transcriptions) = fetch_collections(backend.as_ref()).await?;
        info!(
            videos = videos.len(),
            transcriptions = transcriptions.len(),
            "media collections loaded"
        );

        Ok(Self {
            dispatcher: Arc::new(SearchDispatcher::new(Arc::clone(&backend))),
            backend,
            videos,
            transcriptions,
            results: None,
            active_label: String::new(),
        })
    }

    pub fn backend(&self) -> &B {
        self.backend.as_ref()
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn transcriptions(&self) -> &[Transcription] {
        &self.transcriptions
    }

    pub fn video(&self, id: i64) -> Option<&Video> {
        self.videos.iter().find(|video| video.id == id)
    }

    pub fn transcription(&self, id: i64) -> Option<&Transcription> {
        self.transcriptions.iter().find(|item| item.id == id)
    }

    pub fn results(&self) -> Option<&SearchResponse> {
        self.results.as_ref().map(|outcome| &outcome.response)
    }

    /// Strategy that produced the current result set
    pub fn results_strategy(&self) -> Option<SearchStrategy> {
        self.results.as_ref().map(|outcome| outcome.strategy)
    }

    pub fn active_label(&self) -> &str {
        &self.active_label
    }

    pub fn is_searching(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// Shared handle to the dispatcher, for observing the busy flag while a
    /// search borrows the console
    pub fn dispatcher(&self) -> Arc<SearchDispatcher<B>> {
        Arc::clone(&self.dispatcher)
    }

    /// Upload a batch and merge the results. Returns the uploaded results.
    pub async fn upload(
        &mut self,
        files: &[MediaFile],
        media_type: MediaType,
    ) -> Result<Vec<UploadResult>> {
        let results = upload_media(self.backend.as_ref(), files, media_type).await?;
        self.apply_uploads(results.clone());
        Ok(results)
    }

    /// Prepend uploaded records to their collections, keeping delivery order.
    /// No deduplication: a re-upload adds a second entry.
    pub fn apply_uploads(&mut self, results: Vec<UploadResult>) {
        let mut new_videos = Vec::new();
        let mut new_transcriptions = Vec::new();
        for result in results {
            match result {
                UploadResult::Video(video) => new_videos.push(video),
                UploadResult::Transcription(item) => new_transcriptions.push(item),
            }
        }

        debug!(
            videos = new_videos.len(),
            transcriptions = new_transcriptions.len(),
            "merging upload results"
        );

        if !new_videos.is_empty() {
            new_videos.append(&mut self.videos);
            self.videos = new_videos;
        }
        if !new_transcriptions.is_empty() {
            new_transcriptions.append(&mut self.transcriptions);
            self.transcriptions = new_transcriptions;
        }
    }

    pub async fn search_text(&mut self, term: &str) -> Result<bool> {
        let outcome = self.dispatcher.search_text(term).await?;
        Ok(self.apply_outcome(outcome))
    }

    pub async fn search_visual(&mut self, reference: &Video) -> Result<bool> {
        let outcome = self.dispatcher.search_visual(reference).await?;
        Ok(self.apply_outcome(outcome))
    }

    pub async fn search_audio(&mut self, reference: &Transcription) -> Result<bool> {
        let outcome = self.dispatcher.search_audio(reference).await?;
        Ok(self.apply_outcome(outcome))
    }

    /// Replace the displayed result set. Nothing from the previous search is kept.
    pub fn apply_search(&mut self, outcome: SearchOutcome) {
        self.active_label = outcome.label.clone();
        self.results = Some(outcome);
    }

    fn apply_outcome(&mut self, outcome: Option<SearchOutcome>) -> bool {
        match outcome {
            Some(outcome) => {
                self.apply_search(outcome);
                true
            }
            None => false,
        }
    }
}

async fn fetch_collections<B>(backend: &B) -> Result<(Vec<Video>, Vec<Transcription>)>
where
    B: Backend + ?Sized,
{
    tokio::try_join!(backend.fetch_videos(), backend.fetch_transcriptions())
}
