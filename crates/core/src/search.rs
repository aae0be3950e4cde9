use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{debug, info};

use crate::{
    backend::Backend,
    error::Result,
    types::{SearchResponse, Transcription, Video},
};

/// Maximum number of characters of a reference transcript forwarded as a term
pub const AUDIO_TERM_MAX_CHARS: usize = 140;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStrategy {
    Text,
    Visual,
    Audio,
}

impl SearchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Text => "text",
            SearchStrategy::Visual => "visual",
            SearchStrategy::Audio => "audio",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved query: the term sent to the backend and how it was derived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub strategy: SearchStrategy,
    pub term: String,
    /// What the user asked for, before any substitution
    pub description: String,
}

impl SearchRequest {
    pub fn text(term: &str) -> Self {
        Self {
            strategy: SearchStrategy::Text,
            term: term.to_string(),
            description: term.to_string(),
        }
    }

    /// Use a video's summary as the term, or its filename when the summary is empty
    pub fn visual(video: &Video) -> Self {
        let term = if video.summary.is_empty() {
            &video.filename
        } else {
            &video.summary
        };
        Self {
            strategy: SearchStrategy::Visual,
            term: term.clone(),
            description: video.filename.clone(),
        }
    }

    /// Use the leading characters of a transcript as the term. The cut is not
    /// word-aware.
    pub fn audio(transcription: &Transcription) -> Self {
        Self {
            strategy: SearchStrategy::Audio,
            term: transcription
                .transcript
                .chars()
                .take(AUDIO_TERM_MAX_CHARS)
                .collect(),
            description: transcription.filename.clone(),
        }
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.strategy, self.description)
    }

    fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub strategy: SearchStrategy,
    pub label: String,
    pub response: SearchResponse,
}

/// Clears the busy flag when dropped, whatever way the search ends.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Turns text, visual-reference, and audio-reference intents into a single
/// backend text search.
///
/// Overlapping dispatches are not serialized; whichever response the caller
/// applies last wins.
pub struct SearchDispatcher<B: ?Sized> {
    backend: Arc<B>,
    busy: AtomicBool,
}

impl<B> SearchDispatcher<B>
where
    B: Backend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn search_text(&self, term: &str) -> Result<Option<SearchOutcome>> {
        self.dispatch(SearchRequest::text(term)).await
    }

    pub async fn search_visual(&self, reference: &Video) -> Result<Option<SearchOutcome>> {
        self.dispatch(SearchRequest::visual(reference)).await
    }

    pub async fn search_audio(&self, reference: &Transcription) -> Result<Option<SearchOutcome>> {
        self.dispatch(SearchRequest::audio(reference)).await
    }

    /// Run a request. Returns `Ok(None)` without calling the backend when the
    /// term is blank.
    pub async fn dispatch(&self, request: SearchRequest) -> Result<Option<SearchOutcome>> {
        if request.is_blank() {
            debug!(strategy = %request.strategy, "blank search term, skipping");
            return Ok(None);
        }

        let label = request.label();
        let response = {
            let _busy = BusyGuard::acquire(&self.busy);
            debug!(strategy = %request.strategy, term = %request.term, "dispatching search");
            self.backend.search(&request.term).await?
        };

        info!(
            %label,
            videos = response.videos.len(),
            transcriptions = response.transcriptions.len(),
            "search completed"
        );

        Ok(Some(SearchOutcome {
            strategy: request.strategy,
            label,
            response,
        }))
    }
}
