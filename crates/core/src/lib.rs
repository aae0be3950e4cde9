//! Media Console Core Library
//!
//! Client-side orchestration for a media intelligence backend: batch uploads,
//! media URL resolution, transcript pseudo-timelines, and unified search.

pub mod backend;
pub mod config;
pub mod error;
pub mod format;
pub mod media_url;
pub mod search;
pub mod state;
pub mod timeline;
pub mod types;
pub mod upload;

#[cfg(test)]
mod testing;

// Re-export commonly used items at crate root
pub use backend::{Backend, HttpBackend};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use format::{
    format_confidence, format_search_readable, format_timeline, format_transcription_readable,
    format_video_readable,
};
pub use media_url::{MediaUrlResolver, resolve_media_url};
pub use search::{SearchDispatcher, SearchOutcome, SearchRequest, SearchStrategy};
pub use state::MediaConsole;
pub use timeline::synthesize_timeline;
pub use types::{
    HealthStatus, MediaFile, MediaType, SearchResponse, TimelineSegment, Transcription,
    UploadResult, Video,
};
pub use upload::upload_media;
