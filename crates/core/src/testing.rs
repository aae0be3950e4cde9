use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    backend::Backend,
    error::Result,
    types::{HealthStatus, MediaFile, SearchResponse, Transcription, Video},
};

pub fn video(id: i64, filename: &str) -> Video {
    Video {
        id,
        filename: filename.to_string(),
        storage_path: format!("data/01-raw/videos/{filename}"),
        summary: format!("summary of {filename}"),
        detected_objects: vec!["person".to_string()],
        key_frames: vec![format!("/media/keyframes/{id}_0.jpg")],
        created_at: "2024-05-01T10:00:00".to_string(),
    }
}

pub fn transcription(id: i64, filename: &str, transcript: &str) -> Transcription {
    Transcription {
        id,
        filename: filename.to_string(),
        storage_path: format!("data/01-raw/audio/{filename}"),
        transcript: transcript.to_string(),
        confidence_score: 0.9,
        video_id: None,
        created_at: "2024-05-01T10:00:00".to_string(),
    }
}

/// Backend whose `search` parks until `release` is notified, so callers can
/// inspect state while a search is in flight.
#[derive(Default)]
pub struct GatedBackend {
    pub release: Notify,
}

#[async_trait]
impl Backend for GatedBackend {
    async fn fetch_videos(&self) -> Result<Vec<Video>> {
        Ok(vec![])
    }

    async fn fetch_transcriptions(&self) -> Result<Vec<Transcription>> {
        Ok(vec![])
    }

    async fn search(&self, _term: &str) -> Result<SearchResponse> {
        self.release.notified().await;
        Ok(SearchResponse::default())
    }

    async fn process_video(&self, file: &MediaFile) -> Result<Video> {
        Ok(video(1, &file.name))
    }

    async fn process_audio(&self, file: &MediaFile) -> Result<Transcription> {
        Ok(transcription(1, &file.name, ""))
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }
}
