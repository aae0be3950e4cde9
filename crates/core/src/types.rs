use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub filename: String,
    pub storage_path: String,
    pub summary: String,
    #[serde(default)]
    pub detected_objects: Vec<String>,
    #[serde(default)]
    pub key_frames: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub id: i64,
    pub filename: String,
    pub storage_path: String,
    pub transcript: String,
    pub confidence_score: f64,
    /// Informational back-reference; never used to join collections.
    #[serde(default)]
    pub video_id: Option<i64>,
    pub created_at: String,
}

/// Outcome of processing a single uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    Video(Video),
    Transcription(Transcription),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub transcriptions: Vec<Transcription>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.transcriptions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Video,
    Audio,
}

impl MediaType {
    /// Processing endpoint path for this media type
    pub fn endpoint(&self) -> &'static str {
        match self {
            MediaType::Video => "/process/video",
            MediaType::Audio => "/process/audio",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        }
    }
}

/// A file queued for upload: the name sent to the backend plus its raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming it after its last path component
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| ConsoleError::InvalidFile {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { name, bytes })
    }
}

/// One display chunk of a pseudo-timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSegment {
    pub text: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn transcription_accepts_null_video_id() {
        let json = r#"{
            "id": 7,
            "filename": "clip.wav",
            "storage_path": "data/01-raw/audio/clip.wav",
            "transcript": "hello there",
            "confidence_score": 0.91,
            "video_id": null,
            "created_at": "2024-05-01T10:00:00"
        }"#;

        let transcription: Transcription = serde_json::from_str(json).unwrap();
        assert_eq!(transcription.video_id, None);
        assert_eq!(transcription.id, 7);
    }

    #[test]
    fn search_response_decodes_both_lists() {
        let json = r#"{
            "videos": [{
                "id": 1,
                "filename": "a.mp4",
                "storage_path": "/srv/media/a.mp4",
                "summary": "a dog on a beach",
                "detected_objects": ["dog", "dog", "person"],
                "key_frames": ["/media/keyframes/a_0.jpg"],
                "created_at": "2024-05-01T10:00:00"
            }],
            "transcriptions": []
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.videos.len(), 1);
        assert_eq!(response.videos[0].detected_objects, vec!["dog", "dog", "person"]);
        assert!(response.transcriptions.is_empty());
        assert!(!response.is_empty());
    }

    #[test]
    fn media_type_endpoints() {
        assert_eq!(MediaType::Video.endpoint(), "/process/video");
        assert_eq!(MediaType::Audio.endpoint(), "/process/audio");
    }

    #[tokio::test]
    async fn media_file_from_path_reads_name_and_bytes() {
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        file.write_all(b"not really a video").unwrap();

        let media = MediaFile::from_path(file.path()).await.unwrap();
        let expected_name = file.path().file_name().unwrap().to_string_lossy();
        assert_eq!(media.name, expected_name);
        assert_eq!(media.bytes, b"not really a video");
    }

    #[tokio::test]
    async fn media_file_from_path_without_name_fails() {
        let err = MediaFile::from_path(Path::new("/")).await.unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidFile { .. }));
    }
}
