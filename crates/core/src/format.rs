use crate::{
    media_url::MediaUrlResolver,
    timeline::synthesize_timeline,
    types::{SearchResponse, Transcription, Video},
};

/// Format a confidence score in [0,1] as a percentage with one decimal
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Format a transcription's pseudo-timeline as `[MM:00] words` lines
pub fn format_timeline(transcript: &str) -> String {
    synthesize_timeline(transcript)
        .iter()
        .map(|segment| format!("[{}] {}", segment.timestamp, segment.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_video_readable(video: &Video, resolver: &MediaUrlResolver) -> String {
    let mut output = String::new();
    output.push_str(&format!("## #{} {}\n\n", video.id, video.filename));
    output.push_str(&format!("**Created:** {}\n\n", video.created_at));

    if !video.summary.is_empty() {
        output.push_str(&video.summary);
        output.push_str("\n\n");
    }

    if !video.detected_objects.is_empty() {
        output.push_str(&format!(
            "**Detected objects:** {}\n\n",
            video.detected_objects.join(", ")
        ));
    }

    if !video.key_frames.is_empty() {
        output.push_str("**Key frames:**\n");
        for frame in &video.key_frames {
            let url = resolver.resolve(frame);
            if url.is_empty() {
                output.push_str("• (unavailable)\n");
            } else {
                output.push_str(&format!("• {}\n", url));
            }
        }
        output.push('\n');
    }

    output
}

pub fn format_transcription_readable(transcription: &Transcription) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "## #{} {}\n\n",
        transcription.id, transcription.filename
    ));

    let mut meta = format!(
        "**Created:** {} | **Confidence:** {}",
        transcription.created_at,
        format_confidence(transcription.confidence_score)
    );
    if let Some(video_id) = transcription.video_id {
        meta.push_str(&format!(" | **Video:** #{}", video_id));
    }
    output.push_str(&meta);
    output.push_str("\n\n");

    output.push_str(&format_timeline(&transcription.transcript));
    output.push_str("\n\n");

    output
}

pub fn format_search_readable(
    label: &str,
    response: &SearchResponse,
    resolver: &MediaUrlResolver,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Results for {}\n\n", label));

    output.push_str(&format!("## Videos ({})\n\n", response.videos.len()));
    for video in &response.videos {
        output.push_str(&format_video_readable(video, resolver));
    }

    output.push_str(&format!(
        "## Transcriptions ({})\n\n",
        response.transcriptions.len()
    ));
    for transcription in &response.transcriptions {
        output.push_str(&format_transcription_readable(transcription));
    }

    output
}
