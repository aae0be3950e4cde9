use crate::types::TimelineSegment;

pub const WORDS_PER_SEGMENT: usize = 6;

/// Format a segment index as a synthetic `MM:00` label
pub fn format_segment_timestamp(index: usize) -> String {
    format!("{:02}:00", index)
}

/// Split a flat transcript into fixed-size word chunks with synthetic timestamps.
///
/// The timestamps are display labels, not audio-aligned positions: chunk `i`
/// is labelled `i` minutes. A transcript with no words yields one segment
/// carrying the original text at `00:00`, so the result is never empty.
pub fn synthesize_timeline(transcript: &str) -> Vec<TimelineSegment> {
    let words: Vec<&str> = transcript.split_whitespace().collect();

    if words.is_empty() {
        return vec![TimelineSegment {
            text: transcript.to_string(),
            timestamp: format_segment_timestamp(0),
        }];
    }

    words
        .chunks(WORDS_PER_SEGMENT)
        .enumerate()
        .map(|(index, chunk)| TimelineSegment {
            text: chunk.join(" "),
            timestamp: format_segment_timestamp(index),
        })
        .collect()
}
