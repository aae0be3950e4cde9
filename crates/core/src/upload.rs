use tracing::{debug, info};

use crate::{
    backend::Backend,
    error::Result,
    types::{MediaFile, MediaType, UploadResult},
};

/// Submit files one at a time to the processing endpoint for `media_type`.
///
/// The next file is not sent until the previous one resolves. The first failure
/// aborts the batch: later files are never submitted and the results gathered
/// so far are dropped, so the caller sees either every result, index-aligned
/// with `files`, or an error.
pub async fn upload_media<B>(
    backend: &B,
    files: &[MediaFile],
    media_type: MediaType,
) -> Result<Vec<UploadResult>>
where
    B: Backend + ?Sized,
{
    let mut results = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        debug!(
            index,
            total = files.len(),
            file = %file.name,
            media_type = media_type.name(),
            "submitting file"
        );

        let result = match media_type {
            MediaType::Video => UploadResult::Video(backend.process_video(file).await?),
            MediaType::Audio => UploadResult::Transcription(backend.process_audio(file).await?),
        };
        results.push(result);
    }

    info!(
        count = results.len(),
        media_type = media_type.name(),
        "upload batch processed"
    );

    Ok(results)
}
