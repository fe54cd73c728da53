use std::io::{Seek, SeekFrom, Write};

use actix_multipart::Multipart;
use futures_util::StreamExt;
use log::{debug, warn};

use super::ServiceError;
use crate::validation::Upload;

/// Spools the part named `field_name` to a temporary file. Other parts are
/// drained and ignored. An empty file input (no filename, no bytes) counts
/// as no upload.
///
/// At most `max_bytes + 1` bytes are written: once a part passes the limit
/// the rest of the request is left unread and the truncated upload is
/// returned, so the size rule reports it.
pub(crate) async fn read_upload(
    mut payload: Multipart,
    field_name: &str,
    max_bytes: u64,
) -> Result<Option<Upload>, ServiceError> {
    let mut upload = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some(field_name) {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        let mut file = tempfile::tempfile()?;
        let mut size: u64 = 0;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            let room = (max_bytes + 1 - size) as usize;
            let take = room.min(chunk.len());
            file.write_all(&chunk[..take])?;
            size += take as u64;

            if size > max_bytes {
                warn!("Upload {} is larger than {} bytes, not reading the rest", filename, max_bytes);
                file.seek(SeekFrom::Start(0))?;
                return Ok(Some(Upload::new(filename, file)));
            }
        }

        if filename.is_empty() && size == 0 {
            continue;
        }
        debug!("Received upload {} ({} bytes)", filename, size);
        file.seek(SeekFrom::Start(0))?;
        upload = Some(Upload::new(filename, file));
    }

    Ok(upload)
}
