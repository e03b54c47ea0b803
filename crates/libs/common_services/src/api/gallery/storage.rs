//! Uploaded files on disk, laid out as `{uploads}/{trip_id}/{generated name}`.

use crate::database::media_item::MediaKind;
use app_state::{UploadSettings, extension_of};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Media kind and normalized extension of an uploaded file name, if the extension is allowed.
#[must_use]
pub fn classify(uploads: &UploadSettings, original_name: &str) -> Option<(MediaKind, String)> {
    let path = Path::new(original_name);
    let extension = extension_of(path)?;
    if uploads.is_image_file(path) {
        Some((MediaKind::Image, extension))
    } else if uploads.is_video_file(path) {
        Some((MediaKind::Video, extension))
    } else {
        None
    }
}

/// A collision-free name for a stored file.
#[must_use]
pub fn generate_stored_name(extension: &str) -> String {
    format!("{}.{extension}", Uuid::new_v4())
}

/// True for a bare file name without directories or traversal.
#[must_use]
pub fn is_plain_file_name(name: &str) -> bool {
    !name.starts_with('.') && Path::new(name).file_name() == Some(OsStr::new(name))
}

pub async fn write_file(folder: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(folder).await?;
    let path = folder.join(name);
    fs::write(&path, bytes).await?;
    Ok(path)
}

/// Deletes a file. A file that is already gone is not an error; returns whether one was removed.
pub async fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
