use crate::api::access::gate::{SafeView, authorize, ensure, ensure_member, resolve_access};
use crate::api::access::policy::TripAction;
use crate::api::gallery::error::GalleryError;
use crate::api::gallery::storage::{
    classify, generate_stored_name, is_plain_file_name, remove_if_exists, write_file,
};
use crate::database::media_item::MediaItem;
use crate::database::media_store::MediaStore;
use app_state::UploadSettings;
use sqlx::PgPool;
use std::io;
use tokio::fs;
use tracing::{info, instrument, warn};

/// A stored file ready to be sent to the client.
pub struct StoredMedia {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// The trip's gallery, newest first.
#[instrument(skip(pool), err(Debug))]
pub async fn list_media(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
) -> Result<Vec<MediaItem>, GalleryError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::ViewGallery,
        SafeView::Dashboard,
    )
    .await?;
    Ok(MediaStore::list_for_trip(pool, trip_id).await?)
}

/// Proof that the caller is a member of the trip, obtained before an upload body is read.
#[derive(Debug)]
pub struct UploadPermit {
    user_id: i32,
    trip_id: i32,
}

/// Checks that the caller may upload to the trip. Any member may.
#[instrument(skip(pool), err(Debug))]
pub async fn authorize_upload(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
) -> Result<UploadPermit, GalleryError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::UploadMedia,
        SafeView::Gallery(trip_id),
    )
    .await?;
    Ok(UploadPermit { user_id, trip_id })
}

/// Stores an uploaded photo or video and records it in the gallery.
#[instrument(skip(pool, uploads, bytes), fields(size = bytes.len()), err(Debug))]
pub async fn upload_media(
    pool: &PgPool,
    uploads: &UploadSettings,
    permit: &UploadPermit,
    original_name: &str,
    bytes: &[u8],
) -> Result<MediaItem, GalleryError> {
    let UploadPermit { user_id, trip_id } = *permit;
    if bytes.is_empty() {
        return Err(GalleryError::Validation("No file selected".to_owned()));
    }
    if bytes.len() > uploads.max_upload_bytes {
        return Err(GalleryError::FileTooLarge(uploads.max_upload_bytes));
    }
    let (kind, extension) = classify(uploads, original_name)
        .ok_or_else(|| GalleryError::UnsupportedFile(original_name.to_owned()))?;

    let stored_name = generate_stored_name(&extension);
    let path = write_file(&uploads.trip_folder(trip_id), &stored_name, bytes).await?;

    match MediaStore::create(pool, trip_id, user_id, &stored_name, kind).await {
        Ok(item) => {
            info!("Stored {:?} {} for trip {}", kind, stored_name, trip_id);
            Ok(item)
        }
        Err(db_err) => {
            if let Err(e) = remove_if_exists(&path).await {
                warn!("Could not clean up {} after failed insert: {}", path.display(), e);
            }
            Err(db_err.into())
        }
    }
}

/// Deletes a gallery item and its file. Only the uploader may do so.
///
/// The row is deleted first, inside a transaction that only commits once the file is gone,
/// so a failed file removal leaves the gallery unchanged.
#[instrument(skip(pool, uploads), err(Debug))]
pub async fn delete_media(
    pool: &PgPool,
    uploads: &UploadSettings,
    user_id: i32,
    trip_id: i32,
    media_id: i32,
) -> Result<(), GalleryError> {
    let denied_view = SafeView::Gallery(trip_id);
    let access = resolve_access(pool, trip_id, user_id).await?;
    ensure_member(access, denied_view)?;

    let mut tx = pool.begin().await?;
    let item = MediaStore::find_in_trip(&mut *tx, trip_id, media_id)
        .await?
        .ok_or(GalleryError::Denied(denied_view))?;
    ensure(
        access,
        user_id,
        TripAction::DeleteMedia {
            uploader_id: item.user_id,
        },
        denied_view,
    )?;

    if !MediaStore::delete_by_uploader(&mut *tx, item.id, user_id).await? {
        return Err(GalleryError::Denied(denied_view));
    }
    let path = uploads.trip_folder(trip_id).join(&item.filename);
    if !remove_if_exists(&path).await? {
        warn!("Media file {} was already gone", path.display());
    }
    tx.commit().await?;

    info!("Deleted media {} from trip {}", item.id, trip_id);
    Ok(())
}

/// Reads a stored file for a member of the trip it belongs to.
#[instrument(skip(pool, uploads), err(Debug))]
pub async fn open_media(
    pool: &PgPool,
    uploads: &UploadSettings,
    user_id: i32,
    trip_id: i32,
    filename: &str,
) -> Result<StoredMedia, GalleryError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::ViewGallery,
        SafeView::Dashboard,
    )
    .await?;

    let denied = || GalleryError::Denied(SafeView::Gallery(trip_id));
    if !is_plain_file_name(filename) {
        return Err(denied());
    }
    let item = MediaStore::find_by_filename_in_trip(pool, trip_id, filename)
        .await?
        .ok_or_else(denied)?;

    let path = uploads.trip_folder(trip_id).join(&item.filename);
    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Media {} has no file at {}", item.id, path.display());
            return Err(denied());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(StoredMedia {
        bytes,
        content_type: mime_guess::from_path(&path)
            .first_or_octet_stream()
            .to_string(),
    })
}
