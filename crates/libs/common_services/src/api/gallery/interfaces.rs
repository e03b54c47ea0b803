use utoipa::ToSchema;

/// Multipart form for a gallery upload.
#[derive(Debug, ToSchema)]
pub struct UploadMediaForm {
    /// A photo (jpg, jpeg, png, gif, webp) or video (mp4, mov, webm).
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
