//! Upload checks and the educator presentation video.

use crate::{
    model::api::UploadDto,
    server::{
        data::educator_profile::EducatorProfileRepository,
        error::Error,
        model::app::AppState,
        provider::storage::Bucket,
        service::profile::require_educator,
    },
};

const MIB: usize = 1024 * 1024;

/// A file received as a raw request body.
pub struct Upload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Accepted content types, with the file extension stored for each, and a size limit.
pub struct UploadRule {
    pub kind: &'static str,
    pub allowed: &'static [(&'static str, &'static str)],
    pub max_bytes: usize,
}

pub const IMAGE_UPLOAD: UploadRule = UploadRule {
    kind: "Image",
    allowed: &[
        ("image/jpeg", "jpg"),
        ("image/png", "png"),
        ("image/webp", "webp"),
    ],
    max_bytes: 5 * MIB,
};

pub const DOCUMENT_UPLOAD: UploadRule = UploadRule {
    kind: "Document",
    allowed: &[
        ("application/pdf", "pdf"),
        ("image/jpeg", "jpg"),
        ("image/png", "png"),
    ],
    max_bytes: 10 * MIB,
};

pub const VIDEO_UPLOAD: UploadRule = UploadRule {
    kind: "Video",
    allowed: &[("video/mp4", "mp4"), ("video/webm", "webm")],
    max_bytes: 100 * MIB,
};

impl UploadRule {
    /// Returns the extension for an accepted upload.
    pub fn check(&self, upload: &Upload) -> Result<&'static str, Error> {
        // Ignore parameters such as `; charset=binary`
        let content_type = upload
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let extension = self
            .allowed
            .iter()
            .find(|(allowed, _)| *allowed == content_type)
            .map(|(_, extension)| *extension)
            .ok_or_else(|| {
                let allowed: Vec<&str> = self.allowed.iter().map(|(mime, _)| *mime).collect();

                Error::Validation(format!(
                    "{} must be one of {}",
                    self.kind,
                    allowed.join(", ")
                ))
            })?;

        if upload.bytes.is_empty() {
            return Err(Error::Validation(format!("{} is empty", self.kind)));
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(Error::Validation(format!(
                "{} must not exceed {} MiB",
                self.kind,
                self.max_bytes / MIB
            )));
        }

        Ok(extension)
    }
}

pub struct MediaService<'a> {
    state: &'a AppState,
}

impl<'a> MediaService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Replaces the calling educator's presentation video.
    pub async fn upload_video(
        &self,
        user: &entity::app_user::Model,
        upload: Upload,
    ) -> Result<UploadDto, Error> {
        let educator = require_educator(&self.state.db, user).await?;
        let extension = VIDEO_UPLOAD.check(&upload)?;

        let path = format!("{}/presentation.{}", educator.id, extension);
        self.state
            .storage
            .upload(
                Bucket::EducatorVideos,
                &path,
                &upload.content_type,
                upload.bytes,
            )
            .await?;

        let url = self.state.storage.public_url(Bucket::EducatorVideos, &path);
        EducatorProfileRepository::new(&self.state.db)
            .set_video_url(educator, url.clone())
            .await?;

        tracing::info!(user_id = %user.id, "Educator video uploaded");

        Ok(UploadDto { url })
    }
}
