//! Supabase Storage client.

use serde::Deserialize;
use serde_json::json;

use crate::server::{
    error::provider::ProviderError,
    provider::{decode_json, ensure_success, transport},
};

const PROVIDER: &str = "Supabase Storage";

/// Storage buckets used by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Avatars,
    Certifications,
    BlogImages,
    EducatorVideos,
    Invoices,
}

impl Bucket {
    pub fn name(self) -> &'static str {
        match self {
            Self::Avatars => "avatars",
            Self::Certifications => "certifications",
            Self::BlogImages => "blog-images",
            Self::EducatorVideos => "educator-videos",
            Self::Invoices => "invoices",
        }
    }
}

#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    supabase_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

impl StorageClient {
    pub fn new(supabase_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            supabase_url: supabase_url.into(),
            service_key: service_key.into(),
        }
    }

    fn object_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.supabase_url,
            bucket.name(),
            path.trim_start_matches('/')
        )
    }

    /// Uploads `bytes` to `bucket/path`, replacing any existing object.
    pub async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ProviderError> {
        let resp = self
            .http
            .post(self.object_url(bucket, path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        ensure_success(PROVIDER, resp).await?;

        tracing::debug!(bucket = bucket.name(), path = %path, "Uploaded object");

        Ok(())
    }

    /// Public URL of an object in a public bucket.
    pub fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.supabase_url,
            bucket.name(),
            path.trim_start_matches('/')
        )
    }

    /// Object path of a URL built by [`Self::public_url`] for `bucket`.
    pub fn object_path(&self, bucket: Bucket, public_url: &str) -> Option<String> {
        public_url
            .strip_prefix(&self.public_url(bucket, ""))
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }

    /// Creates a URL granting read access to a private object for `expires_in` seconds.
    pub async fn create_signed_url(
        &self,
        bucket: Bucket,
        path: &str,
        expires_in: u32,
    ) -> Result<String, ProviderError> {
        let resp = self
            .http
            .post(format!(
                "{}/storage/v1/object/sign/{}/{}",
                self.supabase_url,
                bucket.name(),
                path.trim_start_matches('/')
            ))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&json!({ "expiresIn": expires_in }))
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        let signed: SignedUrlResponse = decode_json(PROVIDER, resp).await?;

        // Supabase answers with a path relative to the storage API root
        Ok(format!("{}/storage/v1{}", self.supabase_url, signed.signed_url))
    }

    pub async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), ProviderError> {
        if paths.is_empty() {
            return Ok(());
        }

        let resp = self
            .http
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.supabase_url,
                bucket.name()
            ))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        ensure_success(PROVIDER, resp).await?;

        Ok(())
    }
}
