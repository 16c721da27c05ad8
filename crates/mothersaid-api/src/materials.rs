//! Reading material upload. Metadata fields go first, the file part last,
//! matching the multipart layout the API expects.

use mothersaid_common::error::{Result, SchoolError};
use reqwest::multipart::Form;
use tracing::instrument;

use crate::client::{ApiClient, UploadFile};

/// Upload ceiling enforced before any bytes leave the server.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Metadata accompanying a material upload.
#[derive(Debug, Clone)]
pub struct MaterialUpload {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub class_assigned: String,
    pub term: String,
    pub session: String,
}

impl ApiClient {
    #[instrument(skip(self, token, meta, file), fields(title = %meta.title, size = file.bytes.len()))]
    pub async fn upload_material(
        &self,
        token: &str,
        meta: &MaterialUpload,
        file: UploadFile,
    ) -> Result<()> {
        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(SchoolError::Validation(
                "File size too large. Maximum size is 10MB".to_string(),
            ));
        }
        let form = Form::new()
            .text("title", meta.title.clone())
            .text("description", meta.description.clone())
            .text("subject", meta.subject.clone())
            .text("class_assigned", meta.class_assigned.clone())
            .text("term", meta.term.clone())
            .text("session", meta.session.clone())
            .part("file", file.into_part()?);
        let resp = self
            .post("/admin/reading-materials")
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn oversized_upload_rejected_without_a_request() {
        // Base URL points nowhere; the size check must fire first.
        let client = ApiClient::new("http://127.0.0.1:1");
        let meta = MaterialUpload {
            title: "Physics notes".to_string(),
            description: "Waves and optics".to_string(),
            subject: "Physics".to_string(),
            class_assigned: "SSS2".to_string(),
            term: "First".to_string(),
            session: "2024/2025".to_string(),
        };
        let file = UploadFile {
            file_name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0u8; MAX_UPLOAD_BYTES + 1],
        };
        let err = client
            .upload_material("token", &meta, file)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }
}
