//! HTTP handlers for all routes.

pub mod admin;
pub mod admin_admins;
pub mod admin_materials;
pub mod admin_news;
pub mod admin_reports;
pub mod admin_students;
pub mod auth;
pub mod news;
pub mod site;
pub mod student;

use axum::body::Body;
use axum::extract::Multipart;
use axum::http::header;
use axum::response::Response;

use mothersaid_api::{Download, UploadFile};
use mothersaid_common::error::SchoolError;

/// Turn a proxied blob into an attachment response, preferring the
/// upstream filename over the caller's fallback.
pub(crate) fn attachment(download: Download, fallback_name: &str) -> Response {
    let file_name = download
        .file_name
        .unwrap_or_else(|| fallback_name.to_string());
    let content_type = download
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!(r#"attachment; filename="{file_name}""#),
        )
        .body(Body::from(download.bytes))
        .expect("static headers are valid")
}

/// Serve a proxied blob inline (news cover images).
pub(crate) fn inline_blob(download: Download) -> Response {
    let content_type = download
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(download.bytes))
        .expect("static headers are valid")
}

/// A parsed multipart form: text fields in submission order plus any files.
/// Repeated field names are kept — the report card form submits one row of
/// subject fields per subject.
#[derive(Debug, Default)]
pub(crate) struct FormData {
    fields: Vec<(String, String)>,
    files: Vec<(String, UploadFile)>,
}

impl FormData {
    pub(crate) fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn require(&self, name: &str) -> Result<String, SchoolError> {
        self.first(name)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| SchoolError::Validation(format!("{name} is required")))
    }

    pub(crate) fn all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub(crate) fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        let idx = self.files.iter().position(|(n, _)| n == name)?;
        Some(self.files.remove(idx).1)
    }
}

/// Drain a multipart request. A file input left empty submits a part with
/// no filename and no bytes; those are dropped rather than kept as empty
/// uploads.
pub(crate) async fn read_form_data(mut multipart: Multipart) -> Result<FormData, SchoolError> {
    let mut form = FormData::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SchoolError::Validation(format!("malformed form: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| SchoolError::Validation(format!("upload failed: {e}")))?
                    .to_vec();
                if file_name.is_empty() || bytes.is_empty() {
                    continue;
                }
                form.files.push((
                    name,
                    UploadFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                ));
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| SchoolError::Validation(format!("malformed form: {e}")))?;
                form.fields.push((name, value));
            }
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_prefers_upstream_filename() {
        let download = Download {
            file_name: Some("term_one.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            bytes: vec![1, 2, 3],
        };
        let resp = attachment(download, "report_card_rc-1.pdf");
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(disposition, r#"attachment; filename="term_one.pdf""#);
    }

    #[test]
    fn attachment_falls_back_when_upstream_is_silent() {
        let download = Download {
            file_name: None,
            content_type: None,
            bytes: vec![],
        };
        let resp = attachment(download, "download");
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            r#"attachment; filename="download""#
        );
    }

    #[test]
    fn form_data_keeps_repeated_fields_in_order() {
        let form = FormData {
            fields: vec![
                ("subject_name".to_string(), "Mathematics".to_string()),
                ("ca_score".to_string(), "25".to_string()),
                ("subject_name".to_string(), "English".to_string()),
                ("ca_score".to_string(), "31".to_string()),
            ],
            files: vec![],
        };
        assert_eq!(form.all("subject_name"), vec!["Mathematics", "English"]);
        assert_eq!(form.first("ca_score"), Some("25"));
    }

    #[test]
    fn require_rejects_blank_values() {
        let form = FormData {
            fields: vec![("title".to_string(), "   ".to_string())],
            files: vec![],
        };
        assert!(form.require("title").is_err());
        assert!(form.require("missing").is_err());
    }
}
