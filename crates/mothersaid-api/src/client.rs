//! Core HTTP plumbing shared by the resource modules.

use std::env;

use mothersaid_common::error::{Result, SchoolError};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{RequestBuilder, Response};
use tracing::warn;

/// Environment variable carrying the API base URL.
pub const BASE_URL_ENV: &str = "SCHOOL_API_URL";

/// Client for the school REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Read the base URL from `SCHOOL_API_URL`.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV)
            .map_err(|_| SchoolError::Config(format!("{BASE_URL_ENV} is not set")))?;
        Ok(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'));
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Reject non-2xx responses, pulling the `detail` string out of the
    /// error body when the API provided one.
    pub(crate) async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        warn!(status = status.as_u16(), ?detail, "API request rejected");
        Err(SchoolError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    /// Fetch a binary endpoint (report card PDFs, material files, news
    /// images) into memory, keeping the upstream filename and content type.
    pub(crate) async fn fetch_bytes(&self, req: RequestBuilder) -> Result<Download> {
        let resp = Self::check(req.send().await?).await?;
        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_filename);
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await?.to_vec();
        Ok(Download {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// A downloaded blob plus the response metadata the portal forwards on.
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A file received from a portal form, on its way to a multipart endpoint.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part> {
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

/// Pull `detail` out of an API error body, if the body is JSON and has one.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}

/// Extract the filename from a `Content-Disposition` header value.
pub(crate) fn disposition_filename(value: &str) -> Option<String> {
    let (_, name) = value.split_once("filename=")?;
    let name = name.trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_from_json_body() {
        assert_eq!(
            error_detail(r#"{"detail": "Invalid credentials"}"#),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(error_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(error_detail("<html>502</html>"), None);
        // FastAPI validation errors carry a list, not a string
        assert_eq!(error_detail(r#"{"detail": [{"loc": ["body"]}]}"#), None);
    }

    #[test]
    fn disposition_filename_variants() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="term1.pdf""#),
            Some("term1.pdf".to_string())
        );
        assert_eq!(
            disposition_filename("attachment; filename=notes.docx"),
            Some("notes.docx".to_string())
        );
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/students/me"), "http://localhost:8000/students/me");
    }
}
