//! Student-facing endpoints: profile, academic records, reading materials.

use mothersaid_common::entities::{ReportCard, StudentMaterial, StudentProfile};
use mothersaid_common::error::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::client::{ApiClient, Download};

/// `/students/reading-materials` wraps the list in an envelope.
#[derive(Debug, Deserialize)]
struct MaterialsEnvelope {
    #[serde(default)]
    reading_materials: Vec<StudentMaterial>,
}

/// Query-string pairs for `/students/academic-records`.
fn records_query(term: Option<&str>, session: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(term) = term {
        params.push(("term", term.to_string()));
    }
    if let Some(session) = session {
        params.push(("session", session.to_string()));
    }
    params
}

impl ApiClient {
    #[instrument(skip(self, token))]
    pub async fn student_profile(&self, token: &str) -> Result<StudentProfile> {
        let resp = self.get("/students/me").bearer_auth(token).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Fetch report cards, optionally narrowed by term and/or session.
    /// The API answers 404 when the student has no records yet; that is
    /// an empty list, not an error.
    #[instrument(skip(self, token))]
    pub async fn academic_records(
        &self,
        token: &str,
        term: Option<&str>,
        session: Option<&str>,
    ) -> Result<Vec<ReportCard>> {
        let resp = self
            .get("/students/academic-records")
            .query(&records_query(term, session))
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("no academic records for student");
            return Ok(vec![]);
        }
        Ok(Self::check(resp).await?.json().await?)
    }

    #[instrument(skip(self, token))]
    pub async fn student_materials(&self, token: &str) -> Result<Vec<StudentMaterial>> {
        let resp = self
            .get("/students/reading-materials")
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: MaterialsEnvelope = Self::check(resp).await?.json().await?;
        Ok(envelope.reading_materials)
    }

    /// Download a reading material file for the logged-in student.
    #[instrument(skip(self, token))]
    pub async fn download_material(&self, token: &str, material_id: &str) -> Result<Download> {
        let path = format!("/students/reading-materials/{material_id}/download");
        self.fetch_bytes(self.get(&path).bearer_auth(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_query_skips_absent_filters() {
        assert!(records_query(None, None).is_empty());
        assert_eq!(
            records_query(Some("First"), None),
            vec![("term", "First".to_string())]
        );
        assert_eq!(
            records_query(Some("First"), Some("2023/2024")),
            vec![
                ("term", "First".to_string()),
                ("session", "2023/2024".to_string())
            ]
        );
    }

    #[test]
    fn materials_envelope_tolerates_missing_list() {
        let envelope: MaterialsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.reading_materials.is_empty());

        let envelope: MaterialsEnvelope = serde_json::from_str(
            r#"{"reading_materials": [{
                "id": "m-1",
                "title": "Basic Algebra Workbook",
                "description": "Chapters 1-4 with exercises",
                "subject": "Mathematics",
                "file_url": "/students/reading-materials/m-1/download",
                "upload_date": "2024-03-05T09:30:00",
                "term": "Second",
                "session": "2023/2024"
            }]}"#,
        )
        .unwrap();
        assert_eq!(envelope.reading_materials.len(), 1);
        assert_eq!(envelope.reading_materials[0].subject, "Mathematics");
    }
}
