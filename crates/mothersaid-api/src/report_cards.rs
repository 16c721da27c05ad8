//! Report card endpoints. Downloads come back as generated PDF bytes.

use mothersaid_common::entities::{NewReportCard, ReportCard};
use mothersaid_common::error::Result;
use tracing::instrument;

use crate::client::{ApiClient, Download};

impl ApiClient {
    #[instrument(skip(self, token))]
    pub async fn list_report_cards(&self, token: &str) -> Result<Vec<ReportCard>> {
        let resp = self
            .get("/admin/report-cards")
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    #[instrument(skip(self, token, card), fields(student = %card.student_id, term = %card.term))]
    pub async fn create_report_card(&self, token: &str, card: &NewReportCard) -> Result<()> {
        let resp = self
            .post("/admin/report-cards")
            .bearer_auth(token)
            .json(card)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Generated PDF for one report card.
    #[instrument(skip(self, token))]
    pub async fn download_report_card(&self, token: &str, report_id: &str) -> Result<Download> {
        let path = format!("/admin/report-cards/{report_id}/download");
        self.fetch_bytes(self.get(&path).bearer_auth(token)).await
    }
}
