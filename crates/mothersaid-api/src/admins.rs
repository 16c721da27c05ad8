//! Admin management endpoints: the student roster, admin verification, and
//! the dashboard summary.

use mothersaid_common::entities::{Admin, DashboardInfo, Student};
use mothersaid_common::error::Result;
use serde_json::json;
use tracing::instrument;

use crate::client::ApiClient;

impl ApiClient {
    #[instrument(skip(self, token))]
    pub async fn list_students(&self, token: &str) -> Result<Vec<Student>> {
        let resp = self.get("/admin/students").bearer_auth(token).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Full-record update keyed by admission number.
    #[instrument(skip(self, token, student), fields(admission_number = %student.admission_number))]
    pub async fn update_student(&self, token: &str, student: &Student) -> Result<()> {
        let path = format!("/admin/students/{}", student.admission_number);
        let resp = self.put(&path).bearer_auth(token).json(student).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Totals and recent uploads for the admin landing page.
    #[instrument(skip(self, token))]
    pub async fn dashboard_info(&self, token: &str) -> Result<DashboardInfo> {
        let resp = self
            .get("/admin/students-info")
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    #[instrument(skip(self, token))]
    pub async fn list_admins(&self, token: &str) -> Result<Vec<Admin>> {
        let resp = self.get("/admin/all-admin").bearer_auth(token).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Activate a pending admin account.
    #[instrument(skip(self, token))]
    pub async fn verify_admin(&self, token: &str, username: &str) -> Result<()> {
        let resp = self
            .put("/admin/verify-admin")
            .bearer_auth(token)
            .json(&json!({ "username": username }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn delete_admin(&self, token: &str, username: &str) -> Result<()> {
        let path = format!("/admin/admins/{username}");
        let resp = self.delete(&path).bearer_auth(token).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
