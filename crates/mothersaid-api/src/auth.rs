//! Signup and login. Logins are OAuth2-style form posts; the `username`
//! field carries the admission number for students.

use mothersaid_common::entities::{AdminToken, NewStudent, SignupReceipt, Token};
use mothersaid_common::error::Result;
use tracing::instrument;

use crate::client::ApiClient;

impl ApiClient {
    /// Register a new student. The API generates and returns the admission
    /// number, which the caller must surface to the user.
    #[instrument(skip(self, student), fields(class = %student.current_class))]
    pub async fn signup(&self, student: &NewStudent) -> Result<SignupReceipt> {
        let resp = self.post("/students/signup").json(student).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    #[instrument(skip(self, password))]
    pub async fn login_student(&self, admission_number: &str, password: &str) -> Result<Token> {
        let resp = self
            .post("/students/login")
            .form(&[("username", admission_number), ("password", password)])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    #[instrument(skip(self, password))]
    pub async fn login_admin(&self, username: &str, password: &str) -> Result<AdminToken> {
        let resp = self
            .post("/admin/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
