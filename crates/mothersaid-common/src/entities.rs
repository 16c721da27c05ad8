/// Record types mirroring the school API's response shapes.
/// The API owns validation and lifecycle; these are plain wire mirrors
/// held only long enough to render a page.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub full_name: String,
    /// Unique identifier, also the portal login username (e.g. MAS-2024-0153).
    pub admission_number: String,
    pub current_class: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: String,
    pub is_active: bool,
    pub date_admitted: NaiveDate,
    pub state_of_origin: String,
    pub local_government: String,
}

/// `/students/me` response: the student record with report cards embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub full_name: String,
    pub admission_number: String,
    pub current_class: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: String,
    pub is_active: bool,
    pub date_admitted: NaiveDate,
    pub state_of_origin: String,
    pub local_government: String,
    #[serde(default)]
    pub report_cards: Vec<ReportCard>,
}

/// Payload for student registration. The API generates the admission number.
#[derive(Debug, Clone, Serialize)]
pub struct NewStudent {
    pub full_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub current_class: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: String,
    pub password: String,
    pub state_of_origin: String,
    pub local_government: String,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub full_name: String,
    pub username: String,
    pub email: String,
    /// "admin", "teacher" or "principal"
    pub role: String,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Report cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectScore {
    pub subject_name: String,
    /// Continuous Assessment
    pub ca_score: i32,
    pub exam_score: i32,
    pub total_score: i32,
    pub grade: String,
    pub teacher_remark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCard {
    pub id: String,
    pub student_id: String,
    pub term: String,
    pub session: String,
    pub class_name: String,
    pub position_in_class: Option<i32>,
    pub total_students: Option<i32>,
    pub attendance: i32,
    pub date_generated: NaiveDate,
    pub teacher_name: Option<String>,
    pub principal_name: Option<String>,
    pub teacher_remark: Option<String>,
    pub principal_remark: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectScore>,
}

/// Payload for report card creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewReportCard {
    pub student_id: String,
    pub term: String,
    pub session: String,
    pub class_name: String,
    pub position_in_class: Option<i32>,
    pub total_students: Option<i32>,
    pub attendance: i32,
    pub teacher_name: Option<String>,
    pub principal_name: Option<String>,
    pub teacher_remark: Option<String>,
    pub principal_remark: Option<String>,
    pub subjects: Vec<SubjectScore>,
}

// ---------------------------------------------------------------------------
// Reading materials
// ---------------------------------------------------------------------------

/// Admin-side listing shape (also used for the dashboard recent uploads).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub class_assigned: String,
    pub upload_date: NaiveDateTime,
    pub term: String,
    pub session: String,
    pub file_name: String,
}

/// Student-side listing shape; `file_url` is the API's download path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentMaterial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub file_url: String,
    pub upload_date: NaiveDateTime,
    pub term: String,
    pub session: String,
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date_uploaded: NaiveDateTime,
    /// API path serving the cover image bytes.
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// Admin dashboard summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInfo {
    pub total_students: i64,
    pub total_report_cards: i64,
    pub total_materials: i64,
    pub total_news: i64,
    #[serde(default)]
    pub recent_materials: Vec<MaterialInfo>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Admin login response: token plus the role the sidebar is filtered by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminToken {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
}

/// `/students/signup` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupReceipt {
    pub admission_number: String,
}
