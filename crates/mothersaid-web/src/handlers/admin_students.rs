//! Admin student roster: search, filters, and record editing.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

use mothersaid_common::academics::{filter_students, unique_values, ClassLevel};
use mothersaid_common::entities::Student;
use mothersaid_common::error::SchoolError;

use crate::flash::{self, Flash};
use crate::layout::{self, esc, fmt_date};
use crate::session;
use crate::state::SharedState;

const STUDENTS_PATH: &str = "/portal/admin/dashboard/students";

#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    /// Search over name or admission number.
    pub q: Option<String>,
    pub class: Option<String>,
    /// "all" | "true" | "false"
    pub active: Option<String>,
    /// Admission number whose edit form is open.
    pub edit: Option<String>,
}

impl StudentQuery {
    fn class_param(&self) -> Option<&str> {
        self.class.as_deref().filter(|v| !v.is_empty() && *v != "all")
    }

    fn active_param(&self) -> Option<bool> {
        match self.active.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}

pub async fn page(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(query): Query<StudentQuery>,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let (token, role) = session::require_admin(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let students = match state.api.list_students(&token).await {
        Ok(students) => students,
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(err.user_message("Failed to load students")));
            vec![]
        }
    };

    let content = render_page(&students, &query);
    Ok((
        jar,
        layout::admin_page("Students", STUDENTS_PATH, &role, flash.as_ref(), &content),
    ))
}

fn render_page(students: &[Student], query: &StudentQuery) -> String {
    let filtered = filter_students(
        students,
        query.q.as_deref().unwrap_or(""),
        query.class_param(),
        query.active_param(),
    );

    let classes = unique_values(students, |s: &Student| s.current_class.as_str());
    let class_options: String = classes
        .iter()
        .map(|c| {
            let sel = if Some(c.as_str()) == query.class_param() {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{c}"{sel}>{c}</option>"#, c = esc(c))
        })
        .collect();

    let active_options = {
        let selected = query.active.as_deref().unwrap_or("all");
        ["all", "true", "false"]
            .iter()
            .map(|v| {
                let label = match *v {
                    "true" => "Active",
                    "false" => "Inactive",
                    _ => "All statuses",
                };
                let sel = if *v == selected { " selected" } else { "" };
                format!(r#"<option value="{v}"{sel}>{label}</option>"#)
            })
            .collect::<String>()
    };

    let rows: String = if filtered.is_empty() {
        r#"<tr><td colspan="6" class="empty-state">No students found</td></tr>"#.to_string()
    } else {
        filtered
            .iter()
            .map(|s| {
                let status = if s.is_active {
                    r#"<span class="badge badge-success">Active</span>"#
                } else {
                    r#"<span class="badge badge-danger">Inactive</span>"#
                };
                format!(
                    r#"<tr>
    <td>{name}</td>
    <td>{admission}</td>
    <td>{class}</td>
    <td>{guardian}</td>
    <td>{status}</td>
    <td><a class="btn btn-outline btn-sm" href="{path}?edit={admission_enc}">Edit</a></td>
</tr>"#,
                    name = esc(&s.full_name),
                    admission = esc(&s.admission_number),
                    class = esc(&s.current_class),
                    guardian = esc(&s.guardian_name),
                    status = status,
                    path = STUDENTS_PATH,
                    admission_enc = esc(&s.admission_number),
                )
            })
            .collect()
    };

    let edit_form = query
        .edit
        .as_deref()
        .and_then(|admission| students.iter().find(|s| s.admission_number == admission))
        .map(render_edit_form)
        .unwrap_or_default();

    format!(
        r#"<div class="page-header">
    <h1>Students</h1>
    <p class="muted">Manage and view all students</p>
</div>
<form method="get" action="{path}" class="filter-bar">
    <input name="q" placeholder="Search students..." value="{q}">
    <select name="class">
        <option value="all">All classes</option>
        {class_options}
    </select>
    <select name="active">{active_options}</select>
    <button type="submit" class="btn btn-outline">Filter</button>
</form>
{edit_form}
<div class="card">
    <table class="table">
        <thead><tr><th>Name</th><th>Admission No.</th><th>Class</th><th>Guardian</th><th>Status</th><th></th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
</div>"#,
        path = STUDENTS_PATH,
        q = esc(query.q.as_deref().unwrap_or("")),
    )
}

fn render_edit_form(student: &Student) -> String {
    let class_options: String = ClassLevel::ALL
        .iter()
        .map(|c| {
            let sel = if c.as_str() == student.current_class {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{sel}>{}</option>"#,
                c.as_str(),
                c.label()
            )
        })
        .collect();
    let active_checked = if student.is_active { " checked" } else { "" };

    format!(
        r#"<div class="card edit-card">
    <div class="card-header">Edit Student — {admission}</div>
    <form method="post" action="{path}/{admission}">
        <div class="form-grid">
            <div>
                <label for="full_name">Full Name</label>
                <input id="full_name" name="full_name" value="{name}" required>
            </div>
            <div>
                <label for="current_class">Class</label>
                <select id="current_class" name="current_class">{class_options}</select>
            </div>
            <div>
                <label for="gender">Gender</label>
                <input id="gender" name="gender" value="{gender}" required>
            </div>
            <div>
                <label for="date_of_birth">Date of Birth</label>
                <input id="date_of_birth" name="date_of_birth" type="date" value="{dob}" required>
            </div>
            <div>
                <label for="guardian_name">Guardian Name</label>
                <input id="guardian_name" name="guardian_name" value="{guardian}" required>
            </div>
            <div>
                <label for="guardian_phone">Guardian Phone</label>
                <input id="guardian_phone" name="guardian_phone" value="{phone}" required>
            </div>
            <div>
                <label for="guardian_email">Guardian Email</label>
                <input id="guardian_email" name="guardian_email" type="email" value="{email}" required>
            </div>
            <div>
                <label for="date_admitted">Date Admitted</label>
                <input id="date_admitted" name="date_admitted" type="date" value="{admitted}" required>
            </div>
            <div>
                <label for="state_of_origin">State of Origin</label>
                <input id="state_of_origin" name="state_of_origin" value="{state}" required>
            </div>
            <div>
                <label for="local_government">Local Government</label>
                <input id="local_government" name="local_government" value="{lga}" required>
            </div>
            <div class="checkbox-row">
                <label><input type="checkbox" name="is_active" value="true"{active_checked}> Active</label>
            </div>
        </div>
        <button type="submit" class="btn btn-primary">Save Changes</button>
        <a class="btn btn-outline" href="{path}">Cancel</a>
    </form>
</div>"#,
        path = STUDENTS_PATH,
        admission = esc(&student.admission_number),
        name = esc(&student.full_name),
        gender = esc(&student.gender),
        dob = student.date_of_birth.format("%Y-%m-%d"),
        guardian = esc(&student.guardian_name),
        phone = esc(&student.guardian_phone),
        email = esc(&student.guardian_email),
        admitted = student.date_admitted.format("%Y-%m-%d"),
        state = esc(&student.state_of_origin),
        lga = esc(&student.local_government),
    )
}

#[derive(Debug, Deserialize)]
pub struct StudentUpdateForm {
    pub full_name: String,
    pub current_class: String,
    pub gender: String,
    pub date_of_birth: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: String,
    pub date_admitted: String,
    pub state_of_origin: String,
    pub local_government: String,
    /// Checkbox: present ("true") when checked, absent otherwise.
    pub is_active: Option<String>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, SchoolError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SchoolError::Validation(format!("{field} must be a valid date")))
}

impl StudentUpdateForm {
    fn into_student(self, admission_number: String) -> Result<Student, SchoolError> {
        Ok(Student {
            full_name: self.full_name,
            admission_number,
            current_class: self.current_class,
            gender: self.gender,
            date_of_birth: parse_date("Date of birth", &self.date_of_birth)?,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
            guardian_email: self.guardian_email,
            is_active: self.is_active.is_some(),
            date_admitted: parse_date("Date admitted", &self.date_admitted)?,
            state_of_origin: self.state_of_origin,
            local_government: self.local_government,
        })
    }
}

pub async fn update(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(admission_number): Path<String>,
    Form(form): Form<StudentUpdateForm>,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;

    let student = match form.into_student(admission_number) {
        Ok(student) => student,
        Err(err) => {
            let jar = flash::set_flash(jar, Flash::error(err.user_message("Invalid student record")));
            return Ok((jar, Redirect::to(STUDENTS_PATH)));
        }
    };

    let jar = match state.api.update_student(&token, &student).await {
        Ok(()) => flash::set_flash(jar, Flash::success("Student updated successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(jar, Flash::error(err.user_message("Failed to update student"))),
    };
    Ok((jar, Redirect::to(STUDENTS_PATH)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> StudentUpdateForm {
        StudentUpdateForm {
            full_name: "Adaeze Obi".to_string(),
            current_class: "JSS2".to_string(),
            gender: "female".to_string(),
            date_of_birth: "2011-04-02".to_string(),
            guardian_name: "N. Obi".to_string(),
            guardian_phone: "+2348012345678".to_string(),
            guardian_email: "n.obi@example.com".to_string(),
            date_admitted: "2023-09-11".to_string(),
            state_of_origin: "lagos".to_string(),
            local_government: "Ikeja".to_string(),
            is_active: None,
        }
    }

    #[test]
    fn unchecked_checkbox_means_inactive() {
        let student = form().into_student("MAS-2023-0117".to_string()).unwrap();
        assert!(!student.is_active);
        assert_eq!(student.admission_number, "MAS-2023-0117");
    }

    #[test]
    fn bad_date_is_a_validation_error() {
        let mut bad = form();
        bad.date_of_birth = "02/04/2011".to_string();
        let err = bad.into_student("MAS-2023-0117".to_string()).unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }

    #[test]
    fn status_dropdown_maps_to_bool() {
        let query = StudentQuery {
            active: Some("false".to_string()),
            ..Default::default()
        };
        assert_eq!(query.active_param(), Some(false));
        let query = StudentQuery {
            active: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(query.active_param(), None);
    }
}
