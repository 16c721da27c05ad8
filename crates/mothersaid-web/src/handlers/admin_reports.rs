//! Admin report cards: filtered listing, creation, and PDF download.
//!
//! The creation form submits one set of `subject_*` fields per subject row;
//! rows are zipped back together positionally.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use mothersaid_common::academics::{filter_report_cards, unique_values, ClassLevel, Term};
use mothersaid_common::entities::{NewReportCard, ReportCard, SubjectScore};
use mothersaid_common::error::SchoolError;

use crate::flash::{self, Flash};
use crate::handlers::{attachment, read_form_data, FormData};
use crate::layout::{self, esc, fmt_date};
use crate::session;
use crate::state::SharedState;

const REPORTS_PATH: &str = "/portal/admin/dashboard/report-cards";

/// Number of blank subject rows on the creation form.
const SUBJECT_ROWS: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub class: Option<String>,
    pub term: Option<String>,
    pub session: Option<String>,
}

impl ReportQuery {
    fn param(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty() && *v != "all")
    }
}

pub async fn page(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(query): Query<ReportQuery>,
) -> Result<(CookieJar, Html<String>), Redirect> {
    let (token, role) = session::require_admin(&jar)?;
    let (jar, mut flash) = flash::take_flash(jar);

    let cards = match state.api.list_report_cards(&token).await {
        Ok(cards) => cards,
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => {
            flash = Some(Flash::error(
                err.user_message("Failed to load report cards"),
            ));
            vec![]
        }
    };

    let content = render_page(&cards, &query);
    Ok((
        jar,
        layout::admin_page("Report Cards", REPORTS_PATH, &role, flash.as_ref(), &content),
    ))
}

fn select(name: &str, all_label: &str, values: &[String], selected: Option<&str>) -> String {
    let options: String = values
        .iter()
        .map(|v| {
            let sel = if Some(v.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{v}"{sel}>{v}</option>"#, v = esc(v))
        })
        .collect();
    format!(
        r#"<select name="{name}"><option value="all">{all_label}</option>{options}</select>"#
    )
}

fn render_page(cards: &[ReportCard], query: &ReportQuery) -> String {
    let class = ReportQuery::param(&query.class);
    let term = ReportQuery::param(&query.term);
    let session = ReportQuery::param(&query.session);
    let filtered = filter_report_cards(cards, class, term, session);

    let classes = unique_values(cards, |c: &ReportCard| c.class_name.as_str());
    let terms = unique_values(cards, |c: &ReportCard| c.term.as_str());
    let sessions = unique_values(cards, |c: &ReportCard| c.session.as_str());

    let filter_bar = format!(
        r#"<form method="get" action="{path}" class="filter-bar">
    {class_select}
    {term_select}
    {session_select}
    <button type="submit" class="btn btn-outline">Filter</button>
</form>"#,
        path = REPORTS_PATH,
        class_select = select("class", "All classes", &classes, class),
        term_select = select("term", "All terms", &terms, term),
        session_select = select("session", "All sessions", &sessions, session),
    );

    let list = if filtered.is_empty() {
        r#"<div class="empty-state">No report cards match the selected filters.</div>"#.to_string()
    } else {
        filtered.iter().map(|c| render_card(c)).collect()
    };

    format!(
        r#"<div class="page-header">
    <h1>Report Cards</h1>
    <p class="muted">Generate and manage student report cards</p>
</div>
{filter_bar}
{create_form}
{list}"#,
        create_form = render_create_form(),
    )
}

fn render_card(card: &ReportCard) -> String {
    let subject_rows: String = card
        .subjects
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td>{}</td></tr>",
                esc(&s.subject_name),
                s.ca_score,
                s.exam_score,
                s.total_score,
                esc(&s.grade),
            )
        })
        .collect();
    format!(
        r#"<div class="card report-card">
    <div class="card-header">
        <span>{student} — {term} Term, {session} ({class})</span>
        <a class="btn btn-outline btn-sm" href="{path}/{id}/download">Download PDF</a>
    </div>
    <p class="muted">Attendance: {attendance} days &middot; Generated {generated}</p>
    <table class="table">
        <thead><tr><th>Subject</th><th>CA</th><th>Exam</th><th>Total</th><th>Grade</th></tr></thead>
        <tbody>{subject_rows}</tbody>
    </table>
</div>"#,
        path = REPORTS_PATH,
        id = esc(&card.id),
        student = esc(&card.student_id),
        term = esc(&card.term),
        session = esc(&card.session),
        class = esc(&card.class_name),
        attendance = card.attendance,
        generated = fmt_date(card.date_generated),
    )
}

fn render_create_form() -> String {
    let class_options: String = ClassLevel::ALL
        .iter()
        .map(|c| format!(r#"<option value="{}">{}</option>"#, c.as_str(), c.label()))
        .collect();
    let term_options: String = Term::ALL
        .iter()
        .map(|t| format!(r#"<option value="{}">{}</option>"#, t.as_str(), t.label()))
        .collect();
    let subject_rows: String = (0..SUBJECT_ROWS)
        .map(|_| {
            r#"<tr>
    <td><input name="subject_name" placeholder="Subject"></td>
    <td><input name="subject_ca" type="number" min="0" max="40"></td>
    <td><input name="subject_exam" type="number" min="0" max="60"></td>
    <td><input name="subject_grade" placeholder="A1"></td>
    <td><input name="subject_remark" placeholder="Remark"></td>
</tr>"#
                .to_string()
        })
        .collect();

    format!(
        r#"<details class="card create-card">
    <summary>Create Report Card</summary>
    <form method="post" action="{path}" enctype="multipart/form-data">
        <div class="form-grid">
            <div>
                <label for="student_id">Admission Number</label>
                <input id="student_id" name="student_id" placeholder="MAS-2024-0001" required>
            </div>
            <div>
                <label for="class_name">Class</label>
                <select id="class_name" name="class_name" required>
                    <option value="" disabled selected>Select class</option>
                    {class_options}
                </select>
            </div>
            <div>
                <label for="term">Term</label>
                <select id="term" name="term" required>
                    <option value="" disabled selected>Select term</option>
                    {term_options}
                </select>
            </div>
            <div>
                <label for="session">Session</label>
                <input id="session" name="session" placeholder="2024/2025" required>
            </div>
            <div>
                <label for="attendance">Attendance (days)</label>
                <input id="attendance" name="attendance" type="number" min="0" required>
            </div>
            <div>
                <label for="position_in_class">Position in Class</label>
                <input id="position_in_class" name="position_in_class" type="number" min="1">
            </div>
            <div>
                <label for="total_students">Total Students</label>
                <input id="total_students" name="total_students" type="number" min="1">
            </div>
        </div>
        <h3>Subjects</h3>
        <table class="table">
            <thead><tr><th>Subject</th><th>CA</th><th>Exam</th><th>Grade</th><th>Remark</th></tr></thead>
            <tbody>{subject_rows}</tbody>
        </table>
        <div class="form-grid">
            <div>
                <label for="teacher_name">Class Teacher</label>
                <input id="teacher_name" name="teacher_name">
            </div>
            <div>
                <label for="principal_name">Principal</label>
                <input id="principal_name" name="principal_name">
            </div>
            <div>
                <label for="teacher_remark">Teacher's Remark</label>
                <textarea id="teacher_remark" name="teacher_remark" rows="2"></textarea>
            </div>
            <div>
                <label for="principal_remark">Principal's Remark</label>
                <textarea id="principal_remark" name="principal_remark" rows="2"></textarea>
            </div>
        </div>
        <button type="submit" class="btn btn-primary">Create Report Card</button>
    </form>
</details>"#,
        path = REPORTS_PATH,
    )
}

fn parse_score(field: &str, value: &str) -> Result<i32, SchoolError> {
    value
        .trim()
        .parse()
        .map_err(|_| SchoolError::Validation(format!("{field} must be a number")))
}

fn optional_number(form: &FormData, name: &str) -> Result<Option<i32>, SchoolError> {
    match form.first(name).map(str::trim) {
        Some("") | None => Ok(None),
        Some(value) => parse_score(name, value).map(Some),
    }
}

fn optional_text(form: &FormData, name: &str) -> Option<String> {
    form.first(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Zip the repeated subject rows back into scores. Blank rows are skipped;
/// a card without any filled row is rejected.
fn collect_subjects(form: &FormData) -> Result<Vec<SubjectScore>, SchoolError> {
    let names = form.all("subject_name");
    let cas = form.all("subject_ca");
    let exams = form.all("subject_exam");
    let grades = form.all("subject_grade");
    let remarks = form.all("subject_remark");

    let mut subjects = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let ca = parse_score("CA score", cas.get(i).copied().unwrap_or(""))?;
        let exam = parse_score("Exam score", exams.get(i).copied().unwrap_or(""))?;
        subjects.push(SubjectScore {
            subject_name: name.to_string(),
            ca_score: ca,
            exam_score: exam,
            total_score: ca + exam,
            grade: grades.get(i).copied().unwrap_or("").trim().to_string(),
            teacher_remark: remarks.get(i).copied().unwrap_or("").trim().to_string(),
        });
    }
    if subjects.is_empty() {
        return Err(SchoolError::Validation(
            "Please add at least one subject".to_string(),
        ));
    }
    Ok(subjects)
}

fn build_report_card(form: &FormData) -> Result<NewReportCard, SchoolError> {
    Ok(NewReportCard {
        student_id: form.require("student_id")?,
        term: form.require("term")?,
        session: form.require("session")?,
        class_name: form.require("class_name")?,
        position_in_class: optional_number(form, "position_in_class")?,
        total_students: optional_number(form, "total_students")?,
        attendance: parse_score("Attendance", form.first("attendance").unwrap_or(""))?,
        teacher_name: optional_text(form, "teacher_name"),
        principal_name: optional_text(form, "principal_name"),
        teacher_remark: optional_text(form, "teacher_remark"),
        principal_remark: optional_text(form, "principal_remark"),
        subjects: collect_subjects(form)?,
    })
}

pub async fn create(
    State(state): State<SharedState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), Redirect> {
    let (token, _) = session::require_admin(&jar)?;

    let outcome = async {
        let form = read_form_data(multipart).await?;
        let card = build_report_card(&form)?;
        state.api.create_report_card(&token, &card).await
    }
    .await;

    let jar = match outcome {
        Ok(()) => flash::set_flash(jar, Flash::success("Report card created successfully")),
        Err(err) if err.is_auth() => return Err(Redirect::to(session::ADMIN_LOGIN)),
        Err(err) => flash::set_flash(
            jar,
            Flash::error(err.user_message("Failed to create report card")),
        ),
    };
    Ok((jar, Redirect::to(REPORTS_PATH)))
}

pub async fn download(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(report_id): Path<String>,
) -> Response {
    let Ok((token, _)) = session::require_admin(&jar) else {
        return Redirect::to(session::ADMIN_LOGIN).into_response();
    };
    match state.api.download_report_card(&token, &report_id).await {
        Ok(download) => attachment(download, &format!("report_card_{report_id}.pdf")),
        Err(err) if err.is_auth() => Redirect::to(session::ADMIN_LOGIN).into_response(),
        Err(err) => {
            let jar = flash::set_flash(
                jar,
                Flash::error(err.user_message("Failed to download report card")),
            );
            (jar, Redirect::to(REPORTS_PATH)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> FormData {
        FormData {
            fields: fields
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            files: vec![],
        }
    }

    fn base_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("student_id", "MAS-2024-0001"),
            ("term", "First"),
            ("session", "2024/2025"),
            ("class_name", "JSS1"),
            ("attendance", "108"),
            ("position_in_class", "4"),
            ("total_students", "31"),
            ("subject_name", "Mathematics"),
            ("subject_ca", "28"),
            ("subject_exam", "55"),
            ("subject_grade", "B2"),
            ("subject_remark", "Good effort"),
            ("subject_name", "English"),
            ("subject_ca", "33"),
            ("subject_exam", "51"),
            ("subject_grade", "B2"),
            ("subject_remark", "Consistent"),
            // Trailing blank row, as the form always submits
            ("subject_name", ""),
            ("subject_ca", ""),
            ("subject_exam", ""),
            ("subject_grade", ""),
            ("subject_remark", ""),
        ]
    }

    #[test]
    fn subject_rows_zip_and_blank_rows_drop() {
        let card = build_report_card(&form(&base_fields())).unwrap();
        assert_eq!(card.subjects.len(), 2);
        assert_eq!(card.subjects[0].total_score, 83);
        assert_eq!(card.subjects[1].subject_name, "English");
        assert_eq!(card.position_in_class, Some(4));
    }

    #[test]
    fn card_without_subjects_is_rejected() {
        let fields: Vec<(&str, &str)> = base_fields()
            .into_iter()
            .filter(|(n, _)| !n.starts_with("subject_"))
            .collect();
        let err = build_report_card(&form(&fields)).unwrap_err();
        assert!(err.to_string().contains("at least one subject"));
    }

    #[test]
    fn non_numeric_score_is_rejected() {
        let mut fields = base_fields();
        for (name, value) in &mut fields {
            if *name == "subject_ca" && *value == "28" {
                *value = "twenty-eight";
            }
        }
        let err = build_report_card(&form(&fields)).unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }
}
